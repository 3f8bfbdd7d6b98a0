//! Sources of page text.

use crate::error::{BoxError, ExtractError};
use anyhow::{Context, Result};

/// Separator between pages in plain-text dumps.
pub const PAGE_BREAK: char = '\x0C';

/// Per-page plain text of a document.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Text of the page at `index`, or `None` when the page has no text layer.
    fn page_text(&self, index: usize) -> Result<Option<String>, BoxError>;
}

fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn page_at<S: AsRef<str>>(pages: &[S], index: usize) -> Result<Option<String>, BoxError> {
    pages
        .get(index)
        .map(|page| non_blank(page.as_ref()))
        .ok_or_else(|| format!("page {} out of range ({} pages)", index + 1, pages.len()).into())
}

impl<S: AsRef<str>> PageSource for Vec<S> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>, BoxError> {
        page_at(self, index)
    }
}

/// Text layer of a PDF file.
pub struct PdfDocument {
    pages: Vec<String>,
}

impl PdfDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExtractError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
            ExtractError::processing(format!("failed to extract text from PDF: {e}"))
        })?;
        log::debug!("Extracted text of {} pages from {} bytes", pages.len(), bytes.len());
        Ok(Self { pages })
    }

    pub fn open(path: &str) -> Result<Self, ExtractError> {
        let bytes = std::fs::read(path).map_err(ExtractError::processing)?;
        Self::from_bytes(&bytes)
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>, BoxError> {
        page_at(&self.pages, index)
    }
}

/// Text already pulled out of a PDF, one page per form-feed separated chunk.
pub struct TextDump {
    pages: Vec<String>,
}

impl TextDump {
    pub fn new(text: &str) -> Self {
        let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
        // a dump usually ends with a page break
        if pages.len() > 1 && pages.last().is_some_and(|page| page.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    pub fn open(path: &str) -> Result<Self, ExtractError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::processing(format!("Failed to read file {}: {}", path, e)))?;
        Ok(Self::new(&text))
    }
}

impl PageSource for TextDump {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>, BoxError> {
        page_at(&self.pages, index)
    }
}

/// Fetches a PDF over HTTP.
pub async fn download(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::Client::new()
        .get(url)
        .timeout(std::time::Duration::from_secs(30))
        .send()
        .await
        .with_context(|| format!("Failed to fetch URL: {}", url))?;

    if !response.status().is_success() {
        return Err(anyhow::anyhow!("HTTP request failed with status: {}", response.status()));
    }

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read response body from: {}", url))?;

    log::debug!("Downloaded {} bytes from {}", bytes.len(), url);

    Ok(bytes.to_vec())
}
