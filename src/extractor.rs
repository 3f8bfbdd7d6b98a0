//! Page and document processing.

use crate::error::ExtractError;
use crate::metadata::scan_page;
use crate::models::{Document, PageContext, Record};
use crate::normalizer::{clean_condition, clean_name, parse_score};
use crate::patterns::{match_with, LinePattern, LINE_PATTERNS};
use crate::source::PageSource;

/// Turns page texts into ordered records.
///
/// Sequence numbers and the document year/period carry over from page to
/// page, so pages must be fed in document order. Use a fresh extractor per
/// document.
pub struct ResultExtractor {
    patterns: &'static [LinePattern],
    next_sequence: u32,
    year: String,
    period: String,
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultExtractor {
    pub fn new() -> Self {
        Self::with_patterns(&LINE_PATTERNS)
    }

    pub(crate) fn with_patterns(patterns: &'static [LinePattern]) -> Self {
        Self {
            patterns,
            next_sequence: 1,
            year: String::new(),
            period: String::new(),
        }
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    /// The first page that names a year fixes year and period for the rest of
    /// the document.
    fn resolve_year_period(&mut self, context: &mut PageContext) {
        if self.year.is_empty() && !context.year.is_empty() {
            self.year = std::mem::take(&mut context.year);
            self.period = std::mem::take(&mut context.period);
        }
        context.year = self.year.clone();
        context.period = self.period.clone();
    }

    /// Extracts the records of one page.
    ///
    /// A page without text yields no records and leaves the document state
    /// untouched.
    pub fn process_page(&mut self, text: &str) -> Result<Vec<Record>, ExtractError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut context = scan_page(text);
        self.resolve_year_period(&mut context);

        let mut records = Vec::new();

        for line in text.lines() {
            let Some(found) = match_with(self.patterns, line)? else {
                continue;
            };

            records.push(Record {
                sequence: self.next_sequence,
                id: found.id,
                name: clean_name(&found.name),
                score: parse_score(&found.score),
                status: clean_condition(&found.status),
                modality: context.modality.clone(),
                program: context.program.clone(),
                faculty: context.faculty.clone(),
                year: context.year.clone(),
                period: context.period.clone(),
            });
            self.next_sequence += 1;
        }

        log::debug!(
            "Page yielded {} records (modality: {:?}, program: {:?})",
            records.len(),
            context.modality,
            context.program
        );

        Ok(records)
    }

    /// Extracts every page of `source` in order.
    ///
    /// `progress` is called after each page with (pages done, total pages,
    /// records so far). Any failure aborts the whole document.
    pub fn process_document<P, F>(
        mut self,
        source: &P,
        mut progress: Option<F>,
    ) -> Result<Document, ExtractError>
    where
        P: PageSource + ?Sized,
        F: FnMut(usize, usize, usize),
    {
        let total_pages = source.page_count();
        let mut records = Vec::new();

        for index in 0..total_pages {
            let text = source.page_text(index).map_err(ExtractError::processing)?;

            match text {
                Some(text) => {
                    let page_records = self
                        .process_page(&text)
                        .map_err(ExtractError::processing)?;
                    records.extend(page_records);
                }
                None => log::warn!("Page {} has no extractable text", index + 1),
            }

            if let Some(callback) = progress.as_mut() {
                callback(index + 1, total_pages, records.len());
            }
        }

        log::info!(
            "Extracted {} records from {} pages (year: {:?}, period: {:?})",
            records.len(),
            total_pages,
            self.year,
            self.period
        );

        Ok(Document {
            records,
            year: self.year,
            period: self.period,
        })
    }
}
