//! Error types for result extraction.

/// Boxed error produced by page sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort an extraction run.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The page source failed, or a line could not be processed. Fatal for the
    /// whole document.
    #[error("Error processing PDF: {source}")]
    PdfProcessing {
        #[source]
        source: BoxError,
    },

    /// A line was recognized by a pattern whose extraction step then failed.
    #[error("Error processing pattern {pattern}: {cause}")]
    PatternMatch {
        /// Name of the pattern that recognized the line
        pattern: &'static str,
        /// What the extraction step could not find
        cause: String,
    },
}

impl ExtractError {
    /// Wraps any error as a document-level processing failure.
    pub fn processing<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::PdfProcessing {
            source: source.into(),
        }
    }
}
