//! Extraction of admission result records from the text layer of admission
//! result PDFs.
//!
//! Pages go through [`extractor::ResultExtractor`], which reads page headers
//! with [`metadata`], recognizes result lines with [`patterns`] and cleans the
//! captured fields with [`normalizer`].

pub mod error;
pub mod export;
pub mod extractor;
pub mod metadata;
pub mod models;
pub mod normalizer;
pub mod patterns;
pub mod source;

pub use error::ExtractError;
pub use extractor::ResultExtractor;
pub use models::{Config, Document, PageContext, Record};
