//! PDF processing module.
//!
//! Thin text-rendering collaborator: turns a binary document into the one
//! linear text stream the extraction pipeline consumes. Scanned documents
//! without embedded text simply yield an empty string; the pipeline
//! tolerates that and produces an empty record.

mod extractor;

pub use extractor::{PdfContent, PdfPage, PdfTextExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page.
    fn extract_page_text(&self, page: u32) -> Result<String>;
}
