//! Error types for the feri-core library.

use thiserror::Error;

/// Main error type for the feri library.
#[derive(Error, Debug)]
pub enum FeriError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Certificate extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to certificate field extraction.
///
/// A pattern that finds no match is never an error: the field is simply
/// omitted from the record. Only structurally unusable input aborts
/// extraction for a document.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input is not text and cannot be normalized.
    #[error("input is not valid text: {0}")]
    Structural(String),

    /// The requested family name is not recognized.
    #[error("unknown document family: {0}")]
    UnknownFamily(String),
}

/// Result type for the feri library.
pub type Result<T> = std::result::Result<T, FeriError>;
