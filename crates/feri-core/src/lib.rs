//! Core library for freight-certificate processing.
//!
//! This crate provides:
//! - PDF text extraction (one linear string per document)
//! - Document family classification (normal, maritime, ad, busia, possiano)
//! - Rule-based field extraction with per-family pattern tables
//! - Outbound-border cross-referencing and record assembly

pub mod certificate;
pub mod error;
pub mod models;
pub mod pdf;

pub use certificate::{CertificatePipeline, ExtractionOutcome, RecordExtractor};
pub use error::{FeriError, Result};
pub use models::config::FeriConfig;
pub use models::record::{CertificateRecord, DocumentFamily, FieldValue};
pub use pdf::{PdfContent, PdfProcessor, PdfTextExtractor};
