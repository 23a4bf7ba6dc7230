//! Certificate field extraction module.

pub mod borders;
pub mod classify;
pub mod normalize;
mod pipeline;
pub mod rules;

pub use classify::classify;
pub use normalize::normalize;
pub use pipeline::{CertificatePipeline, ExtractionOutcome, RecordExtractor};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
