//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the feri pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeriConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Certificate extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,

    /// Minimum extracted length before a PDF counts as text-bearing.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            min_text_length: 50,
        }
    }
}

/// Certificate extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Family to assume when the caller gives no hint on the command line.
    /// When unset the classifier decides from the document text.
    pub default_family: Option<String>,
}

impl FeriConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeriConfig::default();
        assert_eq!(config.pdf.max_pages, 10);
        assert!(config.extraction.default_family.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: FeriConfig =
            serde_json::from_str(r#"{"extraction":{"default_family":"busia"}}"#).unwrap();
        assert_eq!(config.extraction.default_family.as_deref(), Some("busia"));
        assert_eq!(config.pdf.min_text_length, 50);
    }
}
