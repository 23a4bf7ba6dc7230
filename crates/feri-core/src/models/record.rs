//! Certificate record model produced by the extraction pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Stable field keys shared between the pattern tables, the resolver and the
/// record assembler. Keys are part of the external interface; downstream
/// form-filling collaborators match on them verbatim.
pub mod keys {
    pub const ATTESTATION_NUMBER: &str = "attestation_number";
    pub const FERI_NUMBER: &str = "feri_number";
    pub const IMPORTATEUR: &str = "importateur";
    pub const EXPORTER: &str = "exporter";
    pub const FORWARDING_AGENT: &str = "forwarding_agent";
    pub const TRANSITAIRE: &str = "transitaire";
    pub const TRANSPORT_ID: &str = "transport_id";
    pub const BL: &str = "bl";
    pub const CBM: &str = "cbm";
    pub const GROSS_WEIGHT: &str = "gross_weight";
    pub const TRANSPORTER: &str = "transporter";
    pub const CARRIER: &str = "carrier";
    pub const DISCHARGE_PLACE: &str = "discharge_place";
    pub const FINAL_DESTINATION: &str = "final_destination";
    pub const DESCRIPTIONS: &str = "descriptions";
    /// Derived outbound-border key, spelled the way the form consumer expects.
    pub const OUT_BOUND_BORDER: &str = "Out_Bound_Border";
}

/// One of the recognized certificate document templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFamily {
    /// Road FERI certificate (French labels, A.D attestation number).
    Normal,
    /// Maritime certificate (FERI/VALIDATION numbering, bill of lading).
    Maritime,
    /// A.D continuance certificate handled by the flagging pipeline.
    Ad,
    /// Busia border variant of the maritime template.
    Busia,
    /// Possiano variant of the maritime template.
    Possiano,
}

impl DocumentFamily {
    /// All families, in classifier priority order.
    pub const ALL: [DocumentFamily; 5] = [
        DocumentFamily::Ad,
        DocumentFamily::Maritime,
        DocumentFamily::Normal,
        DocumentFamily::Busia,
        DocumentFamily::Possiano,
    ];

    /// Lowercase name used in caller hints and serialized records.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentFamily::Normal => "normal",
            DocumentFamily::Maritime => "maritime",
            DocumentFamily::Ad => "ad",
            DocumentFamily::Busia => "busia",
            DocumentFamily::Possiano => "possiano",
        }
    }
}

impl fmt::Display for DocumentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocumentFamily {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(DocumentFamily::Normal),
            "maritime" => Ok(DocumentFamily::Maritime),
            "ad" | "a.d" => Ok(DocumentFamily::Ad),
            "busia" => Ok(DocumentFamily::Busia),
            "possiano" => Ok(DocumentFamily::Possiano),
            other => Err(ExtractionError::UnknownFamily(other.to_string())),
        }
    }
}

/// A single extracted field value.
///
/// Numbers stay numbers through serialization; multi-line cargo
/// descriptions are carried as a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free-text value.
    Text(String),
    /// Numeric value after unit stripping.
    Number(f64),
    /// Multi-segment value (cargo description lines).
    List(Vec<String>),
}

impl FieldValue {
    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The list content, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// The typed record produced for one document.
///
/// A key is present only when its pattern matched or the cross-reference
/// resolver defaulted it; absent fields are absent keys, never null. The
/// ordered map keeps serialization deterministic, so re-running the
/// pipeline on unchanged text yields a byte-identical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// The document family the pattern set was selected for.
    pub family: DocumentFamily,

    /// Flat mapping from stable field key to extracted value.
    pub fields: BTreeMap<String, FieldValue>,
}

impl CertificateRecord {
    /// Create an empty record for a family.
    pub fn new(family: DocumentFamily) -> Self {
        Self {
            family,
            fields: BTreeMap::new(),
        }
    }

    /// Insert a field value under a stable key.
    pub fn insert(&mut self, key: &str, value: impl Into<FieldValue>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Whether a field key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of extracted fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were extracted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Text content of a field, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Numeric content of a field, if present and numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_family_from_str() {
        assert_eq!("busia".parse::<DocumentFamily>().unwrap(), DocumentFamily::Busia);
        assert_eq!("Maritime".parse::<DocumentFamily>().unwrap(), DocumentFamily::Maritime);
        assert_eq!("A.D".parse::<DocumentFamily>().unwrap(), DocumentFamily::Ad);
        assert!("ferry".parse::<DocumentFamily>().is_err());
    }

    #[test]
    fn test_numbers_serialize_as_numbers() {
        let mut record = CertificateRecord::new(DocumentFamily::Normal);
        record.insert(keys::GROSS_WEIGHT, 27900.0);
        record.insert(keys::CBM, "51.899 CBM");

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["fields"]["gross_weight"].is_number());
        assert!(json["fields"]["cbm"].is_string());
    }

    #[test]
    fn test_record_round_trip() {
        let mut record = CertificateRecord::new(DocumentFamily::Ad);
        record.insert(keys::ATTESTATION_NUMBER, "12345");
        record.insert(keys::CBM, 51.899);
        record.insert(
            keys::DESCRIPTIONS,
            vec!["COPPER CATHODES".to_string(), "280 DRUMS".to_string()],
        );

        let json = serde_json::to_string(&record).unwrap();
        let back: CertificateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
