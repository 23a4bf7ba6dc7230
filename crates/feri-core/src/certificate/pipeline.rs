//! Certificate extraction pipeline.
//!
//! Strict sequential stages per document: normalize, classify, extract,
//! resolve, assemble. Every stage reads immutable inputs and the pattern
//! tables are process-wide constants, so independent pipeline instances
//! can run concurrently without locking.

use std::time::Instant;

use tracing::{debug, info};

use super::borders;
use super::classify::classify;
use super::normalize::{normalize, normalize_bytes};
use super::rules::{pattern_set, FieldExtractor, PatternSet};
use super::Result;
use crate::models::record::{keys, CertificateRecord, DocumentFamily};

/// Result of certificate extraction.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// The assembled record.
    pub record: CertificateRecord,
    /// The normalized text the patterns ran against.
    pub normalized_text: String,
    /// Fields of the family vocabulary that found no match.
    pub missing_fields: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for record extractors.
pub trait RecordExtractor {
    /// Extract a record from document text.
    fn extract(&self, text: &str) -> Result<ExtractionOutcome>;

    /// Extract a record from a raw byte stream.
    fn extract_from_bytes(&self, data: &[u8]) -> Result<ExtractionOutcome>;
}

/// The standard extraction pipeline.
///
/// Stateless apart from an optional caller-supplied family hint; returns
/// records by value, so nothing is shared between invocations.
pub struct CertificatePipeline {
    family_hint: Option<DocumentFamily>,
}

impl CertificatePipeline {
    /// Create a pipeline that classifies each document itself.
    pub fn new() -> Self {
        Self { family_hint: None }
    }

    /// Pin the document family, bypassing classification.
    pub fn with_family(mut self, family: DocumentFamily) -> Self {
        self.family_hint = Some(family);
        self
    }

    fn run(&self, normalized: String) -> ExtractionOutcome {
        let start = Instant::now();

        // The hint wins; classification is only consulted when the caller
        // did not disambiguate.
        let family = self.family_hint.unwrap_or_else(|| classify(&normalized));
        let set = pattern_set(family);

        info!(
            "extracting {} fields for family {family} from {} chars",
            set.rules().len(),
            normalized.len()
        );

        let mut record = CertificateRecord::new(family);
        for rule in set.rules() {
            match rule.extract(&normalized) {
                Some(value) => {
                    record.insert(rule.key, value);
                }
                None => debug!("field {} absent", rule.key),
            }
        }

        assemble(&mut record, set);

        let missing_fields: Vec<String> = set
            .field_keys()
            .filter(|&key| !record.contains(key))
            .map(str::to_string)
            .collect();
        if !missing_fields.is_empty() {
            debug!("missing fields: {}", missing_fields.join(", "));
        }

        ExtractionOutcome {
            record,
            normalized_text: normalized,
            missing_fields,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for CertificatePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for CertificatePipeline {
    fn extract(&self, text: &str) -> Result<ExtractionOutcome> {
        Ok(self.run(normalize(text)))
    }

    fn extract_from_bytes(&self, data: &[u8]) -> Result<ExtractionOutcome> {
        Ok(self.run(normalize_bytes(data)?))
    }
}

/// Apply family-specific merge rules and derived fields, exactly once.
fn assemble(record: &mut CertificateRecord, set: &PatternSet) {
    // The continuance form wants a single exporter string; the template
    // splits it across transporter and carrier boxes. Join whichever are
    // present with a single space, keeping the constituents for consumers
    // that address them individually.
    if record.family == DocumentFamily::Ad {
        let parts: Vec<String> = [keys::TRANSPORTER, keys::CARRIER]
            .iter()
            .filter_map(|key| record.text(key))
            .map(str::to_string)
            .collect();
        if !parts.is_empty() {
            record.insert(keys::EXPORTER, parts.join(" "));
        }
    }

    if set.derives_border {
        borders::resolve(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::FieldValue;
    use pretty_assertions::assert_eq;

    const NORMAL_DOC: &str = r#"
        REPUBLIQUE DEMOCRATIQUE DU CONGO
        A.D N° 12345
        IMPORTATEUR : ACME CORP ; EXPORTATEUR GLOBAL TRADERS E
        TRANSITAIRE : SWIFT FREIGHT (U) LTD Forwarding agent
        DEST. KAMPALA
        TITRE DE TRANSPORT : UGX-2024-001 TRANSITAIRE
        VOLUME 51.899 CBM
        POIDS BRUT : 27900 Kg
    "#;

    const MARITIME_DOC: &str = r#"
        FERI N° : MR7781
        IMPORTATEUR : KIVU SUPPLIES ; EXPORTATEUR OCEAN METALS ;
        TRANSITAIRE : HARBOUR AGENCY DEST. GOMA
        BL : MSCU1234567 ARMATEUR MSC
        22.500 CBM TEU 1
        POIDS BRUT : 18.2 T
    "#;

    const AD_DOC: &str = r#"
        A.D N° : 98765
        IMPORTATEUR : CONGO MINERALS SARL ADD: LUBUMBASHI
        TRANSPORTEUR : TRANS AFRICA HAULIERS ADD: KAMPALA
        ARMATEUR : LAKESIDE CARRIERS TITRE DE TRANSPORT : TR-55 TRANS
        LIEU DE DECHARGEMENT : KASENYI DESTINATION FINALE : BUNIA PAYS RDC
        DESIGNATION DES MARCHANDISES : 280 DRUMS; COPPER CATHODES POIDS BRUT : 27900 Kg
        VOLUME 51.899 CBM
    "#;

    #[test]
    fn test_normal_document_with_hint() {
        let pipeline = CertificatePipeline::new().with_family(DocumentFamily::Normal);
        let outcome = pipeline.extract(NORMAL_DOC).unwrap();
        let record = &outcome.record;

        assert_eq!(record.family, DocumentFamily::Normal);
        assert_eq!(record.text(keys::ATTESTATION_NUMBER), Some("12345"));
        assert_eq!(record.text(keys::IMPORTATEUR), Some("ACME CORP"));
        assert_eq!(record.text(keys::EXPORTER), Some("GLOBAL TRADERS"));
        assert_eq!(record.text(keys::FORWARDING_AGENT), Some("SWIFT FREIGHT (U) LTD"));
        assert_eq!(record.text(keys::TRANSPORT_ID), Some("UGX-2024-001"));
        assert_eq!(record.text(keys::CBM), Some("51.899 CBM"));
        assert_eq!(record.number(keys::GROSS_WEIGHT), Some(27900.0));
        assert!(outcome.missing_fields.is_empty());
    }

    #[test]
    fn test_maritime_document() {
        let pipeline = CertificatePipeline::new().with_family(DocumentFamily::Maritime);
        let record = pipeline.extract(MARITIME_DOC).unwrap().record;

        assert_eq!(record.text(keys::FERI_NUMBER), Some("MR7781"));
        assert_eq!(record.text(keys::IMPORTATEUR), Some("KIVU SUPPLIES"));
        assert_eq!(record.text(keys::TRANSITAIRE), Some("HARBOUR AGENCY"));
        assert_eq!(record.text(keys::BL), Some("MSCU1234567"));
        assert_eq!(record.text(keys::CBM), Some("22.500 CBM"));
        assert_eq!(record.number(keys::GROSS_WEIGHT), Some(18.2));
        assert_eq!(record.text(keys::EXPORTER), Some("OCEAN METALS"));
    }

    #[test]
    fn test_ad_document_self_classifies_and_merges_exporter() {
        let pipeline = CertificatePipeline::new();
        let record = pipeline.extract(AD_DOC).unwrap().record;

        assert_eq!(record.family, DocumentFamily::Ad);
        assert_eq!(record.text(keys::ATTESTATION_NUMBER), Some("98765"));
        assert_eq!(record.text(keys::TRANSPORTER), Some("TRANS AFRICA HAULIERS"));
        assert_eq!(record.text(keys::CARRIER), Some("LAKESIDE CARRIERS"));
        assert_eq!(
            record.text(keys::EXPORTER),
            Some("TRANS AFRICA HAULIERS LAKESIDE CARRIERS")
        );
        assert_eq!(record.text(keys::DISCHARGE_PLACE), Some("KASENYI"));
        assert_eq!(record.text(keys::OUT_BOUND_BORDER), Some("NTOROKO"));
        assert_eq!(record.number(keys::CBM), Some(51.899));
        assert_eq!(
            record.get(keys::DESCRIPTIONS).and_then(FieldValue::as_list),
            Some(&["280 DRUMS".to_string(), "COPPER CATHODES".to_string()][..])
        );
    }

    #[test]
    fn test_hint_overrides_classification() {
        // The A.D anchor would classify this as Ad; the caller knows better.
        let pipeline = CertificatePipeline::new().with_family(DocumentFamily::Normal);
        let record = pipeline.extract("A.D N° 12345").unwrap().record;
        assert_eq!(record.family, DocumentFamily::Normal);
        assert_eq!(record.text(keys::ATTESTATION_NUMBER), Some("12345"));
    }

    #[test]
    fn test_absent_fields_are_omitted_not_null() {
        let pipeline = CertificatePipeline::new().with_family(DocumentFamily::Normal);
        let outcome = pipeline.extract("POIDS BRUT : 100 Kg").unwrap();

        assert!(!outcome.record.contains(keys::CBM));
        assert!(outcome.missing_fields.contains(&keys::CBM.to_string()));
        assert_eq!(outcome.record.number(keys::GROSS_WEIGHT), Some(100.0));
    }

    #[test]
    fn test_empty_text_yields_empty_record() {
        let pipeline = CertificatePipeline::new();
        let outcome = pipeline.extract("").unwrap();
        assert_eq!(outcome.record.family, DocumentFamily::Normal);
        assert!(outcome.record.is_empty());
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let pipeline = CertificatePipeline::new();
        let first = pipeline.extract(AD_DOC).unwrap().record;
        let second = pipeline.extract(AD_DOC).unwrap().record;

        let a = serde_json::to_vec(&first).unwrap();
        let b = serde_json::to_vec(&second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_bytes_are_rejected() {
        let pipeline = CertificatePipeline::new();
        assert!(pipeline.extract_from_bytes(&[0xc3, 0x28]).is_err());
    }

    #[test]
    fn test_bytes_round_trip() {
        let pipeline = CertificatePipeline::new().with_family(DocumentFamily::Normal);
        let record = pipeline
            .extract_from_bytes(NORMAL_DOC.as_bytes())
            .unwrap()
            .record;
        assert_eq!(record.text(keys::ATTESTATION_NUMBER), Some("12345"));
    }
}
