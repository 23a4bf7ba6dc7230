//! Per-family pattern tables.
//!
//! One [`PatternSet`] per certificate family. Adding a family means adding
//! a table here, not new control flow in the extractor.

use lazy_static::lazy_static;

use super::patterns::*;
use super::{FieldRule, PatternSet};
use crate::models::record::{keys, DocumentFamily};

lazy_static! {
    /// Road FERI certificate. The strictest boundaries: every field has a
    /// closing label on this template.
    static ref NORMAL: PatternSet = PatternSet::new(
        vec![
            FieldRule::new(keys::ATTESTATION_NUMBER, &AD_NUMBER),
            FieldRule::new(keys::IMPORTATEUR, &IMPORTATEUR).truncate_at(&IMPORTATEUR_ECHO),
            FieldRule::new(keys::EXPORTER, &EXPORTATEUR)
                .name_shape(&NAME_RUN)
                .strip_trailing(" E"),
            FieldRule::new(keys::FORWARDING_AGENT, &TRANSITAIRE).name_shape(&NAME_RUN_ABBREV),
            FieldRule::new(keys::TRANSPORT_ID, &TITRE_TRANSPORT),
            FieldRule::new(keys::CBM, &CBM_VALUE),
            FieldRule::new(keys::GROSS_WEIGHT, &GROSS_WEIGHT_KG).coerce_number(&[]),
        ],
        false,
    );

    /// Maritime certificate. Numbering falls back across three label
    /// variants; weight may be printed in tonnes.
    static ref MARITIME: PatternSet = PatternSet::new(
        vec![
            FieldRule::new(keys::FERI_NUMBER, &FERI_NUMBER)
                .or(&VALIDATION_NUMBER)
                .or(&AD_NUMBER_LABELED),
            FieldRule::new(keys::IMPORTATEUR, &IMPORTATEUR_OPEN).truncate_at(&IMPORTATEUR_ECHO),
            FieldRule::new(keys::TRANSITAIRE, &TRANSITAIRE_OPEN).name_shape(&NAME_RUN_ABBREV),
            FieldRule::new(keys::BL, &BL_NUMBER).or(&TITRE_TRANSPORT_OPEN),
            FieldRule::new(keys::CBM, &CBM_ANCHORED),
            FieldRule::new(keys::GROSS_WEIGHT, &GROSS_WEIGHT_ANY).coerce_number(&[]),
            FieldRule::new(keys::EXPORTER, &EXPORTATEUR_OPEN)
                .name_shape(&NAME_RUN)
                .strip_trailing(" E"),
        ],
        false,
    );

    static ref BUSIA: PatternSet = PatternSet::new(border_variant_rules(), false);

    static ref POSSIANO: PatternSet = PatternSet::new(border_variant_rules(), false);

    /// A.D continuance certificate handled by the flagging pipeline. The
    /// only family with a discharge place, from which the outbound border
    /// is derived.
    static ref AD: PatternSet = PatternSet::new(
        vec![
            FieldRule::new(keys::ATTESTATION_NUMBER, &AD_NUMBER_LABELED).or(&AD_NUMBER),
            FieldRule::new(keys::IMPORTATEUR, &IMPORTATEUR_OPEN).truncate_at(&IMPORTATEUR_ECHO),
            FieldRule::new(keys::TRANSPORTER, &TRANSPORTEUR).name_shape(&NAME_RUN_ABBREV),
            FieldRule::new(keys::CARRIER, &ARMATEUR).name_shape(&NAME_RUN_ABBREV),
            FieldRule::new(keys::TRANSITAIRE, &TRANSITAIRE_OPEN).name_shape(&NAME_RUN_ABBREV),
            FieldRule::new(keys::TRANSPORT_ID, &VEHICLE_NUMBER).or(&TITRE_TRANSPORT_OPEN),
            FieldRule::new(keys::DISCHARGE_PLACE, &LIEU_DECHARGEMENT),
            FieldRule::new(keys::FINAL_DESTINATION, &DESTINATION_FINALE),
            FieldRule::new(keys::DESCRIPTIONS, &DESIGNATION_MARCHANDISES).split_list(';'),
            FieldRule::new(keys::CBM, &CBM_VALUE).coerce_number(&["CBM"]),
            FieldRule::new(keys::GROSS_WEIGHT, &GROSS_WEIGHT_ANY).coerce_number(&[]),
        ],
        true,
    );
}

/// Busia and Possiano are maritime-layout variants that may carry either
/// numbering style; their volume is coerced to a number (raw string kept
/// when parsing fails) where the maritime template stores the unit string.
fn border_variant_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new(keys::FERI_NUMBER, &FERI_NUMBER)
            .or(&VALIDATION_NUMBER)
            .or(&AD_NUMBER_LABELED),
        FieldRule::new(keys::ATTESTATION_NUMBER, &AD_NUMBER),
        FieldRule::new(keys::IMPORTATEUR, &IMPORTATEUR_OPEN).truncate_at(&IMPORTATEUR_ECHO),
        FieldRule::new(keys::TRANSITAIRE, &TRANSITAIRE_OPEN).name_shape(&NAME_RUN_ABBREV),
        FieldRule::new(keys::BL, &BL_NUMBER).or(&TITRE_TRANSPORT_OPEN),
        FieldRule::new(keys::CBM, &CBM_ANCHORED).coerce_number(&["CBM"]),
        FieldRule::new(keys::GROSS_WEIGHT, &GROSS_WEIGHT_ANY).coerce_number(&[]),
        FieldRule::new(keys::EXPORTER, &EXPORTATEUR_OPEN)
            .name_shape(&NAME_RUN)
            .strip_trailing(" E"),
    ]
}

/// The pattern set for a document family.
pub fn pattern_set(family: DocumentFamily) -> &'static PatternSet {
    match family {
        DocumentFamily::Normal => &NORMAL,
        DocumentFamily::Maritime => &MARITIME,
        DocumentFamily::Ad => &AD,
        DocumentFamily::Busia => &BUSIA,
        DocumentFamily::Possiano => &POSSIANO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::rules::FieldExtractor;
    use crate::models::record::FieldValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_family_has_a_set_with_unique_keys() {
        for family in DocumentFamily::ALL {
            let set = pattern_set(family);
            let mut seen: Vec<&str> = Vec::new();
            for key in set.field_keys() {
                assert!(!seen.contains(&key), "{family}: duplicate key {key}");
                seen.push(key);
            }
            assert!(!seen.is_empty());
        }
    }

    #[test]
    fn test_only_ad_derives_border() {
        for family in DocumentFamily::ALL {
            let set = pattern_set(family);
            assert_eq!(set.derives_border, family == DocumentFamily::Ad);
        }
    }

    #[test]
    fn test_normal_keeps_cbm_unit_string() {
        let rule = pattern_set(DocumentFamily::Normal).rule("cbm").unwrap();
        assert_eq!(
            rule.extract("VOLUME TOTAL 51.899 CBM POIDS BRUT : 27900 Kg"),
            Some(FieldValue::Text("51.899 CBM".to_string()))
        );
    }

    #[test]
    fn test_busia_coerces_cbm() {
        let rule = pattern_set(DocumentFamily::Busia).rule("cbm").unwrap();
        assert_eq!(
            rule.extract("VOLUME 51.899 CBM POIDS BRUT : 27900 Kg"),
            Some(FieldValue::Number(51.899))
        );
    }

    #[test]
    fn test_maritime_cbm_needs_following_detail_label() {
        let rule = pattern_set(DocumentFamily::Maritime).rule("cbm").unwrap();
        assert_eq!(rule.extract("51.899 CBM SOMETHING ELSE"), None);
        assert_eq!(
            rule.extract("51.899 CBM TEU 2"),
            Some(FieldValue::Text("51.899 CBM".to_string()))
        );
    }
}
