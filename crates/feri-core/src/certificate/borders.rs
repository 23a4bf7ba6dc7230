//! Discharge-location to outbound-border cross-reference.

use crate::models::record::keys;
use crate::models::record::CertificateRecord;

/// Sentinel used when a discharge location is absent or unmapped.
pub const UNKNOWN_BORDER: &str = "UNKNOWN";

/// Static discharge-location -> outbound-border table. Process-wide
/// constant; the border form rejects values outside this vocabulary, so
/// misses resolve to [`UNKNOWN_BORDER`] rather than a guess.
const BORDER_TABLE: &[(&str, &str)] = &[
    ("KASENYI", "NTOROKO"),
    ("GOLI", "GOLI"),
    ("MAHAGI", "GOLI"),
    ("KASINDI", "MPONDWE"),
    ("ARU", "VURRA"),
    ("BUNAGANA", "BUNAGANA"),
];

/// Map a discharge location to its outbound border code.
pub fn outbound_border(discharge_place: &str) -> &'static str {
    let place = discharge_place.trim().to_ascii_uppercase();
    BORDER_TABLE
        .iter()
        .find(|(from, _)| *from == place)
        .map(|(_, to)| *to)
        .unwrap_or(UNKNOWN_BORDER)
}

/// Add the derived outbound-border field to a record.
///
/// Total: a record without a discharge place, or with one outside the
/// table, still gains the key, carrying the sentinel.
pub fn resolve(record: &mut CertificateRecord) {
    let border = record
        .text(keys::DISCHARGE_PLACE)
        .map(outbound_border)
        .unwrap_or(UNKNOWN_BORDER);
    record.insert(keys::OUT_BOUND_BORDER, border);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::DocumentFamily;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_documented_crossings() {
        assert_eq!(outbound_border("KASENYI"), "NTOROKO");
        assert_eq!(outbound_border("GOLI"), "GOLI");
        assert_eq!(outbound_border("kasenyi "), "NTOROKO");
    }

    #[test]
    fn test_unmapped_location_is_unknown() {
        assert_eq!(outbound_border("MOMBASA"), UNKNOWN_BORDER);
        assert_eq!(outbound_border(""), UNKNOWN_BORDER);
    }

    #[test]
    fn test_resolve_without_discharge_place_defaults() {
        let mut record = CertificateRecord::new(DocumentFamily::Ad);
        resolve(&mut record);
        assert_eq!(record.text(keys::OUT_BOUND_BORDER), Some(UNKNOWN_BORDER));
    }

    #[test]
    fn test_resolve_with_discharge_place() {
        let mut record = CertificateRecord::new(DocumentFamily::Ad);
        record.insert(keys::DISCHARGE_PLACE, "KASENYI");
        resolve(&mut record);
        assert_eq!(record.text(keys::OUT_BOUND_BORDER), Some("NTOROKO"));
    }
}
