//! Common regex patterns for freight-certificate extraction.
//!
//! Anchors capture the raw field span in group 1; boundary labels are
//! consumed, not matched by lookahead, which the `regex` crate does not
//! support. All patterns run against whitespace-normalized single-line text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Certificate numbering. The maritime templates label the number three
    // different ways depending on issuing office; each variant is its own
    // anchor so rule tables can order them as a fallback chain.
    pub static ref AD_NUMBER: Regex = Regex::new(
        r"A\.D\s+N°\s*(\w+)"
    ).unwrap();

    pub static ref AD_NUMBER_LABELED: Regex = Regex::new(
        r"A\.D\s+N°\s*:\s*(\w+)"
    ).unwrap();

    pub static ref FERI_NUMBER: Regex = Regex::new(
        r"FERI N°\s*:\s*(\w+)"
    ).unwrap();

    pub static ref VALIDATION_NUMBER: Regex = Regex::new(
        r"VALIDATION\s*:\s*(\w+)"
    ).unwrap();

    // Importer. The road template requires a closing ";" or the EXPORTATEUR
    // label; maritime layouts may run to an ADD: block or end of text.
    pub static ref IMPORTATEUR: Regex = Regex::new(
        r"(?i)IMPORTATEUR\s*:\s*(.*?)\s*(?:;|EXPORTATEUR)"
    ).unwrap();

    pub static ref IMPORTATEUR_OPEN: Regex = Regex::new(
        r"(?i)IMPORTATEUR\s*:\s*(.*?)\s*(?:;|EXPORTATEUR|ADD:|$)"
    ).unwrap();

    // A repeated label word bleeding into the captured importer value.
    pub static ref IMPORTATEUR_ECHO: Regex = Regex::new(
        r"(?i)\bIMPORTATEUR\b"
    ).unwrap();

    // Exporter. "Exportater" is the (misspelled) English echo printed next
    // to the French label on the road template.
    pub static ref EXPORTATEUR: Regex = Regex::new(
        r"(?i)EXPORTATEUR\s*([^;]+?)(?:\s+Exportater|\s*;|TRANSITAIRE)"
    ).unwrap();

    pub static ref EXPORTATEUR_OPEN: Regex = Regex::new(
        r"(?i)EXPORTATEUR\s*([^;]+?)(?:\s+Exportater|\s*;|TRANSITAIRE|$)"
    ).unwrap();

    // Forwarding agent.
    pub static ref TRANSITAIRE: Regex = Regex::new(
        r"TRANSITAIRE\s*:\s*([^\s;][^;]*?)(?:\s*Forwarding agent|DEST\.)"
    ).unwrap();

    pub static ref TRANSITAIRE_OPEN: Regex = Regex::new(
        r"TRANSITAIRE\s*:\s*([^\s;][^;]*?)(?:\s*Forwarding agent|DEST\.|ADD:|$)"
    ).unwrap();

    // Transport document references.
    pub static ref TITRE_TRANSPORT: Regex = Regex::new(
        r"TITRE DE TRANSPORT\s*:\s*(.+?)\s*TRANS"
    ).unwrap();

    pub static ref TITRE_TRANSPORT_OPEN: Regex = Regex::new(
        r"TITRE DE TRANSPORT\s*:\s*(.+?)(?:\s*ARMATEUR|TRANS|$)"
    ).unwrap();

    pub static ref BL_NUMBER: Regex = Regex::new(
        r"BL\s*:\s*(.+?)(?:\s*ARMATEUR|TRANS|$)"
    ).unwrap();

    pub static ref VEHICLE_NUMBER: Regex = Regex::new(
        r"CAMION\s+N°\s*:?\s*([A-Za-z0-9][A-Za-z0-9\s/-]*?)(?:\s*Truck|REMORQUE|DEST|;|$)"
    ).unwrap();

    // Cargo volume. The maritime layout prints the volume amid container
    // details, so the anchored variant requires a following POIDS/TEU/
    // CONTENEUR label to avoid picking up unrelated decimals.
    pub static ref CBM_VALUE: Regex = Regex::new(
        r"(\d+\.\d+\s*CBM)"
    ).unwrap();

    pub static ref CBM_ANCHORED: Regex = Regex::new(
        r"(\d+\.\d+\s*CBM)\s*(?:POIDS|TEU|CONTENEUR|$)"
    ).unwrap();

    // Gross weight. Road certificates are always in Kg; maritime ones may
    // print tonnes.
    pub static ref GROSS_WEIGHT_KG: Regex = Regex::new(
        r"POIDS BRUT\s*:\s*([\d\.]+)\s*Kg"
    ).unwrap();

    pub static ref GROSS_WEIGHT_ANY: Regex = Regex::new(
        r"POIDS BRUT\s*:\s*([\d\.]+)\s*(?:Kg|T)"
    ).unwrap();

    // Continuance (A.D) template fields.
    pub static ref TRANSPORTEUR: Regex = Regex::new(
        r"TRANSPORTEUR\s*:\s*([^\s;][^;]*?)(?:\s*Transporter|ARMATEUR|DEST\.|ADD:|$)"
    ).unwrap();

    pub static ref ARMATEUR: Regex = Regex::new(
        r"ARMATEUR\s*:\s*([^\s;][^;]*?)(?:\s*Carrier|DEST\.|ADD:|TITRE|$)"
    ).unwrap();

    pub static ref LIEU_DECHARGEMENT: Regex = Regex::new(
        r"LIEU DE DECHARGEMENT\s*:\s*([A-Za-z][A-Za-z\s/.-]*?)(?:\s*Place of discharge|DESTINATION|PAYS|;|$)"
    ).unwrap();

    pub static ref DESTINATION_FINALE: Regex = Regex::new(
        r"DESTINATION FINALE\s*:\s*([^\s;][^;]*?)(?:\s*Final destination|PAYS|LIEU|$)"
    ).unwrap();

    pub static ref DESIGNATION_MARCHANDISES: Regex = Regex::new(
        r"(?:DESIGNATION|DESCRIPTION) DES MARCHANDISES\s*:?\s*(.+?)(?:\s*POIDS|VALEUR|CONTENEUR|TOTAL|$)"
    ).unwrap();

    // Name-shape runs: the maximal leading span of name-like characters,
    // discarding trailing address noise the boundary terms let through. The
    // longer variant admits a parenthesised abbreviation tail such as
    // "(U) LTD".
    pub static ref NAME_RUN: Regex = Regex::new(
        r"^[A-Za-z\s().&-]+"
    ).unwrap();

    pub static ref NAME_RUN_ABBREV: Regex = Regex::new(
        r"^[A-Za-z\s().&-]+(?:\s*\([A-Za-z]+\)\s*[A-Za-z.]+)?"
    ).unwrap();

    // Family discriminators, tested in priority order by the classifier.
    pub static ref CLASSIFY_AD: Regex = Regex::new(
        r"\bA\.?D\s+N°"
    ).unwrap();

    pub static ref CLASSIFY_MARITIME: Regex = Regex::new(
        r"\b(?:FERI\s+N°|VALIDATION\s*:)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ad_number_anchor() {
        let caps = AD_NUMBER.captures("A.D N° 12345 DOUANES").unwrap();
        assert_eq!(&caps[1], "12345");
    }

    #[test]
    fn test_importateur_boundary_consumed() {
        let caps = IMPORTATEUR
            .captures("IMPORTATEUR : ACME CORP ; EXPORTATEUR OTHER")
            .unwrap();
        assert_eq!(&caps[1], "ACME CORP");
    }

    #[test]
    fn test_cbm_anchored_requires_following_label() {
        assert!(CBM_ANCHORED.captures("VOLUME 51.899 CBM POIDS BRUT : 27900 Kg").is_some());
        let caps = CBM_ANCHORED.captures("51.899 CBM").unwrap();
        assert_eq!(&caps[1], "51.899 CBM");
    }

    #[test]
    fn test_name_run_stops_at_digits() {
        let m = NAME_RUN.find("MARITIME LOGISTICS (U) LTD 123 KAMPALA RD").unwrap();
        assert_eq!(m.as_str().trim_end(), "MARITIME LOGISTICS (U) LTD");
    }
}
