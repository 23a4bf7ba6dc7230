//! Document family classification.

use tracing::debug;

use super::rules::patterns::{CLASSIFY_AD, CLASSIFY_MARITIME};
use crate::models::record::DocumentFamily;

/// Decide which family's pattern set applies to a document.
///
/// Discriminating anchors are tested in fixed priority order: an A.D
/// numbering anchor selects [`DocumentFamily::Ad`] ahead of the generic
/// families, FERI/VALIDATION anchors select [`DocumentFamily::Maritime`],
/// and anything else falls back to [`DocumentFamily::Normal`].
/// Deterministic on identical text.
///
/// Classification is advisory: callers that already know the family (for
/// example "treat as busia") pass a hint to the pipeline and this function
/// is never consulted. Only the flagging pipeline, which receives
/// undifferentiated documents, relies on it.
pub fn classify(text: &str) -> DocumentFamily {
    let family = if CLASSIFY_AD.is_match(text) {
        DocumentFamily::Ad
    } else if CLASSIFY_MARITIME.is_match(text) {
        DocumentFamily::Maritime
    } else {
        DocumentFamily::Normal
    };
    debug!("classified document as {family}");
    family
}
