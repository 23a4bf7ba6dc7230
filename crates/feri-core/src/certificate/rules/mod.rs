//! Rule-based field extractors for freight certificates.
//!
//! Every field is described by a [`FieldRule`]: an ordered anchor chain
//! (primary pattern plus fallbacks) and a post-processing pipeline. Rules
//! are static configuration grouped into one [`PatternSet`] per document
//! family; the tables live in [`families`] and are shared read-only across
//! all extractions.

pub mod families;
pub mod patterns;

pub use families::pattern_set;

use regex::Regex;

use crate::models::record::FieldValue;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// Numeric coercion policy for a matched value.
#[derive(Debug, Clone, Copy)]
pub enum Coercion {
    /// Keep the captured text as-is (unit suffix included).
    None,
    /// Strip a known unit suffix and parse as f64. A value that does not
    /// parse is retained as raw text rather than dropped.
    Number { units: &'static [&'static str] },
}

/// How to extract one named field from normalized document text.
///
/// The anchor chain is tried in declared order; the first match wins and
/// the remaining fallbacks are never consulted. Post-processing runs in a
/// fixed order: trim, truncate at a disqualifying keyword, numeric
/// coercion, name-shape restriction, trailing label-echo strip, list
/// splitting.
pub struct FieldRule {
    /// Stable field key in the extracted record.
    pub key: &'static str,
    anchors: Vec<&'static Regex>,
    truncate_at: Option<&'static Regex>,
    coerce: Coercion,
    name_shape: Option<&'static Regex>,
    strip_trailing: Option<&'static str>,
    split_list: Option<char>,
}

impl FieldRule {
    /// Create a rule with its primary anchor.
    pub fn new(key: &'static str, primary: &'static Regex) -> Self {
        Self {
            key,
            anchors: vec![primary],
            truncate_at: None,
            coerce: Coercion::None,
            name_shape: None,
            strip_trailing: None,
            split_list: None,
        }
    }

    /// Append a fallback anchor, tried only when earlier anchors fail.
    pub fn or(mut self, fallback: &'static Regex) -> Self {
        self.anchors.push(fallback);
        self
    }

    /// Cut the captured value at the first occurrence of a keyword.
    pub fn truncate_at(mut self, keyword: &'static Regex) -> Self {
        self.truncate_at = Some(keyword);
        self
    }

    /// Strip the given unit suffixes and parse the value as a number.
    pub fn coerce_number(mut self, units: &'static [&'static str]) -> Self {
        self.coerce = Coercion::Number { units };
        self
    }

    /// Restrict the value to its maximal leading run of name-like text.
    pub fn name_shape(mut self, shape: &'static Regex) -> Self {
        self.name_shape = Some(shape);
        self
    }

    /// Drop a trailing label echo (e.g. the stray " E" of "Exportater").
    pub fn strip_trailing(mut self, suffix: &'static str) -> Self {
        self.strip_trailing = Some(suffix);
        self
    }

    /// Split the captured span into a list on the given separator.
    pub fn split_list(mut self, separator: char) -> Self {
        self.split_list = Some(separator);
        self
    }

    fn capture(&self, text: &str) -> Option<String> {
        for anchor in &self.anchors {
            if let Some(caps) = anchor.captures(text) {
                return Some(caps[1].trim().to_string());
            }
        }
        None
    }
}

impl FieldExtractor for FieldRule {
    type Output = FieldValue;

    fn extract(&self, text: &str) -> Option<FieldValue> {
        let mut value = self.capture(text)?;

        if let Some(keyword) = self.truncate_at {
            if let Some(m) = keyword.find(&value) {
                value.truncate(m.start());
                value = value.trim_end().to_string();
            }
        }

        if let Coercion::Number { units } = self.coerce {
            let mut digits = value.as_str();
            for unit in units {
                if let Some(stripped) = digits.strip_suffix(unit) {
                    digits = stripped.trim_end();
                    break;
                }
            }
            if let Ok(number) = digits.parse::<f64>() {
                return Some(FieldValue::Number(number));
            }
            // Unrecognized unit or malformed digits: keep the raw capture.
            return Some(FieldValue::Text(value));
        }

        if let Some(shape) = self.name_shape {
            if let Some(m) = shape.find(&value) {
                value = m.as_str().trim().to_string();
            }
        }

        if let Some(suffix) = self.strip_trailing {
            if let Some(stripped) = value.strip_suffix(suffix) {
                value = stripped.trim_end().to_string();
            }
        }

        if value.is_empty() {
            return None;
        }

        if let Some(separator) = self.split_list {
            let items: Vec<String> = value
                .split(separator)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if items.is_empty() {
                return None;
            }
            return Some(FieldValue::List(items));
        }

        Some(FieldValue::Text(value))
    }
}

/// The ordered rule table for one document family.
pub struct PatternSet {
    rules: Vec<FieldRule>,
    /// Whether this family carries a discharge place from which the
    /// outbound border is derived.
    pub derives_border: bool,
}

impl PatternSet {
    pub(crate) fn new(rules: Vec<FieldRule>, derives_border: bool) -> Self {
        debug_assert!(
            {
                let mut keys: Vec<_> = rules.iter().map(|r| r.key).collect();
                keys.sort_unstable();
                keys.windows(2).all(|w| w[0] != w[1])
            },
            "field keys within a pattern set must be unique"
        );
        Self {
            rules,
            derives_border,
        }
    }

    /// The rules in application order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// The field vocabulary of this family.
    pub fn field_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.key)
    }

    /// Look up a rule by field key.
    pub fn rule(&self, key: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.key == key)
    }
}
