//! Attribute value types and numeric coercion.
//!
//! Catalog records hand attribute values to the engine as borrowed [`AttrValue`]s.
//! Values that arrive from the host with an unknown JSON type (ages typed into a
//! free-form field, prices exported as strings) are kept as [`Scalar`] until a
//! predicate asks for a number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A JSON scalar as received from the host: either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Borrow this scalar as an attribute value.
    pub fn as_attr(&self) -> AttrValue<'_> {
        match self {
            Scalar::Number(n) => AttrValue::Number(*n),
            Scalar::Text(s) => AttrValue::Text(s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_attr().fmt(f)
    }
}

/// Runtime view of a single attribute on a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> AttrValue<'a> {
    /// Coerce to a finite number.
    ///
    /// Text is trimmed and must parse completely. Empty text, `NaN` and infinities
    /// fail coercion so numeric predicates fail closed.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            AttrValue::Number(n) => *n,
            AttrValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };
        n.is_finite().then_some(n)
    }

    /// Exact match against a selected facet value.
    ///
    /// Numbers match when the selection parses to the same number.
    pub fn matches_exact(&self, selected: &str) -> bool {
        match self {
            AttrValue::Text(s) => *s == selected,
            AttrValue::Number(n) => selected.trim().parse::<f64>().is_ok_and(|v| v == *n),
        }
    }

    /// The string used as a facet value.
    pub fn facet_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AttrValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Number(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_coerces_when_finite() {
        assert_eq!(AttrValue::Number(3.0).as_number(), Some(3.0));
        assert_eq!(AttrValue::Number(f64::NAN).as_number(), None);
        assert_eq!(AttrValue::Number(f64::INFINITY).as_number(), None);
    }

    #[test]
    fn text_coerces_when_numeric() {
        assert_eq!(AttrValue::Text("4").as_number(), Some(4.0));
        assert_eq!(AttrValue::Text(" 2.5 ").as_number(), Some(2.5));
    }

    #[test]
    fn text_fails_coercion_closed() {
        assert_eq!(AttrValue::Text("").as_number(), None);
        assert_eq!(AttrValue::Text("   ").as_number(), None);
        assert_eq!(AttrValue::Text("tres").as_number(), None);
        assert_eq!(AttrValue::Text("NaN").as_number(), None);
        assert_eq!(AttrValue::Text("3 years").as_number(), None);
    }

    #[test]
    fn exact_match_text_is_case_sensitive() {
        assert!(AttrValue::Text("Perros").matches_exact("Perros"));
        assert!(!AttrValue::Text("Perros").matches_exact("perros"));
    }

    #[test]
    fn exact_match_number_parses_selection() {
        assert!(AttrValue::Number(3.0).matches_exact("3"));
        assert!(!AttrValue::Number(3.0).matches_exact("three"));
    }

    #[test]
    fn scalar_deserializes_number_or_text() {
        let n: Scalar = serde_json::from_str("3").unwrap();
        let t: Scalar = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(n, Scalar::Number(3.0));
        assert_eq!(t, Scalar::Text("3".into()));
        assert_eq!(n.as_attr().as_number(), t.as_attr().as_number());
    }

    #[test]
    fn facet_key_formats_numbers_without_trailing_zero() {
        assert_eq!(AttrValue::Number(4.0).facet_key(), "4");
        assert_eq!(AttrValue::Text("Bogotá").facet_key(), "Bogotá");
    }
}
