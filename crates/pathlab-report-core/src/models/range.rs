//! Reference-range inputs: the authored range text, the measured value, and patient sex.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Patient sex, used only to pick a sub-range out of gender-split ranges.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    /// Unknown, other, or not recorded
    #[default]
    Unspecified,
}

impl Sex {
    /// Lenient parse of a free-text gender field ("M", "male", "Female", ...).
    ///
    /// Anything unrecognised maps to [`Sex::Unspecified`].
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "m" | "male" | "man" | "boy" => Sex::Male,
            "f" | "female" | "woman" | "girl" => Sex::Female,
            _ => Sex::Unspecified,
        }
    }
}

/// A lab-authored reference-range expression, e.g. `"13.5-17.5"` or `"M: 13.5–18.0; F: 11.5–16.4"`.
///
/// Opaque text with no identity beyond its content. Interpretation lives in
/// [`crate::classifier`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ReferenceRange(String);

impl ReferenceRange {
    /// Wrap authored range text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The range exactly as authored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the range holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ReferenceRange {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ReferenceRange {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The result recorded for one parameter row.
///
/// The backend sends either a JSON number or a string; strings may be
/// qualitative (`"Positive"`, `"-"`) and are never range-checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MeasuredValue {
    Number(f64),
    Text(String),
}

impl MeasuredValue {
    /// True when nothing was recorded.
    pub fn is_blank(&self) -> bool {
        match self {
            MeasuredValue::Number(_) => false,
            MeasuredValue::Text(text) => text.trim().is_empty(),
        }
    }
}

impl Default for MeasuredValue {
    fn default() -> Self {
        MeasuredValue::Text(String::new())
    }
}

impl From<f64> for MeasuredValue {
    fn from(value: f64) -> Self {
        MeasuredValue::Number(value)
    }
}

impl From<&str> for MeasuredValue {
    fn from(text: &str) -> Self {
        MeasuredValue::Text(text.to_string())
    }
}

impl From<String> for MeasuredValue {
    fn from(text: String) -> Self {
        MeasuredValue::Text(text)
    }
}

impl fmt::Display for MeasuredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasuredValue::Number(value) => write!(f, "{}", value),
            MeasuredValue::Text(text) => f.write_str(text),
        }
    }
}
