//! Classification outcomes produced by the reference-range classifier.

use serde::{Deserialize, Serialize};

use super::range::Sex;

/// Normal/abnormal verdict for a single result row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Value lies inside the reference range
    Normal,
    /// Value lies outside the reference range
    Abnormal,
    /// Value or range could not be read
    Indeterminate,
}

impl Classification {
    /// Collapse to the flag reports have always shown: indeterminate reads as normal.
    pub fn flag_compatible(self) -> Self {
        match self {
            Classification::Indeterminate => Classification::Normal,
            other => other,
        }
    }

    /// Whether the row should be highlighted.
    pub fn is_abnormal(self) -> bool {
        matches!(self, Classification::Abnormal)
    }
}

/// Which side of the range an abnormal value fell on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    Low,
    High,
}

impl Deviation {
    /// Single-letter marker used on printed reports.
    pub fn marker(self) -> &'static str {
        match self {
            Deviation::Low => "L",
            Deviation::High => "H",
        }
    }
}

/// Why a value could not be classified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IndeterminateReason {
    /// No reference range was authored
    EmptyRange,
    /// The measured value has no leading number
    NonNumericValue,
    /// The range text matches none of the known dialects
    UnrecognizedRange,
    /// A dialect matched but a bound is not a finite number
    InvalidBound,
}

impl IndeterminateReason {
    pub fn as_str(self) -> &'static str {
        match self {
            IndeterminateReason::EmptyRange => "empty_range",
            IndeterminateReason::NonNumericValue => "non_numeric_value",
            IndeterminateReason::UnrecognizedRange => "unrecognized_range",
            IndeterminateReason::InvalidBound => "invalid_bound",
        }
    }
}

/// Reference-range dialects, in the order they are tried.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    /// `M: 13.5-18.0; F: 11.5-16.4`
    GenderSplit,
    /// `10-20` or `10–20`
    DashRange,
    /// `Up to 20`
    UpTo,
    /// `<10`
    LessThan,
    /// `≤10` or `<=10`
    LessOrEqual,
    /// `>20`
    GreaterThan,
    /// `≥5` or `>=5`
    GreaterOrEqual,
    /// `less than 10`
    TextLessThan,
    /// `greater than 20`
    TextGreaterThan,
}

impl DialectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::GenderSplit => "gender_split",
            DialectKind::DashRange => "dash_range",
            DialectKind::UpTo => "up_to",
            DialectKind::LessThan => "less_than",
            DialectKind::LessOrEqual => "less_or_equal",
            DialectKind::GreaterThan => "greater_than",
            DialectKind::GreaterOrEqual => "greater_or_equal",
            DialectKind::TextLessThan => "text_less_than",
            DialectKind::TextGreaterThan => "text_greater_than",
        }
    }
}

/// Closed interval `[low, high]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    /// Build an interval, ordering the bounds if they were authored reversed.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Smallest interval covering both.
    pub fn union(self, other: Interval) -> Self {
        Self {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }

    /// Bounds are inclusive.
    pub fn deviation(self, value: f64) -> Option<Deviation> {
        if value < self.low {
            Some(Deviation::Low)
        } else if value > self.high {
            Some(Deviation::High)
        } else {
            None
        }
    }
}

/// A parsed reference range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeRule {
    /// Separate intervals per sex
    GenderSplit { male: Interval, female: Interval },
    /// Inclusive interval
    Between { low: f64, high: f64 },
    /// Abnormal above `limit` (`Up to N`, `≤N`)
    AtMost { limit: f64 },
    /// Abnormal at or above `limit` (`<N`, `less than N`)
    Below { limit: f64 },
    /// Abnormal at or below `limit` (`>N`, `greater than N`)
    Above { limit: f64 },
    /// Abnormal below `limit` (`≥N`)
    AtLeast { limit: f64 },
}

impl RangeRule {
    /// Evaluate a value against the rule. `None` means the value is in range.
    pub fn evaluate(&self, value: f64, sex: Sex) -> Option<Deviation> {
        match *self {
            RangeRule::GenderSplit { male, female } => {
                let interval = match sex {
                    Sex::Male => male,
                    Sex::Female => female,
                    Sex::Unspecified => male.union(female),
                };
                interval.deviation(value)
            }
            RangeRule::Between { low, high } => Interval { low, high }.deviation(value),
            RangeRule::AtMost { limit } => (value > limit).then_some(Deviation::High),
            RangeRule::Below { limit } => (value >= limit).then_some(Deviation::High),
            RangeRule::Above { limit } => (value <= limit).then_some(Deviation::Low),
            RangeRule::AtLeast { limit } => (value < limit).then_some(Deviation::Low),
        }
    }
}

/// Full classifier verdict, keeping "could not determine" distinct from "normal".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    pub classification: Classification,
    /// Dialect that matched the range, if any
    pub dialect: Option<DialectKind>,
    /// Parsed rule, if any
    pub rule: Option<RangeRule>,
    /// Set only when abnormal
    pub deviation: Option<Deviation>,
    /// Set only when indeterminate
    pub reason: Option<IndeterminateReason>,
}

impl Assessment {
    pub fn indeterminate(reason: IndeterminateReason, dialect: Option<DialectKind>) -> Self {
        Self {
            classification: Classification::Indeterminate,
            dialect,
            rule: None,
            deviation: None,
            reason: Some(reason),
        }
    }

    pub fn evaluated(dialect: DialectKind, rule: RangeRule, deviation: Option<Deviation>) -> Self {
        let classification = if deviation.is_some() {
            Classification::Abnormal
        } else {
            Classification::Normal
        };
        Self {
            classification,
            dialect: Some(dialect),
            rule: Some(rule),
            deviation,
            reason: None,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        self.classification == Classification::Indeterminate
    }
}

/// Abnormal flag as recorded by the backend in `results[].flag`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResultFlag {
    Normal,
    Low,
    High,
    Abnormal,
}

impl ResultFlag {
    /// Read a backend flag. Empty or unknown text means the flag was not
    /// precomputed and the classifier should decide.
    pub fn from_backend(text: &str) -> Option<Self> {
        match text.trim().to_uppercase().as_str() {
            "N" | "NORMAL" => Some(ResultFlag::Normal),
            "L" | "LOW" => Some(ResultFlag::Low),
            "H" | "HIGH" => Some(ResultFlag::High),
            "A" | "ABNORMAL" | "*" | "CRITICAL" => Some(ResultFlag::Abnormal),
            _ => None,
        }
    }

    pub fn is_abnormal(self) -> bool {
        !matches!(self, ResultFlag::Normal)
    }

    /// Direction carried by the flag itself; `A` and `N` have none.
    pub fn deviation(self) -> Option<Deviation> {
        match self {
            ResultFlag::Low => Some(Deviation::Low),
            ResultFlag::High => Some(Deviation::High),
            ResultFlag::Normal | ResultFlag::Abnormal => None,
        }
    }
}
