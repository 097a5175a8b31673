//! Reference-range classifier.
//!
//! Pipeline: Normalization → Dialect Resolution → Evaluation
//!
//! [`classify`] keeps the long-standing report behaviour where anything
//! unreadable shows as normal. [`Classifier::assess`] returns the full
//! [`Assessment`] so callers can tell "confirmed normal" apart from
//! "could not determine".

mod dialect;
mod normalizer;

pub use dialect::*;
pub use normalizer::*;

use std::sync::LazyLock;

use crate::models::{
    Assessment, Classification, DialectKind, IndeterminateReason, MeasuredValue, RangeRule,
    ReferenceRange, Sex,
};

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::new);

/// Classifier holding an ordered dialect table.
#[derive(Debug)]
pub struct Classifier {
    dialects: Vec<Dialect>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Create a classifier with the standard dialect table.
    pub fn new() -> Self {
        Self {
            dialects: default_dialects(),
        }
    }

    /// Create a classifier that only knows the given dialects, tried in order.
    pub fn with_dialects(dialects: Vec<Dialect>) -> Self {
        Self { dialects }
    }

    /// Shared instance with the standard dialect table.
    pub fn shared() -> &'static Classifier {
        &DEFAULT_CLASSIFIER
    }

    /// Dialects in the order they are tried.
    pub fn dialects(&self) -> &[Dialect] {
        &self.dialects
    }

    /// Resolve range text to a rule. The first matching dialect wins.
    pub fn parse(
        &self,
        range: &ReferenceRange,
    ) -> Result<(DialectKind, RangeRule), (Option<DialectKind>, IndeterminateReason)> {
        if range.is_blank() {
            return Err((None, IndeterminateReason::EmptyRange));
        }

        let cleaned = clean_range(range.as_str());
        for dialect in &self.dialects {
            if let Some(outcome) = dialect.recognise(&cleaned) {
                return outcome
                    .map(|rule| (dialect.kind, rule))
                    .map_err(|reason| (Some(dialect.kind), reason));
            }
        }

        Err((None, IndeterminateReason::UnrecognizedRange))
    }

    /// Classify a value, keeping indeterminate outcomes explicit.
    pub fn assess(&self, value: &MeasuredValue, range: &ReferenceRange, sex: Sex) -> Assessment {
        let Some(number) = numeric_value(value) else {
            tracing::debug!(value = %value, range = %range, "Non-numeric value, skipping range check");
            return Assessment::indeterminate(IndeterminateReason::NonNumericValue, None);
        };

        match self.parse(range) {
            Ok((dialect, rule)) => {
                Assessment::evaluated(dialect, rule, rule.evaluate(number, sex))
            }
            Err((dialect, reason)) => {
                tracing::debug!(
                    range = %range,
                    reason = reason.as_str(),
                    "Reference range could not be interpreted"
                );
                Assessment::indeterminate(reason, dialect)
            }
        }
    }

    /// Classify a value; unreadable input reads as normal.
    pub fn classify(&self, value: &MeasuredValue, range: &ReferenceRange, sex: Sex) -> Classification {
        self.assess(value, range, sex).classification.flag_compatible()
    }
}

/// Classify with the shared classifier.
///
/// Commas are stripped from both inputs. A value or range that cannot be
/// read yields [`Classification::Normal`].
pub fn classify(
    value: impl Into<MeasuredValue>,
    range: impl Into<ReferenceRange>,
    sex: Sex,
) -> Classification {
    Classifier::shared().classify(&value.into(), &range.into(), sex)
}

/// Assess with the shared classifier.
pub fn assess(value: impl Into<MeasuredValue>, range: impl Into<ReferenceRange>, sex: Sex) -> Assessment {
    Classifier::shared().assess(&value.into(), &range.into(), sex)
}
