//! Reference-range dialects.
//!
//! Each dialect pairs a compiled pattern with an interpreter that turns the
//! match into a [`RangeRule`]. The default table is ordered; the first
//! dialect whose pattern matches decides the rule, even if its bounds turn
//! out to be unusable.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{DialectKind, IndeterminateReason, Interval, RangeRule};

/// Unsigned decimal, e.g. `13.5`, `.5`, `150000`.
const NUM: &str = r"(\d*\.?\d+)";

static GENDER_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(male|female|m|f)\s*:\s*{NUM}\s*[-–]\s*{NUM}"
    ))
    .expect("Invalid gender segment regex")
});

static DASH_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{NUM}\s*[-–]\s*{NUM}")).expect("Invalid dash range regex")
});

static UP_TO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bup\s*to\s*{NUM}")).expect("Invalid up-to regex")
});

static LESS_THAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"<\s*{NUM}")).expect("Invalid less-than regex"));

static LESS_OR_EQUAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:≤|<=)\s*{NUM}")).expect("Invalid less-or-equal regex")
});

static GREATER_THAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r">\s*{NUM}")).expect("Invalid greater-than regex"));

static GREATER_OR_EQUAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:≥|>=)\s*{NUM}")).expect("Invalid greater-or-equal regex")
});

static TEXT_LESS_THAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bless\s+than\s*{NUM}")).expect("Invalid text less-than regex")
});

static TEXT_GREATER_THAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bgreater\s+than\s*{NUM}"))
        .expect("Invalid text greater-than regex")
});

/// Result of a dialect that recognised the text.
pub type DialectOutcome = Result<RangeRule, IndeterminateReason>;

/// Interpreter: `None` when the pattern does not match.
pub type Interpreter = fn(&Regex, &str) -> Option<DialectOutcome>;

/// One entry of the dialect table.
pub struct Dialect {
    pub kind: DialectKind,
    pattern: &'static LazyLock<Regex>,
    interpret: Interpreter,
}

impl Dialect {
    /// Try this dialect against cleaned range text.
    pub fn recognise(&self, text: &str) -> Option<DialectOutcome> {
        (self.interpret)(self.pattern, text)
    }
}

impl std::fmt::Debug for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialect")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Dialects in priority order.
pub fn default_dialects() -> Vec<Dialect> {
    vec![
        Dialect {
            kind: DialectKind::GenderSplit,
            pattern: &GENDER_SEGMENT,
            interpret: gender_split,
        },
        Dialect {
            kind: DialectKind::DashRange,
            pattern: &DASH_RANGE,
            interpret: dash_range,
        },
        Dialect {
            kind: DialectKind::UpTo,
            pattern: &UP_TO,
            interpret: at_most,
        },
        Dialect {
            kind: DialectKind::LessThan,
            pattern: &LESS_THAN,
            interpret: below,
        },
        Dialect {
            kind: DialectKind::LessOrEqual,
            pattern: &LESS_OR_EQUAL,
            interpret: at_most,
        },
        Dialect {
            kind: DialectKind::GreaterThan,
            pattern: &GREATER_THAN,
            interpret: above,
        },
        Dialect {
            kind: DialectKind::GreaterOrEqual,
            pattern: &GREATER_OR_EQUAL,
            interpret: at_least,
        },
        Dialect {
            kind: DialectKind::TextLessThan,
            pattern: &TEXT_LESS_THAN,
            interpret: below,
        },
        Dialect {
            kind: DialectKind::TextGreaterThan,
            pattern: &TEXT_GREATER_THAN,
            interpret: above,
        },
    ]
}

fn bound(text: &str) -> Result<f64, IndeterminateReason> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(IndeterminateReason::InvalidBound)
}

fn interval(low: &str, high: &str) -> Result<Interval, IndeterminateReason> {
    Ok(Interval::new(bound(low)?, bound(high)?))
}

/// Both an `M:` and an `F:` segment are required; either order.
fn gender_split(pattern: &Regex, text: &str) -> Option<DialectOutcome> {
    let mut male = None;
    let mut female = None;

    for caps in pattern.captures_iter(text) {
        // Separators are gone after comma stripping, so `18.0F:` is a valid
        // segment start while `Ref:` is not.
        let start = caps.get(1).map_or(0, |m| m.start());
        if text[..start].chars().next_back().is_some_and(char::is_alphabetic) {
            continue;
        }
        let slot = if caps[1].to_lowercase().starts_with('m') {
            &mut male
        } else {
            &mut female
        };
        if slot.is_none() {
            *slot = Some(interval(&caps[2], &caps[3]));
        }
    }

    let (male, female) = (male?, female?);
    Some(male.and_then(|male| female.map(|female| RangeRule::GenderSplit { male, female })))
}

fn dash_range(pattern: &Regex, text: &str) -> Option<DialectOutcome> {
    let caps = pattern.captures(text)?;
    Some(interval(&caps[1], &caps[2]).map(|i| RangeRule::Between {
        low: i.low,
        high: i.high,
    }))
}

fn single_bound(pattern: &Regex, text: &str) -> Option<Result<f64, IndeterminateReason>> {
    let caps = pattern.captures(text)?;
    Some(bound(&caps[1]))
}

fn at_most(pattern: &Regex, text: &str) -> Option<DialectOutcome> {
    single_bound(pattern, text).map(|limit| limit.map(|limit| RangeRule::AtMost { limit }))
}

fn below(pattern: &Regex, text: &str) -> Option<DialectOutcome> {
    single_bound(pattern, text).map(|limit| limit.map(|limit| RangeRule::Below { limit }))
}

fn above(pattern: &Regex, text: &str) -> Option<DialectOutcome> {
    single_bound(pattern, text).map(|limit| limit.map(|limit| RangeRule::Above { limit }))
}

fn at_least(pattern: &Regex, text: &str) -> Option<DialectOutcome> {
    single_bound(pattern, text).map(|limit| limit.map(|limit| RangeRule::AtLeast { limit }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialect(kind: DialectKind) -> Dialect {
        default_dialects()
            .into_iter()
            .find(|d| d.kind == kind)
            .unwrap()
    }

    #[test]
    fn test_table_order() {
        let kinds: Vec<_> = default_dialects().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DialectKind::GenderSplit,
                DialectKind::DashRange,
                DialectKind::UpTo,
                DialectKind::LessThan,
                DialectKind::LessOrEqual,
                DialectKind::GreaterThan,
                DialectKind::GreaterOrEqual,
                DialectKind::TextLessThan,
                DialectKind::TextGreaterThan,
            ]
        );
    }

    #[test]
    fn test_gender_split() {
        let d = dialect(DialectKind::GenderSplit);

        let rule = d.recognise("M: 13.5–18.0; F: 11.5–16.4").unwrap().unwrap();
        assert_eq!(
            rule,
            RangeRule::GenderSplit {
                male: Interval::new(13.5, 18.0),
                female: Interval::new(11.5, 16.4),
            }
        );

        // Either order, long labels
        let rule = d.recognise("Female: 8-18 Male: 10-20").unwrap().unwrap();
        assert_eq!(
            rule,
            RangeRule::GenderSplit {
                male: Interval::new(10.0, 20.0),
                female: Interval::new(8.0, 18.0),
            }
        );
    }

    #[test]
    fn test_gender_split_without_separator_spaces() {
        let d = dialect(DialectKind::GenderSplit);
        let cleaned = crate::classifier::clean_range("M:13.5-18.0,F:11.5-16.4");

        let rule = d.recognise(&cleaned).unwrap().unwrap();
        assert_eq!(
            rule,
            RangeRule::GenderSplit {
                male: Interval::new(13.5, 18.0),
                female: Interval::new(11.5, 16.4),
            }
        );
    }

    #[test]
    fn test_gender_label_must_start_a_word() {
        let d = dialect(DialectKind::GenderSplit);
        // `f:` closing "Ref:" is not a female segment
        assert!(d.recognise("Ref: 1-2 M: 10-20").is_none());
    }

    #[test]
    fn test_gender_split_needs_both_segments() {
        let d = dialect(DialectKind::GenderSplit);
        assert!(d.recognise("M: 10-20").is_none());
        assert!(d.recognise("10-20").is_none());
    }

    #[test]
    fn test_dash_range() {
        let d = dialect(DialectKind::DashRange);
        assert_eq!(
            d.recognise("10-20").unwrap().unwrap(),
            RangeRule::Between { low: 10.0, high: 20.0 }
        );
        assert_eq!(
            d.recognise("13.5 – 17.5 g/dL").unwrap().unwrap(),
            RangeRule::Between { low: 13.5, high: 17.5 }
        );
        assert!(d.recognise("<10").is_none());
    }

    #[test]
    fn test_up_to() {
        let d = dialect(DialectKind::UpTo);
        assert_eq!(
            d.recognise("Up to 20").unwrap().unwrap(),
            RangeRule::AtMost { limit: 20.0 }
        );
        assert_eq!(
            d.recognise("UP TO 0.5").unwrap().unwrap(),
            RangeRule::AtMost { limit: 0.5 }
        );
    }

    #[test]
    fn test_comparators() {
        assert_eq!(
            dialect(DialectKind::LessThan).recognise("<10").unwrap().unwrap(),
            RangeRule::Below { limit: 10.0 }
        );
        assert!(dialect(DialectKind::LessThan).recognise("<=10").is_none());
        assert_eq!(
            dialect(DialectKind::LessOrEqual).recognise("≤10").unwrap().unwrap(),
            RangeRule::AtMost { limit: 10.0 }
        );
        assert_eq!(
            dialect(DialectKind::LessOrEqual).recognise("<= 10").unwrap().unwrap(),
            RangeRule::AtMost { limit: 10.0 }
        );
        assert_eq!(
            dialect(DialectKind::GreaterThan).recognise("> 20").unwrap().unwrap(),
            RangeRule::Above { limit: 20.0 }
        );
        assert!(dialect(DialectKind::GreaterThan).recognise(">=20").is_none());
        assert_eq!(
            dialect(DialectKind::GreaterOrEqual).recognise("≥5").unwrap().unwrap(),
            RangeRule::AtLeast { limit: 5.0 }
        );
    }

    #[test]
    fn test_textual() {
        assert_eq!(
            dialect(DialectKind::TextLessThan)
                .recognise("Less than 10")
                .unwrap()
                .unwrap(),
            RangeRule::Below { limit: 10.0 }
        );
        assert_eq!(
            dialect(DialectKind::TextGreaterThan)
                .recognise("greater than 15")
                .unwrap()
                .unwrap(),
            RangeRule::Above { limit: 15.0 }
        );
    }

    #[test]
    fn test_overflowing_bound_is_invalid() {
        let huge = format!("<{}", "9".repeat(400));
        assert_eq!(
            dialect(DialectKind::LessThan).recognise(&huge),
            Some(Err(IndeterminateReason::InvalidBound))
        );
    }
}
