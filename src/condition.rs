//! Feature conditions: the atomic predicate language of a rule
//!
//! A condition constrains a single numeric feature. Rule files encode
//! conditions as short strings where `x` stands for the feature value:
//!
//! | Text       | Variant                      | Matches          |
//! |------------|------------------------------|------------------|
//! | `x=v`      | [`Condition::Equal`]         | `x == v`         |
//! | `v<=x`     | [`Condition::AtLeast`]       | `x >= v`         |
//! | `v<x`      | [`Condition::GreaterThan`]   | `x > v`          |
//! | `x<=v`     | [`Condition::AtMost`]        | `x <= v`         |
//! | `a<x<=b`   | [`Condition::Range`]         | `a < x && x <= b`|
//!
//! Strings are parsed once, at the file boundary. Everything past that
//! point works with the tagged variant.

use serde::{Serialize, Serializer};
use std::sync::OnceLock;

use regex::Regex;

/// A predicate on one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// `x = v`
    Equal(f64),
    /// `v <= x`
    AtLeast(f64),
    /// `v < x`
    GreaterThan(f64),
    /// `x <= v`
    AtMost(f64),
    /// `low < x <= high`
    Range { low: f64, high: f64 },
}

impl Condition {
    /// Parse the textual form. Whitespace is ignored.
    ///
    /// Returns `None` when the text matches none of the grammar forms.
    ///
    /// # Examples
    /// ```
    /// use roccer::Condition;
    /// assert_eq!(Condition::parse("x<=2.5"), Some(Condition::AtMost(2.5)));
    /// assert_eq!(
    ///     Condition::parse("1<x<=4"),
    ///     Some(Condition::Range { low: 1.0, high: 4.0 })
    /// );
    /// assert_eq!(Condition::parse("x>=3"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let g = grammar();

        // The two-bound form contains both single-bound patterns, so it goes first.
        if let Some(caps) = g.range.captures(&compact) {
            return Some(Condition::Range {
                low: number(&caps[1])?,
                high: number(&caps[2])?,
            });
        }
        if let Some(caps) = g.at_least.captures(&compact) {
            return Some(Condition::AtLeast(number(&caps[1])?));
        }
        if let Some(caps) = g.greater_than.captures(&compact) {
            return Some(Condition::GreaterThan(number(&caps[1])?));
        }
        if let Some(caps) = g.at_most.captures(&compact) {
            return Some(Condition::AtMost(number(&caps[1])?));
        }
        if let Some(caps) = g.equal.captures(&compact) {
            let value = caps.get(1).or_else(|| caps.get(2))?;
            return Some(Condition::Equal(number(value.as_str())?));
        }

        None
    }

    /// Does a feature value satisfy this condition?
    ///
    /// Missing values (NaN) never match.
    pub fn matches(&self, x: f64) -> bool {
        match *self {
            Condition::Equal(v) => x == v,
            Condition::AtLeast(v) => x >= v,
            Condition::GreaterThan(v) => x > v,
            Condition::AtMost(v) => x <= v,
            Condition::Range { low, high } => x > low && x <= high,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Equal(v) => write!(f, "x={}", v),
            Condition::AtLeast(v) => write!(f, "{}<=x", v),
            Condition::GreaterThan(v) => write!(f, "{}<x", v),
            Condition::AtMost(v) => write!(f, "x<={}", v),
            Condition::Range { low, high } => write!(f, "{}<x<={}", low, high),
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct Grammar {
    range: Regex,
    at_least: Regex,
    greater_than: Regex,
    at_most: Regex,
    equal: Regex,
}

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

static GRAMMAR: OnceLock<Grammar> = OnceLock::new();

fn grammar() -> &'static Grammar {
    GRAMMAR.get_or_init(|| {
        let pattern = |p: String| Regex::new(&p).expect("condition grammar pattern is valid");
        Grammar {
            range: pattern(format!(r"^({NUMBER})<x<=({NUMBER})$")),
            at_least: pattern(format!(r"^({NUMBER})<=x$")),
            greater_than: pattern(format!(r"^({NUMBER})<x$")),
            at_most: pattern(format!(r"^x<=({NUMBER})$")),
            equal: pattern(format!(r"^(?:x=({NUMBER})|({NUMBER})=x)$")),
        }
    })
}

fn number(s: &str) -> Option<f64> {
    s.parse().ok()
}
