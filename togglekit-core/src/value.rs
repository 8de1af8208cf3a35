//! Feature value primitives.
//!
//! Defines the closed set of value kinds a flag can resolve to, plus the
//! cross-kind coercions callers rely on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved feature-flag value.
///
/// Exactly one of five primitive kinds. Coercions between kinds go through
/// the canonical string form (see [`double_value`](Self::double_value)),
/// while equality goes through a separate numeric coercion; the two do not
/// always agree, and that mismatch is part of the contract (see
/// [`PartialEq`](#impl-PartialEq-for-FeatureValue)).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl FeatureValue {
    /// Parse the canonical string form as a number, yielding `0.0` when it
    /// does not parse.
    ///
    /// This applies uniformly to every kind: `Bool(true)` renders as
    /// `"true"`, which is not a number, so its numeric form is `0.0`.
    pub fn double_value(&self) -> f64 {
        self.to_string().parse::<f64>().unwrap_or(0.0)
    }

    /// Truncation of [`double_value`](Self::double_value).
    pub fn int_value(&self) -> i64 {
        self.double_value() as i64
    }

    /// Single-precision view of [`double_value`](Self::double_value).
    pub fn float_value(&self) -> f32 {
        self.double_value() as f32
    }

    /// `true` only for `Bool(true)`.
    ///
    /// Numeric 1 is NOT truthy; callers must not assume numeric truthiness.
    pub fn bool_value(&self) -> bool {
        matches!(self, FeatureValue::Bool(true))
    }

    /// The string payload, present only for the `String` variant.
    pub fn string_value(&self) -> Option<&str> {
        match self {
            FeatureValue::String(s) => Some(s),
            _ => None,
        }
    }

    // Numeric coercion used by equality. Unlike `double_value`, booleans map
    // to 0/1 here.
    fn comparison_value(&self) -> f64 {
        match self {
            FeatureValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            FeatureValue::Int(i) => *i as f64,
            FeatureValue::Float(v) => f64::from(*v),
            FeatureValue::Double(v) => *v,
            FeatureValue::String(s) => s.parse().unwrap_or(0.0),
        }
    }
}

/// Cross-kind equality.
///
/// Two `String` values compare as strings; every other pairing compares via
/// numeric coercion at double precision. This produces surprising results by
/// design: `Bool(true) == Int(1)`, and a non-numeric string coerces to `0.0`
/// so it equals `Int(0)`. Known quirk, kept for compatibility.
impl PartialEq for FeatureValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FeatureValue::String(a), FeatureValue::String(b)) => a == b,
            _ => self.comparison_value() == other.comparison_value(),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Bool(b) => write!(f, "{b}"),
            FeatureValue::Int(i) => write!(f, "{i}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Double(v) => write!(f, "{v}"),
            FeatureValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Int(value)
    }
}

impl From<i32> for FeatureValue {
    fn from(value: i32) -> Self {
        FeatureValue::Int(i64::from(value))
    }
}

impl From<f32> for FeatureValue {
    fn from(value: f32) -> Self {
        FeatureValue::Float(value)
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Double(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::String(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::String(value)
    }
}
