//! Resolved-flag records.

use crate::value::FeatureValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The result of a successful flag lookup.
///
/// Immutable once constructed: a fresh record is built on every resolution
/// and discarded when superseded. Equality is structural over all six fields
/// (value equality follows the [`FeatureValue`] coercion rules).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureData {
    /// Non-empty flag identifier, the lookup key.
    pub feature: String,

    /// The resolved value.
    pub value: FeatureValue,

    /// Human-readable title.
    pub title: Option<String>,

    /// Longer description.
    pub description: Option<String>,

    /// Grouping label for related flags.
    pub group: Option<String>,

    /// Name of the provider that produced this answer. Assigned by the
    /// manager during resolution, never by the provider itself.
    pub source: Option<String>,
}

impl FeatureData {
    /// Create a record with only the required fields.
    pub fn new(feature: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        Self {
            feature: feature.into(),
            value: value.into(),
            title: None,
            description: None,
            group: None,
            source: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The title, falling back to the flag identifier.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.feature)
    }

    /// Shorthand for `self.value.bool_value()`.
    pub fn bool_value(&self) -> bool {
        self.value.bool_value()
    }

    /// Shorthand for `self.value.int_value()`.
    pub fn int_value(&self) -> i64 {
        self.value.int_value()
    }

    /// Shorthand for `self.value.float_value()`.
    pub fn float_value(&self) -> f32 {
        self.value.float_value()
    }

    /// Shorthand for `self.value.double_value()`.
    pub fn double_value(&self) -> f64 {
        self.value.double_value()
    }

    /// Shorthand for `self.value.string_value()`.
    pub fn string_value(&self) -> Option<&str> {
        self.value.string_value()
    }
}

impl fmt::Display for FeatureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}
