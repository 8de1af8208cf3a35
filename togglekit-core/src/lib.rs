//! Core types for the togglekit feature-flag system.
//!
//! This crate defines the vocabulary the rest of togglekit speaks:
//!
//! - [`FeatureValue`] - the closed set of value kinds a flag can hold
//! - [`FeatureData`] - an immutable resolved-flag record
//! - [`Configuration`] / [`MutableConfiguration`] - the provider capability
//!   traits implemented by flag sources
//! - [`FlagError`] - the error surface for write delegation
//!
//! # Quick Start
//!
//! ```
//! use togglekit_core::{FeatureData, FeatureValue};
//!
//! let data = FeatureData::new("dark_mode", true).with_title("Dark Mode");
//!
//! assert!(data.bool_value());
//! assert_eq!(data.display_title(), "Dark Mode");
//! assert_eq!(data.value, FeatureValue::Bool(true));
//! ```
//!
//! # Value coercion
//!
//! [`FeatureValue`] conversions go through the canonical string form and
//! degrade to zero rather than failing:
//!
//! ```
//! use togglekit_core::FeatureValue;
//!
//! assert_eq!(FeatureValue::Double(2.9).int_value(), 2);
//! // Boolean truthiness is never derived from numbers.
//! assert!(!FeatureValue::Int(1).bool_value());
//! ```

pub mod data;
pub mod error;
pub mod provider;
pub mod value;

pub use data::FeatureData;
pub use error::{FlagError, FlagResult};
pub use provider::{Configuration, MutableConfiguration};
pub use value::FeatureValue;
