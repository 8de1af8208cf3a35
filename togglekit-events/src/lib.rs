//! Configuration-change events for togglekit.
//!
//! This crate provides the broadcast channel that decouples providers from
//! the flag manager: a provider that activates fresh configuration (after a
//! remote fetch, a disk write, anything) publishes a [`ChangeEvent`]; the
//! manager invalidates its caches and fans the event out to registered
//! observers.
//!
//! The channel is an explicit, dependency-injected object: create one
//! [`ChangeNotifier`] per flag-resolution domain and hand clones to the
//! manager and to every mutable provider. Tests get their own isolated
//! notifier for free.
//!
//! # Quick Start
//!
//! ```
//! use togglekit_core::FeatureData;
//! use togglekit_events::{ChangeEvent, ChangeNotifier};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let notifier = ChangeNotifier::new();
//! let mut rx = notifier.subscribe();
//!
//! notifier.publish(ChangeEvent::for_feature(FeatureData::new("dark_mode", true)));
//!
//! let event = rx.recv().await.unwrap();
//! assert!(event.feature.is_some());
//! # }
//! ```

pub mod notifier;

pub use notifier::{ChangeEvent, ChangeNotifier};
