//! Feature-flag resolution for togglekit.
//!
//! [`FeatureFlagManager`] resolves named flags by querying an ordered chain
//! of [`Configuration`](togglekit_core::Configuration) providers with
//! first-match-wins priority, memoizes results when caching is enabled, and
//! republishes configuration changes to registered observers.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use togglekit_events::ChangeNotifier;
//! use togglekit_manager::{FeatureFlagManager, MemoryConfiguration, StaticConfiguration};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let notifier = ChangeNotifier::new();
//!
//! // Overrides first, defaults last: earlier providers win.
//! let overrides = Arc::new(MemoryConfiguration::new(notifier.clone()));
//! let defaults = Arc::new(StaticConfiguration::new("Defaults").with_value("dark_mode", true));
//!
//! let manager = FeatureFlagManager::new(vec![overrides, defaults], notifier);
//!
//! assert!(manager.is_feature_enabled("dark_mode").await);
//! let data = manager.feature_data("dark_mode").await.unwrap();
//! assert_eq!(data.source.as_deref(), Some("Defaults"));
//! # }
//! ```
//!
//! # Caching
//!
//! Caching is off by default. Once enabled, resolved values are memoized
//! until a change event fires, the cache is reset, or the toggle flips:
//!
//! ```rust,ignore
//! manager.set_use_cache(true).await;
//! manager.reset_cache().await;
//! ```
//!
//! # Observing changes
//!
//! ```rust,ignore
//! manager.register_for_updates("settings-screen", |value| {
//!     println!("flag changed to {value}");
//! });
//! manager.deregister_for_updates("settings-screen");
//! ```

pub mod manager;
pub mod providers;

pub use manager::FeatureFlagManager;
pub use providers::{MemoryConfiguration, StaticConfiguration};
