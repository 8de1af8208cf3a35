// Togglekit - multi-source feature-flag resolution
//
// This library resolves named feature flags by querying an ordered chain of
// configuration providers, memoizing results, and fanning configuration
// changes out to observers.

// Re-export core functionality
pub use togglekit_core::*;

// Re-export the change-notification channel
pub use togglekit_events::{ChangeEvent, ChangeNotifier};

// Re-export the manager and reference providers
pub use togglekit_manager::{FeatureFlagManager, MemoryConfiguration, StaticConfiguration};
