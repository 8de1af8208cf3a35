//! Configuration provider capability traits.

use crate::data::FeatureData;
use crate::value::FeatureValue;
use async_trait::async_trait;

/// A source of flag truth, queried by the manager in priority order.
///
/// Providers are fully opaque beyond this capability: the manager assumes
/// nothing about their internal caching, freshness, or I/O latency. A
/// provider that cannot answer degrades to `false`/`None`; it never fails.
#[async_trait]
pub trait Configuration: Send + Sync {
    /// Identity of this provider, used by the manager for source attribution
    /// on resolved [`FeatureData`].
    fn name(&self) -> &str;

    /// Whether the named flag is enabled per this provider.
    ///
    /// Returns `false` when the provider has no opinion; absence and
    /// explicit-false are indistinguishable at this layer.
    async fn is_feature_enabled(&self, feature: &str) -> bool;

    /// Full data for the named flag, `None` when this provider has no value.
    async fn feature_data(&self, feature: &str) -> Option<FeatureData>;

    /// Runtime capability query for the mutable extension.
    ///
    /// Mutable providers override this to return `Some(self)`.
    fn as_mutable(&self) -> Option<&dyn MutableConfiguration> {
        None
    }
}

/// A provider that additionally supports writes.
///
/// Implementations persist on their own schedule and publish a change event
/// on their injected notifier once the write is committed, after any
/// network or disk I/O completes, decoupled in time from the caller.
#[async_trait]
pub trait MutableConfiguration: Configuration {
    /// Store `value` under `feature`.
    async fn set(&self, value: FeatureValue, feature: &str);

    /// Remove any stored value for `feature`.
    async fn delete_value(&self, feature: &str);
}
