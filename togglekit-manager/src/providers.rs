//! Reference providers.
//!
//! Two small [`Configuration`] implementations that cover the common ends of
//! a provider chain: a mutable in-memory store for user overrides and a
//! read-only snapshot for compiled-in defaults. Network- or disk-backed
//! providers live outside this crate and implement the same traits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use togglekit_core::{Configuration, FeatureData, FeatureValue, MutableConfiguration};
use togglekit_events::{ChangeEvent, ChangeNotifier};
use tracing::debug;

/// Mutable in-memory provider.
///
/// Holds nothing beyond the process. Writes publish a [`ChangeEvent`] on the
/// injected notifier once committed, carrying the changed flag; deletes
/// publish a payload-less event.
pub struct MemoryConfiguration {
    name: String,
    values: RwLock<HashMap<String, FeatureValue>>,
    notifier: ChangeNotifier,
}

impl MemoryConfiguration {
    /// Create an empty store publishing on `notifier`.
    pub fn new(notifier: ChangeNotifier) -> Self {
        Self::named("MemoryConfiguration", notifier)
    }

    /// Create an empty store with an explicit provider name.
    pub fn named(name: impl Into<String>, notifier: ChangeNotifier) -> Self {
        Self {
            name: name.into(),
            values: RwLock::new(HashMap::new()),
            notifier,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, FeatureValue>> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, FeatureValue>> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Configuration for MemoryConfiguration {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_feature_enabled(&self, feature: &str) -> bool {
        self.read()
            .get(feature)
            .map(|value| value.bool_value())
            .unwrap_or(false)
    }

    async fn feature_data(&self, feature: &str) -> Option<FeatureData> {
        self.read()
            .get(feature)
            .map(|value| FeatureData::new(feature, value.clone()))
    }

    fn as_mutable(&self) -> Option<&dyn MutableConfiguration> {
        Some(self)
    }
}

#[async_trait]
impl MutableConfiguration for MemoryConfiguration {
    async fn set(&self, value: FeatureValue, feature: &str) {
        let changed = FeatureData::new(feature, value.clone());
        self.write().insert(feature.to_string(), value);
        debug!(feature, provider = %self.name, "value stored");
        self.notifier.publish(ChangeEvent::for_feature(changed));
    }

    async fn delete_value(&self, feature: &str) {
        if self.write().remove(feature).is_some() {
            debug!(feature, provider = %self.name, "value deleted");
            self.notifier.publish(ChangeEvent::new());
        }
    }
}

/// Read-only snapshot provider.
///
/// A fixed set of flag values, typically compiled-in defaults placed last in
/// the chain so live providers win. Never publishes change events.
pub struct StaticConfiguration {
    name: String,
    values: HashMap<String, FeatureData>,
}

impl StaticConfiguration {
    /// Create an empty snapshot with the given provider name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Add a bare value for `feature`.
    pub fn with_value(mut self, feature: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        let feature = feature.into();
        self.values
            .insert(feature.clone(), FeatureData::new(feature, value));
        self
    }

    /// Add a full record, keyed by its feature identifier.
    pub fn with_data(mut self, data: FeatureData) -> Self {
        self.values.insert(data.feature.clone(), data);
        self
    }
}

#[async_trait]
impl Configuration for StaticConfiguration {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_feature_enabled(&self, feature: &str) -> bool {
        self.values
            .get(feature)
            .map(|data| data.bool_value())
            .unwrap_or(false)
    }

    async fn feature_data(&self, feature: &str) -> Option<FeatureData> {
        self.values.get(feature).cloned()
    }
}
