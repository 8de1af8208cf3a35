//! Multi-source flag resolution.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use togglekit_core::{
    Configuration, FeatureData, FeatureValue, FlagError, FlagResult, MutableConfiguration,
};
use togglekit_events::{ChangeEvent, ChangeNotifier};
use tokio::sync::Mutex;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Orchestrates an ordered chain of [`Configuration`] providers.
///
/// Resolution walks the chain in priority order and the first answer wins.
/// With caching enabled, results are memoized until a [`ChangeEvent`] fires
/// on the injected notifier, [`reset_cache`](Self::reset_cache) is called, or
/// the cache toggle flips.
///
/// All cache reads and writes, and the provider iteration they depend on,
/// serialize through a single internal mutex. Provider calls run inside that
/// critical section, so a slow provider stalls every other manager
/// operation; an accepted tradeoff, not something the manager works around.
/// Observer callbacks run on their own tasks, never inside the critical
/// section, so a callback may call back into the manager.
///
/// The manager must be created inside a Tokio runtime: it spawns a task that
/// listens for change events for the lifetime of the manager.
pub struct FeatureFlagManager {
    state: Arc<Mutex<ManagerState>>,
    notifier: ChangeNotifier,
    observers: StdMutex<HashMap<String, JoinHandle<()>>>,
    invalidation: JoinHandle<()>,
}

struct ManagerState {
    configurations: Vec<Arc<dyn Configuration>>,
    use_cache: bool,
    feature_cache: HashMap<String, bool>,
    feature_data_cache: HashMap<String, FeatureData>,
    // Reserved for experiment-variant lookups; cleared with the others.
    experiment_cache: HashMap<String, String>,
}

impl ManagerState {
    fn clear_caches(&mut self) {
        self.feature_cache.clear();
        self.feature_data_cache.clear();
        self.experiment_cache.clear();
    }
}

impl FeatureFlagManager {
    /// Create a manager over an ordered provider chain.
    ///
    /// Earlier providers win ties. The chain is fixed for the lifetime of
    /// the manager. Caching starts disabled.
    pub fn new(configurations: Vec<Arc<dyn Configuration>>, notifier: ChangeNotifier) -> Self {
        let state = Arc::new(Mutex::new(ManagerState {
            configurations,
            use_cache: false,
            feature_cache: HashMap::new(),
            feature_data_cache: HashMap::new(),
            experiment_cache: HashMap::new(),
        }));

        let invalidation = tokio::spawn(Self::invalidation_loop(
            state.clone(),
            notifier.subscribe(),
        ));

        Self {
            state,
            notifier,
            observers: StdMutex::new(HashMap::new()),
            invalidation,
        }
    }

    async fn invalidation_loop(
        state: Arc<Mutex<ManagerState>>,
        mut rx: broadcast::Receiver<ChangeEvent>,
    ) {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let mut state = state.lock().await;
                    if state.use_cache {
                        debug!(event_id = %event.id, "configuration changed, resetting caches");
                        state.clear_caches();
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // A lagged receiver dropped change events; reset anyway.
                    warn!(skipped, "change stream lagged");
                    let mut state = state.lock().await;
                    if state.use_cache {
                        state.clear_caches();
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    /// Resolve the boolean state of `feature`.
    ///
    /// Logical OR over the chain in priority order, short-circuiting at the
    /// first provider reporting `true`. With caching enabled the resolved
    /// value is stored on every miss, including `false`.
    ///
    /// A flag no provider knows about resolves to `false`: absence and
    /// explicit-false are indistinguishable here. Callers that need the
    /// distinction use [`feature_data`](Self::feature_data).
    pub async fn is_feature_enabled(&self, feature: &str) -> bool {
        let mut state = self.state.lock().await;
        if state.use_cache
            && let Some(&cached) = state.feature_cache.get(feature)
        {
            return cached;
        }

        let mut enabled = false;
        for configuration in &state.configurations {
            if configuration.is_feature_enabled(feature).await {
                enabled = true;
                break;
            }
        }

        if state.use_cache {
            state.feature_cache.insert(feature.to_string(), enabled);
        }
        enabled
    }

    /// Resolve full data for `feature`.
    ///
    /// The first provider with an answer wins. The result's `source` is
    /// overwritten with that provider's [`name`](Configuration::name);
    /// whatever source the provider supplied is discarded. Returns `None`
    /// when no provider answers.
    ///
    /// Caching note: unlike [`is_feature_enabled`](Self::is_feature_enabled),
    /// a miss only refreshes a key that already has a cache entry; a fresh
    /// key is never seeded into the data cache. This asymmetry is deliberate.
    pub async fn feature_data(&self, feature: &str) -> Option<FeatureData> {
        let mut state = self.state.lock().await;
        if state.use_cache
            && let Some(cached) = state.feature_data_cache.get(feature)
        {
            return Some(cached.clone());
        }

        let mut resolved = None;
        for configuration in &state.configurations {
            if let Some(answer) = configuration.feature_data(feature).await {
                let mut attributed = answer;
                attributed.feature = feature.to_string();
                attributed.source = Some(configuration.name().to_string());
                resolved = Some(attributed);
                break;
            }
        }

        match &resolved {
            Some(data) => {
                if state.use_cache && state.feature_data_cache.contains_key(feature) {
                    state
                        .feature_data_cache
                        .insert(feature.to_string(), data.clone());
                }
            }
            None => trace!(feature, "no provider answered"),
        }
        resolved
    }

    /// Write `value` through the first mutable provider in the chain.
    ///
    /// Any cached data entry for `feature` is evicted before delegation. The
    /// provider persists the write on its own schedule and publishes the
    /// change event once committed; the manager emits nothing itself.
    ///
    /// Returns [`FlagError::NoMutableProvider`] when no provider in the
    /// chain supports writes. Nothing is evicted or published in that case.
    pub async fn set(&self, value: FeatureValue, feature: &str) -> FlagResult<()> {
        let target = self.mutable_target(feature).await?;
        if let Some(mutable) = target.as_mutable() {
            mutable.set(value, feature).await;
        }
        Ok(())
    }

    /// Delete the stored value for `feature` through the first mutable
    /// provider in the chain. Symmetric with [`set`](Self::set).
    pub async fn delete_value(&self, feature: &str) -> FlagResult<()> {
        let target = self.mutable_target(feature).await?;
        if let Some(mutable) = target.as_mutable() {
            mutable.delete_value(feature).await;
        }
        Ok(())
    }

    // Locates the designated mutable provider and evicts the cached data
    // entry for `feature` while still inside the critical section. The
    // returned provider is invoked by the caller outside the lock.
    async fn mutable_target(&self, feature: &str) -> FlagResult<Arc<dyn Configuration>> {
        let mut state = self.state.lock().await;
        let Some(target) = state
            .configurations
            .iter()
            .find(|configuration| configuration.as_mutable().is_some())
            .cloned()
        else {
            return Err(FlagError::NoMutableProvider);
        };

        if state.use_cache {
            state.feature_data_cache.remove(feature);
        }
        Ok(target)
    }

    /// Whether resolution results are memoized.
    pub async fn use_cache(&self) -> bool {
        self.state.lock().await.use_cache
    }

    /// Toggle caching.
    ///
    /// Flipping the toggle in either direction clears all cached state;
    /// setting it to its current value does nothing.
    pub async fn set_use_cache(&self, enabled: bool) {
        let mut state = self.state.lock().await;
        if state.use_cache != enabled {
            state.use_cache = enabled;
            state.clear_caches();
            debug!(enabled, "cache toggled");
        }
    }

    /// Drop every cached resolution unconditionally.
    pub async fn reset_cache(&self) {
        let mut state = self.state.lock().await;
        state.clear_caches();
    }

    /// Register `callback` under `key`, replacing any prior subscription for
    /// the same key.
    ///
    /// `key` is an opaque, caller-chosen subscriber identity. The callback
    /// runs on its own task whenever a change event names the flag that
    /// changed; payload-less events invalidate caches but do not fire
    /// callbacks. Because delivery happens off the manager's critical
    /// section, the callback may call back into the manager.
    pub fn register_for_updates<F>(&self, key: impl Into<String>, callback: F)
    where
        F: Fn(FeatureValue) + Send + Sync + 'static,
    {
        let key = key.into();
        let mut rx = self.notifier.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if let Some(data) = event.feature {
                            callback(data.value);
                        }
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        });

        let mut observers = self.lock_observers();
        if let Some(previous) = observers.insert(key, handle) {
            previous.abort();
        }
    }

    /// Remove the subscription registered under `key`; no-op when absent.
    pub fn deregister_for_updates(&self, key: &str) {
        let mut observers = self.lock_observers();
        if let Some(handle) = observers.remove(key) {
            handle.abort();
        }
    }

    /// The notifier this manager listens on.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    fn lock_observers(&self) -> MutexGuard<'_, HashMap<String, JoinHandle<()>>> {
        self.observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for FeatureFlagManager {
    fn drop(&mut self) {
        self.invalidation.abort();
        let mut observers = self.lock_observers();
        for (_, handle) in observers.drain() {
            handle.abort();
        }
    }
}

/// Managers compose: one manager can sit in another's provider chain, for
/// reads and writes alike.
#[async_trait]
impl Configuration for FeatureFlagManager {
    fn name(&self) -> &str {
        "FeatureFlagManager"
    }

    async fn is_feature_enabled(&self, feature: &str) -> bool {
        FeatureFlagManager::is_feature_enabled(self, feature).await
    }

    async fn feature_data(&self, feature: &str) -> Option<FeatureData> {
        FeatureFlagManager::feature_data(self, feature).await
    }

    fn as_mutable(&self) -> Option<&dyn MutableConfiguration> {
        Some(self)
    }
}

/// A nested manager always advertises the mutable capability, even when its
/// own chain has no mutable provider; writes delegated to such a manager are
/// dropped with a warning, since the provider contract has no error channel.
#[async_trait]
impl MutableConfiguration for FeatureFlagManager {
    async fn set(&self, value: FeatureValue, feature: &str) {
        if FeatureFlagManager::set(self, value, feature).await.is_err() {
            warn!(feature, "nested manager has no mutable provider, write dropped");
        }
    }

    async fn delete_value(&self, feature: &str) {
        if FeatureFlagManager::delete_value(self, feature).await.is_err() {
            warn!(feature, "nested manager has no mutable provider, delete dropped");
        }
    }
}
