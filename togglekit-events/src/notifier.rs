//! Change-notification channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use togglekit_core::FeatureData;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

/// Default buffer size for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// A "configuration changed" broadcast event.
///
/// Carries no required payload; publishers that know which flag changed
/// attach it under [`feature`](Self::feature).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Unique event ID.
    pub id: Uuid,

    /// When the event was published.
    pub timestamp: DateTime<Utc>,

    /// The specific flag that changed, when the publisher knows it.
    pub feature: Option<FeatureData>,
}

impl ChangeEvent {
    /// A payload-less change event.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            feature: None,
        }
    }

    /// A change event naming the flag that changed.
    pub fn for_feature(feature: FeatureData) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            feature: Some(feature),
        }
    }
}

impl Default for ChangeEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Broadcast channel for configuration-change events.
///
/// Any provider may publish; the manager subscribes for cache invalidation
/// and observer fan-out. Clones share the same underlying channel, so one
/// notifier instance is created per flag-resolution domain and handed to the
/// manager and each mutable provider: an explicit dependency, not a
/// process-wide singleton.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    /// Create a notifier with the default buffer capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a notifier buffering up to `capacity` undelivered events per
    /// subscriber before older ones are dropped.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers the event reached. Publishing with
    /// no subscribers is not an error.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        debug!(
            event_id = %event.id,
            has_feature = event.feature.is_some(),
            "publishing configuration change"
        );
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to change events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use togglekit_core::FeatureValue;

    #[tokio::test]
    async fn test_publish_and_receive() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();

        let data = FeatureData::new("dark_mode", true);
        let reached = notifier.publish(ChangeEvent::for_feature(data.clone()));
        assert_eq!(reached, 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.feature, Some(data));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_not_an_error() {
        let notifier = ChangeNotifier::new();
        assert_eq!(notifier.publish(ChangeEvent::new()), 0);
    }

    #[tokio::test]
    async fn test_clones_share_the_channel() {
        let notifier = ChangeNotifier::new();
        let publisher = notifier.clone();
        let mut rx = notifier.subscribe();

        publisher.publish(ChangeEvent::new());
        let event = rx.recv().await.unwrap();
        assert!(event.feature.is_none());
    }

    #[tokio::test]
    async fn test_all_subscribers_receive() {
        let notifier = ChangeNotifier::new();
        let mut rx1 = notifier.subscribe();
        let mut rx2 = notifier.subscribe();
        assert_eq!(notifier.receiver_count(), 2);

        let event = ChangeEvent::for_feature(FeatureData::new("f", FeatureValue::Int(2)));
        assert_eq!(notifier.publish(event), 2);

        assert!(rx1.recv().await.unwrap().feature.is_some());
        assert!(rx2.recv().await.unwrap().feature.is_some());
    }
}
