//! Subscription interface to the provider data layer.
//!
//! The data layer publishes whole snapshots per map mode. There is no
//! incremental diff at this boundary; diffing happens in the marker
//! reconciliation engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use super::types::ProviderEntity;
use crate::mode::MapMode;

/// An immutable provider collection as published by the data layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSnapshot {
    /// Increases with every publish for the same mode
    pub revision: u64,
    pub entities: Arc<[ProviderEntity]>,
}

impl ProviderSnapshot {
    pub fn new(revision: u64, entities: Vec<ProviderEntity>) -> Self {
        Self {
            revision,
            entities: Arc::from(entities),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Current state of a mode's subscription.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeedState {
    /// No data yet, or a retry is in progress
    #[default]
    Loading,
    Ready(ProviderSnapshot),
    /// The fetch failed; the UI offers a retry
    Failed { message: String },
}

/// Read-only subscription to the provider collection of a mode.
pub trait ProviderFeed: Send + Sync {
    /// Subscribe to snapshots for a mode. Dropping the receiver cancels it.
    fn subscribe(&self, mode: MapMode) -> watch::Receiver<FeedState>;

    /// Ask the data layer to fetch again after a failure.
    fn retry(&self, mode: MapMode);
}

struct FeedChannel {
    tx: watch::Sender<FeedState>,
    revision: u64,
    retries: u64,
}

/// Provider feed backed by in-process channels.
///
/// Used by the CLI and tests. Whoever owns it publishes snapshots; `retry`
/// only resets the mode to `Loading` and counts the request.
pub struct InMemoryProviderFeed {
    channels: Mutex<HashMap<MapMode, FeedChannel>>,
}

impl InMemoryProviderFeed {
    pub fn new() -> Self {
        let channels = MapMode::ALL
            .into_iter()
            .map(|mode| {
                let (tx, _rx) = watch::channel(FeedState::Loading);
                (
                    mode,
                    FeedChannel {
                        tx,
                        revision: 0,
                        retries: 0,
                    },
                )
            })
            .collect();
        Self {
            channels: Mutex::new(channels),
        }
    }

    /// Publish a new snapshot for a mode, replacing the previous one.
    ///
    /// Returns the revision assigned to the snapshot.
    pub fn publish(&self, mode: MapMode, entities: Vec<ProviderEntity>) -> u64 {
        self.with_channel(mode, |channel| {
            channel.revision += 1;
            let snapshot = ProviderSnapshot::new(channel.revision, entities);
            channel.tx.send_replace(FeedState::Ready(snapshot));
            channel.revision
        })
    }

    /// Publish the same entity list to every mode.
    ///
    /// Mode restriction is applied by the filter pipeline, so one
    /// collection can serve all three views.
    pub fn publish_all(&self, entities: Vec<ProviderEntity>) {
        for mode in MapMode::ALL {
            self.publish(mode, entities.clone());
        }
    }

    /// Mark a mode's fetch as failed.
    pub fn fail(&self, mode: MapMode, message: impl Into<String>) {
        let message = message.into();
        self.with_channel(mode, |channel| {
            channel.tx.send_replace(FeedState::Failed { message });
        });
    }

    /// Number of retries requested for a mode.
    pub fn retry_count(&self, mode: MapMode) -> u64 {
        self.with_channel(mode, |channel| channel.retries)
    }

    /// Number of live subscriptions for a mode.
    pub fn subscriber_count(&self, mode: MapMode) -> usize {
        self.with_channel(mode, |channel| channel.tx.receiver_count())
    }

    fn with_channel<T>(&self, mode: MapMode, f: impl FnOnce(&mut FeedChannel) -> T) -> T {
        // A poisoned lock only means another publisher panicked mid-send;
        // the channel itself is still consistent.
        let mut channels = self
            .channels
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let channel = channels.entry(mode).or_insert_with(|| FeedChannel {
            tx: watch::channel(FeedState::Loading).0,
            revision: 0,
            retries: 0,
        });
        f(channel)
    }
}

impl Default for InMemoryProviderFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderFeed for InMemoryProviderFeed {
    fn subscribe(&self, mode: MapMode) -> watch::Receiver<FeedState> {
        self.with_channel(mode, |channel| channel.tx.subscribe())
    }

    fn retry(&self, mode: MapMode) {
        self.with_channel(mode, |channel| {
            channel.retries += 1;
            channel.tx.send_replace(FeedState::Loading);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use crate::provider::ProviderType;

    fn entity(id: &str) -> ProviderEntity {
        ProviderEntity::new(id, ProviderType::Clinic, Coordinates::new(35.0, -0.6))
    }

    #[test]
    fn test_subscribe_starts_loading() {
        let feed = InMemoryProviderFeed::new();
        let rx = feed.subscribe(MapMode::Providers);
        assert_eq!(*rx.borrow(), FeedState::Loading);
    }

    #[test]
    fn test_publish_replaces_snapshot() {
        let feed = InMemoryProviderFeed::new();
        let rx = feed.subscribe(MapMode::Emergency);

        assert_eq!(feed.publish(MapMode::Emergency, vec![entity("a")]), 1);
        assert_eq!(feed.publish(MapMode::Emergency, vec![entity("b"), entity("c")]), 2);

        match &*rx.borrow() {
            FeedState::Ready(snapshot) => {
                assert_eq!(snapshot.revision, 2);
                assert_eq!(snapshot.len(), 2);
            }
            other => panic!("expected Ready, got {:?}", other),
        };
    }

    #[test]
    fn test_modes_are_independent() {
        let feed = InMemoryProviderFeed::new();
        let blood = feed.subscribe(MapMode::Blood);
        feed.publish(MapMode::Providers, vec![entity("a")]);
        assert_eq!(*blood.borrow(), FeedState::Loading);
    }

    #[test]
    fn test_fail_and_retry() {
        let feed = InMemoryProviderFeed::new();
        let rx = feed.subscribe(MapMode::Providers);
        feed.fail(MapMode::Providers, "timeout");
        assert!(matches!(&*rx.borrow(), FeedState::Failed { message } if message == "timeout"));

        feed.retry(MapMode::Providers);
        assert_eq!(*rx.borrow(), FeedState::Loading);
        assert_eq!(feed.retry_count(MapMode::Providers), 1);
    }

    #[test]
    fn test_dropping_receiver_cancels_subscription() {
        let feed = InMemoryProviderFeed::new();
        let rx = feed.subscribe(MapMode::Blood);
        assert_eq!(feed.subscriber_count(MapMode::Blood), 1);
        drop(rx);
        assert_eq!(feed.subscriber_count(MapMode::Blood), 0);
    }
}
