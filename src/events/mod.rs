//! In-process snapshot feed backed by a `tokio::sync::broadcast` channel.
//!
//! [`ChangeFeed`] replaces the document store's push subscriptions: after
//! every ambassador mutation the repository publishes a full
//! [`AmbassadorsSnapshot`] here, and any number of subscribers receive it
//! independently. Dropping a receiver is the cancellation handle; a dropped
//! subscriber detaches immediately and cannot be leaked.

use tokio::sync::broadcast;

use crate::models::AmbassadorsSnapshot;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 16;

/// Fan-out feed of ambassador-collection snapshots.
///
/// When the buffer is full, the oldest un-consumed snapshots are dropped and
/// slow receivers observe a `RecvError::Lagged`. That is safe here: every
/// delivery is the whole collection, so skipping to the newest snapshot
/// loses nothing.
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<AmbassadorsSnapshot>,
}

impl ChangeFeed {
    /// Create a feed with a specific channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a snapshot to all current subscribers.
    ///
    /// If there are no active subscribers the snapshot is silently dropped.
    pub fn publish(&self, snapshot: AmbassadorsSnapshot) {
        // Ignore the SendError, it only means there are zero receivers.
        let _ = self.sender.send(snapshot);
    }

    /// Subscribe to all snapshots published on this feed.
    pub fn subscribe(&self) -> broadcast::Receiver<AmbassadorsSnapshot> {
        self.sender.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
