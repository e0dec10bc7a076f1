//! Favorites change notifications
//!
//! The EventBus decouples favorites mutations from the views that highlight
//! favorite products. It uses `tokio::sync::broadcast`, so any number of views
//! can subscribe and a mutation never waits on a slow subscriber.
//!
//! # Usage
//!
//! ```rust,ignore
//! let favorites = Favorites::load(storage);
//! let mut rx = favorites.subscribe();
//!
//! favorites.toggle("itm_001");
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{} -> {} favorites", envelope.event.product_id(), envelope.event.count());
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// A change to the favorites set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FavoritesEvent {
    /// A product was marked as favorite
    Added { product_id: String, count: usize },
    /// A product was unmarked
    Removed { product_id: String, count: usize },
}

impl FavoritesEvent {
    pub fn product_id(&self) -> &str {
        match self {
            FavoritesEvent::Added { product_id, .. }
            | FavoritesEvent::Removed { product_id, .. } => product_id,
        }
    }

    /// Size of the favorites set after the change
    pub fn count(&self) -> usize {
        match self {
            FavoritesEvent::Added { count, .. } | FavoritesEvent::Removed { count, .. } => *count,
        }
    }

    pub fn action(&self) -> &str {
        match self {
            FavoritesEvent::Added { .. } => "added",
            FavoritesEvent::Removed { .. } => "removed",
        }
    }
}

/// A published favorites change, stamped for ordering and dedup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    /// Publish time
    pub timestamp: DateTime<Utc>,
    pub event: FavoritesEvent,
}

impl EventEnvelope {
    pub fn new(event: FavoritesEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Fan-out channel for [`FavoritesEvent`]s
///
/// Clones publish into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Bus buffering at most `capacity` undelivered events per receiver
    ///
    /// Receivers that fall more than `capacity` events behind get a `Lagged`
    /// error on their next `recv()`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Stamp and broadcast `event`; returns how many receivers got it
    pub fn publish(&self, event: FavoritesEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        // send() only errors when nobody is listening
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
