//! Persisted favorites
//!
//! [`FavoritesSet`] is the pure, reducer-like value: an ordered list of
//! product ids with unique membership. [`Favorites`] is the shared handle
//! views receive explicitly; it owns the set, writes it to a
//! [`KeyValueStore`] after every effective mutation and broadcasts a
//! [`FavoritesEvent`].
//!
//! Persistence never fails the caller. A missing or corrupt stored value
//! loads as an empty set, and a failed write is logged while the in-memory
//! state keeps the change.

use crate::core::events::{EventBus, EventEnvelope, FavoritesEvent};
use crate::core::store::KeyValueStore;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Storage key holding the serialized favorites list
pub const FAVORITES_KEY: &str = "catalog-explorer-favorites";

/// Ordered set of favorite product ids
///
/// Serializes as a plain JSON array of strings. Duplicates in stored data
/// collapse on load, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    ids: IndexSet<String>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a stored JSON list
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Flip membership of `id`; returns whether it is now a favorite
    ///
    /// Newly added ids go to the end of the list.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.shift_remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Remove `id`; returns whether it was present
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.shift_remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Shared favorites handle
///
/// Cloning is cheap and every clone observes the same state, so one handle
/// can be created at startup and passed to each view that needs it.
#[derive(Clone)]
pub struct Favorites {
    state: Arc<RwLock<FavoritesSet>>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    events: EventBus,
}

impl Favorites {
    /// Load favorites stored under [`FAVORITES_KEY`]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_key(storage, FAVORITES_KEY)
    }

    /// Load favorites stored under a custom key
    pub fn load_with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let initial = read_initial(storage.as_ref(), &key);

        tracing::debug!(
            backend = storage.backend(),
            key = %key,
            count = initial.len(),
            "Loaded favorites"
        );

        Self {
            state: Arc::new(RwLock::new(initial)),
            storage,
            key,
            events: EventBus::default(),
        }
    }

    /// Flip membership of `id`; returns whether it is now a favorite
    pub fn toggle(&self, id: &str) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let now_favorite = state.toggle(id);
        self.persist(&state);

        let count = state.len();
        drop(state);

        let product_id = id.to_string();
        self.events.publish(if now_favorite {
            FavoritesEvent::Added { product_id, count }
        } else {
            FavoritesEvent::Removed { product_id, count }
        });

        now_favorite
    }

    /// Remove `id` if present; returns whether anything changed
    ///
    /// Removing an id that is not a favorite neither writes nor publishes.
    pub fn remove(&self, id: &str) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.remove(id) {
            return false;
        }
        self.persist(&state);

        let count = state.len();
        drop(state);

        self.events.publish(FavoritesEvent::Removed {
            product_id: id.to_string(),
            count,
        });
        true
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.read().contains(id)
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Favorite ids in the order they were added
    pub fn ids(&self) -> Vec<String> {
        self.read().to_vec()
    }

    pub fn snapshot(&self) -> FavoritesSet {
        self.read().clone()
    }

    /// Subscribe to favorites changes
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, FavoritesSet> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    // Called with the write lock held so stored order matches mutation order.
    fn persist(&self, set: &FavoritesSet) {
        let raw = match set.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize favorites");
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &raw) {
            tracing::warn!(
                backend = self.storage.backend(),
                key = %self.key,
                error = %e,
                "Failed to save favorites"
            );
        }
    }
}

impl std::fmt::Debug for Favorites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Favorites")
            .field("key", &self.key)
            .field("backend", &self.storage.backend())
            .field("ids", &*self.read())
            .finish()
    }
}

fn read_initial(storage: &dyn KeyValueStore, key: &str) -> FavoritesSet {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return FavoritesSet::new(),
        Err(e) => {
            tracing::warn!(backend = storage.backend(), error = %e, "Failed to read favorites");
            return FavoritesSet::new();
        }
    };

    FavoritesSet::from_json(&raw).unwrap_or_else(|e| {
        tracing::warn!(key = %key, error = %e, "Stored favorites are malformed, starting empty");
        FavoritesSet::new()
    })
}
