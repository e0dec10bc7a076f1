//! Store traits for querying products and persisting small values

use crate::core::error::StorageError;
use crate::core::filter::{FilterSpec, SortMode};
use crate::core::query::QueryOutcome;

/// Trait for stores that support filtering and sorting
///
/// Implement this trait for read-only datasets that can be narrowed by a
/// [`FilterSpec`]. The provided [`query`](QueryableStore::query) method
/// chains the two steps the way every view expects.
pub trait QueryableStore<T>: Send + Sync {
    /// Apply filters to a collection of items, preserving their order
    fn apply_filters(&self, data: Vec<T>, filter: &FilterSpec) -> Vec<T>;

    /// Apply a stable sort to a collection of items
    fn apply_sort(&self, data: Vec<T>, sort: SortMode) -> Vec<T>;

    /// Get all items (unfiltered, unsorted)
    fn list_all(&self) -> Vec<T>;

    /// Filter then sort every item of the store
    fn query(&self, filter: &FilterSpec) -> QueryOutcome<T> {
        let filtered = self.apply_filters(self.list_all(), filter);
        let sorted = match filter.sort {
            Some(mode) => self.apply_sort(filtered, mode),
            None => filtered,
        };
        QueryOutcome::from(sorted)
    }
}

/// Synchronous string key-value persistence
///
/// Mirrors a browser-style local storage slot: values are opaque strings and
/// writes are applied immediately. Callers decide how to degrade on failure.
pub trait KeyValueStore: Send + Sync {
    /// Short backend name used in logs and errors
    fn backend(&self) -> &'static str;

    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
