//! Core module containing the catalog model, query layer and state holders

pub mod error;
pub mod events;
pub mod favorites;
pub mod fetch;
pub mod filter;
pub mod params;
pub mod product;
pub mod query;
pub mod request;
pub mod service;
pub mod session;
pub mod store;

pub use error::{CatalogError, ConfigError, FetchError, StorageError};
pub use events::{EventBus, EventEnvelope, FavoritesEvent};
pub use favorites::{FAVORITES_KEY, Favorites, FavoritesSet};
pub use fetch::{FailureMode, FetchPolicy};
pub use filter::{FilterSpec, FilterUpdate, SortMode};
pub use params::{Location, ParamMap};
pub use product::Product;
pub use query::QueryOutcome;
pub use request::{Debouncer, RequestTicket, RequestTracker};
pub use service::ProductService;
pub use session::{CatalogSession, LoadState, RefreshOutcome};
pub use store::{KeyValueStore, QueryableStore};
