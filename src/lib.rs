//! # Catalog Explorer
//!
//! Headless state and data layer for a product catalog view.
//!
//! ## Features
//!
//! - **Query Layer**: Search, category, tag and stock filters with five sort modes
//! - **Shareable Locations**: Filters live in the URL query string and survive reloads
//! - **Simulated API**: Configurable latency and failure rate over a seeded dataset
//! - **Last Request Wins**: Slow, superseded listings never overwrite newer results
//! - **Persistent Favorites**: Pluggable key-value backends (memory, file, LMDB)
//! - **Configuration-Based**: Dataset, network and storage settings via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let config = CatalogConfig::default();
//! let api = Arc::new(CatalogApi::new(config.build_store(Utc::now()), config.fetch_policy()));
//! let session = CatalogSession::new(api, Location::parse("https://shop.example/?category=Audio")?);
//!
//! session.update_filters(FilterUpdate::InStock(Some(true)));
//! session.refresh().await;
//!
//! let favorites = Favorites::load(config.open_storage()?);
//! favorites.toggle("itm_001");
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Model ===
    pub use crate::core::{
        error::{CatalogError, ConfigError, FetchError, StorageError},
        filter::{FilterSpec, FilterUpdate, SortMode},
        product::Product,
        query::{QueryOutcome, apply_filters, apply_sort, run_query},
    };

    // === State Holders ===
    pub use crate::core::{
        events::{EventBus, EventEnvelope, FavoritesEvent},
        favorites::{Favorites, FavoritesSet},
        params::{Location, ParamMap},
        request::{Debouncer, RequestTicket, RequestTracker},
        session::{CatalogSession, LoadState, RefreshOutcome},
    };

    // === Core Traits ===
    pub use crate::core::{
        service::ProductService,
        store::{KeyValueStore, QueryableStore},
    };

    // === Storage ===
    pub use crate::core::fetch::{FailureMode, FetchPolicy};
    pub use crate::storage::{
        CatalogApi, FileKeyValueStore, InMemoryKeyValueStore, ProductGenerator, ProductStore,
    };
    #[cfg(feature = "lmdb")]
    pub use crate::storage::LmdbKeyValueStore;

    // === Config ===
    pub use crate::config::{CatalogConfig, StorageBackend};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
