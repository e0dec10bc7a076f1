//! Configuration loading and management

use crate::core::error::{ConfigError, StorageError};
use crate::core::favorites::FAVORITES_KEY;
use crate::core::fetch::{DEFAULT_FETCH_DELAY, FailureMode, FetchPolicy};
use crate::core::request::{DEFAULT_DEBOUNCE, Debouncer};
use crate::core::store::KeyValueStore;
use crate::storage::generator::{DEFAULT_PER_CATEGORY, DEFAULT_SEED, ProductGenerator};
use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, ProductStore};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Synthetic dataset settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Seed for the product generator
    pub seed: u64,

    /// Products generated for each category
    pub products_per_category: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            products_per_category: DEFAULT_PER_CATEGORY,
        }
    }
}

/// Simulated network settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Delay before every read resolves, in milliseconds
    pub delay_ms: u64,

    pub failure: FailureMode,

    /// Optional seed for reproducible failure rolls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_FETCH_DELAY.as_millis() as u64,
            failure: FailureMode::default(),
            seed: None,
        }
    }
}

/// Where favorites are persisted
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageBackend {
    /// Lost when the process exits
    #[default]
    Memory,
    /// One JSON file per key inside `dir`
    File { dir: PathBuf },
    /// LMDB environment at `path` (requires the `lmdb` feature)
    Lmdb { path: PathBuf },
}

/// Favorites persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    /// Key the favorites list is stored under
    pub storage_key: String,

    pub backend: StorageBackend,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            storage_key: FAVORITES_KEY.to_string(),
            backend: StorageBackend::default(),
        }
    }
}

/// Complete configuration for a catalog explorer instance
///
/// Every section is optional in YAML; missing values take their defaults.
///
/// ```yaml
/// dataset:
///   seed: 42
///   products_per_category: 20
/// fetch:
///   delay_ms: 0
///   failure:
///     mode: never
/// debounce_ms: 250
/// favorites:
///   backend:
///     type: file
///     dir: /var/lib/catalog
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub dataset: DatasetConfig,
    pub fetch: FetchConfig,

    /// Quiet period for search input, in milliseconds
    pub debounce_ms: u64,

    pub favorites: FavoritesConfig,
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string(),
            },
            _ => ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            },
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot constrain on its own
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.dataset.products_per_category == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dataset.products_per_category".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if let FailureMode::Random { rate } = self.fetch.failure {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidValue {
                    field: "fetch.failure.rate".to_string(),
                    value: rate.to_string(),
                    message: "must be between 0 and 1".to_string(),
                });
            }
        }

        if self.favorites.storage_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "favorites.storage_key".to_string(),
                value: String::new(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generator for the configured dataset, anchored at `now`
    pub fn generator(&self, now: DateTime<Utc>) -> ProductGenerator {
        ProductGenerator::new(self.dataset.seed, self.dataset.products_per_category, now)
    }

    /// Build the product store, anchored at `now`
    pub fn build_store(&self, now: DateTime<Utc>) -> ProductStore {
        ProductStore::generate(&self.generator(now))
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        let policy = FetchPolicy::new(Duration::from_millis(self.fetch.delay_ms), self.fetch.failure);
        match self.fetch.seed {
            Some(seed) => policy.with_seed(seed),
            None => policy,
        }
    }

    pub fn debouncer(&self) -> Debouncer {
        Debouncer::new(Duration::from_millis(self.debounce_ms))
    }

    /// Open the configured favorites backend
    pub fn open_storage(&self) -> std::result::Result<Arc<dyn KeyValueStore>, StorageError> {
        match &self.favorites.backend {
            StorageBackend::Memory => Ok(Arc::new(InMemoryKeyValueStore::new())),
            StorageBackend::File { dir } => Ok(Arc::new(FileKeyValueStore::open(dir)?)),
            #[cfg(feature = "lmdb")]
            StorageBackend::Lmdb { path } => {
                Ok(Arc::new(crate::storage::LmdbKeyValueStore::open(path)?))
            }
            #[cfg(not(feature = "lmdb"))]
            StorageBackend::Lmdb { .. } => Err(StorageError::Unavailable {
                backend: "lmdb",
                message: "compiled without the `lmdb` feature".to_string(),
            }),
        }
    }

    /// Create a configuration suited to tests: no delay, no failures
    pub fn test_config() -> Self {
        Self {
            fetch: FetchConfig {
                delay_ms: 0,
                failure: FailureMode::Never,
                seed: None,
            },
            debounce_ms: 0,
            ..Self::default()
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            fetch: FetchConfig::default(),
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            favorites: FavoritesConfig::default(),
        }
    }
}
