//! Shared test harness for key-value backends and catalog fixtures
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

pub mod key_value_store_tests;

use catalog::core::error::StorageError;
use catalog::core::product::Product;
use catalog::core::store::KeyValueStore;
use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use std::sync::atomic::{AtomicUsize, Ordering};

// ---------------------------------------------------------------------------
// Product fixtures
// ---------------------------------------------------------------------------

/// Create a product with sensible defaults for every field the filters ignore.
pub fn create_product(
    id: &str,
    name: &str,
    category: &str,
    price: f64,
    in_stock: bool,
    tags: &[&str],
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        currency: "ZAR".to_string(),
        rating: 4.0,
        review_count: 10,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category: category.to_string(),
        in_stock,
        image_url: format!("https://images.example/{}.png", id),
        description: format!("{} for testing.", name),
        specifications: IndexMap::new(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        images: Vec::new(),
    }
}

/// The five-product catalog used across integration tests.
///
/// | id      | category    | price | in stock | tags                |
/// |---------|-------------|-------|----------|---------------------|
/// | itm_001 | Audio       | 1200  | yes      | audio, wireless     |
/// | itm_002 | Audio       | 450   | no       | audio, budget       |
/// | itm_003 | Computers   | 15000 | yes      | computers, premium  |
/// | itm_004 | Wearables   | 3200  | yes      | wearables, wireless |
/// | itm_005 | Audio       | 2800  | yes      | audio, premium      |
pub fn sample_catalog() -> Vec<Product> {
    vec![
        create_product("itm_001", "Wireless Earbuds", "Audio", 1200.0, true, &["audio", "wireless"]),
        create_product("itm_002", "Studio Headphones", "Audio", 450.0, false, &["audio", "budget"]),
        create_product("itm_003", "Ultrabook Laptop", "Computers", 15000.0, true, &["computers", "premium"]),
        create_product("itm_004", "Fitness Watch", "Wearables", 3200.0, true, &["wearables", "wireless"]),
        create_product("itm_005", "Soundbar Speaker", "Audio", 2800.0, true, &["audio", "premium"]),
    ]
}

pub fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Failing backend
// ---------------------------------------------------------------------------

/// Backend whose reads return a fixed value and whose writes always fail.
///
/// Counts attempted writes so tests can check that no-op operations never
/// touch storage.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub stored: Option<String>,
    pub writes: AtomicUsize,
}

impl FailingStore {
    pub fn with_value(raw: &str) -> Self {
        Self {
            stored: Some(raw.to_string()),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.stored.clone())
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Write {
            backend: "failing",
            key: key.to_string(),
            message: "quota exceeded".to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            backend: "failing",
            key: key.to_string(),
            message: "quota exceeded".to_string(),
        })
    }
}
