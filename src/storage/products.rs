//! Read-only in-memory product dataset

use crate::core::filter::{FilterSpec, SortMode};
use crate::core::product::Product;
use crate::core::query::{self, QueryOutcome};
use crate::core::store::QueryableStore;
use crate::storage::generator::ProductGenerator;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable product store
///
/// Built once at startup and shared by cloning; clones point at the same
/// dataset. There is no way to mutate a product after construction.
#[derive(Debug, Clone)]
pub struct ProductStore {
    products: Arc<[Product]>,
    index: Arc<HashMap<String, usize>>,
}

impl ProductStore {
    /// Build a store from an existing product list
    ///
    /// When ids repeat, lookups by id resolve to the first occurrence.
    pub fn new(products: Vec<Product>) -> Self {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            index.entry(product.id.clone()).or_insert(pos);
        }

        Self {
            products: products.into(),
            index: Arc::new(index),
        }
    }

    /// Build a store from the synthetic generator
    pub fn generate(generator: &ProductGenerator) -> Self {
        Self::new(generator.generate())
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }

    /// Every product, in dataset order
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sorted unique categories
    pub fn categories(&self) -> Vec<String> {
        query::categories(&self.products)
    }

    /// Sorted unique tags
    pub fn tags(&self) -> Vec<String> {
        query::tags(&self.products)
    }

    /// Filter and sort without copying the whole dataset first
    pub fn search(&self, filter: &FilterSpec) -> QueryOutcome {
        query::run_query(&self.products, filter)
    }
}

impl QueryableStore<Product> for ProductStore {
    fn apply_filters(&self, data: Vec<Product>, filter: &FilterSpec) -> Vec<Product> {
        query::apply_filters(&data, filter)
    }

    fn apply_sort(&self, data: Vec<Product>, sort: SortMode) -> Vec<Product> {
        query::apply_sort(data, sort)
    }

    fn list_all(&self) -> Vec<Product> {
        self.products.to_vec()
    }
}
