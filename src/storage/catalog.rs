//! Simulated catalog backend
//!
//! Wraps a [`ProductStore`] behind a [`FetchPolicy`] so every read behaves
//! like a call across a network: it takes time and can fail transiently.

use crate::core::error::FetchError;
use crate::core::fetch::FetchPolicy;
use crate::core::filter::FilterSpec;
use crate::core::product::Product;
use crate::core::query::QueryOutcome;
use crate::core::service::ProductService;
use crate::storage::products::ProductStore;
use async_trait::async_trait;

/// [`ProductService`] over the in-memory dataset
#[derive(Debug, Clone)]
pub struct CatalogApi {
    store: ProductStore,
    policy: FetchPolicy,
}

impl CatalogApi {
    pub fn new(store: ProductStore, policy: FetchPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Categories for filter pickers (no simulated latency)
    pub fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    /// Tags for filter pickers (no simulated latency)
    pub fn tags(&self) -> Vec<String> {
        self.store.tags()
    }
}

#[async_trait]
impl ProductService for CatalogApi {
    async fn list(&self, filter: &FilterSpec) -> Result<QueryOutcome, FetchError> {
        self.policy.simulate("products").await?;

        let outcome = self.store.search(filter);
        tracing::debug!(matches = outcome.len(), "Listed products");
        Ok(outcome)
    }

    async fn get(&self, id: &str) -> Result<Product, FetchError> {
        self.policy.simulate("product details").await?;

        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::not_found(id))
    }
}
