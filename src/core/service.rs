//! Service trait for product reads

use crate::core::error::FetchError;
use crate::core::filter::FilterSpec;
use crate::core::product::Product;
use crate::core::query::QueryOutcome;
use async_trait::async_trait;
use futures::future::join_all;

/// Asynchronous read access to the catalog
///
/// Views depend on this trait rather than on a concrete catalog so tests can
/// substitute slow, failing or scripted implementations.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// List products matching `filter`, filtered and sorted
    async fn list(&self, filter: &FilterSpec) -> Result<QueryOutcome, FetchError>;

    /// Get a product by ID
    ///
    /// A missing product is [`FetchError::NotFound`], never a network error.
    async fn get(&self, id: &str) -> Result<Product, FetchError>;

    /// Resolve several ids concurrently, in the order given
    ///
    /// Ids that no longer exist are skipped. Any transient failure fails the
    /// whole batch so the caller can retry it.
    async fn get_many(&self, ids: &[String]) -> Result<Vec<Product>, FetchError> {
        let results = join_all(ids.iter().map(|id| self.get(id))).await;

        let mut products = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(product) => products.push(product),
                Err(FetchError::NotFound { id }) => {
                    tracing::debug!(product_id = %id, "Skipping missing product");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(products)
    }
}
