//! Catalog browsing session
//!
//! A [`CatalogSession`] ties the pieces of the catalog view together: the
//! current [`Location`] (source of truth for filters), a [`ProductService`]
//! to read from, and a [`RequestTracker`] so a slow, superseded listing can
//! never overwrite the result of a newer one.

use crate::core::error::FetchError;
use crate::core::filter::{FilterSpec, FilterUpdate};
use crate::core::params::Location;
use crate::core::product::Product;
use crate::core::query::QueryOutcome;
use crate::core::request::{RequestTicket, RequestTracker};
use crate::core::service::ProductService;
use std::sync::{Arc, PoisonError, RwLock};

/// What the catalog view should currently show
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A listing is in flight
    Loading,
    /// The latest listing resolved
    Loaded(QueryOutcome<Product>),
    /// The latest listing failed
    Failed(FetchError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// What happened to the result of one refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The result became the session state
    Applied,
    /// A newer refresh started first; the result was discarded
    Stale,
}

/// Shared state of one catalog view
///
/// Clones share location, tracker and state, so a clone can be moved into a
/// spawned task while the view keeps reading from the original.
pub struct CatalogSession<S: ProductService> {
    service: Arc<S>,
    location: Arc<RwLock<Location>>,
    tracker: RequestTracker,
    state: Arc<RwLock<LoadState>>,
}

impl<S: ProductService> Clone for CatalogSession<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            location: Arc::clone(&self.location),
            tracker: self.tracker.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: ProductService> CatalogSession<S> {
    pub fn new(service: Arc<S>, location: Location) -> Self {
        Self {
            service,
            location: Arc::new(RwLock::new(location)),
            tracker: RequestTracker::new(),
            state: Arc::new(RwLock::new(LoadState::Idle)),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Current location, with filters in its query string
    pub fn location(&self) -> Location {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Filters decoded from the current location
    pub fn filters(&self) -> FilterSpec {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .filters()
    }

    pub fn state(&self) -> LoadState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Change one filter in the location; returns the new filters
    pub fn update_filters(&self, update: FilterUpdate) -> FilterSpec {
        let mut location = self.location.write().unwrap_or_else(PoisonError::into_inner);
        location.update(update);
        location.filters()
    }

    /// Replace every filter in the location
    pub fn set_filters(&self, spec: &FilterSpec) {
        self.location
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_filters(spec);
    }

    pub fn clear_filters(&self) {
        self.location
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear_filters();
    }

    /// Point the session at a new location (e.g. after back navigation)
    pub fn navigate(&self, location: Location) {
        *self.location.write().unwrap_or_else(PoisonError::into_inner) = location;
    }

    /// List products for the current filters and apply the result
    ///
    /// If another refresh starts while this one is waiting, this result is
    /// dropped and [`RefreshOutcome::Stale`] is returned.
    pub async fn refresh(&self) -> RefreshOutcome {
        let filters = self.filters();
        let ticket = self.tracker.begin();
        self.set_state(LoadState::Loading);

        let result = self.service.list(&filters).await;
        self.apply(ticket, result)
    }

    fn apply(
        &self,
        ticket: RequestTicket,
        result: Result<QueryOutcome, FetchError>,
    ) -> RefreshOutcome {
        if !self.tracker.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.sequence(),
                "Discarding stale product listing"
            );
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(outcome) => self.set_state(LoadState::Loaded(outcome)),
            Err(e) => {
                tracing::info!(error = %e, "Product listing failed");
                self.set_state(LoadState::Failed(e));
            }
        }
        RefreshOutcome::Applied
    }

    fn set_state(&self, state: LoadState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fetch::FetchPolicy;
    use crate::core::filter::SortMode;
    use crate::core::product::fixtures::product;
    use crate::storage::{CatalogApi, ProductStore};

    fn session(policy: FetchPolicy, url: &str) -> CatalogSession<CatalogApi> {
        let store = ProductStore::new(vec![
            product("itm_001", "Earbuds", "Audio", 100.0, true, &["audio"]),
            product("itm_002", "Laptop", "Computers", 900.0, true, &["computers"]),
        ]);
        CatalogSession::new(
            Arc::new(CatalogApi::new(store, policy)),
            Location::parse(url).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_refresh_uses_location_filters() {
        let session = session(
            FetchPolicy::instant(),
            "https://shop.example/?category=Computers",
        );
        assert_eq!(session.state(), LoadState::Idle);

        assert_eq!(session.refresh().await, RefreshOutcome::Applied);
        match session.state() {
            LoadState::Loaded(outcome) => {
                assert_eq!(outcome.len(), 1);
                assert_eq!(outcome.items()[0].id, "itm_002");
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_refresh_is_retryable() {
        let session = session(FetchPolicy::failing(), "https://shop.example/");

        session.refresh().await;
        match session.state() {
            LoadState::Failed(e) => assert!(e.is_retryable()),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_filters_rewrites_location() {
        let session = session(FetchPolicy::instant(), "https://shop.example/?ref=ad");

        let spec = session.update_filters(FilterUpdate::Sort(Some(SortMode::PriceAsc)));
        assert_eq!(spec.sort, Some(SortMode::PriceAsc));
        assert_eq!(
            session.location().as_str(),
            "https://shop.example/?ref=ad&sort=price-asc"
        );

        session.clear_filters();
        assert_eq!(session.location().as_str(), "https://shop.example/?ref=ad");
    }

    #[tokio::test]
    async fn test_no_matches_state() {
        let session = session(
            FetchPolicy::instant(),
            "https://shop.example/?category=Gaming",
        );

        session.refresh().await;
        assert_eq!(session.state(), LoadState::Loaded(QueryOutcome::NoMatches));
    }
}
