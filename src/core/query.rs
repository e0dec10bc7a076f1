//! Query layer: filtering, sorting and facets over products
//!
//! Everything in here is a pure function of its inputs. An empty result is
//! not an error; it is reported as [`QueryOutcome::NoMatches`] so views can
//! render an explicit "no products found" state.
//!
//! # Example
//! ```rust,ignore
//! let spec = FilterSpec::new()
//!     .with_search("laptop")
//!     .with_in_stock(true)
//!     .with_sort(SortMode::PriceAsc);
//!
//! match run_query(store.all(), &spec) {
//!     QueryOutcome::Matches(products) => render(products),
//!     QueryOutcome::NoMatches => render_empty_state(),
//! }
//! ```

use crate::core::filter::{FilterSpec, SortMode};
use crate::core::product::Product;
use serde::Serialize;
use std::collections::BTreeSet;

/// Result of running a query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "items", rename_all = "snake_case")]
pub enum QueryOutcome<T = Product> {
    /// At least one item matched, in result order
    Matches(Vec<T>),

    /// Nothing matched the filters
    NoMatches,
}

impl<T> QueryOutcome<T> {
    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, QueryOutcome::NoMatches)
    }

    pub fn items(&self) -> &[T] {
        match self {
            QueryOutcome::Matches(items) => items,
            QueryOutcome::NoMatches => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            QueryOutcome::Matches(items) => items,
            QueryOutcome::NoMatches => Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for QueryOutcome<T> {
    fn from(items: Vec<T>) -> Self {
        if items.is_empty() {
            QueryOutcome::NoMatches
        } else {
            QueryOutcome::Matches(items)
        }
    }
}

/// Whether a single product satisfies every narrowing filter of `spec`
///
/// `search_lower` and `tags` are derived from `spec` once per query.
fn matches(
    product: &Product,
    spec: &FilterSpec,
    search_lower: Option<&str>,
    tags: &[&str],
) -> bool {
    search_lower.is_none_or(|needle| product.matches_search(needle))
        && spec
            .category_name()
            .is_none_or(|category| product.category == category)
        && (tags.is_empty() || product.has_any_tag(tags))
        && spec.in_stock.is_none_or(|flag| product.in_stock == flag)
}

/// Keep the products matching `spec`, in their original order
pub fn apply_filters<'a, I>(products: I, spec: &FilterSpec) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let search_lower = spec.search_text().map(str::to_lowercase);
    let tags: Vec<&str> = spec.selected_tags().collect();

    products
        .into_iter()
        .filter(|p| matches(p, spec, search_lower.as_deref(), &tags))
        .cloned()
        .collect()
}

/// Sort products in place for `mode`
///
/// The sort is stable: products comparing equal keep their relative order.
pub fn apply_sort(mut data: Vec<Product>, mode: SortMode) -> Vec<Product> {
    match mode {
        SortMode::PriceAsc => data.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => data.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortMode::RatingDesc => data.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortMode::Newest => data.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortMode::Oldest => data.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
    }

    data
}

/// Filter then sort `products` according to `spec`
pub fn run_query(products: &[Product], spec: &FilterSpec) -> QueryOutcome {
    let filtered = apply_filters(products, spec);

    let sorted = match spec.sort {
        Some(mode) => apply_sort(filtered, mode),
        None => filtered,
    };

    QueryOutcome::from(sorted)
}

/// Sorted unique categories present in `products`
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted unique tags present in `products`
pub fn tags(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::product::fixtures::product;
    use chrono::{Duration, TimeZone, Utc};

    fn sample() -> Vec<Product> {
        vec![
            product("itm_001", "SoundWave Earbuds", "Audio", 120.0, true, &["audio", "wireless"]),
            product("itm_002", "Elite Soundbar", "Audio", 480.0, false, &["audio"]),
            product("itm_003", "TechPro Laptop", "Computers", 899.0, true, &["computers", "premium"]),
            product("itm_004", "Ultra Mouse", "Computers", 120.0, true, &["computers", "wireless"]),
            product("itm_005", "GameForce Controller", "Gaming", 60.0, false, &["gaming", "new"]),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_spec_returns_everything_in_dataset_order() {
        let data = sample();
        let outcome = run_query(&data, &FilterSpec::new());

        assert_eq!(
            ids(outcome.items()),
            vec!["itm_001", "itm_002", "itm_003", "itm_004", "itm_005"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let data = sample();

        let by_name = run_query(&data, &FilterSpec::new().with_search("LAPTOP"));
        assert_eq!(ids(by_name.items()), vec!["itm_003"]);

        let by_tag = run_query(&data, &FilterSpec::new().with_search("Wire"));
        assert_eq!(ids(by_tag.items()), vec!["itm_001", "itm_004"]);

        let by_description = run_query(&data, &FilterSpec::new().with_search("everyday"));
        assert_eq!(by_description.len(), 5);
    }

    #[test]
    fn test_category_and_stock_combine() {
        let data = sample();
        let spec = FilterSpec::new().with_category("Audio").with_in_stock(true);

        let outcome = run_query(&data, &spec);
        assert_eq!(ids(outcome.items()), vec!["itm_001"]);
        assert!(outcome.items().iter().all(|p| p.in_stock));
    }

    #[test]
    fn test_tags_use_any_semantics() {
        let data = sample();
        let spec = FilterSpec::new().with_tags(["premium", "new"]);

        let outcome = run_query(&data, &spec);
        assert_eq!(ids(outcome.items()), vec!["itm_003", "itm_005"]);
    }

    #[test]
    fn test_out_of_stock_filter() {
        let data = sample();
        let outcome = run_query(&data, &FilterSpec::new().with_in_stock(false));
        assert_eq!(ids(outcome.items()), vec!["itm_002", "itm_005"]);
    }

    #[test]
    fn test_no_matches_is_explicit() {
        let data = sample();
        let outcome = run_query(&data, &FilterSpec::new().with_category("Wearables"));

        assert_eq!(outcome, QueryOutcome::NoMatches);
        assert!(outcome.is_empty());
        assert!(outcome.into_items().is_empty());
    }

    #[test]
    fn test_price_sort_is_stable() {
        let data = sample();

        let asc = run_query(&data, &FilterSpec::new().with_sort(SortMode::PriceAsc));
        assert_eq!(
            ids(asc.items()),
            vec!["itm_005", "itm_001", "itm_004", "itm_002", "itm_003"]
        );

        let desc = run_query(&data, &FilterSpec::new().with_sort(SortMode::PriceDesc));
        assert_eq!(
            ids(desc.items()),
            vec!["itm_003", "itm_002", "itm_001", "itm_004", "itm_005"]
        );
    }

    #[test]
    fn test_date_sorts() {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut data = sample();
        for (i, p) in data.iter_mut().enumerate() {
            p.updated_at = base - Duration::days(i as i64 * 3);
        }

        let newest = run_query(&data, &FilterSpec::new().with_sort(SortMode::Newest));
        assert_eq!(newest.items()[0].id, "itm_001");

        let oldest = run_query(&data, &FilterSpec::new().with_sort(SortMode::Oldest));
        assert_eq!(oldest.items()[0].id, "itm_005");
    }

    #[test]
    fn test_rating_sort_descending() {
        let mut data = sample();
        data[2].rating = 4.9;
        data[4].rating = 3.1;

        let outcome = run_query(&data, &FilterSpec::new().with_sort(SortMode::RatingDesc));
        assert_eq!(outcome.items()[0].id, "itm_003");
        assert_eq!(outcome.items()[4].id, "itm_005");
    }

    #[test]
    fn test_facets_are_sorted_and_unique() {
        let data = sample();
        assert_eq!(categories(&data), vec!["Audio", "Computers", "Gaming"]);
        assert_eq!(
            tags(&data),
            vec!["audio", "computers", "gaming", "new", "premium", "wireless"]
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(QueryOutcome::<Product>::NoMatches).unwrap();
        assert_eq!(json["status"], "no_matches");
    }
}
