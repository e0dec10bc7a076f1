//! Product records served by the catalog

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An immutable catalog product
///
/// Products are produced once when the store is built and are never mutated
/// afterwards; views only ever receive clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier (`itm_001`, `itm_002`, ...)
    pub id: String,

    pub name: String,

    pub price: f64,

    /// ISO currency code the price is expressed in
    pub currency: String,

    /// Average rating between 3.0 and 5.0
    pub rating: f64,

    pub review_count: u32,

    /// Free-text tags; order is irrelevant for matching
    pub tags: Vec<String>,

    pub category: String,

    pub in_stock: bool,

    /// Primary thumbnail reference
    pub image_url: String,

    pub description: String,

    /// Ordered specification table (e.g. "Battery Life" -> "24 hours")
    pub specifications: IndexMap<String, String>,

    pub updated_at: DateTime<Utc>,

    /// Additional gallery images
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Whether the product carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether any of `tags` is carried by the product
    pub fn has_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|tag| self.has_tag(tag.as_ref()))
    }

    /// Case-insensitive substring match over name, description and tags
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Build a small product for unit tests
    pub fn product(
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
            image_url: String::new(),
            description: format!("The {} for everyday use.", name),
            specifications: IndexMap::new(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            images: Vec::new(),
        }
    }
}
