//! Filter specifications over the product catalog

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sort orders understood by the query layer
///
/// The string forms (`price-asc`, `newest`, ...) are the values written to
/// location parameters and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "rating-desc")]
    RatingDesc,
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::RatingDesc,
        SortMode::Newest,
        SortMode::Oldest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
            SortMode::RatingDesc => "rating-desc",
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
        }
    }

    /// Label shown in sort pickers
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::PriceAsc => "Price: Low to High",
            SortMode::PriceDesc => "Price: High to Low",
            SortMode::RatingDesc => "Highest Rated",
            SortMode::Newest => "Newest First",
            SortMode::Oldest => "Oldest First",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`SortMode`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort mode: {0}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownSortMode(s.to_string()))
    }
}

/// Structured query over the product set
///
/// Every field is optional; an absent field does not constrain the result.
/// An empty `tags` list means "no tag filter" and an empty search string is
/// treated the same as no search.
///
/// Empty strings and empty tags are never significant: they are dropped on
/// deserialize and ignored by `==`, so a spec equals its decoded location
/// parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Case-insensitive text matched against name, description and tags
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub search: Option<String>,

    /// Exact category match
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub category: Option<String>,

    /// Products carrying at least one of these tags match
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "without_empty_tags"
    )]
    pub tags: Vec<String>,

    /// Exact stock flag match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortMode>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.is_empty())
            .collect();
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Search text if set and non-empty
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// Category if set and non-empty
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether any narrowing filter is set (sorting alone does not count)
    pub fn has_active_filters(&self) -> bool {
        self.search_text().is_some()
            || self.category_name().is_some()
            || self.selected_tags().next().is_some()
            || self.in_stock.is_some()
    }

    /// Drop every narrowing filter, keeping the sort order
    pub fn cleared(&self) -> Self {
        Self {
            sort: self.sort,
            ..Self::default()
        }
    }

    /// Apply a single-field update
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Search(search) => self.search = search.and_then(non_empty),
            FilterUpdate::Category(category) => self.category = category.and_then(non_empty),
            FilterUpdate::Tags(tags) => {
                self.tags = tags.into_iter().filter(|t| !t.is_empty()).collect()
            }
            FilterUpdate::InStock(in_stock) => self.in_stock = in_stock,
            FilterUpdate::Sort(sort) => self.sort = sort,
        }
    }

    /// Copy with empty strings and empty tags removed
    pub fn normalized(&self) -> Self {
        Self {
            search: self.search_text().map(str::to_string),
            category: self.category_name().map(str::to_string),
            tags: self.selected_tags().map(str::to_string).collect(),
            in_stock: self.in_stock,
            sort: self.sort,
        }
    }

    /// Non-empty tags, in selection order
    pub fn selected_tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str).filter(|t| !t.is_empty())
    }

    /// Toggle a tag in the tag list, keeping selection order
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else if !tag.is_empty() {
            self.tags.push(tag.to_string());
        }
    }
}

/// A change to exactly one [`FilterSpec`] field
///
/// `None` (or an empty tag list) resets the field to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Search(Option<String>),
    Category(Option<String>),
    Tags(Vec<String>),
    InStock(Option<bool>),
    Sort(Option<SortMode>),
}

impl PartialEq for FilterSpec {
    fn eq(&self, other: &Self) -> bool {
        self.search_text() == other.search_text()
            && self.category_name() == other.category_name()
            && self.selected_tags().eq(other.selected_tags())
            && self.in_stock == other.in_stock
            && self.sort == other.sort
    }
}

impl Eq for FilterSpec {}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_empty))
}

fn without_empty_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = Vec::<String>::deserialize(deserializer)?;
    Ok(tags.into_iter().filter(|t| !t.is_empty()).collect())
}
