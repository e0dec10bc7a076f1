//! Filter <-> location parameter codec
//!
//! A [`FilterSpec`] is shared as a link by writing it into the query string of
//! the current location. The mapping is deliberately minimal:
//!
//! | field      | parameter | encoding                         |
//! |------------|-----------|----------------------------------|
//! | `search`   | `search`  | raw text                         |
//! | `category` | `category`| raw text                         |
//! | `tags`     | `tags`    | comma-joined                     |
//! | `in_stock` | `stock`   | `true` / `false`                 |
//! | `sort`     | `sort`    | [`SortMode::as_str`]             |
//!
//! Absent or default fields are never written as empty strings; they are
//! omitted. Parameters the codec does not own are preserved by every update.

use crate::core::filter::{FilterSpec, FilterUpdate, SortMode};
use indexmap::IndexMap;
use url::Url;
use url::form_urlencoded;

pub const SEARCH_PARAM: &str = "search";
pub const CATEGORY_PARAM: &str = "category";
pub const TAGS_PARAM: &str = "tags";
pub const STOCK_PARAM: &str = "stock";
pub const SORT_PARAM: &str = "sort";

/// Every parameter key owned by the filter codec
pub const FILTER_PARAMS: [&str; 5] = [
    SEARCH_PARAM,
    CATEGORY_PARAM,
    TAGS_PARAM,
    STOCK_PARAM,
    SORT_PARAM,
];

/// Flat string-keyed parameter set, in insertion order
pub type ParamMap = IndexMap<String, String>;

/// Encode `spec` into a fresh parameter set
pub fn encode(spec: &FilterSpec) -> ParamMap {
    let mut params = ParamMap::new();
    merge(&mut params, spec);
    params
}

/// Decode a parameter set into a [`FilterSpec`]
///
/// Unknown keys are ignored. Empty values, unknown sort modes and stock
/// values other than `true`/`false` decode as absent.
pub fn decode(params: &ParamMap) -> FilterSpec {
    let text = |key: &str| {
        params
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
    };

    FilterSpec {
        search: text(SEARCH_PARAM),
        category: text(CATEGORY_PARAM),
        tags: params
            .get(TAGS_PARAM)
            .map(|v| split_tags(v))
            .unwrap_or_default(),
        in_stock: params.get(STOCK_PARAM).and_then(|v| match v.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }),
        sort: params
            .get(SORT_PARAM)
            .and_then(|v| v.parse::<SortMode>().ok()),
    }
}

/// Write every field of `spec` into `params`
///
/// Fields set on `spec` overwrite their key, default fields remove it, and
/// keys outside [`FILTER_PARAMS`] are left untouched.
pub fn merge(params: &mut ParamMap, spec: &FilterSpec) {
    set_or_remove(params, SEARCH_PARAM, spec.search_text().map(str::to_string));
    set_or_remove(
        params,
        CATEGORY_PARAM,
        spec.category_name().map(str::to_string),
    );
    set_or_remove(params, TAGS_PARAM, join_tags(&spec.tags));
    set_or_remove(params, STOCK_PARAM, spec.in_stock.map(|s| s.to_string()));
    set_or_remove(params, SORT_PARAM, spec.sort.map(|s| s.as_str().to_string()));
}

/// Apply a single-field update to `params`, preserving every other key
pub fn apply_update(params: &mut ParamMap, update: FilterUpdate) {
    match update {
        FilterUpdate::Search(search) => {
            set_or_remove(params, SEARCH_PARAM, search.filter(|s| !s.is_empty()))
        }
        FilterUpdate::Category(category) => set_or_remove(
            params,
            CATEGORY_PARAM,
            category.filter(|c| !c.is_empty()),
        ),
        FilterUpdate::Tags(tags) => set_or_remove(params, TAGS_PARAM, join_tags(&tags)),
        FilterUpdate::InStock(in_stock) => {
            set_or_remove(params, STOCK_PARAM, in_stock.map(|s| s.to_string()))
        }
        FilterUpdate::Sort(sort) => {
            set_or_remove(params, SORT_PARAM, sort.map(|s| s.as_str().to_string()))
        }
    }
}

/// Remove every filter key, keeping unrelated parameters
pub fn clear(params: &mut ParamMap) {
    for key in FILTER_PARAMS {
        params.shift_remove(key);
    }
}

/// Parse an `application/x-www-form-urlencoded` query string
///
/// A leading `?` is tolerated. When a key repeats, the last value wins.
pub fn parse_query(query: &str) -> ParamMap {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Serialize `params` as a query string (without the leading `?`)
pub fn to_query(params: &ParamMap) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

fn set_or_remove(params: &mut ParamMap, key: &str, value: Option<String>) {
    match value {
        Some(value) => {
            params.insert(key.to_string(), value);
        }
        None => {
            params.shift_remove(key);
        }
    }
}

fn join_tags(tags: &[String]) -> Option<String> {
    let tags: Vec<&str> = tags
        .iter()
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(","))
    }
}

fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A navigable location whose query string carries the active filters
///
/// This is the boundary between the codec and whatever owns navigation: the
/// owner hands over the current URL, reads [`filters`](Location::filters), and
/// pushes [`as_str`](Location::as_str) back after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(input)?,
        })
    }

    pub fn from_url(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Current query parameters; a repeated key keeps its last value
    pub fn params(&self) -> ParamMap {
        self.pairs().into_iter().collect()
    }

    /// Filters decoded from the query string
    pub fn filters(&self) -> FilterSpec {
        decode(&self.params())
    }

    /// Change one filter field, keeping every other parameter
    pub fn update(&mut self, update: FilterUpdate) {
        self.rewrite_filters(|filters| apply_update(filters, update));
    }

    /// Replace all filter fields with `spec`, keeping unrelated parameters
    pub fn set_filters(&mut self, spec: &FilterSpec) {
        self.rewrite_filters(|filters| merge(filters, spec));
    }

    /// Drop every filter parameter
    pub fn clear_filters(&mut self) {
        self.rewrite_filters(clear);
    }

    fn pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Edit only the filter keys of the query string
    ///
    /// Foreign pairs are written back verbatim, repeats included. A filter
    /// key that survives the edit stays at its first position; new filter
    /// keys are appended.
    fn rewrite_filters(&mut self, edit: impl FnOnce(&mut ParamMap)) {
        let pairs = self.pairs();
        let mut filters: ParamMap = pairs
            .iter()
            .filter(|(k, _)| is_filter_param(k))
            .cloned()
            .collect();
        edit(&mut filters);

        let mut rewritten = Vec::with_capacity(pairs.len() + filters.len());
        for (key, value) in pairs {
            if !is_filter_param(&key) {
                rewritten.push((key, value));
            } else if let Some(value) = filters.shift_remove(&key) {
                rewritten.push((key, value));
            }
        }
        rewritten.extend(filters);

        if rewritten.is_empty() {
            self.url.set_query(None);
        } else {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(rewritten)
                .finish();
            self.url.set_query(Some(query.as_str()));
        }
    }
}

fn is_filter_param(key: &str) -> bool {
    FILTER_PARAMS.contains(&key)
}
