//! Listing request types.
//!
//! - [`ListParams`]: raw query-string parameters, loosely typed
//! - [`FilterSpec`]: the normalized request the query engine works from
//! - [`SortColumn`], [`SortDirection`], [`SearchMode`]: closed option sets

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw listing parameters as they arrive on the query string.
///
/// Numeric fields are typed so that structurally malformed input (a
/// non-numeric price, say) is rejected by the extractor. Everything else is
/// coerced to a default by [`normalize`](super::normalize).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    /// Free-text query.
    pub q: Option<String>,
    /// `simple` (substring) or `text` (ranked full-text).
    pub search_mode: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<Decimal>,
    pub min_reviews: Option<i64>,
    pub include_out_of_stock: Option<bool>,
    /// `price`, `popularity`, `rating` or `updated`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
    pub page_size: Option<i64>,
    /// 1-based page number; selects offset pagination.
    pub page: Option<i64>,
    /// Id of the last row already seen; selects keyset pagination.
    pub cursor_id: Option<i64>,
    /// Sort value of the last row already seen.
    pub cursor_value: Option<String>,
}

/// Column a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Price,
    #[default]
    Popularity,
    Rating,
    Updated,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Price,
        SortColumn::Popularity,
        SortColumn::Rating,
        SortColumn::Updated,
    ];

    /// Parse a caller-supplied name. Accepts the public names and the
    /// underlying column names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "price" => Some(Self::Price),
            "popularity" | "bought_in_last_month" => Some(Self::Popularity),
            "rating" | "avg_rating" => Some(Self::Rating),
            "updated" | "updated_at" | "last_updated" => Some(Self::Updated),
            _ => None,
        }
    }

    /// Public name, as accepted by [`SortColumn::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Popularity => "popularity",
            Self::Rating => "rating",
            Self::Updated => "updated",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// How free-text search is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring match on title or description.
    #[default]
    Simple,
    /// Full-text match against the `search_vector` index.
    Text,
}

impl SearchMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" | "substring" => Some(Self::Simple),
            "text" | "vector" | "fulltext" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Text => "text",
        }
    }
}

/// Free-text search clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSearch {
    pub text: String,
    pub mode: SearchMode,
}

/// Position of the last row already returned, as sent by the caller.
///
/// `value` stays a raw string until query assembly, where it is decoded
/// against the active sort column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetCursor {
    pub value: String,
    pub id: i64,
}

/// Page-window selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pagination {
    /// Keyset pagination; `None` is the first page.
    Keyset(Option<KeysetCursor>),
    /// Offset pagination by 1-based page number.
    Offset { page: u32 },
}

impl Default for Pagination {
    fn default() -> Self {
        Self::Keyset(None)
    }
}

/// Normalized listing request. Built once per request, then read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub search: Option<TextSearch>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<Decimal>,
    pub min_reviews: Option<i64>,
    pub include_out_of_stock: bool,
    pub sort_by: SortColumn,
    pub order: SortDirection,
    pub page_size: u32,
    pub pagination: Pagination,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            brand: None,
            min_price: None,
            max_price: None,
            min_rating: None,
            min_reviews: None,
            include_out_of_stock: false,
            sort_by: SortColumn::default(),
            order: SortDirection::default(),
            page_size: DEFAULT_PAGE_SIZE,
            pagination: Pagination::default(),
        }
    }
}

impl From<&FilterSpec> for ListParams {
    fn from(spec: &FilterSpec) -> Self {
        let (page, cursor_id, cursor_value) = match &spec.pagination {
            Pagination::Offset { page } => (Some(i64::from(*page)), None, None),
            Pagination::Keyset(Some(cursor)) => (None, Some(cursor.id), Some(cursor.value.clone())),
            Pagination::Keyset(None) => (None, None, None),
        };

        Self {
            q: spec.search.as_ref().map(|s| s.text.clone()),
            search_mode: spec.search.as_ref().map(|s| s.mode.as_str().to_string()),
            category: spec.category.clone(),
            brand: spec.brand.clone(),
            min_price: spec.min_price,
            max_price: spec.max_price,
            min_rating: spec.min_rating,
            min_reviews: spec.min_reviews,
            include_out_of_stock: Some(spec.include_out_of_stock),
            sort_by: Some(spec.sort_by.as_str().to_string()),
            order: Some(spec.order.as_str().to_string()),
            page_size: Some(i64::from(spec.page_size)),
            page,
            cursor_id,
            cursor_value,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn sort_column_parse_accepts_column_names() {
        assert_eq!(SortColumn::parse("price"), Some(SortColumn::Price));
        assert_eq!(SortColumn::parse("avg_rating"), Some(SortColumn::Rating));
        assert_eq!(SortColumn::parse(" UPDATED_AT "), Some(SortColumn::Updated));
        assert_eq!(SortColumn::parse("title"), None);
    }

    #[test]
    fn sort_column_names_round_trip() {
        for column in SortColumn::ALL {
            assert_eq!(SortColumn::parse(column.as_str()), Some(column));
        }
    }

    #[test]
    fn sort_direction_parse() {
        assert_eq!(SortDirection::parse("ASC"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("up"), None);
    }

    #[test]
    fn list_params_deserialize_from_query_string() {
        let params: ListParams = serde_json::from_value(serde_json::json!({
            "category": "electronics",
            "min_price": "10.50",
            "page_size": 2
        }))
        .unwrap();
        assert_eq!(params.category.as_deref(), Some("electronics"));
        assert_eq!(params.min_price, Some(Decimal::new(1050, 2)));
        assert_eq!(params.page_size, Some(2));
    }

    #[test]
    fn filter_spec_defaults() {
        let spec = FilterSpec::default();
        assert_eq!(spec.sort_by, SortColumn::Popularity);
        assert_eq!(spec.order, SortDirection::Desc);
        assert_eq!(spec.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(spec.pagination, Pagination::Keyset(None));
    }
}
