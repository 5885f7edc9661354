//! Listing request normalization.
//!
//! Turns raw [`ListParams`] into a [`FilterSpec`]. Never fails: values that
//! are out of range or unrecognized fall back to their defaults.

use rust_decimal::Decimal;

use super::types::{
    DEFAULT_PAGE_SIZE, FilterSpec, KeysetCursor, ListParams, MAX_PAGE_SIZE, Pagination,
    SearchMode, SortColumn, SortDirection, TextSearch,
};

/// Normalize raw listing parameters.
pub fn normalize(raw: ListParams) -> FilterSpec {
    let search = non_empty(raw.q).map(|text| TextSearch {
        text,
        mode: raw
            .search_mode
            .as_deref()
            .and_then(SearchMode::parse)
            .unwrap_or_default(),
    });

    let (min_price, max_price) = price_range(raw.min_price, raw.max_price);

    FilterSpec {
        search,
        category: non_empty(raw.category),
        brand: non_empty(raw.brand),
        min_price,
        max_price,
        min_rating: raw.min_rating.filter(|r| *r > Decimal::ZERO),
        min_reviews: raw.min_reviews.filter(|n| *n > 0),
        include_out_of_stock: raw.include_out_of_stock.unwrap_or(false),
        sort_by: raw
            .sort_by
            .as_deref()
            .and_then(SortColumn::parse)
            .unwrap_or_default(),
        order: raw
            .order
            .as_deref()
            .and_then(SortDirection::parse)
            .unwrap_or_default(),
        page_size: page_size(raw.page_size),
        pagination: pagination(raw.page, raw.cursor_id, raw.cursor_value),
    }
}

/// Clamp the page size to `(0, MAX_PAGE_SIZE]`, defaulting when outside it.
fn page_size(requested: Option<i64>) -> u32 {
    match requested {
        Some(n) if n > 0 && n <= i64::from(MAX_PAGE_SIZE) => n as u32,
        Some(n) if n > i64::from(MAX_PAGE_SIZE) => MAX_PAGE_SIZE,
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// A price range is applied only as a complete, well-ordered pair.
fn price_range(min: Option<Decimal>, max: Option<Decimal>) -> (Option<Decimal>, Option<Decimal>) {
    match (min, max) {
        (Some(min), Some(max)) if min <= max => (Some(min), Some(max)),
        _ => (None, None),
    }
}

/// An explicit page number wins over any keyset state.
fn pagination(page: Option<i64>, cursor_id: Option<i64>, cursor_value: Option<String>) -> Pagination {
    if let Some(page) = page.filter(|p| *p > 0) {
        return Pagination::Offset {
            page: u32::try_from(page).unwrap_or(u32::MAX),
        };
    }

    match (cursor_id, non_empty(cursor_value)) {
        (Some(id), Some(value)) => Pagination::Keyset(Some(KeysetCursor { value, id })),
        _ => Pagination::Keyset(None),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
