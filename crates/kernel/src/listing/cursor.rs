//! Keyset cursor encoding.
//!
//! A cursor value travels as a plain string whose shape depends on the sort
//! column: decimal text for price and rating, integer text for popularity,
//! and an RFC 3339 timestamp for last-updated.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::SortColumn;
use crate::models::Product;

/// Typed cursor value, matching the column it was decoded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorValue {
    Decimal(Decimal),
    Integer(i32),
    Timestamp(DateTime<Utc>),
}

impl From<CursorValue> for sea_query::Value {
    fn from(value: CursorValue) -> Self {
        match value {
            CursorValue::Decimal(d) => d.into(),
            CursorValue::Integer(i) => i.into(),
            CursorValue::Timestamp(ts) => ts.into(),
        }
    }
}

/// Cursor for the page after the one just returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub value: String,
    pub id: i64,
}

/// A cursor value that does not fit the active sort column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cursor value {value:?} for sort column '{column}': expected {expected}")]
pub struct CursorError {
    pub column: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Decode a raw cursor value for `column`.
pub fn decode(column: SortColumn, raw: &str) -> Result<CursorValue, CursorError> {
    let raw = raw.trim();
    let err = |expected| CursorError {
        column: column.as_str(),
        value: raw.to_string(),
        expected,
    };

    match column {
        SortColumn::Price | SortColumn::Rating => Decimal::from_str(raw)
            .map(CursorValue::Decimal)
            .map_err(|_| err("a decimal number")),
        SortColumn::Popularity => raw
            .parse::<i32>()
            .map(CursorValue::Integer)
            .map_err(|_| err("an integer")),
        SortColumn::Updated => DateTime::parse_from_rfc3339(raw)
            .map(|ts| CursorValue::Timestamp(ts.with_timezone(&Utc)))
            .map_err(|_| err("an RFC 3339 timestamp")),
    }
}

/// The value of `column` on `product`.
pub fn value_of(product: &Product, column: SortColumn) -> CursorValue {
    match column {
        SortColumn::Price => CursorValue::Decimal(product.price),
        SortColumn::Popularity => CursorValue::Integer(product.bought_in_last_month),
        SortColumn::Rating => CursorValue::Decimal(product.avg_rating),
        SortColumn::Updated => CursorValue::Timestamp(product.updated_at),
    }
}

/// Encode the cursor that resumes iteration after `product`.
pub fn encode(product: &Product, column: SortColumn) -> Cursor {
    let value = match value_of(product, column) {
        CursorValue::Decimal(d) => d.to_string(),
        CursorValue::Integer(i) => i.to_string(),
        CursorValue::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    };

    Cursor {
        value,
        id: product.id,
    }
}
