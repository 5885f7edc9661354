//! Product model.
//!
//! Products are the catalog records served by the listing API. The store
//! assigns `id`, `created_at` and `updated_at`; everything else comes from
//! the caller on insert.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column list shared by every SELECT that maps rows into [`Product`].
pub const PRODUCT_COLUMNS: [&str; 18] = [
    "id",
    "title",
    "external_id",
    "description",
    "category",
    "brand",
    "image_url",
    "product_url",
    "price",
    "currency",
    "country",
    "stock",
    "avg_rating",
    "review_count",
    "bought_in_last_month",
    "is_best_seller",
    "created_at",
    "updated_at",
];

/// Product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Store-assigned identity, strictly increasing.
    pub id: i64,

    /// Display title.
    pub title: String,

    /// Marketplace identifier (ASIN), unique when present.
    pub external_id: Option<String>,

    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,

    /// Unit price, two decimal places.
    pub price: Decimal,

    /// ISO 4217 currency code.
    pub currency: String,

    pub country: Option<String>,

    /// Units on hand.
    pub stock: i32,

    /// Average review score, 0.00 to 5.00.
    pub avg_rating: Decimal,

    pub review_count: i32,

    /// Purchases in the trailing month; the "popularity" sort key.
    pub bought_in_last_month: i32,

    pub is_best_seller: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    #[serde(default, alias = "asin")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub avg_rating: Decimal,
    #[serde(default)]
    pub review_count: i32,
    #[serde(default)]
    pub bought_in_last_month: i32,
    #[serde(default)]
    pub is_best_seller: bool,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Reason a [`NewProduct`] was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    #[error("title is required")]
    MissingTitle,

    #[error("price must be greater than zero")]
    NonPositivePrice,

    #[error("currency is required")]
    MissingCurrency,

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("avg_rating must be between 0 and 5")]
    RatingOutOfRange,
}

impl NewProduct {
    /// Check the required fields and value ranges.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.title.trim().is_empty() {
            return Err(ProductValidationError::MissingTitle);
        }
        if self.price <= Decimal::ZERO {
            return Err(ProductValidationError::NonPositivePrice);
        }
        if self.currency.trim().is_empty() {
            return Err(ProductValidationError::MissingCurrency);
        }
        if self.stock < 0 {
            return Err(ProductValidationError::Negative("stock"));
        }
        if self.review_count < 0 {
            return Err(ProductValidationError::Negative("review_count"));
        }
        if self.bought_in_last_month < 0 {
            return Err(ProductValidationError::Negative("bought_in_last_month"));
        }
        if self.avg_rating < Decimal::ZERO || self.avg_rating > Decimal::from(5) {
            return Err(ProductValidationError::RatingOutOfRange);
        }
        Ok(())
    }

    /// Empty optional strings are stored as NULL so uniqueness on
    /// `external_id` only applies to real identifiers.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.external_id,
            &mut self.description,
            &mut self.category,
            &mut self.brand,
            &mut self.image_url,
            &mut self.product_url,
            &mut self.country,
        ] {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}
