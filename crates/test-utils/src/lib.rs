//! Vitrine test utilities.
//!
//! Fixture builders for catalog products and small JSON assertion helpers.
//! Fixtures are emitted as JSON so they can be fed to the HTTP API or
//! deserialized into the kernel's model types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

/// Create an in-stock test product with default values.
///
/// Each fixture gets a unique external id so batches never collide on the
/// uniqueness constraint unless a test asks for it.
pub fn test_product(title: &str) -> TestProduct {
    TestProduct {
        title: title.to_string(),
        external_id: Some(format!("T{}", Uuid::now_v7().simple())),
        description: None,
        category: Some("electronics".to_string()),
        brand: None,
        price: Decimal::new(999, 2),
        currency: "USD".to_string(),
        stock: 10,
        avg_rating: Decimal::ZERO,
        review_count: 0,
        bought_in_last_month: 0,
        is_best_seller: false,
    }
}

/// A test product builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestProduct {
    pub title: String,
    pub external_id: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub stock: i32,
    pub avg_rating: Decimal,
    pub review_count: i32,
    pub bought_in_last_month: i32,
    pub is_best_seller: bool,
}

impl TestProduct {
    pub fn with_external_id(mut self, external_id: &str) -> Self {
        self.external_id = Some(external_id.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_brand(mut self, brand: &str) -> Self {
        self.brand = Some(brand.to_string());
        self
    }

    /// Set the price from minor units, e.g. `1999` for 19.99.
    pub fn with_price_cents(mut self, cents: i64) -> Self {
        self.price = Decimal::new(cents, 2);
        self
    }

    pub fn with_rating(mut self, rating: Decimal, reviews: i32) -> Self {
        self.avg_rating = rating;
        self.review_count = reviews;
        self
    }

    /// Set purchases in the last month, the popularity sort key.
    pub fn with_popularity(mut self, bought_in_last_month: i32) -> Self {
        self.bought_in_last_month = bought_in_last_month;
        self
    }

    /// Mark as out of stock.
    pub fn out_of_stock(mut self) -> Self {
        self.stock = 0;
        self
    }

    pub fn best_seller(mut self) -> Self {
        self.is_best_seller = true;
        self
    }

    /// The create-request body for this product.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "title": self.title,
            "external_id": self.external_id,
            "description": self.description,
            "category": self.category,
            "brand": self.brand,
            "price": self.price.to_string(),
            "currency": self.currency,
            "stock": self.stock,
            "avg_rating": self.avg_rating.to_string(),
            "review_count": self.review_count,
            "bought_in_last_month": self.bought_in_last_month,
            "is_best_seller": self.is_best_seller,
        })
    }

    /// A stored row for this product, as the store would return it.
    pub fn to_row_json(&self, id: i64, updated_at: DateTime<Utc>) -> JsonValue {
        let mut row = self.to_json();
        if let Some(obj) = row.as_object_mut() {
            obj.insert("id".to_string(), json!(id));
            obj.insert("image_url".to_string(), JsonValue::Null);
            obj.insert("product_url".to_string(), JsonValue::Null);
            obj.insert("country".to_string(), JsonValue::Null);
            obj.insert("created_at".to_string(), json!(updated_at.to_rfc3339()));
            obj.insert("updated_at".to_string(), json!(updated_at.to_rfc3339()));
        }
        row
    }
}

/// Assertion helpers for JSON responses.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Collect the `id` of every object in a JSON array.
    pub fn ids(value: &Value) -> Vec<i64> {
        value
            .as_array()
            .map(|items| items.iter().filter_map(|p| p["id"].as_i64()).collect())
            .unwrap_or_default()
    }
}
