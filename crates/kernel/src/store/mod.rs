//! Product storage abstraction.
//!
//! The listing engine builds statements; a [`ProductStore`] runs them. The
//! PostgreSQL implementation is [`PgProductStore`]; tests substitute an
//! in-memory store so the engine can be exercised without a database.

mod postgres;

use anyhow::Result;
use async_trait::async_trait;

pub use postgres::PgProductStore;

use crate::listing::Statement;
use crate::models::{NewProduct, Product};

/// Executes listing statements and product inserts.
///
/// Implementations must not retry and must not detach work from the calling
/// future: dropping the future cancels the operation.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Run a page SELECT built by the listing query builder.
    async fn fetch(&self, statement: &Statement) -> Result<Vec<Product>>;

    /// Run a COUNT statement built by the listing query builder.
    async fn count(&self, statement: &Statement) -> Result<i64>;

    /// Insert one product and return it with store-assigned fields.
    async fn insert(&self, product: &NewProduct) -> Result<Product>;

    /// Insert all products or none of them.
    async fn insert_batch(&self, products: &[NewProduct]) -> Result<Vec<Product>>;

    /// Whether the store is reachable.
    async fn is_healthy(&self) -> bool;
}
