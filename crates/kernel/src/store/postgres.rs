//! PostgreSQL implementation of ProductStore.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_query::Value;
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::{Arguments, Executor, Postgres};
use tracing::{debug, info};

use super::ProductStore;
use crate::listing::Statement;
use crate::models::product::PRODUCT_COLUMNS;
use crate::models::{NewProduct, Product};

static INSERT_SQL: LazyLock<String> = LazyLock::new(|| {
    format!(
        r#"
        INSERT INTO products (
            title, external_id, description, category, brand, image_url, product_url,
            price, currency, country, stock, avg_rating, review_count,
            bought_in_last_month, is_best_seller
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING {}
        "#,
        PRODUCT_COLUMNS.join(", ")
    )
});

/// Product store backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_in<'e, E>(executor: E, p: &NewProduct) -> sqlx::Result<Product>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(&INSERT_SQL)
            .bind(&p.title)
            .bind(&p.external_id)
            .bind(&p.description)
            .bind(&p.category)
            .bind(&p.brand)
            .bind(&p.image_url)
            .bind(&p.product_url)
            .bind(p.price)
            .bind(&p.currency)
            .bind(&p.country)
            .bind(p.stock)
            .bind(p.avg_rating)
            .bind(p.review_count)
            .bind(p.bought_in_last_month)
            .bind(p.is_best_seller)
            .fetch_one(executor)
            .await
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn fetch(&self, statement: &Statement) -> Result<Vec<Product>> {
        let args = to_arguments(statement)?;
        let products = sqlx::query_as_with::<_, Product, _>(&statement.sql, args)
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch products")?;

        debug!(rows = products.len(), "fetched product page");
        Ok(products)
    }

    async fn count(&self, statement: &Statement) -> Result<i64> {
        let args = to_arguments(statement)?;
        let total: i64 = sqlx::query_scalar_with(&statement.sql, args)
            .fetch_one(&self.pool)
            .await
            .context("failed to count products")?;

        Ok(total)
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product> {
        Self::insert_in(&self.pool, product)
            .await
            .context("failed to insert product")
    }

    async fn insert_batch(&self, products: &[NewProduct]) -> Result<Vec<Product>> {
        // Dropping `tx` without commit rolls back every row inserted so far.
        let mut tx = self.pool.begin().await.context("failed to start transaction")?;

        let mut created = Vec::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            let row = Self::insert_in(&mut *tx, product)
                .await
                .with_context(|| format!("failed to insert product at index {index}"))?;
            created.push(row);
        }

        tx.commit().await.context("failed to commit transaction")?;

        info!(count = created.len(), "inserted product batch");
        Ok(created)
    }

    async fn is_healthy(&self) -> bool {
        crate::db::check_health(&self.pool).await
    }
}

/// Convert SeaQuery bound values into sqlx arguments, preserving order.
fn to_arguments(statement: &Statement) -> Result<PgArguments> {
    let mut args = PgArguments::default();

    for value in &statement.values.0 {
        let added = match value {
            Value::Bool(v) => args.add(*v),
            Value::SmallInt(v) => args.add(*v),
            Value::Int(v) => args.add(*v),
            Value::BigInt(v) => args.add(*v),
            Value::BigUnsigned(v) => {
                let v = v
                    .map(i64::try_from)
                    .transpose()
                    .context("bound value exceeds BIGINT range")?;
                args.add(v)
            }
            Value::Double(v) => args.add(*v),
            Value::String(v) => args.add(v.as_deref().cloned()),
            Value::Decimal(v) => args.add(v.as_deref().copied()),
            Value::ChronoDateTimeUtc(v) => args.add(v.as_deref().copied()),
            other => anyhow::bail!("unsupported bound value type: {other:?}"),
        };
        added.map_err(|e| anyhow::anyhow!(e)).context("failed to encode bound value")?;
    }

    Ok(args)
}
