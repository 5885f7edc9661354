#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! HTTP tests drive the REAL kernel router over [`FakeStore`], which records
//! every statement it is asked to run and answers with canned rows. Database
//! tests use [`test_pool`], which returns `None` when `DATABASE_URL` is not
//! set so the suite still passes without PostgreSQL.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use vitrine_kernel::listing::Statement;
use vitrine_kernel::models::{NewProduct, Product};
use vitrine_kernel::state::AppState;
use vitrine_kernel::store::ProductStore;
use vitrine_test_utils::TestProduct;

/// In-memory store that records calls instead of running SQL.
#[derive(Default)]
pub struct FakeStore {
    pub rows: Mutex<Vec<Product>>,
    pub statements: Mutex<Vec<Statement>>,
    pub inserted: Mutex<Vec<NewProduct>>,
    pub unhealthy: bool,
    pub failing: bool,
    pub delay: Option<Duration>,
}

impl FakeStore {
    pub fn with_rows(rows: Vec<Product>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            ..Default::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            failing: true,
            unhealthy: true,
            ..Default::default()
        })
    }

    /// A store whose reads take `delay` to answer.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Default::default()
        })
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.statements.lock().unwrap().len() + self.inserted.lock().unwrap().len()
    }

    pub fn last_statement(&self) -> Option<Statement> {
        self.statements.lock().unwrap().last().cloned()
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for FakeStore {
    async fn fetch(&self, statement: &Statement) -> anyhow::Result<Vec<Product>> {
        self.statements.lock().unwrap().push(statement.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn count(&self, statement: &Statement) -> anyhow::Result<i64> {
        self.statements.lock().unwrap().push(statement.clone());
        self.check()?;
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn insert(&self, product: &NewProduct) -> anyhow::Result<Product> {
        self.inserted.lock().unwrap().push(product.clone());
        self.check()?;
        let id = self.inserted.lock().unwrap().len() as i64;
        Ok(stored(id, product))
    }

    async fn insert_batch(&self, products: &[NewProduct]) -> anyhow::Result<Vec<Product>> {
        self.inserted.lock().unwrap().extend_from_slice(products);
        self.check()?;
        Ok(products
            .iter()
            .enumerate()
            .map(|(i, p)| stored(i as i64 + 1, p))
            .collect())
    }

    async fn is_healthy(&self) -> bool {
        !self.unhealthy
    }
}

/// The row a store would return for `product` under `id`.
pub fn stored(id: i64, product: &NewProduct) -> Product {
    let fixture = serde_json::to_value(product).unwrap();
    let mut row = fixture.as_object().cloned().unwrap();
    let now = Utc::now().to_rfc3339();
    row.insert("id".to_string(), id.into());
    row.insert("created_at".to_string(), now.clone().into());
    row.insert("updated_at".to_string(), now.into());
    serde_json::from_value(Value::Object(row)).unwrap()
}

/// Convert a fixture into a stored product row.
pub fn product_row(id: i64, fixture: &TestProduct) -> Product {
    serde_json::from_value(fixture.to_row_json(id, Utc::now())).unwrap()
}

/// Convert a fixture into a create request.
pub fn new_product(fixture: &TestProduct) -> NewProduct {
    serde_json::from_value(fixture.to_json()).unwrap()
}

/// Test application wrapper using the REAL kernel routes.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(store: Arc<FakeStore>) -> Self {
        let state = AppState::with_store(store);
        Self {
            router: vitrine_kernel::routes::router().with_state(state),
        }
    }

    /// Same routes behind the server's request timeout.
    pub fn with_timeout(store: Arc<FakeStore>, timeout: Duration) -> Self {
        let state = AppState::with_store(store);
        Self {
            router: vitrine_kernel::routes::router()
                .layer(vitrine_kernel::routes::timeout_layer(timeout))
                .with_state(state),
        }
    }

    /// Send a GET and decode the JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Send a JSON POST and decode the JSON body.
    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Send a POST with a raw body.
    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}

/// Connect to the test database and apply migrations.
///
/// Returns `None` when `DATABASE_URL` is not set.
pub async fn test_pool() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    vitrine_kernel::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// A category name no other test uses, for isolating rows on a shared table.
pub fn unique_category(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::now_v7().simple())
}

/// Remove every product in `category`.
pub async fn cleanup_category(pool: &PgPool, category: &str) {
    sqlx::query("DELETE FROM products WHERE category = $1")
        .bind(category)
        .execute(pool)
        .await
        .ok();
}
