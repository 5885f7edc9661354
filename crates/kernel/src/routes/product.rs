//! Product listing API routes.
//!
//! REST endpoints for listing, counting and creating products.

use axum::{
    Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::listing::{ListParams, SortColumn, SortDirection};
use crate::models::{NewProduct, Product};
use crate::state::AppState;

/// Create the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/api/v1/products", get(list_products).post(create_product))
        .route("/api/v1/products/count", get(count_products))
        .route("/api/v1/products/bulk", post(create_products_bulk))
}

// -------------------------------------------------------------------------
// Response types
// -------------------------------------------------------------------------

#[derive(Serialize)]
struct WelcomeResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct ListResponse {
    count: usize,
    products: Vec<Product>,
    next_cursor_value: Option<String>,
    next_cursor_id: Option<i64>,
    sort_by: SortColumn,
    order: SortDirection,
}

#[derive(Serialize)]
struct CountResponse {
    total: i64,
}

// -------------------------------------------------------------------------
// Handlers
// -------------------------------------------------------------------------

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the product listing API",
    })
}

/// List one page of products.
///
/// GET /api/v1/products
async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Json<ListResponse>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let page = state.listings().list(params).await?;

    let (next_cursor_value, next_cursor_id) = match page.next_cursor {
        Some(cursor) => (Some(cursor.value), Some(cursor.id)),
        None => (None, None),
    };

    Ok(Json(ListResponse {
        count: page.products.len(),
        products: page.products,
        next_cursor_value,
        next_cursor_id,
        sort_by: page.sort_by,
        order: page.order,
    }))
}

/// Count products matching the filters.
///
/// GET /api/v1/products/count
async fn count_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Json<CountResponse>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let total = state.listings().count(params).await?;
    Ok(Json(CountResponse { total }))
}

/// Create one product.
///
/// POST /api/v1/products
async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let Json(product) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let created = state.listings().create(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Create many products in one transaction.
///
/// POST /api/v1/products/bulk
async fn create_products_bulk(
    State(state): State<AppState>,
    body: Result<Json<Vec<NewProduct>>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Vec<Product>>)> {
    let Json(products) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let created = state.listings().create_batch(products).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
