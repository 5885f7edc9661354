//! HTTP route handlers.

pub mod health;
pub mod product;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;

use crate::state::AppState;

/// All application routes, without middleware.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(product::router())
        .merge(health::router())
}

/// Abort requests that run past `timeout` with 408 Request Timeout.
pub fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
