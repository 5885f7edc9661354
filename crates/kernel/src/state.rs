//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::listing::ListingService;
use crate::store::{PgProductStore, ProductStore};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Listing engine over the product store.
    listings: ListingService,
}

impl AppState {
    /// Connect to PostgreSQL and build the services.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        if config.run_migrations {
            db::run_migrations(&pool)
                .await
                .context("failed to run migrations")?;
        }

        info!(
            max_connections = config.database_max_connections,
            "database pool ready"
        );

        Ok(Self::with_store(Arc::new(PgProductStore::new(pool))))
    }

    /// Build state over any product store.
    pub fn with_store(store: Arc<dyn ProductStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                listings: ListingService::new(store),
            }),
        }
    }

    /// Get the listing service.
    pub fn listings(&self) -> &ListingService {
        &self.inner.listings
    }

    /// Check if PostgreSQL is healthy.
    pub async fn postgres_healthy(&self) -> bool {
        self.inner.listings.store().is_healthy().await
    }
}
