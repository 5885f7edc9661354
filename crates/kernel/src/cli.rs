//! CLI command implementations.
//!
//! These commands operate with a minimal context (database pool only),
//! without starting the HTTP server.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use sqlx::PgPool;
use tracing::info;

use crate::db;
use crate::listing::ListingService;
use crate::models::NewProduct;
use crate::store::PgProductStore;

/// Default number of rows committed per import transaction.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Apply pending migrations.
pub async fn cmd_migrate(pool: &PgPool) -> Result<()> {
    db::run_migrations(pool).await?;
    println!("Migrations applied.");
    Ok(())
}

/// Load a JSON array of products, committing `chunk_size` rows at a time.
///
/// Each chunk is atomic. A failing chunk stops the import; chunks already
/// committed stay in place.
pub async fn cmd_import(pool: &PgPool, file: &Path, chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        bail!("chunk size must be at least 1");
    }

    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let products: Vec<NewProduct> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of products", file.display()))?;

    if products.is_empty() {
        println!("No products in {}.", file.display());
        return Ok(());
    }

    let service = ListingService::new(Arc::new(PgProductStore::new(pool.clone())));
    let total = products.len();
    let mut inserted = 0;

    for (n, chunk) in products.chunks(chunk_size).enumerate() {
        let first = n * chunk_size;
        service
            .create_batch(chunk.to_vec())
            .await
            .with_context(|| {
                format!(
                    "chunk starting at row {first} failed; {inserted} of {total} rows imported"
                )
            })?;

        inserted += chunk.len();
        info!(inserted, total, "imported chunk");
    }

    println!("Imported {inserted} products from {}.", file.display());
    Ok(())
}
