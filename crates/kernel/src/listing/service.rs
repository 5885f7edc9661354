//! Listing service.
//!
//! Ties the pure listing stages to a [`ProductStore`]: normalize, build,
//! fetch, map. Inserts are validated here so a bad row never reaches the
//! store.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use super::cursor::CursorError;
use super::normalize::normalize;
use super::page::{Page, PageMapper};
use super::query_builder::ListingQueryBuilder;
use super::types::ListParams;
use crate::models::{NewProduct, Product, ProductValidationError};
use crate::store::ProductStore;

/// Errors from listing and insert operations.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error("invalid product: {0}")]
    InvalidProduct(#[from] ProductValidationError),

    #[error("invalid product at index {index}: {source}")]
    InvalidBatchRow {
        index: usize,
        source: ProductValidationError,
    },

    #[error("batch must contain at least one product")]
    EmptyBatch,

    #[error("store error")]
    Store(#[source] anyhow::Error),
}

/// Runs product listings and inserts.
pub struct ListingService {
    store: Arc<dyn ProductStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ProductStore> {
        &self.store
    }

    /// Fetch one page of products.
    ///
    /// A cursor that does not fit the sort column fails before the store is
    /// touched.
    pub async fn list(&self, params: ListParams) -> Result<Page, ListingError> {
        let spec = normalize(params);
        let statement = ListingQueryBuilder::new(&spec).build()?;

        let products = self
            .store
            .fetch(&statement)
            .await
            .map_err(ListingError::Store)?;

        debug!(
            sort_by = spec.sort_by.as_str(),
            order = spec.order.as_str(),
            rows = products.len(),
            "listed products"
        );
        Ok(PageMapper::new(&spec).map(products))
    }

    /// Count every product matching the filters, ignoring pagination.
    pub async fn count(&self, params: ListParams) -> Result<i64, ListingError> {
        let spec = normalize(params);
        let statement = ListingQueryBuilder::new(&spec).build_count();
        self.store
            .count(&statement)
            .await
            .map_err(ListingError::Store)
    }

    /// Validate and insert one product.
    pub async fn create(&self, product: NewProduct) -> Result<Product, ListingError> {
        product.validate()?;
        let created = self
            .store
            .insert(&product.normalized())
            .await
            .map_err(ListingError::Store)?;

        info!(id = created.id, "created product");
        Ok(created)
    }

    /// Validate every row, then insert all of them atomically.
    pub async fn create_batch(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, ListingError> {
        if products.is_empty() {
            return Err(ListingError::EmptyBatch);
        }

        for (index, product) in products.iter().enumerate() {
            product
                .validate()
                .map_err(|source| ListingError::InvalidBatchRow { index, source })?;
        }

        let products: Vec<NewProduct> = products.into_iter().map(NewProduct::normalized).collect();
        self.store
            .insert_batch(&products)
            .await
            .map_err(ListingError::Store)
    }
}
