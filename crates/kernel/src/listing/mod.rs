//! Product listing engine.
//!
//! This module provides:
//! - normalize: raw query parameters to a canonical [`FilterSpec`]
//! - PredicateBuilder: WHERE-clause predicates for active filters
//! - cursor: keyset cursor encoding and decoding
//! - ListingQueryBuilder: SeaQuery-based page and count statements
//! - PageMapper: fetched rows to a [`Page`] with its next cursor
//! - ListingService: runs listings and inserts against a product store

pub mod cursor;
mod normalize;
mod page;
mod predicate;
mod query_builder;
mod service;
pub mod types;

pub use cursor::{Cursor, CursorError, CursorValue};
pub use normalize::normalize;
pub use page::{Page, PageMapper};
pub use predicate::PredicateBuilder;
pub use query_builder::{ListingQueryBuilder, Statement};
pub use service::{ListingError, ListingService};
pub use types::{
    DEFAULT_PAGE_SIZE, FilterSpec, KeysetCursor, ListParams, MAX_PAGE_SIZE, Pagination,
    SearchMode, SortColumn, SortDirection, TextSearch,
};
