//! Page results.

use serde::{Deserialize, Serialize};

use super::cursor::{self, Cursor};
use super::types::{FilterSpec, SortColumn, SortDirection};
use crate::models::Product;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub products: Vec<Product>,
    /// Resume point after the last product; `None` for an empty page.
    pub next_cursor: Option<Cursor>,
    pub sort_by: SortColumn,
    pub order: SortDirection,
}

impl Page {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Turns fetched rows into a [`Page`].
pub struct PageMapper<'a> {
    spec: &'a FilterSpec,
}

impl<'a> PageMapper<'a> {
    pub fn new(spec: &'a FilterSpec) -> Self {
        Self { spec }
    }

    pub fn map(&self, products: Vec<Product>) -> Page {
        let next_cursor = products
            .last()
            .map(|last| cursor::encode(last, self.spec.sort_by));

        Page {
            products,
            next_cursor,
            sort_by: self.spec.sort_by,
            order: self.spec.order,
        }
    }
}
