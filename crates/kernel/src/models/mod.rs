//! Database models.

pub mod product;

pub use product::{NewProduct, Product, ProductValidationError};
