//! Filter predicates.
//!
//! Each active [`FilterSpec`] field contributes one predicate; the query
//! builder ANDs them together. Caller-supplied values are always carried as
//! bound values and rendered as placeholders, never spliced into SQL text.

use rust_decimal::Decimal;
use sea_query::extension::postgres::PgExpr;
use sea_query::{Cond, Expr, Iden, SimpleExpr};

use super::types::{FilterSpec, SearchMode, SortColumn, TextSearch};

/// Identifiers for the `products` table.
#[derive(Iden, Clone, Copy)]
pub(crate) enum Products {
    Table,
    Id,
    Title,
    Description,
    Category,
    Brand,
    Price,
    AvgRating,
    ReviewCount,
    BoughtInLastMonth,
    UpdatedAt,
}

impl From<SortColumn> for Products {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Price => Products::Price,
            SortColumn::Popularity => Products::BoughtInLastMonth,
            SortColumn::Rating => Products::AvgRating,
            SortColumn::Updated => Products::UpdatedAt,
        }
    }
}

/// Builds the WHERE-clause predicates for a [`FilterSpec`].
pub struct PredicateBuilder<'a> {
    spec: &'a FilterSpec,
}

impl<'a> PredicateBuilder<'a> {
    pub fn new(spec: &'a FilterSpec) -> Self {
        Self { spec }
    }

    /// Predicates in a fixed order: search, category, brand, price,
    /// stock, rating, reviews.
    pub fn build(&self) -> Vec<SimpleExpr> {
        let spec = self.spec;
        let mut predicates = Vec::new();

        if let Some(search) = &spec.search {
            predicates.extend(text_search(search));
        }

        if let Some(category) = &spec.category {
            predicates.push(Expr::col(Products::Category).eq(category.as_str()));
        }

        if let Some(brand) = &spec.brand {
            predicates.push(Expr::col(Products::Brand).eq(brand.as_str()));
        }

        if let Some(min) = spec.min_price {
            predicates.push(Expr::col(Products::Price).gte(min));
        }

        if let Some(max) = spec.max_price {
            predicates.push(Expr::col(Products::Price).lte(max));
        }

        if !spec.include_out_of_stock {
            // Literal so the planner can match the `WHERE stock > 0` partial indexes.
            predicates.push(Expr::cust(r#""stock" > 0"#));
        }

        if let Some(min_rating) = spec.min_rating.filter(|r| *r > Decimal::ZERO) {
            predicates.push(Expr::col(Products::AvgRating).gte(min_rating));
        }

        if let Some(min_reviews) = spec.min_reviews.filter(|n| *n > 0) {
            predicates.push(Expr::col(Products::ReviewCount).gte(min_reviews));
        }

        predicates
    }
}

fn text_search(search: &TextSearch) -> Option<SimpleExpr> {
    let text = search.text.trim();
    if text.is_empty() {
        return None;
    }

    match search.mode {
        SearchMode::Simple => {
            let pattern = format!("%{}%", escape_like_wildcards(text));
            Some(
                Cond::any()
                    .add(Expr::col(Products::Title).ilike(pattern.as_str()))
                    .add(Expr::col(Products::Description).ilike(pattern.as_str()))
                    .into(),
            )
        }
        SearchMode::Text => Some(Expr::cust_with_values(
            r#""search_vector" @@ websearch_to_tsquery('english', $1)"#,
            [text.to_string()],
        )),
    }
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
