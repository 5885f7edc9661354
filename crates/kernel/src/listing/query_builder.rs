//! Listing query builder using SeaQuery.
//!
//! Generates parameterized SQL from a [`FilterSpec`] with support for:
//! - Filter predicates (see [`PredicateBuilder`])
//! - Keyset pagination on `(sort column, id)`
//! - Offset pagination by page number
//! - A matching COUNT query

use sea_query::{Alias, Asterisk, Expr, Order, PostgresQueryBuilder, Query, SelectStatement, SimpleExpr, Values};

use super::cursor::{self, CursorError};
use super::predicate::{PredicateBuilder, Products};
use super::types::{FilterSpec, Pagination, SortDirection};
use crate::models::product::PRODUCT_COLUMNS;

/// SQL text plus the values bound to its `$n` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Values,
}

/// Query builder for product listings.
pub struct ListingQueryBuilder<'a> {
    spec: &'a FilterSpec,
}

impl<'a> ListingQueryBuilder<'a> {
    pub fn new(spec: &'a FilterSpec) -> Self {
        Self { spec }
    }

    /// Build the page SELECT.
    ///
    /// Fails only when a keyset cursor value does not fit the sort column.
    pub fn build(&self) -> Result<Statement, CursorError> {
        let mut query = Query::select();

        for column in PRODUCT_COLUMNS {
            query.column(Alias::new(column));
        }
        query.from(Products::Table);

        self.add_filters(&mut query);

        let order = match self.spec.order {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        let sort_column = Products::from(self.spec.sort_by);

        match &self.spec.pagination {
            Pagination::Keyset(cursor) => {
                if let Some(cursor) = cursor {
                    let value = cursor::decode(self.spec.sort_by, &cursor.value)?;
                    query.and_where(self.after_cursor(value.into(), cursor.id));
                }
                // Same direction on both keys keeps the row comparison above
                // consistent with the ordering.
                query
                    .order_by(sort_column, order.clone())
                    .order_by(Products::Id, order);
                query.limit(u64::from(self.spec.page_size));
            }
            Pagination::Offset { page } => {
                query.order_by(sort_column, order);
                query.limit(u64::from(self.spec.page_size));
                let offset = u64::from(page.saturating_sub(1)) * u64::from(self.spec.page_size);
                if offset > 0 {
                    query.offset(offset);
                }
            }
        }

        Ok(render(&query))
    }

    /// Build a COUNT query over the same filters, without ordering or paging.
    pub fn build_count(&self) -> Statement {
        let mut query = Query::select();
        query.expr(Expr::col(Asterisk).count());
        query.from(Products::Table);
        self.add_filters(&mut query);
        render(&query)
    }

    fn add_filters(&self, query: &mut SelectStatement) {
        for predicate in PredicateBuilder::new(self.spec).build() {
            query.and_where(predicate);
        }
    }

    /// `(sort column, id) > (value, id)` for ascending order, `<` for
    /// descending. Excludes the cursor row and keeps rows that tie on the
    /// sort column but come after it by id.
    fn after_cursor(&self, value: sea_query::Value, id: i64) -> SimpleExpr {
        let keys: [SimpleExpr; 2] = [
            Expr::col(Products::from(self.spec.sort_by)).into(),
            Expr::col(Products::Id).into(),
        ];
        let bounds: [SimpleExpr; 2] = [Expr::val(value).into(), Expr::val(id).into()];

        match self.spec.order {
            SortDirection::Asc => Expr::tuple(keys).gt(Expr::tuple(bounds)),
            SortDirection::Desc => Expr::tuple(keys).lt(Expr::tuple(bounds)),
        }
    }
}

fn render(query: &SelectStatement) -> Statement {
    let (sql, values) = query.build(PostgresQueryBuilder);
    tracing::debug!(sql = %sql, params = values.0.len(), "built listing query");
    Statement { sql, values }
}
