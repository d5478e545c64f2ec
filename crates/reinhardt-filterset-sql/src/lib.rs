//! # Reinhardt Filterset SQL
//!
//! A [`Queryable`](reinhardt_filterset_core::Queryable) that renders filterset output as a
//! `sea-query` `SELECT` statement.
//!
//! Every filter predicate becomes part of the `WHERE` clause, exclusions are wrapped in
//! `NOT`, and ordering terms become `ORDER BY` expressions. The statement can be rendered
//! inline or with bound parameters for PostgreSQL, MySQL and SQLite.
//!
//! ## Example
//!
//! ```
//! use reinhardt_filterset_core::prelude::*;
//! use reinhardt_filterset_sql::{DatabaseDialect, SqlQuery};
//!
//! let filterset = FilterSet::builder()
//!     .filter("min_price", Filter::number("price").lookup("gte"))
//!     .build()
//!     .unwrap();
//!
//! let bound = filterset.bind(vec![("min_price", "10")], SqlQuery::new("book"));
//! let sql = bound.queryable().to_sql(DatabaseDialect::PostgreSQL);
//!
//! assert!(sql.contains(r#"FROM "book""#));
//! assert!(sql.contains(r#""price" >= 10"#));
//! ```

pub mod dialect;
pub mod query;

pub use dialect::DatabaseDialect;
pub use query::{SqlQuery, escape_like_pattern, exclusion_condition, predicate_condition};
