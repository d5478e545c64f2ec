//! # Reinhardt Filterset
//!
//! Declarative query-parameter filtering, inspired by django-filter.
//!
//! Declare a [`FilterSet`] of named [`Filter`]s (or derive them from a [`Schema`]), bind it
//! to raw query parameters and a [`Queryable`], and get back the narrowed queryable together
//! with per-filter validation errors.
//!
//! ## Feature Flags
//!
//! - `sql` (default) - [`sql::SqlQuery`], a `sea-query` backed queryable rendering
//!   PostgreSQL, MySQL and SQLite statements
//!
//! ## Crates
//!
//! - `reinhardt-filterset-core` - filters, codecs, filtersets, in-memory and recording
//!   queryables, settings
//! - `reinhardt-filterset-sql` - SQL rendering
//!
//! ## Quick Example
//!
//! ```
//! use reinhardt_filterset::prelude::*;
//! use serde_json::json;
//!
//! let filterset = FilterSet::builder()
//!     .filter("title", Filter::char("title").lookup("icontains"))
//!     .filter("price", Filter::numeric_range("price"))
//!     .ordering(Filter::ordering([("price", "price")]))
//!     .build()
//!     .unwrap();
//!
//! let rows = MemoryQuery::new(vec![
//!     json!({"title": "Rust in Action", "price": 40}),
//!     json!({"title": "Programming Rust", "price": 55}),
//!     json!({"title": "Learning Go", "price": 30}),
//! ]);
//!
//! let params = QueryParams::from_query_string("title=rust&price_max=50&o=-price").unwrap();
//! let bound = filterset.bind(params, rows);
//!
//! assert!(bound.is_valid());
//! assert_eq!(bound.queryable().pluck("price"), vec![json!(40)]);
//! ```

pub use reinhardt_filterset_core::*;

#[cfg(feature = "sql")]
pub use reinhardt_filterset_sql as sql;

/// Common imports
pub mod prelude {
	pub use reinhardt_filterset_core::prelude::*;

	#[cfg(feature = "sql")]
	pub use reinhardt_filterset_sql::{DatabaseDialect, SqlQuery};
}
