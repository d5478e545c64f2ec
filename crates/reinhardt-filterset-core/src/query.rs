//! Queryable abstraction
//!
//! A [`Queryable`] is anything a filterset can narrow down: an ORM queryset, a SQL
//! statement builder or a plain in-memory collection. Filters never inspect the queryable;
//! they only move it through `filter`, `exclude`, `distinct` and `order_by` and hand the
//! result to the next filter.

pub mod memory;
pub mod predicate;
pub mod recording;

pub use memory::MemoryQuery;
pub use predicate::{Comparison, Predicate};
pub use recording::{QueryCall, RecordingQuery};

use serde::{Deserialize, Serialize};

/// A collection that can be narrowed by predicates
///
/// Every method consumes the queryable and returns the extended one, so filters compose
/// as a left fold in declaration order.
pub trait Queryable: Sized {
	/// Keep only items matching `predicate`
	fn filter(self, predicate: Predicate) -> Self;

	/// Drop items matching `predicate`
	fn exclude(self, predicate: Predicate) -> Self;

	/// Remove duplicate items
	fn distinct(self) -> Self;

	/// Sort by the given fields; an empty slice leaves the order untouched
	fn order_by(self, ordering: &[OrderBy]) -> Self;

	/// Whether predicates using `lookup` can be evaluated
	///
	/// Checked once per filter when a filterset is built.
	fn supports_lookup(_lookup: &str) -> bool {
		true
	}
}

/// One ordering term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
	pub path: String,
	pub descending: bool,
}

impl OrderBy {
	pub fn asc(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			descending: false,
		}
	}

	pub fn desc(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			descending: true,
		}
	}

	/// Parse `field` or `-field`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_filterset_core::query::OrderBy;
	///
	/// assert_eq!(OrderBy::parse("-created_at"), OrderBy::desc("created_at"));
	/// assert_eq!(OrderBy::parse("name"), OrderBy::asc("name"));
	/// ```
	pub fn parse(term: &str) -> Self {
		let term = term.trim();
		match term.strip_prefix('-') {
			Some(field) => Self::desc(field),
			None => Self::asc(term),
		}
	}
}

/// Split a `author__name` or `author.name` path into its segments
pub fn path_segments(path: &str) -> Vec<&str> {
	path.split("__")
		.flat_map(|part| part.split('.'))
		.filter(|segment| !segment.is_empty())
		.collect()
}
