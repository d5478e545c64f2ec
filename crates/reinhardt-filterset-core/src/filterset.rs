//! Filtersets
//!
//! A [`FilterSet`] is an ordered collection of named [`Filter`]s. Binding it to a set of
//! [`QueryParams`] folds every filter over a base [`Queryable`] in declaration order and
//! collects field errors instead of stopping at the first one.
//!
//! ## Example
//!
//! ```
//! use reinhardt_filterset_core::{Filter, FilterSet, QueryParams};
//! use reinhardt_filterset_core::query::{MemoryQuery, Queryable};
//! use serde_json::json;
//!
//! let filterset = FilterSet::builder()
//!     .filter("title", Filter::char("title").lookup("icontains"))
//!     .filter("price", Filter::numeric_range("price"))
//!     .build()
//!     .unwrap();
//!
//! let books = MemoryQuery::new(vec![
//!     json!({"title": "Rust in Action", "price": 40}),
//!     json!({"title": "Programming Rust", "price": 55}),
//!     json!({"title": "Learning Go", "price": 30}),
//! ]);
//! let params = QueryParams::from_query_string("title=rust&price_max=45").unwrap();
//!
//! let bound = filterset.bind(params, books);
//!
//! assert!(bound.is_valid());
//! assert_eq!(bound.queryable().pluck("title"), vec![json!("Rust in Action")]);
//! ```

pub mod bound;
pub mod builder;
pub mod derive;

pub use bound::BoundFilterSet;
pub use builder::FilterSetBuilder;
pub use derive::{Fields, derived_name};

use crate::error::{FieldErrors, FilterSetResult};
use crate::filter::Filter;
use crate::params::QueryParams;
use crate::query::Queryable;
use crate::schema::Schema;
use crate::settings::FilterSettings;
use crate::value::FilterValue;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

pub struct FilterSet<Q> {
	pub(crate) filters: IndexMap<String, Filter<Q>>,
	pub(crate) settings: Arc<FilterSettings>,
}

impl<Q: Queryable> FilterSet<Q> {
	pub fn builder() -> FilterSetBuilder<Q> {
		FilterSetBuilder::new()
	}

	/// Derive a filter for every field of `schema`
	pub fn from_schema(schema: Schema) -> FilterSetResult<Self> {
		Self::builder().schema(schema, Fields::All).build()
	}

	/// Resolve every filter against `query` in declaration order
	pub fn bind(&self, params: impl Into<QueryParams>, query: Q) -> BoundFilterSet<Q> {
		let params = params.into();
		let mut errors = FieldErrors::new();
		let mut query = query;

		for (name, filter) in &self.filters {
			let (next, error) = filter.resolve(name, query, &params);
			query = next;
			if let Some(error) = error {
				tracing::warn!(filter = %name, error = %error, "rejected filter value");
				errors.insert(name.clone(), error);
			}
		}

		BoundFilterSet {
			params,
			query,
			errors,
		}
	}
}

impl<Q> FilterSet<Q> {
	pub fn get(&self, name: &str) -> Option<&Filter<Q>> {
		self.filters.get(name)
	}

	/// Filter names in declaration order
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.filters.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Filter<Q>)> {
		self.filters.iter().map(|(name, filter)| (name.as_str(), filter))
	}

	pub fn len(&self) -> usize {
		self.filters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}

	pub fn settings(&self) -> &FilterSettings {
		&self.settings
	}

	/// Every parameter key any filter reads
	pub fn param_keys(&self) -> Vec<String> {
		self.filters
			.iter()
			.flat_map(|(name, filter)| filter.param_keys(name))
			.collect()
	}

	/// Raw form of `value` for the filter `name`, e.g. to prefill a form field
	pub fn encode_value(&self, name: &str, value: &FilterValue) -> Option<String> {
		self.filters
			.get(name)
			.map(|filter| filter.value_codec().encode(value))
	}
}

impl<Q> Clone for FilterSet<Q> {
	fn clone(&self) -> Self {
		Self {
			filters: self.filters.clone(),
			settings: Arc::clone(&self.settings),
		}
	}
}

impl<Q> fmt::Debug for FilterSet<Q> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterSet")
			.field("filters", &self.filters)
			.field("settings", &self.settings)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::query::{Predicate, QueryCall, RecordingQuery};
	use rstest::rstest;

	#[rstest]
	fn test_bind_folds_in_declaration_order() {
		// Arrange
		let filterset = FilterSet::<RecordingQuery>::builder()
			.filter("b", Filter::char("b"))
			.filter("a", Filter::char("a"))
			.build()
			.unwrap();
		let params = QueryParams::from(vec![("a", "1"), ("b", "2")]);

		// Act
		let bound = filterset.bind(params, RecordingQuery::new());

		// Assert
		assert_eq!(
			bound.queryable().calls(),
			&[
				QueryCall::Filter(Predicate::compare("b", "exact", "2")),
				QueryCall::Filter(Predicate::compare("a", "exact", "1")),
			]
		);
	}

	#[rstest]
	fn test_errors_are_collected_not_short_circuited() {
		let filterset = FilterSet::<RecordingQuery>::builder()
			.filter("price", Filter::number("price"))
			.filter("title", Filter::char("title"))
			.filter("active", Filter::boolean("active"))
			.build()
			.unwrap();
		let params = QueryParams::from(vec![
			("price", "cheap"),
			("title", "rust"),
			("active", "maybe"),
		]);

		let (query, errors) = filterset.bind(params, RecordingQuery::new()).into_parts();

		assert_eq!(errors.names().collect::<Vec<_>>(), vec!["price", "active"]);
		assert_eq!(query.filters(), vec![&Predicate::compare("title", "exact", "rust")]);
	}

	#[rstest]
	fn test_rebinding_yields_independent_results() {
		let filterset = FilterSet::<RecordingQuery>::builder()
			.filter("title", Filter::char("title"))
			.build()
			.unwrap();

		let first = filterset.bind(QueryParams::from(vec![("title", "a")]), RecordingQuery::new());
		let second = filterset.bind(QueryParams::new(), RecordingQuery::new());

		assert_eq!(first.queryable().calls().len(), 1);
		assert!(second.queryable().is_untouched());
	}

	#[rstest]
	fn test_encode_value_uses_filter_codec() {
		let filterset = FilterSet::<RecordingQuery>::builder()
			.filter("active", Filter::boolean("active"))
			.build()
			.unwrap();

		assert_eq!(
			filterset.encode_value("active", &FilterValue::Bool(true)),
			Some("true".to_string())
		);
		assert_eq!(filterset.encode_value("missing", &FilterValue::Null), None);
	}
}
