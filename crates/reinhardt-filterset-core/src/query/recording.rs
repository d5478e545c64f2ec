//! A queryable that only records what was asked of it

use super::{OrderBy, Predicate, Queryable};
use serde::Serialize;

/// One call made on a [`RecordingQuery`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCall {
	Filter(Predicate),
	Exclude(Predicate),
	Distinct,
	OrderBy(Vec<OrderBy>),
}

/// Records every call in order
///
/// Useful for unit-testing filtersets without a data source.
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::query::{Predicate, QueryCall, Queryable, RecordingQuery};
///
/// let q = RecordingQuery::new()
///     .filter(Predicate::compare("price", "gte", 5_i64))
///     .distinct();
///
/// assert_eq!(q.calls().len(), 2);
/// assert_eq!(q.calls()[1], QueryCall::Distinct);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordingQuery {
	calls: Vec<QueryCall>,
}

impl RecordingQuery {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn calls(&self) -> &[QueryCall] {
		&self.calls
	}

	pub fn is_untouched(&self) -> bool {
		self.calls.is_empty()
	}

	/// Predicates passed to `filter`
	pub fn filters(&self) -> Vec<&Predicate> {
		self.calls
			.iter()
			.filter_map(|call| match call {
				QueryCall::Filter(p) => Some(p),
				_ => None,
			})
			.collect()
	}

	/// Predicates passed to `exclude`
	pub fn excludes(&self) -> Vec<&Predicate> {
		self.calls
			.iter()
			.filter_map(|call| match call {
				QueryCall::Exclude(p) => Some(p),
				_ => None,
			})
			.collect()
	}

	pub fn distinct_count(&self) -> usize {
		self.calls
			.iter()
			.filter(|call| matches!(call, QueryCall::Distinct))
			.count()
	}

	/// The most recent ordering, if any
	pub fn ordering(&self) -> Option<&[OrderBy]> {
		self.calls.iter().rev().find_map(|call| match call {
			QueryCall::OrderBy(order) => Some(order.as_slice()),
			_ => None,
		})
	}

	/// Append a call directly, used by custom resolvers that annotate the query
	pub fn record(mut self, call: QueryCall) -> Self {
		self.calls.push(call);
		self
	}
}

impl Queryable for RecordingQuery {
	fn filter(mut self, predicate: Predicate) -> Self {
		self.calls.push(QueryCall::Filter(predicate));
		self
	}

	fn exclude(mut self, predicate: Predicate) -> Self {
		self.calls.push(QueryCall::Exclude(predicate));
		self
	}

	fn distinct(mut self) -> Self {
		self.calls.push(QueryCall::Distinct);
		self
	}

	fn order_by(mut self, ordering: &[OrderBy]) -> Self {
		self.calls.push(QueryCall::OrderBy(ordering.to_vec()));
		self
	}
}
