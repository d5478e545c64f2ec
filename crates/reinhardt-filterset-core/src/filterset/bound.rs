//! The result of binding parameters to a filterset

use crate::error::FieldErrors;
use crate::params::QueryParams;

/// Parameters, the composed queryable and the per-filter errors of one bind
///
/// A bound filterset is never modified; binding again produces a new one. When some
/// filters failed, the queryable still carries every filter that resolved, and it is
/// up to the caller whether to use it.
#[derive(Debug, Clone)]
pub struct BoundFilterSet<Q> {
	pub(crate) params: QueryParams,
	pub(crate) query: Q,
	pub(crate) errors: FieldErrors,
}

impl<Q> BoundFilterSet<Q> {
	pub fn is_valid(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn errors(&self) -> &FieldErrors {
		&self.errors
	}

	pub fn params(&self) -> &QueryParams {
		&self.params
	}

	pub fn queryable(&self) -> &Q {
		&self.query
	}

	pub fn into_queryable(self) -> Q {
		self.query
	}

	pub fn into_parts(self) -> (Q, FieldErrors) {
		(self.query, self.errors)
	}
}
