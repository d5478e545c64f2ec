//! Paired range filters

use super::{Cleaned, Filter};
use crate::error::{Bound, FieldError, RangeBoundError};
use crate::lookup::lookups;
use crate::params::QueryParams;
use crate::query::{Predicate, Queryable};
use crate::value::FilterValue;
use serde::{Deserialize, Serialize};

/// Parameter suffixes and lookups of a paired range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
	pub lower_suffix: String,
	pub upper_suffix: String,
	/// Lookup when only the lower bound is given
	pub lower_lookup: String,
	/// Lookup when only the upper bound is given
	pub upper_lookup: String,
	/// Lookup when both bounds are given
	pub both_lookup: String,
}

impl Default for RangeConfig {
	fn default() -> Self {
		Self::with_suffixes("_0", "_1")
	}
}

impl RangeConfig {
	pub fn with_suffixes(lower: &str, upper: &str) -> Self {
		Self {
			lower_suffix: lower.to_string(),
			upper_suffix: upper.to_string(),
			lower_lookup: lookups::GTE.to_string(),
			upper_lookup: lookups::LTE.to_string(),
			both_lookup: lookups::RANGE.to_string(),
		}
	}

	/// `_min` / `_max`
	pub fn min_max() -> Self {
		Self::with_suffixes("_min", "_max")
	}

	/// `_after` / `_before`
	pub fn after_before() -> Self {
		Self::with_suffixes("_after", "_before")
	}

	pub fn keys(&self, name: &str) -> (String, String) {
		(
			format!("{name}{}", self.lower_suffix),
			format!("{name}{}", self.upper_suffix),
		)
	}
}

impl<Q: Queryable> Filter<Q> {
	pub(crate) fn clean_range(
		&self,
		name: &str,
		params: &QueryParams,
	) -> Result<Option<Cleaned>, FieldError> {
		let (lower_key, upper_key) = self.range.keys(name);
		let mut errors = Vec::new();

		let lower = self.decode_bound(params, &lower_key, Bound::Lower, &mut errors);
		let upper = self.decode_bound(params, &upper_key, Bound::Upper, &mut errors);

		if !errors.is_empty() {
			return Err(FieldError::RangeBounds(errors));
		}

		if self.resolver.is_some() {
			let value = FilterValue::Range(
				Box::new(lower.unwrap_or(FilterValue::Null)),
				Box::new(upper.unwrap_or(FilterValue::Null)),
			);
			return Ok(Some(Cleaned::Resolver(value)));
		}

		let target = self.target.clone();
		let predicate = match (lower, upper) {
			(Some(lower), Some(upper)) => Predicate::compare(
				target,
				self.range.both_lookup.clone(),
				FilterValue::Range(Box::new(lower), Box::new(upper)),
			),
			(Some(lower), None) => Predicate::compare(target, self.range.lower_lookup.clone(), lower),
			(None, Some(upper)) => Predicate::compare(target, self.range.upper_lookup.clone(), upper),
			(None, None) => return Ok(None),
		};
		Ok(Some(Cleaned::Predicate(predicate)))
	}

	fn decode_bound(
		&self,
		params: &QueryParams,
		key: &str,
		bound: Bound,
		errors: &mut Vec<RangeBoundError>,
	) -> Option<FilterValue> {
		let raw = params.get(key).map(str::trim).filter(|raw| !raw.is_empty())?;
		match self
			.codec
			.decode(raw)
			.and_then(|value| self.coerce_value(value))
		{
			Ok(value) if value.is_null() => None,
			Ok(value) => Some(value),
			Err(source) => {
				errors.push(RangeBoundError { bound, source });
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::IntegerCodec;
	use crate::query::RecordingQuery;
	use rstest::rstest;

	#[rstest]
	fn test_keys_use_suffixes() {
		let config = RangeConfig::min_max();

		assert_eq!(
			config.keys("price"),
			("price_min".to_string(), "price_max".to_string())
		);
	}

	#[rstest]
	fn test_both_bounds_fail_independently() {
		// Arrange
		let filter: Filter<RecordingQuery> = Filter::range("price", IntegerCodec);
		let params = QueryParams::from(vec![("price_0", "x"), ("price_1", "y")]);

		// Act
		let result = filter.clean_range("price", &params);

		// Assert
		let Err(FieldError::RangeBounds(errors)) = result else {
			panic!("expected range bound errors");
		};
		let bounds: Vec<Bound> = errors.iter().map(|e| e.bound).collect();
		assert_eq!(bounds, vec![Bound::Lower, Bound::Upper]);
	}

	#[rstest]
	fn test_custom_bound_lookups() {
		let filter: Filter<RecordingQuery> =
			Filter::range("name", crate::codec::TextCodec::default())
				.bound_lookups("istartswith", "lt");
		let params = QueryParams::from(vec![("name_0", "ab")]);

		let Ok(Some(Cleaned::Predicate(predicate))) = filter.clean_range("name", &params) else {
			panic!("expected a predicate");
		};

		assert_eq!(predicate, Predicate::compare("name", "istartswith", "ab"));
	}
}
