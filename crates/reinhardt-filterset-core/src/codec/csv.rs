//! Comma separated values for `in` and `range` lookups

use super::{SharedCodec, ValueCodec};
use crate::error::DecodeError;
use crate::value::FilterValue;

/// Splits one raw value on commas and decodes each part with an inner codec
///
/// A list codec yields [`FilterValue::List`]; a pair codec requires exactly two parts
/// and yields [`FilterValue::Range`].
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::codec::{CsvCodec, IntegerCodec, ValueCodec};
/// use reinhardt_filterset_core::FilterValue;
/// use std::sync::Arc;
///
/// let pair = CsvCodec::pair(Arc::new(IntegerCodec));
/// assert_eq!(pair.decode("1, 9").unwrap(), FilterValue::range(1_i64, 9_i64));
/// assert!(pair.decode("1,2,3").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CsvCodec {
	inner: SharedCodec,
	pair: bool,
}

impl CsvCodec {
	pub fn list(inner: SharedCodec) -> Self {
		Self { inner, pair: false }
	}

	pub fn pair(inner: SharedCodec) -> Self {
		Self { inner, pair: true }
	}

	pub fn inner(&self) -> &SharedCodec {
		&self.inner
	}

	fn split(raw: &str) -> Vec<&str> {
		let trimmed = raw.trim();
		if trimmed.is_empty() {
			return Vec::new();
		}
		trimmed.split(',').map(str::trim).collect()
	}
}

impl ValueCodec for CsvCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		let parts = Self::split(raw);

		if self.pair {
			return match parts.as_slice() {
				[lower, upper] => Ok(FilterValue::Range(
					Box::new(self.inner.decode(lower)?),
					Box::new(self.inner.decode(upper)?),
				)),
				_ => Err(DecodeError::WrongArity {
					expected: 2,
					found: parts.len(),
				}),
			};
		}

		parts
			.into_iter()
			.map(|part| self.inner.decode(part))
			.collect::<Result<Vec<_>, _>>()
			.map(FilterValue::List)
	}

	fn encode(&self, value: &FilterValue) -> String {
		match value {
			FilterValue::List(items) => items
				.iter()
				.map(|item| self.inner.encode(item))
				.collect::<Vec<_>>()
				.join(","),
			FilterValue::Range(lower, upper) => {
				format!("{},{}", self.inner.encode(lower), self.inner.encode(upper))
			}
			other => self.inner.encode(other),
		}
	}

	fn name(&self) -> &'static str {
		if self.pair { "csv_pair" } else { "csv" }
	}

	fn is_composite(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::{DateCodec, TextCodec};
	use chrono::NaiveDate;
	use rstest::rstest;
	use std::sync::Arc;

	#[rstest]
	fn test_list_preserves_order_and_duplicates() {
		let codec = CsvCodec::list(Arc::new(TextCodec::default()));

		let value = codec.decode("b, a, b").unwrap();

		assert_eq!(
			value,
			FilterValue::List(vec!["b".into(), "a".into(), "b".into()])
		);
	}

	#[rstest]
	fn test_empty_list() {
		let codec = CsvCodec::list(Arc::new(TextCodec::default()));

		assert_eq!(codec.decode("  ").unwrap(), FilterValue::List(vec![]));
	}

	#[rstest]
	fn test_inner_error_propagates() {
		let codec = CsvCodec::list(Arc::new(DateCodec::iso()));

		assert!(matches!(
			codec.decode("2024-01-01,tomorrow"),
			Err(DecodeError::InvalidDate { .. })
		));
	}

	#[rstest]
	fn test_pair_encodes_with_inner_codec() {
		let codec = CsvCodec::pair(Arc::new(DateCodec::iso()));
		let value = FilterValue::range(
			NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
			NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
		);

		assert_eq!(codec.encode(&value), "2024-01-01,2024-12-31");
	}

	#[rstest]
	#[case("1")]
	#[case("")]
	fn test_pair_requires_two_parts(#[case] raw: &str) {
		let codec = CsvCodec::pair(Arc::new(TextCodec::default()));

		assert!(matches!(
			codec.decode(raw),
			Err(DecodeError::WrongArity { expected: 2, .. })
		));
	}
}
