//! Typed filter values
//!
//! [`FilterValue`] is what a [`ValueCodec`](crate::codec::ValueCodec) produces from a raw
//! query-string value and what a [`Queryable`](crate::query::Queryable) receives inside a
//! [`Comparison`](crate::query::Comparison).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A decoded, typed filter value
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::FilterValue;
///
/// let value = FilterValue::from(42_i64);
/// assert_eq!(value.to_string(), "42");
///
/// let list = FilterValue::List(vec!["a".into(), "b".into()]);
/// assert_eq!(list.to_string(), "a,b");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Decimal(Decimal),
	String(String),
	Date(NaiveDate),
	Time(NaiveTime),
	DateTime(NaiveDateTime),
	Uuid(Uuid),
	/// Values of an `in` lookup or a multiple selection
	List(Vec<FilterValue>),
	/// Inclusive lower and upper bound of a `range` lookup
	Range(Box<FilterValue>, Box<FilterValue>),
}

impl FilterValue {
	/// Build an inclusive range value
	pub fn range(lower: impl Into<FilterValue>, upper: impl Into<FilterValue>) -> Self {
		Self::Range(Box::new(lower.into()), Box::new(upper.into()))
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the inner string slice for [`FilterValue::String`]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Canonical string form used when matching against choice keys
	pub fn to_key(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for FilterValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Int(i) => write!(f, "{}", i),
			Self::Float(v) => write!(f, "{}", v),
			Self::Decimal(d) => write!(f, "{}", d),
			Self::String(s) => f.write_str(s),
			Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
			Self::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
			Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
			Self::Uuid(u) => write!(f, "{}", u),
			Self::List(items) => {
				let joined = items
					.iter()
					.map(ToString::to_string)
					.collect::<Vec<_>>()
					.join(",");
				f.write_str(&joined)
			}
			Self::Range(lower, upper) => write!(f, "{},{}", lower, upper),
		}
	}
}

impl From<String> for FilterValue {
	fn from(s: String) -> Self {
		FilterValue::String(s)
	}
}

impl From<&str> for FilterValue {
	fn from(s: &str) -> Self {
		FilterValue::String(s.to_string())
	}
}

impl From<i64> for FilterValue {
	fn from(i: i64) -> Self {
		FilterValue::Int(i)
	}
}

impl From<i32> for FilterValue {
	fn from(i: i32) -> Self {
		FilterValue::Int(i as i64)
	}
}

impl From<f64> for FilterValue {
	fn from(f: f64) -> Self {
		FilterValue::Float(f)
	}
}

impl From<bool> for FilterValue {
	fn from(b: bool) -> Self {
		FilterValue::Bool(b)
	}
}

impl From<Decimal> for FilterValue {
	fn from(d: Decimal) -> Self {
		FilterValue::Decimal(d)
	}
}

impl From<NaiveDate> for FilterValue {
	fn from(d: NaiveDate) -> Self {
		FilterValue::Date(d)
	}
}

impl From<NaiveTime> for FilterValue {
	fn from(t: NaiveTime) -> Self {
		FilterValue::Time(t)
	}
}

impl From<NaiveDateTime> for FilterValue {
	fn from(dt: NaiveDateTime) -> Self {
		FilterValue::DateTime(dt)
	}
}

impl From<Uuid> for FilterValue {
	fn from(u: Uuid) -> Self {
		FilterValue::Uuid(u)
	}
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
	fn from(items: Vec<T>) -> Self {
		FilterValue::List(items.into_iter().map(Into::into).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(FilterValue::Null, "null")]
	#[case(FilterValue::Bool(true), "true")]
	#[case(FilterValue::Int(-7), "-7")]
	#[case(FilterValue::Float(2.5), "2.5")]
	#[case(FilterValue::String("abc".into()), "abc")]
	#[case(FilterValue::range(5_i64, 15_i64), "5,15")]
	fn test_display(#[case] value: FilterValue, #[case] expected: &str) {
		assert_eq!(value.to_string(), expected);
	}

	#[rstest]
	fn test_temporal_display_is_iso() {
		let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
		let datetime = date.and_hms_opt(10, 30, 0).unwrap();

		assert_eq!(FilterValue::Date(date).to_string(), "2024-02-29");
		assert_eq!(
			FilterValue::DateTime(datetime).to_string(),
			"2024-02-29T10:30:00"
		);
	}

	#[rstest]
	fn test_from_vec_builds_list() {
		let value = FilterValue::from(vec![1_i64, 2, 3]);

		assert_eq!(
			value,
			FilterValue::List(vec![
				FilterValue::Int(1),
				FilterValue::Int(2),
				FilterValue::Int(3)
			])
		);
	}
}
