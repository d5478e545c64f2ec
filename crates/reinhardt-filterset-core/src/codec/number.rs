//! Numeric codecs

use super::ValueCodec;
use crate::error::DecodeError;
use crate::value::FilterValue;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Signed 64-bit integers
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerCodec;

impl ValueCodec for IntegerCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		raw.trim()
			.parse::<i64>()
			.map(FilterValue::Int)
			.map_err(|_| DecodeError::InvalidNumber {
				value: raw.to_string(),
				kind: "integer",
			})
	}

	fn name(&self) -> &'static str {
		"integer"
	}
}

/// Finite 64-bit floats
///
/// `NaN` and infinities are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCodec;

impl ValueCodec for FloatCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		match raw.trim().parse::<f64>() {
			Ok(f) if f.is_finite() => Ok(FilterValue::Float(f)),
			_ => Err(DecodeError::InvalidNumber {
				value: raw.to_string(),
				kind: "float",
			}),
		}
	}

	fn name(&self) -> &'static str {
		"float"
	}
}

/// Exact decimal numbers, the default for number filters
///
/// Plain (`12.50`) and scientific (`1.25e1`) notation are accepted.
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::codec::{DecimalCodec, ValueCodec};
///
/// let value = DecimalCodec.decode("12.50").unwrap();
/// assert_eq!(DecimalCodec.encode(&value), "12.50");
/// assert!(DecimalCodec.decode("twelve").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalCodec;

impl ValueCodec for DecimalCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		let s = raw.trim();
		Decimal::from_str(s)
			.or_else(|_| Decimal::from_scientific(s))
			.map(FilterValue::Decimal)
			.map_err(|_| DecodeError::InvalidNumber {
				value: raw.to_string(),
				kind: "decimal",
			})
	}

	fn name(&self) -> &'static str {
		"decimal"
	}
}
