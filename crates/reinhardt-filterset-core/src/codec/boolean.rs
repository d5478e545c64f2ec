//! Boolean codecs

use super::ValueCodec;
use crate::error::DecodeError;
use crate::value::FilterValue;

const TRUE_VALUES: &[&str] = &["true", "1", "yes", "on"];
const FALSE_VALUES: &[&str] = &["false", "0", "no", "off"];
const NULL_VALUES: &[&str] = &["null", "none", "unknown"];

fn parse_bool(raw: &str) -> Option<bool> {
	let normalized = raw.trim().to_ascii_lowercase();
	if TRUE_VALUES.contains(&normalized.as_str()) {
		Some(true)
	} else if FALSE_VALUES.contains(&normalized.as_str()) {
		Some(false)
	} else {
		None
	}
}

/// Strict two-state boolean
///
/// Accepts `true/false`, `1/0`, `yes/no` and `on/off` in any letter case. Anything
/// else is a [`DecodeError::InvalidBoolean`].
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::codec::{BooleanCodec, ValueCodec};
/// use reinhardt_filterset_core::FilterValue;
///
/// assert_eq!(BooleanCodec.decode("True").unwrap(), FilterValue::Bool(true));
/// assert!(BooleanCodec.decode("maybe").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl ValueCodec for BooleanCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		parse_bool(raw)
			.map(FilterValue::Bool)
			.ok_or_else(|| DecodeError::InvalidBoolean {
				value: raw.to_string(),
			})
	}

	fn name(&self) -> &'static str {
		"boolean"
	}
}

/// Three-state boolean
///
/// Like [`BooleanCodec`] but `null`, `none` and `unknown` decode to [`FilterValue::Null`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBooleanCodec;

impl ValueCodec for NullBooleanCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		if let Some(b) = parse_bool(raw) {
			return Ok(FilterValue::Bool(b));
		}
		let normalized = raw.trim().to_ascii_lowercase();
		if NULL_VALUES.contains(&normalized.as_str()) {
			return Ok(FilterValue::Null);
		}
		Err(DecodeError::InvalidBoolean {
			value: raw.to_string(),
		})
	}

	fn name(&self) -> &'static str {
		"null_boolean"
	}
}
