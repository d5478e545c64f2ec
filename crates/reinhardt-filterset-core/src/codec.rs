//! Value codecs
//!
//! A [`ValueCodec`] turns one raw query-string value into a typed [`FilterValue`] and
//! back. Every codec trims surrounding whitespace before parsing and reports failures as
//! [`DecodeError`] values; nothing in this module panics on user input.
//!
//! Date and time parsing comes in two flavours that callers pick explicitly:
//!
//! - a lenient, locale-aware codec accepting several human formats
//!   ([`DateCodec::lenient`], [`DateTimeCodec::lenient`])
//! - a strict ISO 8601 codec ([`DateCodec::iso`], [`DateTimeCodec::iso`])

pub mod boolean;
pub mod csv;
pub mod number;
pub mod temporal;
pub mod text;

pub use boolean::{BooleanCodec, NullBooleanCodec};
pub use csv::CsvCodec;
pub use number::{DecimalCodec, FloatCodec, IntegerCodec};
pub use temporal::{DateCodec, DateTimeCodec, TimeCodec};
pub use text::{TextCodec, UuidCodec};

use crate::error::DecodeError;
use crate::lookup::lookups;
use crate::value::FilterValue;
use std::fmt::Debug;
use std::sync::Arc;

/// Converts raw parameter strings to typed values
pub trait ValueCodec: Debug + Send + Sync {
	/// Decode a single raw value
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError>;

	/// Decode several raw values, preserving their order and duplicates
	fn decode_multi(&self, raws: &[String]) -> Result<Vec<FilterValue>, DecodeError> {
		raws.iter().map(|raw| self.decode(raw)).collect()
	}

	/// Encode a typed value into the raw form [`decode`](Self::decode) accepts
	fn encode(&self, value: &FilterValue) -> String {
		value.to_string()
	}

	/// Short name used in filter metadata
	fn name(&self) -> &'static str;

	/// Whether the codec already yields a list or range for one raw value
	fn is_composite(&self) -> bool {
		false
	}
}

/// Shared handle to a codec
pub type SharedCodec = Arc<dyn ValueCodec>;

/// Pick the codec a lookup needs on top of a field's base codec
///
/// `isnull` always takes a boolean, `in` a comma separated list and `range` a comma
/// separated pair of the base type. Composite codecs are returned unchanged.
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::codec::{codec_for_lookup, IntegerCodec, ValueCodec};
/// use reinhardt_filterset_core::FilterValue;
/// use std::sync::Arc;
///
/// let codec = codec_for_lookup("in", Arc::new(IntegerCodec));
/// assert_eq!(
///     codec.decode("1,2").unwrap(),
///     FilterValue::List(vec![FilterValue::Int(1), FilterValue::Int(2)])
/// );
/// ```
pub fn codec_for_lookup(lookup: &str, base: SharedCodec) -> SharedCodec {
	if base.is_composite() {
		return base;
	}
	match lookup {
		lookups::ISNULL => Arc::new(BooleanCodec),
		lookups::IN => Arc::new(CsvCodec::list(base)),
		lookups::RANGE => Arc::new(CsvCodec::pair(base)),
		_ => base,
	}
}
