//! Text and identifier codecs

use super::ValueCodec;
use crate::error::DecodeError;
use crate::value::FilterValue;
use uuid::Uuid;

/// Free text, used for char filters and choice keys
#[derive(Debug, Clone, Copy)]
pub struct TextCodec {
	strip: bool,
}

impl TextCodec {
	/// Keep surrounding whitespace instead of stripping it
	pub fn preserve_whitespace() -> Self {
		Self { strip: false }
	}
}

impl Default for TextCodec {
	fn default() -> Self {
		Self { strip: true }
	}
}

impl ValueCodec for TextCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		let s = if self.strip { raw.trim() } else { raw };
		Ok(FilterValue::String(s.to_string()))
	}

	fn name(&self) -> &'static str {
		"text"
	}
}

/// Hyphenated or simple UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidCodec;

impl ValueCodec for UuidCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		Uuid::parse_str(raw.trim())
			.map(FilterValue::Uuid)
			.map_err(|_| DecodeError::InvalidUuid {
				value: raw.to_string(),
			})
	}

	fn name(&self) -> &'static str {
		"uuid"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_text_strips_by_default() {
		assert_eq!(
			TextCodec::default().decode("  rust ").unwrap(),
			FilterValue::String("rust".into())
		);
		assert_eq!(
			TextCodec::preserve_whitespace().decode("  rust ").unwrap(),
			FilterValue::String("  rust ".into())
		);
	}

	#[rstest]
	fn test_uuid_roundtrip() {
		let raw = "67e55044-10b1-426f-9247-bb680e5fe0c8";

		let value = UuidCodec.decode(raw).unwrap();

		assert_eq!(UuidCodec.encode(&value), raw);
	}

	#[rstest]
	fn test_uuid_rejects_garbage() {
		assert!(matches!(
			UuidCodec.decode("not-a-uuid"),
			Err(DecodeError::InvalidUuid { .. })
		));
	}
}
