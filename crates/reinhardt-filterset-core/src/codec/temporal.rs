//! Date, datetime and time codecs

use super::ValueCodec;
use crate::error::DecodeError;
use crate::value::FilterValue;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

const ISO_DATE: &str = "%Y-%m-%d";

/// Human date formats tried in order after the locale's primary format
const DATE_INPUT_FORMATS: &[&str] = &[
	"%Y-%m-%d",   // 2025-01-15
	"%m/%d/%Y",   // 01/15/2025
	"%b %d %Y",   // Jan 15 2025
	"%b %d, %Y",  // Jan 15, 2025
	"%d %b %Y",   // 15 Jan 2025
	"%d %b, %Y",  // 15 Jan, 2025
	"%B %d %Y",   // January 15 2025
	"%B %d, %Y",  // January 15, 2025
	"%d %B %Y",   // 15 January 2025
	"%d %B, %Y",  // 15 January, 2025
];

const DATETIME_INPUT_FORMATS: &[&str] = &[
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%d %H:%M",
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%dT%H:%M",
	"%m/%d/%Y %H:%M:%S",
	"%m/%d/%Y %H:%M",
];

const ISO_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

const TIME_INPUT_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Primary date format for a locale, if the locale is known
pub fn locale_date_format(locale: &str) -> Option<&'static str> {
	match locale.replace('-', "_").as_str() {
		"en_US" => Some("%m/%d/%Y"),
		"en_GB" | "fr_FR" | "es_ES" | "it_IT" => Some("%d/%m/%Y"),
		"de_DE" | "ru_RU" => Some("%d.%m.%Y"),
		"ja_JP" | "zh_CN" => Some("%Y/%m/%d"),
		_ => None,
	}
}

fn has_four_digit_year(year: i32) -> bool {
	(1000..=9999).contains(&year)
}

/// Dates, either lenient and locale-aware or strict ISO 8601
///
/// The lenient codec tries the locale's primary format first (when a locale is set),
/// then any extra formats, then the built-in list. Years outside 1000..=9999 are rejected
/// so `01/15/25` never silently becomes year 25.
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::codec::{DateCodec, ValueCodec};
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().into();
/// assert_eq!(DateCodec::lenient().decode("Jan 15, 2025").unwrap(), expected);
/// assert_eq!(DateCodec::iso().decode("2025-01-15").unwrap(), expected);
/// assert!(DateCodec::iso().decode("01/15/2025").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DateCodec {
	formats: Vec<String>,
	strict: bool,
}

impl DateCodec {
	pub fn lenient() -> Self {
		Self {
			formats: DATE_INPUT_FORMATS.iter().map(|f| f.to_string()).collect(),
			strict: false,
		}
	}

	pub fn iso() -> Self {
		Self {
			formats: vec![ISO_DATE.to_string()],
			strict: true,
		}
	}

	/// Try the locale's primary format before any other
	pub fn with_locale(mut self, locale: &str) -> Self {
		if self.strict {
			return self;
		}
		if let Some(primary) = locale_date_format(locale) {
			self.formats.retain(|f| f != primary);
			self.formats.insert(0, primary.to_string());
		}
		self
	}

	/// Add input formats tried before the built-in ones
	pub fn with_formats<I, S>(mut self, formats: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		if self.strict {
			return self;
		}
		let mut extra: Vec<String> = formats.into_iter().map(Into::into).collect();
		self.formats.retain(|f| !extra.contains(f));
		extra.append(&mut self.formats);
		self.formats = extra;
		self
	}

	pub fn formats(&self) -> &[String] {
		&self.formats
	}
}

impl Default for DateCodec {
	fn default() -> Self {
		Self::lenient()
	}
}

impl ValueCodec for DateCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		let s = raw.trim();
		for format in &self.formats {
			if let Ok(date) = NaiveDate::parse_from_str(s, format)
				&& has_four_digit_year(date.year())
			{
				return Ok(FilterValue::Date(date));
			}
		}
		Err(DecodeError::InvalidDate {
			value: raw.to_string(),
		})
	}

	fn name(&self) -> &'static str {
		if self.strict { "iso_date" } else { "date" }
	}
}

/// Datetimes, either lenient or strict ISO 8601
///
/// The ISO codec also accepts RFC 3339 timestamps with an offset, normalised to UTC.
#[derive(Debug, Clone)]
pub struct DateTimeCodec {
	formats: Vec<String>,
	dates: DateCodec,
	strict: bool,
}

impl DateTimeCodec {
	pub fn lenient() -> Self {
		Self {
			formats: DATETIME_INPUT_FORMATS
				.iter()
				.map(|f| f.to_string())
				.collect(),
			dates: DateCodec::lenient(),
			strict: false,
		}
	}

	pub fn iso() -> Self {
		Self {
			formats: ISO_DATETIME_FORMATS.iter().map(|f| f.to_string()).collect(),
			dates: DateCodec::iso(),
			strict: true,
		}
	}

	/// Try the locale's date order, with and without seconds, before any other format
	pub fn with_locale(mut self, locale: &str) -> Self {
		if self.strict {
			return self;
		}
		if let Some(primary) = locale_date_format(locale) {
			let local = [format!("{primary} %H:%M:%S"), format!("{primary} %H:%M")];
			self.formats.retain(|f| !local.contains(f));
			let mut formats = Vec::from(local);
			formats.append(&mut self.formats);
			self.formats = formats;
			self.dates = self.dates.with_locale(locale);
		}
		self
	}

	/// Add date formats accepted for bare dates read as midnight
	pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.dates = self.dates.with_formats(formats);
		self
	}

	pub fn formats(&self) -> &[String] {
		&self.formats
	}
}

impl Default for DateTimeCodec {
	fn default() -> Self {
		Self::lenient()
	}
}

impl ValueCodec for DateTimeCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		let s = raw.trim();

		if self.strict
			&& let Ok(dt) = DateTime::parse_from_rfc3339(s)
		{
			return Ok(FilterValue::DateTime(dt.naive_utc()));
		}

		for format in &self.formats {
			if let Ok(dt) = NaiveDateTime::parse_from_str(s, format)
				&& has_four_digit_year(dt.year())
			{
				return Ok(FilterValue::DateTime(dt));
			}
		}

		// A bare date means midnight for the lenient codec
		if !self.strict
			&& let Ok(FilterValue::Date(date)) = self.dates.decode(s)
			&& let Some(dt) = date.and_hms_opt(0, 0, 0)
		{
			return Ok(FilterValue::DateTime(dt));
		}

		Err(DecodeError::InvalidDateTime {
			value: raw.to_string(),
		})
	}

	fn name(&self) -> &'static str {
		if self.strict { "iso_datetime" } else { "datetime" }
	}
}

/// Times of day, `HH:MM[:SS[.fff]]`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeCodec;

impl ValueCodec for TimeCodec {
	fn decode(&self, raw: &str) -> Result<FilterValue, DecodeError> {
		let s = raw.trim();
		TIME_INPUT_FORMATS
			.iter()
			.find_map(|format| NaiveTime::parse_from_str(s, format).ok())
			.map(FilterValue::Time)
			.ok_or_else(|| DecodeError::InvalidTime {
				value: raw.to_string(),
			})
	}

	fn name(&self) -> &'static str {
		"time"
	}
}
