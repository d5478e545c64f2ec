//! Filterset settings
//!
//! Global defaults shared by every filterset built with the same settings. Loaded from
//! TOML or built in code:
//!
//! ```toml
//! default_lookup_expr = "exact"
//! null_choice_label = "(none)"
//! ordering_param = "ordering"
//! locale = "en_GB"
//!
//! [verbose_lookups]
//! gt = "is above"
//! ```

use crate::codec::{DateCodec, DateTimeCodec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading [`FilterSettings`]
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("IO error reading {path}: {source}")]
	IoError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse filter settings: {message}")]
	ParseError { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
	/// Lookup used by filters declared without one
	pub default_lookup_expr: String,

	/// Label of the blank option offered by single choice filters
	pub empty_choice_label: String,

	/// Label of the null option; `None` disables it for filters that do not opt in
	pub null_choice_label: Option<String>,

	/// Raw value selecting the null option
	pub null_choice_value: String,

	/// Suppress generated help text
	pub disable_help_text: bool,

	/// Overrides for the phrases used in generated labels, keyed by lookup
	pub verbose_lookups: IndexMap<String, String>,

	/// Query parameter read by ordering filters declared without an explicit name
	pub ordering_param: String,

	/// Extra date formats tried before the built-in ones
	pub date_input_formats: Vec<String>,

	/// Locale selecting the primary date format, e.g. `en_US` or `de_DE`
	pub locale: Option<String>,
}

impl Default for FilterSettings {
	fn default() -> Self {
		Self {
			default_lookup_expr: "exact".to_string(),
			empty_choice_label: "---------".to_string(),
			null_choice_label: None,
			null_choice_value: "null".to_string(),
			disable_help_text: false,
			verbose_lookups: IndexMap::new(),
			ordering_param: "o".to_string(),
			date_input_formats: Vec::new(),
			locale: None,
		}
	}
}

impl FilterSettings {
	/// Load settings from a TOML file.
	///
	/// # Errors
	///
	/// Returns error if the file cannot be read or parsed.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let content =
			std::fs::read_to_string(path.as_ref()).map_err(|e| SettingsError::IoError {
				path: path.as_ref().to_path_buf(),
				source: e,
			})?;

		Self::from_toml_str(&content)
	}

	/// Parse settings from a TOML string. Missing keys keep their defaults.
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		toml::from_str(content).map_err(|e| SettingsError::ParseError {
			message: e.to_string(),
		})
	}

	pub fn with_default_lookup(mut self, lookup: impl Into<String>) -> Self {
		self.default_lookup_expr = lookup.into();
		self
	}

	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());
		self
	}

	pub fn with_ordering_param(mut self, param: impl Into<String>) -> Self {
		self.ordering_param = param.into();
		self
	}

	/// Lenient date codec honouring `locale` and `date_input_formats`
	pub fn date_codec(&self) -> DateCodec {
		let mut codec = DateCodec::lenient();
		if let Some(locale) = &self.locale {
			codec = codec.with_locale(locale);
		}
		if !self.date_input_formats.is_empty() {
			codec = codec.with_formats(self.date_input_formats.iter().cloned());
		}
		codec
	}

	/// Lenient datetime codec honouring `locale`; `date_input_formats` apply to bare dates
	pub fn datetime_codec(&self) -> DateTimeCodec {
		let mut codec = DateTimeCodec::lenient();
		if let Some(locale) = &self.locale {
			codec = codec.with_locale(locale);
		}
		if !self.date_input_formats.is_empty() {
			codec = codec.with_date_formats(self.date_input_formats.iter().cloned());
		}
		codec
	}
}
