//! Error types
//!
//! Two families of errors exist:
//!
//! - [`FieldError`] (and the [`DecodeError`], [`ChoiceValidationError`] and
//!   [`RangeBoundError`] it wraps) describe bad user input. They are collected per
//!   filter name into [`FieldErrors`] during binding and never escape `bind`.
//! - [`ConfigurationError`] describes a programming mistake in a filterset
//!   declaration and is returned from
//!   [`FilterSetBuilder::build`](crate::filterset::FilterSetBuilder::build).

use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::SerializeMap;
use std::fmt;
use thiserror::Error;

/// A raw parameter value could not be parsed into the expected type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
	#[error("'{value}' is not a valid boolean")]
	InvalidBoolean { value: String },
	#[error("Enter a number: '{value}' is not a valid {kind}")]
	InvalidNumber { value: String, kind: &'static str },
	#[error("Enter a valid date: '{value}'")]
	InvalidDate { value: String },
	#[error("Enter a valid time: '{value}'")]
	InvalidTime { value: String },
	#[error("Enter a valid date/time: '{value}'")]
	InvalidDateTime { value: String },
	#[error("Enter a valid UUID: '{value}'")]
	InvalidUuid { value: String },
	#[error("Expected {expected} comma separated values, got {found}")]
	WrongArity { expected: usize, found: usize },
	#[error("{0}")]
	Custom(String),
}

/// A decoded value is not one of the declared choices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Select a valid choice. {value} is not one of the available choices.")]
pub struct ChoiceValidationError {
	pub value: String,
}

impl ChoiceValidationError {
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
		}
	}
}

/// Which side of a paired range a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
	Lower,
	Upper,
}

impl fmt::Display for Bound {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Bound::Lower => f.write_str("lower"),
			Bound::Upper => f.write_str("upper"),
		}
	}
}

/// One bound of a paired range failed to decode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {bound} bound: {source}")]
pub struct RangeBoundError {
	pub bound: Bound,
	#[source]
	pub source: DecodeError,
}

/// Validation failure of a single filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
	#[error(transparent)]
	Decode(#[from] DecodeError),
	#[error(transparent)]
	Choice(#[from] ChoiceValidationError),
	#[error("{}", join_messages(.0))]
	RangeBounds(Vec<RangeBoundError>),
	#[error("This field is required.")]
	Required,
	#[error("Select a valid lookup. {lookup} is not one of the available lookups.")]
	LookupNotAllowed { lookup: String },
	#[error("Select a valid ordering. {field} is not one of the available fields.")]
	InvalidOrdering { field: String },
}

fn join_messages(errors: &[RangeBoundError]) -> String {
	errors
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

/// Field errors keyed by filter name, in declaration order
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::{FieldError, FieldErrors};
///
/// let mut errors = FieldErrors::new();
/// errors.insert("status", FieldError::Required);
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.get("status"), Some(&FieldError::Required));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
	errors: IndexMap<String, FieldError>,
}

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, error: FieldError) {
		self.errors.insert(name.into(), error);
	}

	pub fn get(&self, name: &str) -> Option<&FieldError> {
		self.errors.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.errors.contains_key(name)
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn len(&self) -> usize {
		self.errors.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
		self.errors.iter().map(|(name, error)| (name.as_str(), error))
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.errors.keys().map(String::as_str)
	}

	pub fn into_inner(self) -> IndexMap<String, FieldError> {
		self.errors
	}
}

/// Serializes as `{"name": "message", ...}` for API error bodies
impl Serialize for FieldErrors {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.errors.len()))?;
		for (name, error) in &self.errors {
			map.serialize_entry(name, &error.to_string())?;
		}
		map.end()
	}
}

/// A filterset declaration is invalid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
	#[error("Filter names must not be empty")]
	EmptyName,
	#[error("Filter '{name}' is declared more than once")]
	DuplicateName { name: String },
	#[error("Filter '{name}' requires a choice source")]
	MissingChoiceSource { name: String },
	#[error("Filter '{name}' requires at least one choice")]
	MissingChoices { name: String },
	#[error("Filter '{name}' refers to method '{method}' which is not registered")]
	UnknownMethod { name: String, method: String },
	#[error("Field '{field}' does not exist on '{schema}'")]
	UnknownField { schema: String, field: String },
	#[error("Filter '{name}' uses lookup '{lookup}' which the queryable does not support")]
	UnsupportedLookup { name: String, lookup: String },
	#[error("Filter '{name}' declares no ordering fields")]
	MissingOrderingFields { name: String },
}

/// Result alias for filterset construction
pub type FilterSetResult<T> = Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_range_bound_messages_are_joined() {
		// Arrange
		let error = FieldError::RangeBounds(vec![
			RangeBoundError {
				bound: Bound::Lower,
				source: DecodeError::InvalidNumber {
					value: "x".into(),
					kind: "decimal",
				},
			},
			RangeBoundError {
				bound: Bound::Upper,
				source: DecodeError::InvalidNumber {
					value: "y".into(),
					kind: "decimal",
				},
			},
		]);

		// Act
		let message = error.to_string();

		// Assert
		assert!(message.starts_with("Invalid lower bound"));
		assert!(message.contains("; Invalid upper bound"));
	}

	#[rstest]
	fn test_field_errors_preserve_insertion_order() {
		let mut errors = FieldErrors::new();
		errors.insert("zeta", FieldError::Required);
		errors.insert("alpha", FieldError::Required);

		let names: Vec<&str> = errors.names().collect();
		assert_eq!(names, vec!["zeta", "alpha"]);
	}

	#[rstest]
	fn test_field_errors_serialize_as_messages() {
		let mut errors = FieldErrors::new();
		errors.insert("status", ChoiceValidationError::new("bogus").into());

		let json = serde_json::to_value(&errors).unwrap();

		assert_eq!(
			json["status"],
			"Select a valid choice. bogus is not one of the available choices."
		);
	}
}
