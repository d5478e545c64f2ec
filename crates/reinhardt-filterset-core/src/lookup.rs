//! Lookup vocabulary
//!
//! A lookup names the comparison a filter performs (`exact`, `gte`, `icontains`...).
//! The vocabulary is open: any string is accepted as long as the
//! [`Queryable`](crate::query::Queryable) in use supports it.

use crate::settings::FilterSettings;
use serde::{Deserialize, Serialize};

/// Names of the built-in lookups
pub mod lookups {
	pub const EXACT: &str = "exact";
	pub const IEXACT: &str = "iexact";
	pub const CONTAINS: &str = "contains";
	pub const ICONTAINS: &str = "icontains";
	pub const GT: &str = "gt";
	pub const GTE: &str = "gte";
	pub const LT: &str = "lt";
	pub const LTE: &str = "lte";
	pub const STARTSWITH: &str = "startswith";
	pub const ISTARTSWITH: &str = "istartswith";
	pub const ENDSWITH: &str = "endswith";
	pub const IENDSWITH: &str = "iendswith";
	pub const IN: &str = "in";
	pub const RANGE: &str = "range";
	pub const ISNULL: &str = "isnull";
	pub const OVERLAP: &str = "overlap";

	/// Every built-in lookup, in documentation order
	pub const ALL: &[&str] = &[
		EXACT,
		IEXACT,
		CONTAINS,
		ICONTAINS,
		GT,
		GTE,
		LT,
		LTE,
		STARTSWITH,
		ISTARTSWITH,
		ENDSWITH,
		IENDSWITH,
		IN,
		RANGE,
		ISNULL,
		OVERLAP,
	];
}

/// How a filter picks its lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "lookups", rename_all = "snake_case")]
pub enum LookupSpec {
	/// Always the given lookup
	Fixed(String),
	/// Chosen by the caller through the `<name>_lookup` parameter.
	///
	/// `None` accepts any lookup the queryable supports, a list restricts the choice.
	Choosable(Option<Vec<String>>),
}

impl LookupSpec {
	pub fn fixed(lookup: impl Into<String>) -> Self {
		Self::Fixed(lookup.into())
	}

	pub fn choosable<I, S>(lookups: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Choosable(Some(lookups.into_iter().map(Into::into).collect()))
	}

	pub fn any() -> Self {
		Self::Choosable(None)
	}

	pub fn is_choosable(&self) -> bool {
		matches!(self, Self::Choosable(_))
	}

	/// The lookup used when the caller does not pick one
	pub fn default_lookup(&self) -> Option<&str> {
		match self {
			Self::Fixed(lookup) => Some(lookup),
			Self::Choosable(Some(allowed)) => allowed.first().map(String::as_str),
			Self::Choosable(None) => None,
		}
	}

	/// Whether the caller may pick `lookup`
	pub fn allows(&self, lookup: &str) -> bool {
		match self {
			Self::Fixed(fixed) => fixed == lookup,
			Self::Choosable(Some(allowed)) => allowed.iter().any(|l| l == lookup),
			Self::Choosable(None) => true,
		}
	}

	/// Every lookup that can be selected, `None` when any lookup is allowed
	pub fn candidates(&self) -> Option<Vec<&str>> {
		match self {
			Self::Fixed(lookup) => Some(vec![lookup.as_str()]),
			Self::Choosable(Some(allowed)) => Some(allowed.iter().map(String::as_str).collect()),
			Self::Choosable(None) => None,
		}
	}
}

impl From<&str> for LookupSpec {
	fn from(lookup: &str) -> Self {
		Self::Fixed(lookup.to_string())
	}
}

impl From<String> for LookupSpec {
	fn from(lookup: String) -> Self {
		Self::Fixed(lookup)
	}
}

/// Human phrase for a lookup, empty for the implicit equality lookups
pub fn verbose_lookup<'a>(lookup: &str, settings: &'a FilterSettings) -> Option<&'a str> {
	if let Some(custom) = settings.verbose_lookups.get(lookup) {
		return Some(custom.as_str());
	}
	let phrase = match lookup {
		lookups::EXACT | lookups::IEXACT => "",
		lookups::CONTAINS | lookups::ICONTAINS => "contains",
		lookups::GT => "is greater than",
		lookups::GTE => "is greater than or equal to",
		lookups::LT => "is less than",
		lookups::LTE => "is less than or equal to",
		lookups::STARTSWITH | lookups::ISTARTSWITH => "starts with",
		lookups::ENDSWITH | lookups::IENDSWITH => "ends with",
		lookups::IN => "is in",
		lookups::RANGE => "is in range",
		lookups::ISNULL => "is null",
		lookups::OVERLAP => "overlaps",
		_ => return None,
	};
	Some(phrase)
}

/// Default label for a filter
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::lookup::label_for_filter;
/// use reinhardt_filterset_core::FilterSettings;
///
/// let settings = FilterSettings::default();
/// assert_eq!(label_for_filter("price", Some("gt"), false, &settings), "Price is greater than");
/// assert_eq!(label_for_filter("status", Some("exact"), true, &settings), "Exclude status");
/// ```
pub fn label_for_filter(
	target: &str,
	lookup: Option<&str>,
	negate: bool,
	settings: &FilterSettings,
) -> String {
	let name = target.replace("__", " ").replace(['.', '_'], " ");

	let mut parts: Vec<&str> = Vec::with_capacity(3);
	if negate {
		parts.push("exclude");
	}
	parts.push(name.trim());
	if let Some(lookup) = lookup
		&& let Some(phrase) = verbose_lookup(lookup, settings)
		&& !phrase.is_empty()
	{
		parts.push(phrase);
	}

	capitalize_first(&parts.join(" "))
}

fn capitalize_first(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
