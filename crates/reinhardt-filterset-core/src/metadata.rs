//! Filter metadata for building search forms and API docs

use crate::choices::{Choice, Choices};
use crate::filter::{Cardinality, Filter, FilterKind};
use crate::filterset::FilterSet;
use crate::lookup::{LookupSpec, label_for_filter};
use serde::Serialize;

/// Serializable description of one filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterMeta {
	pub name: String,
	pub kind: FilterKind,
	pub cardinality: Cardinality,
	pub target: String,
	pub lookup: Option<LookupSpec>,
	/// Parameter keys read by this filter, in the order a form would show them
	pub param_keys: Vec<String>,
	/// Current choices; sources are queried when metadata is produced
	pub choices: Option<Choices>,
	pub empty_choice: Option<Choice>,
	pub null_choice: Option<Choice>,
	pub label: String,
	pub help_text: Option<String>,
	pub codec: String,
	pub required: bool,
	pub negate: bool,
	pub conjoined: bool,
}

impl<Q> FilterSet<Q> {
	/// Metadata for every filter in declaration order
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_filterset_core::{Filter, FilterSet};
	/// use reinhardt_filterset_core::query::RecordingQuery;
	///
	/// let filterset = FilterSet::<RecordingQuery>::builder()
	///     .filter("price", Filter::numeric_range("price"))
	///     .build()
	///     .unwrap();
	///
	/// let meta = filterset.metadata();
	/// assert_eq!(meta[0].param_keys, ["price_min", "price_max"]);
	/// assert_eq!(meta[0].label, "Price");
	/// ```
	pub fn metadata(&self) -> Vec<FilterMeta> {
		self.filters
			.iter()
			.map(|(name, filter)| self.filter_meta(name, filter))
			.collect()
	}

	fn filter_meta(&self, name: &str, filter: &Filter<Q>) -> FilterMeta {
		let settings = self.settings();
		let label = filter.label_text().map(String::from).unwrap_or_else(|| {
			let target = if filter.target().is_empty() {
				name
			} else {
				filter.target()
			};
			let lookup = match filter.lookup_spec() {
				Some(LookupSpec::Fixed(lookup)) => Some(lookup.as_str()),
				_ => None,
			};
			label_for_filter(target, lookup, filter.is_negated(), settings)
		});

		let single_choice = filter.kind().is_choice() && filter.cardinality() == Cardinality::Single;

		FilterMeta {
			name: name.to_string(),
			kind: filter.kind(),
			cardinality: filter.cardinality(),
			target: filter.target().to_string(),
			lookup: filter.lookup_spec().cloned(),
			param_keys: filter.param_keys(name),
			choices: filter.choice_set().resolve(),
			empty_choice: single_choice
				.then(|| Choice::new("", settings.empty_choice_label.clone())),
			null_choice: filter
				.null_choice()
				.map(|label| Choice::new(settings.null_choice_value.clone(), label)),
			label,
			help_text: filter.help().map(String::from),
			codec: filter.value_codec().name().to_string(),
			required: filter.is_required(),
			negate: filter.is_negated(),
			conjoined: filter.is_conjoined(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::choices::Choices;
	use crate::codec::IntegerCodec;
	use crate::query::RecordingQuery;
	use crate::settings::FilterSettings;
	use rstest::rstest;

	#[rstest]
	fn test_choice_metadata() {
		// Arrange
		let filterset = FilterSet::<RecordingQuery>::builder()
			.settings(FilterSettings {
				null_choice_label: Some("(none)".into()),
				..Default::default()
			})
			.filter(
				"status",
				Filter::choice("status", [("d", "Draft"), ("p", "Published")]).negate(true),
			)
			.build()
			.unwrap();

		// Act
		let meta = &filterset.metadata()[0];

		// Assert
		assert_eq!(meta.label, "Exclude status");
		assert_eq!(meta.choices.as_ref().map(Choices::len), Some(2));
		assert_eq!(meta.empty_choice, Some(Choice::new("", "---------")));
		assert_eq!(meta.null_choice, Some(Choice::new("null", "(none)")));
		assert!(meta.negate);
	}

	#[rstest]
	fn test_lookup_choice_metadata_lists_lookup_key() {
		let filterset = FilterSet::<RecordingQuery>::builder()
			.filter(
				"price",
				Filter::lookup_choice("price", IntegerCodec, ["gt", "lt"]),
			)
			.build()
			.unwrap();

		let meta = &filterset.metadata()[0];

		assert_eq!(meta.param_keys, vec!["price", "price_lookup"]);
		assert_eq!(meta.lookup, Some(LookupSpec::choosable(["gt", "lt"])));
		assert_eq!(meta.label, "Price");
	}

	#[rstest]
	fn test_metadata_serializes() {
		let filterset = FilterSet::<RecordingQuery>::builder()
			.filter("ids", Filter::in_list("id", IntegerCodec))
			.build()
			.unwrap();

		let json = serde_json::to_value(filterset.metadata()).unwrap();

		assert_eq!(json[0]["kind"], "in_list");
		assert_eq!(json[0]["label"], "Id is in");
		assert_eq!(
			json[0]["help_text"],
			"Multiple values may be separated by commas."
		);
	}
}
