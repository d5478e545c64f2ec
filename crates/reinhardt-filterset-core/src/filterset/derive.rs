//! Filters derived from a schema

use crate::choices::ChoiceSet;
use crate::codec::{
	BooleanCodec, DecimalCodec, FloatCodec, IntegerCodec, NullBooleanCodec,
	SharedCodec, TextCodec, TimeCodec, UuidCodec, codec_for_lookup,
};
use crate::error::{ConfigurationError, FilterSetResult};
use crate::filter::{Filter, FilterKind};
use crate::lookup::{label_for_filter, lookups};
use crate::schema::{FieldType, Schema, SchemaField};
use crate::settings::FilterSettings;
use indexmap::IndexMap;
use std::sync::Arc;

/// Which schema fields get derived filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
	/// Every field with the default lookup
	All,
	/// The named fields with the default lookup
	Names(Vec<String>),
	/// The named fields with the listed lookups each
	Lookups(IndexMap<String, Vec<String>>),
}

impl Fields {
	pub fn names<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Names(names.into_iter().map(Into::into).collect())
	}

	pub fn lookups<I, K, L, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, L)>,
		K: Into<String>,
		L: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Lookups(
			entries
				.into_iter()
				.map(|(name, lookups)| (name.into(), lookups.into_iter().map(Into::into).collect()))
				.collect(),
		)
	}
}

/// Name of a derived filter: `field` for the default lookup, `field__lookup` otherwise
pub fn derived_name(field: &str, lookup: &str, default_lookup: &str) -> String {
	if lookup == default_lookup {
		field.to_string()
	} else {
		format!("{field}__{lookup}")
	}
}

pub(crate) fn derive_filters<Q>(
	schema: &Schema,
	fields: &Fields,
	exclude: &[String],
	settings: &FilterSettings,
) -> FilterSetResult<Vec<(String, Filter<Q>)>> {
	let default_lookup = vec![settings.default_lookup_expr.clone()];
	let selected: Vec<(String, Vec<String>)> = match fields {
		Fields::All => schema
			.field_names()
			.map(|name| (name.to_string(), default_lookup.clone()))
			.collect(),
		Fields::Names(names) => names
			.iter()
			.map(|name| (name.clone(), default_lookup.clone()))
			.collect(),
		Fields::Lookups(map) => map
			.iter()
			.map(|(name, lookups)| (name.clone(), lookups.clone()))
			.collect(),
	};

	let mut derived = Vec::new();
	for (field_name, field_lookups) in selected {
		if exclude.contains(&field_name) {
			continue;
		}
		let field = schema
			.get(&field_name)
			.ok_or_else(|| ConfigurationError::UnknownField {
				schema: schema.name.clone(),
				field: field_name.clone(),
			})?;
		for lookup in field_lookups {
			let name = derived_name(&field.name, &lookup, &settings.default_lookup_expr);
			derived.push((name, derive_filter(field, &lookup, settings)));
		}
	}
	Ok(derived)
}

/// Base codec for a field type
pub fn codec_for_type(field_type: FieldType, settings: &FilterSettings) -> SharedCodec {
	match field_type {
		FieldType::Boolean => Arc::new(BooleanCodec),
		FieldType::NullBoolean => Arc::new(NullBooleanCodec),
		FieldType::Integer
		| FieldType::BigInteger
		| FieldType::SmallInteger
		| FieldType::PositiveInteger => Arc::new(IntegerCodec),
		FieldType::Float => Arc::new(FloatCodec),
		FieldType::Decimal => Arc::new(DecimalCodec),
		FieldType::Date => Arc::new(settings.date_codec()),
		FieldType::DateTime => Arc::new(settings.datetime_codec()),
		FieldType::Time => Arc::new(TimeCodec),
		FieldType::Uuid => Arc::new(UuidCodec),
		FieldType::Char
		| FieldType::Text
		| FieldType::Slug
		| FieldType::Email
		| FieldType::Url
		| FieldType::ForeignKey
		| FieldType::OneToOne
		| FieldType::ManyToMany => Arc::new(TextCodec::default()),
	}
}

fn base_filter<Q>(field: &SchemaField, settings: &FilterSettings) -> Filter<Q> {
	let codec = codec_for_type(field.field_type, settings);
	let name = field.name.as_str();

	let mut filter = if let Some(choices) = &field.choices {
		Filter::typed_choice(name, choices.clone(), TextCodec::default())
	} else {
		match field.field_type {
			FieldType::Char
			| FieldType::Text
			| FieldType::Slug
			| FieldType::Email
			| FieldType::Url => Filter::char(name),
			FieldType::Boolean => Filter::boolean(name),
			FieldType::NullBoolean => Filter::null_boolean(name),
			FieldType::Integer
			| FieldType::BigInteger
			| FieldType::SmallInteger
			| FieldType::PositiveInteger
			| FieldType::Float
			| FieldType::Decimal => Filter::number(name),
			FieldType::Date => Filter::date(name),
			FieldType::DateTime => Filter::datetime(name),
			FieldType::Time => Filter::time(name),
			FieldType::Uuid => Filter::uuid(name),
			FieldType::ForeignKey | FieldType::OneToOne => Filter::relation(name),
			FieldType::ManyToMany => Filter::relation_multiple(name),
		}
	};
	filter = filter.shared_codec(codec);

	if field.field_type.is_relation()
		&& let Some(source) = &field.related
	{
		filter.choices = ChoiceSet::Source(Arc::clone(source));
	}
	filter
}

fn derive_filter<Q>(field: &SchemaField, lookup: &str, settings: &FilterSettings) -> Filter<Q> {
	let mut filter = if lookup == lookups::ISNULL {
		Filter::boolean(field.name.as_str())
	} else {
		let base = base_filter(field, settings);
		let codec = codec_for_lookup(lookup, Arc::clone(&base.codec));
		let mut filter = base.shared_codec(codec);
		match lookup {
			lookups::IN => filter.kind = FilterKind::InList,
			lookups::RANGE => filter.kind = FilterKind::RangeCsv,
			_ => {}
		}
		filter
	};
	filter = filter.lookup(lookup);

	if let Some(verbose_name) = &field.verbose_name {
		filter = filter.label(label_for_filter(verbose_name, Some(lookup), false, settings));
	}
	filter
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::query::RecordingQuery;
	use rstest::rstest;

	#[rstest]
	#[case("title", "exact", "exact", "title")]
	#[case("price", "gte", "exact", "price__gte")]
	#[case("author", "isnull", "exact", "author__isnull")]
	#[case("title", "icontains", "icontains", "title")]
	#[case("title", "exact", "icontains", "title__exact")]
	fn test_derived_name(
		#[case] field: &str,
		#[case] lookup: &str,
		#[case] default_lookup: &str,
		#[case] expected: &str,
	) {
		assert_eq!(derived_name(field, lookup, default_lookup), expected);
	}

	#[rstest]
	fn test_unknown_field_is_configuration_error() {
		let schema = Schema::new("book").field(SchemaField::new("title", FieldType::Char));

		let result = derive_filters::<RecordingQuery>(
			&schema,
			&Fields::names(["title", "isbn"]),
			&[],
			&FilterSettings::default(),
		);

		assert_eq!(
			result.unwrap_err(),
			ConfigurationError::UnknownField {
				schema: "book".into(),
				field: "isbn".into()
			}
		);
	}

	#[rstest]
	fn test_choice_field_keeps_typed_codec() {
		let field = SchemaField::new("rating", FieldType::Integer)
			.with_choices([("1", "Poor"), ("5", "Great")]);

		let filter: Filter<RecordingQuery> =
			derive_filter(&field, lookups::EXACT, &FilterSettings::default());

		assert_eq!(filter.kind(), FilterKind::Choice);
		assert_eq!(filter.value_codec().name(), "integer");
	}

	#[rstest]
	fn test_verbose_name_drives_label() {
		let field = SchemaField::new("price", FieldType::Decimal).with_verbose_name("unit price");

		let filter: Filter<RecordingQuery> =
			derive_filter(&field, lookups::LT, &FilterSettings::default());

		assert_eq!(filter.label_text(), Some("Unit price is less than"));
	}
}
