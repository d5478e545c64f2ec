//! Auto-derivation tests
//!
//! The schema field type to filter kind table is part of the public contract, so every
//! row is pinned here.

use reinhardt_filterset_core::lookups;
use reinhardt_filterset_core::{
	Cardinality, Choices, ConfigurationError, FieldType, Fields, FilterKind, FilterSet,
	FilterSettings, LookupSpec, Predicate, QueryParams, RecordingQuery, Schema, SchemaField,
};
use rstest::*;

#[fixture]
fn book_schema() -> Schema {
	Schema::new("book")
		.field(SchemaField::new("title", FieldType::Char))
		.field(SchemaField::new("price", FieldType::Decimal))
		.field(SchemaField::new("published", FieldType::Date))
		.field(SchemaField::new("in_print", FieldType::Boolean))
		.field(
			SchemaField::new("author", FieldType::ForeignKey)
				.with_related(Choices::from_keys(["1", "2"])),
		)
}

/// Every field type maps to its documented filter
///
/// **Test Category**: Decision table
#[rstest]
#[case(FieldType::Char, FilterKind::Char, "text")]
#[case(FieldType::Text, FilterKind::Char, "text")]
#[case(FieldType::Slug, FilterKind::Char, "text")]
#[case(FieldType::Email, FilterKind::Char, "text")]
#[case(FieldType::Url, FilterKind::Char, "text")]
#[case(FieldType::Boolean, FilterKind::Boolean, "boolean")]
#[case(FieldType::NullBoolean, FilterKind::NullBoolean, "null_boolean")]
#[case(FieldType::Integer, FilterKind::Number, "integer")]
#[case(FieldType::BigInteger, FilterKind::Number, "integer")]
#[case(FieldType::SmallInteger, FilterKind::Number, "integer")]
#[case(FieldType::PositiveInteger, FilterKind::Number, "integer")]
#[case(FieldType::Float, FilterKind::Number, "float")]
#[case(FieldType::Decimal, FilterKind::Number, "decimal")]
#[case(FieldType::Date, FilterKind::Date, "date")]
#[case(FieldType::DateTime, FilterKind::DateTime, "datetime")]
#[case(FieldType::Time, FilterKind::Time, "time")]
#[case(FieldType::Uuid, FilterKind::Uuid, "uuid")]
#[case(FieldType::ForeignKey, FilterKind::Relation, "text")]
#[case(FieldType::OneToOne, FilterKind::Relation, "text")]
#[case(FieldType::ManyToMany, FilterKind::RelationMultiple, "text")]
fn test_derivation_table(
	#[case] field_type: FieldType,
	#[case] kind: FilterKind,
	#[case] codec: &str,
) {
	// Arrange
	let schema = Schema::new("t").field(
		SchemaField::new("f", field_type).with_related(Choices::from_keys(["1"])),
	);

	// Act
	let filterset = FilterSet::<RecordingQuery>::from_schema(schema).unwrap();

	// Assert
	let filter = filterset.get("f").unwrap();
	assert_eq!(filter.kind(), kind);
	assert_eq!(filter.value_codec().name(), codec);
	assert_eq!(filter.lookup_spec(), Some(&LookupSpec::fixed("exact")));
}

/// Enumerated fields derive choice filters regardless of storage type
///
/// **Test Category**: Equivalence partitioning
#[rstest]
fn test_enumerated_field_derives_choice() {
	let schema = Schema::new("book").field(
		SchemaField::new("status", FieldType::Char).with_choices([("d", "Draft"), ("p", "Published")]),
	);

	let filterset = FilterSet::<RecordingQuery>::from_schema(schema).unwrap();

	let filter = filterset.get("status").unwrap();
	assert_eq!(filter.kind(), FilterKind::Choice);
	let bound = filterset.bind(QueryParams::from(vec![("status", "x")]), RecordingQuery::new());
	assert!(bound.errors().contains("status"));
}

/// Lookup lists produce `field__lookup` names with lookup-specific codecs
///
/// **Test Category**: Happy path
#[rstest]
fn test_lookup_map_names_and_codecs(book_schema: Schema) {
	// Arrange
	let fields = Fields::lookups([
		("price", vec!["exact", "gte", "lte", "in", "range"]),
		("author", vec!["isnull"]),
	]);

	// Act
	let filterset = FilterSet::<RecordingQuery>::builder()
		.schema(book_schema, fields)
		.build()
		.unwrap();

	// Assert
	let names: Vec<&str> = filterset.names().collect();
	assert_eq!(
		names,
		vec![
			"price",
			"price__gte",
			"price__lte",
			"price__in",
			"price__range",
			"author__isnull"
		]
	);
	assert_eq!(filterset.get("price__in").unwrap().kind(), FilterKind::InList);
	assert_eq!(filterset.get("price__range").unwrap().value_codec().name(), "csv_pair");
	assert_eq!(
		filterset.get("author__isnull").unwrap().kind(),
		FilterKind::Boolean
	);
}

/// Derived lookups decode like hand written ones
///
/// **Test Category**: Use case
#[rstest]
fn test_derived_filters_resolve(book_schema: Schema) {
	let filterset = FilterSet::<RecordingQuery>::builder()
		.schema(
			book_schema,
			Fields::lookups([("title", vec!["icontains"]), ("author", vec!["isnull"])]),
		)
		.build()
		.unwrap();

	let bound = filterset.bind(
		QueryParams::from(vec![("title__icontains", "rust"), ("author__isnull", "yes")]),
		RecordingQuery::new(),
	);

	assert_eq!(
		bound.queryable().filters(),
		vec![
			&Predicate::compare("title", lookups::ICONTAINS, "rust"),
			&Predicate::compare("author", lookups::ISNULL, true),
		]
	);
}

/// Declared filters replace derived ones in place
///
/// **Test Category**: State transition
#[rstest]
fn test_declared_filter_overrides_derived(book_schema: Schema) {
	// Arrange
	let builder = FilterSet::<RecordingQuery>::builder()
		.schema(book_schema, Fields::All)
		.filter(
			"price",
			reinhardt_filterset_core::Filter::numeric_range("price"),
		)
		.filter("q", reinhardt_filterset_core::Filter::char("title").lookup("icontains"));

	// Act
	let filterset = builder.build().unwrap();

	// Assert
	let names: Vec<&str> = filterset.names().collect();
	assert_eq!(
		names,
		vec!["title", "price", "published", "in_print", "author", "q"]
	);
	assert_eq!(
		filterset.get("price").unwrap().cardinality(),
		Cardinality::PairedRange
	);
}

/// Excluded fields are skipped
///
/// **Test Category**: Happy path
#[rstest]
fn test_exclude_fields(book_schema: Schema) {
	let filterset = FilterSet::<RecordingQuery>::builder()
		.schema(book_schema, Fields::All)
		.exclude_fields(["published", "author"])
		.build()
		.unwrap();

	assert_eq!(
		filterset.names().collect::<Vec<_>>(),
		vec!["title", "price", "in_print"]
	);
}

/// The settings' default lookup applies to derived filters
///
/// **Test Category**: Happy path
#[rstest]
fn test_default_lookup_from_settings(book_schema: Schema) {
	let filterset = FilterSet::<RecordingQuery>::builder()
		.settings(FilterSettings::default().with_default_lookup("icontains"))
		.schema(book_schema.clone(), Fields::names(["title"]))
		.build()
		.unwrap();
	let all = FilterSet::<RecordingQuery>::builder()
		.settings(FilterSettings::default().with_default_lookup("icontains"))
		.schema(book_schema, Fields::All)
		.exclude_fields(["author"])
		.build()
		.unwrap();

	assert_eq!(filterset.names().collect::<Vec<_>>(), vec!["title"]);
	assert_eq!(
		filterset.get("title").map(|f| f.default_lookup()),
		Some("icontains")
	);
	assert!(all.names().all(|name| !name.contains("__")));
	assert_eq!(all.get("title").map(|f| f.default_lookup()), Some("icontains"));
}

/// Unknown fields and relations without rows are configuration errors
///
/// **Test Category**: Error path
#[rstest]
fn test_configuration_errors() {
	let schema = Schema::new("book").field(SchemaField::new("author", FieldType::ForeignKey));

	let missing_source = FilterSet::<RecordingQuery>::from_schema(schema.clone());
	let unknown_field = FilterSet::<RecordingQuery>::builder()
		.schema(schema, Fields::names(["editor"]))
		.build();

	assert_eq!(
		missing_source.unwrap_err(),
		ConfigurationError::MissingChoiceSource {
			name: "author".into()
		}
	);
	assert_eq!(
		unknown_field.unwrap_err(),
		ConfigurationError::UnknownField {
			schema: "book".into(),
			field: "editor".into()
		}
	);
}
