//! One filterset declaration driving every queryable through the facade

use chrono::NaiveDate;
use reinhardt_filterset::prelude::*;
use reinhardt_filterset::sql::DatabaseDialect;
use rstest::*;
use serde_json::{Value, json};

const SETTINGS: &str = r#"
ordering_param = "sort"
null_choice_label = "Unknown"

[verbose_lookups]
icontains = "mentions"
"#;

fn catalog<Q: Queryable>() -> FilterSet<Q> {
	let settings = FilterSettings::from_toml_str(SETTINGS).unwrap();
	FilterSet::builder()
		.settings(settings)
		.filter("q", Filter::char("title").lookup("icontains"))
		.filter(
			"status",
			Filter::choice("status", [("d", "Draft"), ("p", "Published")]),
		)
		.filter(
			"published",
			Filter::date_range_preset("published")
				.clock(|| NaiveDate::from_ymd_opt(2022, 6, 15).unwrap()),
		)
		.filter("price", Filter::numeric_range("price"))
		.filter("exclude_status", Filter::char("status").negate(true))
		.ordering(Filter::ordering([("price", "price"), ("title", "title")]))
		.build()
		.unwrap()
}

#[fixture]
fn rows() -> MemoryQuery {
	MemoryQuery::new(vec![
		json!({"id": 1, "title": "Rust in Action", "status": "p", "price": 40, "published": "2021-08-10"}),
		json!({"id": 2, "title": "Programming Rust", "status": "p", "price": 55, "published": "2022-03-01"}),
		json!({"id": 3, "title": "Zero To Production", "status": null, "price": 35, "published": "2022-02-01"}),
		json!({"id": 4, "title": "Learning Go", "status": "d", "price": 30, "published": "2015-10-26"}),
	])
}

fn ids(query: &MemoryQuery) -> Vec<i64> {
	query.pluck("id").iter().filter_map(Value::as_i64).collect()
}

/// Settings loaded from TOML shape the declared filters
///
/// **Test Category**: Happy path
#[rstest]
fn test_settings_shape_metadata() {
	let filterset = catalog::<RecordingQuery>();

	let meta = filterset.metadata();

	assert_eq!(meta[0].label, "Title mentions");
	assert_eq!(
		meta[1].null_choice.as_ref().map(|c| c.label.as_str()),
		Some("Unknown")
	);
	assert_eq!(meta.last().map(|m| m.name.as_str()), Some("sort"));
}

/// The same parameters narrow rows and render SQL consistently
///
/// **Test Category**: Use case
#[rstest]
#[case("q=rust&sort=-price", vec![2, 1], &[r#"LOWER("title") LIKE"#, r#"ORDER BY "price" DESC"#])]
#[case("published=year&sort=title", vec![2, 3], &[r#""published" >= '2022-01-01'"#, r#""published" < '2023-01-01'"#])]
#[case("status=null", vec![3], &[r#""status" IS NULL"#])]
#[case("status=p&price_min=50", vec![2], &[r#""status" = 'p'"#, r#""price" >= 50"#])]
#[case("exclude_status=d&sort=title", vec![2, 1, 3], &[r#"NOT ("status" = 'd' AND "status" IS NOT NULL)"#])]
fn test_memory_and_sql_agree(
	rows: MemoryQuery,
	#[case] query: &str,
	#[case] expected_ids: Vec<i64>,
	#[case] fragments: &[&str],
) {
	// Arrange
	let params = QueryParams::from_query_string(query).unwrap();

	// Act
	let memory = catalog::<MemoryQuery>().bind(params.clone(), rows);
	let sql = catalog::<SqlQuery>().bind(params, SqlQuery::new("book"));

	// Assert
	assert!(memory.is_valid(), "{:?}", memory.errors());
	assert!(sql.is_valid(), "{:?}", sql.errors());
	assert_eq!(ids(memory.queryable()), expected_ids);
	let rendered = sql.queryable().to_sql(DatabaseDialect::PostgreSQL);
	for fragment in fragments {
		assert!(rendered.contains(fragment), "{fragment} not in {rendered}");
	}
}

/// Errors are identical regardless of the queryable
///
/// **Test Category**: Error path
#[rstest]
fn test_errors_do_not_depend_on_queryable(rows: MemoryQuery) {
	let params = QueryParams::from_query_string("status=x&published=decade&sort=isbn").unwrap();

	let memory = catalog::<MemoryQuery>().bind(params.clone(), rows);
	let sql = catalog::<SqlQuery>().bind(params.clone(), SqlQuery::new("book"));
	let recording = catalog::<RecordingQuery>().bind(params, RecordingQuery::new());

	assert_eq!(memory.errors(), sql.errors());
	assert_eq!(memory.errors(), recording.errors());
	assert_eq!(
		memory.errors().names().collect::<Vec<_>>(),
		vec!["status", "published", "sort"]
	);
	assert!(recording.queryable().is_untouched());
}
