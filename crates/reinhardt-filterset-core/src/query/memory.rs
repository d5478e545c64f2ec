//! In-memory queryable over JSON rows
//!
//! Rows are `serde_json` objects. Paths descend through nested objects; when a segment
//! hits an array, every element is visited and a comparison matches if any element does.
//! Unknown lookups and type mismatches evaluate to `false` instead of failing.

use super::{Comparison, OrderBy, Predicate, Queryable, path_segments};
use crate::lookup::lookups;
use crate::value::FilterValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use std::cmp::Ordering;
use uuid::Uuid;

/// A list of JSON rows narrowed eagerly by each call
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::query::{MemoryQuery, Predicate, Queryable};
/// use serde_json::json;
///
/// let q = MemoryQuery::new(vec![
///     json!({"title": "Rust", "price": 30}),
///     json!({"title": "Go", "price": 10}),
/// ])
/// .filter(Predicate::compare("price", "gte", 20_i64));
///
/// assert_eq!(q.pluck("title"), vec![json!("Rust")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryQuery {
	rows: Vec<Value>,
}

impl MemoryQuery {
	pub fn new(rows: Vec<Value>) -> Self {
		Self { rows }
	}

	pub fn rows(&self) -> &[Value] {
		&self.rows
	}

	pub fn into_rows(self) -> Vec<Value> {
		self.rows
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Values at `path` for every row, `null` where missing
	pub fn pluck(&self, path: &str) -> Vec<Value> {
		let segments = path_segments(path);
		self.rows
			.iter()
			.map(|row| {
				resolve(row, &segments)
					.into_iter()
					.next()
					.cloned()
					.unwrap_or(Value::Null)
			})
			.collect()
	}
}

impl Queryable for MemoryQuery {
	fn filter(mut self, predicate: Predicate) -> Self {
		self.rows.retain(|row| eval(row, &predicate));
		self
	}

	fn exclude(mut self, predicate: Predicate) -> Self {
		self.rows.retain(|row| !eval(row, &predicate));
		self
	}

	fn distinct(self) -> Self {
		let mut unique: Vec<Value> = Vec::with_capacity(self.rows.len());
		for row in self.rows {
			if !unique.contains(&row) {
				unique.push(row);
			}
		}
		Self { rows: unique }
	}

	fn order_by(mut self, ordering: &[OrderBy]) -> Self {
		if ordering.is_empty() {
			return self;
		}
		let keys: Vec<(Vec<&str>, bool)> = ordering
			.iter()
			.map(|term| (path_segments(&term.path), term.descending))
			.collect();
		self.rows.sort_by(|a, b| {
			for (segments, descending) in &keys {
				let left = resolve(a, segments).into_iter().next();
				let right = resolve(b, segments).into_iter().next();
				let ord = json_cmp(left.unwrap_or(&Value::Null), right.unwrap_or(&Value::Null));
				let ord = if *descending { ord.reverse() } else { ord };
				if ord != Ordering::Equal {
					return ord;
				}
			}
			Ordering::Equal
		});
		self
	}

	fn supports_lookup(lookup: &str) -> bool {
		lookups::ALL.contains(&lookup)
	}
}

/// Evaluate a predicate against one row
pub fn eval(row: &Value, predicate: &Predicate) -> bool {
	match predicate {
		Predicate::Comparison(cmp) => eval_comparison(row, cmp),
		Predicate::And(children) => children.iter().all(|child| eval(row, child)),
		Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
		Predicate::Not(inner) => !eval(row, inner),
	}
}

fn resolve<'a>(row: &'a Value, segments: &[&str]) -> Vec<&'a Value> {
	let mut current = vec![row];
	for segment in segments {
		let mut next = Vec::new();
		for value in current {
			match value {
				Value::Object(map) => next.extend(map.get(*segment)),
				Value::Array(items) => {
					next.extend(items.iter().filter_map(|item| item.get(*segment)));
				}
				_ => {}
			}
		}
		current = next;
	}
	current
}

fn eval_comparison(row: &Value, cmp: &Comparison) -> bool {
	let actual = resolve(row, &path_segments(&cmp.path));

	if cmp.lookup == lookups::ISNULL {
		let is_null = actual.iter().all(|v| v.is_null());
		return match &cmp.value {
			FilterValue::Bool(expected) => is_null == *expected,
			_ => false,
		};
	}

	if cmp.lookup == lookups::OVERLAP {
		return actual.iter().any(|v| overlaps(v, &cmp.value));
	}

	actual.iter().any(|value| match value {
		Value::Array(items) => items.iter().any(|item| matches(item, &cmp.lookup, &cmp.value)),
		other => matches(other, &cmp.lookup, &cmp.value),
	})
}

fn matches(actual: &Value, lookup: &str, expected: &FilterValue) -> bool {
	match lookup {
		lookups::EXACT => compare(actual, expected).is_some_and(Ordering::is_eq),
		lookups::IEXACT => text_op(actual, expected, |a, b| a == b, true),
		lookups::CONTAINS => text_op(actual, expected, |a, b| a.contains(b), false),
		lookups::ICONTAINS => text_op(actual, expected, |a, b| a.contains(b), true),
		lookups::STARTSWITH => text_op(actual, expected, |a, b| a.starts_with(b), false),
		lookups::ISTARTSWITH => text_op(actual, expected, |a, b| a.starts_with(b), true),
		lookups::ENDSWITH => text_op(actual, expected, |a, b| a.ends_with(b), false),
		lookups::IENDSWITH => text_op(actual, expected, |a, b| a.ends_with(b), true),
		lookups::GT => compare(actual, expected).is_some_and(Ordering::is_gt),
		lookups::GTE => compare(actual, expected).is_some_and(Ordering::is_ge),
		lookups::LT => compare(actual, expected).is_some_and(Ordering::is_lt),
		lookups::LTE => compare(actual, expected).is_some_and(Ordering::is_le),
		lookups::IN => match expected {
			FilterValue::List(items) => items
				.iter()
				.any(|item| compare(actual, item).is_some_and(Ordering::is_eq)),
			other => compare(actual, other).is_some_and(Ordering::is_eq),
		},
		lookups::RANGE => match expected {
			FilterValue::Range(lower, upper) => {
				let above = lower.is_null() || compare(actual, lower).is_some_and(Ordering::is_ge);
				let below = upper.is_null() || compare(actual, upper).is_some_and(Ordering::is_le);
				above && below
			}
			_ => false,
		},
		_ => false,
	}
}

fn overlaps(actual: &Value, expected: &FilterValue) -> bool {
	let (Value::Array(items), FilterValue::List(wanted)) = (actual, expected) else {
		return false;
	};
	items.iter().any(|item| {
		wanted
			.iter()
			.any(|w| compare(item, w).is_some_and(Ordering::is_eq))
	})
}

fn text_of(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

fn text_op(
	actual: &Value,
	expected: &FilterValue,
	op: impl Fn(&str, &str) -> bool,
	case_insensitive: bool,
) -> bool {
	let Some(actual) = text_of(actual) else {
		return false;
	};
	let expected = expected.to_string();
	if case_insensitive {
		op(&actual.to_lowercase(), &expected.to_lowercase())
	} else {
		op(&actual, &expected)
	}
}

fn as_f64(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
	DateTime::parse_from_rfc3339(s)
		.map(|dt| dt.naive_utc())
		.ok()
		.or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok())
		.or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok())
}

/// Order of a JSON value relative to a typed filter value, `None` when incomparable
fn compare(actual: &Value, expected: &FilterValue) -> Option<Ordering> {
	match expected {
		FilterValue::Null => actual.is_null().then_some(Ordering::Equal),
		FilterValue::Bool(b) => actual.as_bool().map(|a| a.cmp(b)),
		FilterValue::Int(i) => as_f64(actual)?.partial_cmp(&(*i as f64)),
		FilterValue::Float(f) => as_f64(actual)?.partial_cmp(f),
		FilterValue::Decimal(d) => as_f64(actual)?.partial_cmp(&d.to_f64()?),
		FilterValue::String(s) => text_of(actual).map(|a| a.as_str().cmp(s.as_str())),
		FilterValue::Date(d) => {
			let s = actual.as_str()?;
			let date = NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()?;
			Some(date.cmp(d))
		}
		FilterValue::DateTime(dt) => Some(parse_datetime(actual.as_str()?)?.cmp(dt)),
		FilterValue::Time(t) => {
			let time = NaiveTime::parse_from_str(actual.as_str()?, "%H:%M:%S%.f").ok()?;
			Some(time.cmp(t))
		}
		FilterValue::Uuid(u) => {
			let parsed = Uuid::parse_str(actual.as_str()?).ok()?;
			Some(parsed.cmp(u))
		}
		FilterValue::List(_) | FilterValue::Range(_, _) => None,
	}
}

fn type_rank(value: &Value) -> u8 {
	match value {
		Value::Null => 0,
		Value::Bool(_) => 1,
		Value::Number(_) => 2,
		Value::String(_) => 3,
		Value::Array(_) => 4,
		Value::Object(_) => 5,
	}
}

fn json_cmp(a: &Value, b: &Value) -> Ordering {
	match (a, b) {
		(Value::Number(x), Value::Number(y)) => x
			.as_f64()
			.zip(y.as_f64())
			.and_then(|(x, y)| x.partial_cmp(&y))
			.unwrap_or(Ordering::Equal),
		(Value::String(x), Value::String(y)) => x.cmp(y),
		(Value::Bool(x), Value::Bool(y)) => x.cmp(y),
		_ => type_rank(a).cmp(&type_rank(b)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn books() -> MemoryQuery {
		MemoryQuery::new(vec![
			json!({"id": 1, "title": "Rust in Action", "price": 40, "published": "2021-08-10",
				"author": {"name": "Tim"}, "tags": ["systems", "rust"], "editor": null}),
			json!({"id": 2, "title": "Programming Rust", "price": 55, "published": "2017-12-01",
				"author": {"name": "Jim"}, "tags": ["rust"], "editor": "Ann"}),
			json!({"id": 3, "title": "The Go Programming Language", "price": 30, "published": "2015-10-26",
				"author": {"name": "Alan"}, "tags": ["go"], "editor": null}),
		])
	}

	fn ids(q: &MemoryQuery) -> Vec<i64> {
		q.pluck("id").iter().filter_map(Value::as_i64).collect()
	}

	#[rstest]
	#[case(Predicate::compare("price", "gt", 40_i64), vec![2])]
	#[case(Predicate::compare("price", "gte", 40_i64), vec![1, 2])]
	#[case(Predicate::compare("price", "lte", 30_i64), vec![3])]
	#[case(Predicate::compare("title", "icontains", "rust"), vec![1, 2])]
	#[case(Predicate::compare("title", "startswith", "The"), vec![3])]
	#[case(Predicate::compare("title", "iendswith", "ACTION"), vec![1])]
	#[case(Predicate::compare("author__name", "exact", "Jim"), vec![2])]
	#[case(Predicate::compare("author.name", "iexact", "alan"), vec![3])]
	#[case(Predicate::compare("editor", "isnull", true), vec![1, 3])]
	#[case(Predicate::compare("tags", "exact", "go"), vec![3])]
	#[case(Predicate::compare("tags", "overlap", vec!["go", "systems"]), vec![1, 3])]
	#[case(Predicate::compare("id", "in", vec![1_i64, 3]), vec![1, 3])]
	#[case(Predicate::compare("price", "range", FilterValue::range(30_i64, 40_i64)), vec![1, 3])]
	#[case(Predicate::compare("price", "unknown_lookup", 1_i64), vec![])]
	fn test_lookups(books: MemoryQuery, #[case] predicate: Predicate, #[case] expected: Vec<i64>) {
		let q = books.filter(predicate);

		assert_eq!(ids(&q), expected);
	}

	#[rstest]
	fn test_date_comparisons(books: MemoryQuery) {
		let after = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();

		let q = books.filter(Predicate::compare("published", "gte", after));

		assert_eq!(ids(&q), vec![1, 2]);
	}

	#[rstest]
	fn test_range_with_open_bound(books: MemoryQuery) {
		let q = books.filter(Predicate::compare(
			"price",
			"range",
			FilterValue::Range(Box::new(FilterValue::Int(50)), Box::new(FilterValue::Null)),
		));

		assert_eq!(ids(&q), vec![2]);
	}

	#[rstest]
	fn test_exclude_and_or(books: MemoryQuery) {
		let q = books.exclude(Predicate::or(vec![
			Predicate::compare("id", "exact", 1_i64),
			Predicate::compare("id", "exact", 2_i64),
		]));

		assert_eq!(ids(&q), vec![3]);
	}

	#[rstest]
	fn test_order_by_multiple_keys() {
		let q = MemoryQuery::new(vec![
			json!({"id": 1, "group": "b", "rank": 2}),
			json!({"id": 2, "group": "a", "rank": 1}),
			json!({"id": 3, "group": "b", "rank": 5}),
		]);

		let q = q.order_by(&[OrderBy::asc("group"), OrderBy::desc("rank")]);

		assert_eq!(ids(&q), vec![2, 3, 1]);
	}

	#[rstest]
	fn test_distinct_keeps_first_occurrence() {
		let q = MemoryQuery::new(vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 1})]);

		assert_eq!(ids(&q.distinct()), vec![1, 2]);
	}

	#[rstest]
	fn test_supports_builtin_lookups_only() {
		assert!(MemoryQuery::supports_lookup("overlap"));
		assert!(!MemoryQuery::supports_lookup("regex"));
	}
}
