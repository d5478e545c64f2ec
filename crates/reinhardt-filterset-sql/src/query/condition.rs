//! Predicate to `sea-query` condition conversion

use reinhardt_filterset_core::FilterValue;
use reinhardt_filterset_core::lookups;
use reinhardt_filterset_core::query::{Comparison, Predicate, path_segments};
use sea_query::{Alias, Condition, Expr, ExprTrait, Func, LikeExpr, Value};

/// Lookups with a portable SQL rendering
const SUPPORTED: &[&str] = &[
	lookups::EXACT,
	lookups::IEXACT,
	lookups::CONTAINS,
	lookups::ICONTAINS,
	lookups::STARTSWITH,
	lookups::ISTARTSWITH,
	lookups::ENDSWITH,
	lookups::IENDSWITH,
	lookups::GT,
	lookups::GTE,
	lookups::LT,
	lookups::LTE,
	lookups::IN,
	lookups::RANGE,
	lookups::ISNULL,
];

pub(crate) fn is_supported(lookup: &str) -> bool {
	SUPPORTED.contains(&lookup)
}

/// Convert a predicate tree into a `WHERE` condition
///
/// `And` maps to [`Condition::all`], `Or` to [`Condition::any`] and `Not` negates the
/// converted operand. A negated comparison keeps rows whose column is `NULL`, so
/// `NOT (status = 'd')` renders as `NOT ("status" = 'd' AND "status" IS NOT NULL)`.
pub fn predicate_condition(predicate: &Predicate) -> Condition {
	convert(predicate, false)
}

/// Condition for `exclude`: the negated predicate, keeping `NULL` columns
pub fn exclusion_condition(predicate: &Predicate) -> Condition {
	convert(predicate, true).not()
}

fn convert(predicate: &Predicate, guard_nulls: bool) -> Condition {
	match predicate {
		Predicate::Comparison(cmp) => {
			let cond = Condition::all().add(comparison_expr(cmp));
			if guard_nulls && !tests_null(cmp) {
				cond.add(column(&cmp.path).is_not_null())
			} else {
				cond
			}
		}
		Predicate::And(children) => children
			.iter()
			.fold(Condition::all(), |cond, child| cond.add(convert(child, guard_nulls))),
		Predicate::Or(children) => children
			.iter()
			.fold(Condition::any(), |cond, child| cond.add(convert(child, guard_nulls))),
		Predicate::Not(inner) => convert(inner, true).not(),
	}
}

/// Comparisons that already evaluate to true or false on `NULL`
fn tests_null(cmp: &Comparison) -> bool {
	matches!(
		(cmp.lookup.as_str(), &cmp.value),
		(lookups::ISNULL, _) | (lookups::EXACT, FilterValue::Null)
	)
}

/// Column expression for a path
///
/// A single segment is a plain column. Longer paths qualify the last segment with the
/// preceding ones joined by `__`, which is the alias the caller joins the relation under.
pub(crate) fn column(path: &str) -> Expr {
	let segments = path_segments(path);
	match segments.split_last() {
		Some((name, [])) => Expr::col(Alias::new(*name)),
		Some((name, relation)) => Expr::col((Alias::new(relation.join("__")), Alias::new(*name))),
		None => Expr::col(Alias::new(path)),
	}
}

/// Escape SQL LIKE wildcard characters in user input
pub fn escape_like_pattern(input: &str) -> String {
	input
		.replace('\\', "\\\\")
		.replace('%', "\\%")
		.replace('_', "\\_")
}

fn comparison_expr(cmp: &Comparison) -> Expr {
	let col = column(&cmp.path);
	let value = &cmp.value;

	match (cmp.lookup.as_str(), value) {
		(lookups::EXACT, FilterValue::Null) => col.is_null(),
		(lookups::EXACT, v) => col.eq(sql_value(v)),
		(lookups::IEXACT, v) => lower(col).eq(v.to_string().to_lowercase()),
		(lookups::CONTAINS, v) => like(col, format!("%{}%", escape_like_pattern(&v.to_string()))),
		(lookups::ICONTAINS, v) => ilike(col, format!("%{}%", escape_like_pattern(&v.to_string()))),
		(lookups::STARTSWITH, v) => like(col, format!("{}%", escape_like_pattern(&v.to_string()))),
		(lookups::ISTARTSWITH, v) => {
			ilike(col, format!("{}%", escape_like_pattern(&v.to_string())))
		}
		(lookups::ENDSWITH, v) => like(col, format!("%{}", escape_like_pattern(&v.to_string()))),
		(lookups::IENDSWITH, v) => ilike(col, format!("%{}", escape_like_pattern(&v.to_string()))),
		(lookups::GT, v) => col.gt(sql_value(v)),
		(lookups::GTE, v) => col.gte(sql_value(v)),
		(lookups::LT, v) => col.lt(sql_value(v)),
		(lookups::LTE, v) => col.lte(sql_value(v)),
		(lookups::IN, FilterValue::List(items)) => col.is_in(items.iter().map(sql_value)),
		(lookups::IN, v) => col.is_in([sql_value(v)]),
		(lookups::RANGE, FilterValue::Range(lower, upper)) => {
			match (lower.is_null(), upper.is_null()) {
				(false, false) => col.between(sql_value(lower), sql_value(upper)),
				(false, true) => col.gte(sql_value(lower)),
				(true, false) => col.lte(sql_value(upper)),
				(true, true) => Expr::val(true),
			}
		}
		(lookups::ISNULL, FilterValue::Bool(true)) => col.is_null(),
		(lookups::ISNULL, FilterValue::Bool(false)) => col.is_not_null(),
		(lookup, v) => {
			tracing::warn!(path = %cmp.path, lookup, value = %v, "lookup has no SQL rendering");
			Expr::val(false)
		}
	}
}

fn lower(col: Expr) -> Expr {
	Expr::expr(Func::lower(col))
}

fn like(col: Expr, pattern: String) -> Expr {
	col.like(LikeExpr::new(pattern).escape('\\'))
}

fn ilike(col: Expr, pattern: String) -> Expr {
	lower(col).like(LikeExpr::new(pattern.to_lowercase()).escape('\\'))
}

/// Convert a typed filter value into a bound SQL value
fn sql_value(value: &FilterValue) -> Value {
	match value {
		// BigInt(None) is used for generic NULL values across all dialects
		FilterValue::Null => Value::BigInt(None),
		FilterValue::Bool(b) => Value::from(*b),
		FilterValue::Int(i) => Value::from(*i),
		FilterValue::Float(f) => Value::from(*f),
		FilterValue::Decimal(d) => Value::from(*d),
		FilterValue::String(s) => Value::from(s.clone()),
		FilterValue::Date(d) => Value::from(*d),
		FilterValue::Time(t) => Value::from(*t),
		FilterValue::DateTime(dt) => Value::from(*dt),
		FilterValue::Uuid(u) => Value::from(*u),
		FilterValue::List(_) | FilterValue::Range(_, _) => Value::from(value.to_string()),
	}
}
