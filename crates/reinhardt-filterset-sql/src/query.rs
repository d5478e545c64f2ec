//! SQL statement queryable

mod condition;

pub use condition::{escape_like_pattern, exclusion_condition, predicate_condition};

use crate::dialect::DatabaseDialect;
use reinhardt_filterset_core::query::{OrderBy, Predicate, Queryable};
use sea_query::{Alias, Asterisk, Condition, Order, Query, SelectStatement, Values};

/// A `SELECT * FROM <table>` narrowed by filter predicates
///
/// Conditions accumulate in the order filters apply them and are joined with `AND`.
/// Ordering replaces any previous ordering, matching how an ORM `order_by` behaves.
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::query::{Predicate, Queryable};
/// use reinhardt_filterset_sql::{DatabaseDialect, SqlQuery};
///
/// let q = SqlQuery::new("book")
///     .filter(Predicate::compare("title", "exact", "Rust"))
///     .distinct();
///
/// let sql = q.to_sql(DatabaseDialect::MySQL);
/// assert!(sql.starts_with("SELECT DISTINCT * FROM `book`"));
/// assert!(sql.contains("`title` = 'Rust'"));
/// ```
#[derive(Debug, Clone)]
pub struct SqlQuery {
	table: String,
	conditions: Vec<Condition>,
	distinct: bool,
	ordering: Vec<OrderBy>,
}

impl SqlQuery {
	pub fn new(table: impl Into<String>) -> Self {
		Self {
			table: table.into(),
			conditions: Vec::new(),
			distinct: false,
			ordering: Vec::new(),
		}
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	/// Number of `filter`/`exclude` conditions applied so far
	pub fn condition_count(&self) -> usize {
		self.conditions.len()
	}

	pub fn is_distinct(&self) -> bool {
		self.distinct
	}

	pub fn ordering(&self) -> &[OrderBy] {
		&self.ordering
	}

	/// The combined `WHERE` condition, `None` when nothing was filtered
	pub fn condition(&self) -> Option<Condition> {
		if self.conditions.is_empty() {
			return None;
		}
		Some(
			self.conditions
				.iter()
				.cloned()
				.fold(Condition::all(), |all, cond| all.add(cond)),
		)
	}

	/// Build the `SELECT` statement
	pub fn statement(&self) -> SelectStatement {
		let mut select = Query::select();
		select.column(Asterisk).from(Alias::new(self.table.as_str()));

		if self.distinct {
			select.distinct();
		}
		if let Some(cond) = self.condition() {
			select.cond_where(cond);
		}
		for term in &self.ordering {
			let order = if term.descending {
				Order::Desc
			} else {
				Order::Asc
			};
			select.order_by_expr(condition::column(&term.path), order);
		}
		select
	}

	/// Render the statement with values inlined
	pub fn to_sql(&self, dialect: DatabaseDialect) -> String {
		dialect.render(&self.statement())
	}

	/// Render the statement with placeholders and the values to bind
	pub fn build(&self, dialect: DatabaseDialect) -> (String, Values) {
		dialect.build(&self.statement())
	}
}

impl Queryable for SqlQuery {
	fn filter(mut self, predicate: Predicate) -> Self {
		tracing::trace!(table = %self.table, ?predicate, "adding WHERE condition");
		self.conditions.push(predicate_condition(&predicate));
		self
	}

	fn exclude(mut self, predicate: Predicate) -> Self {
		tracing::trace!(table = %self.table, ?predicate, "adding negated WHERE condition");
		self.conditions.push(exclusion_condition(&predicate));
		self
	}

	fn distinct(mut self) -> Self {
		self.distinct = true;
		self
	}

	fn order_by(mut self, ordering: &[OrderBy]) -> Self {
		if !ordering.is_empty() {
			self.ordering = ordering.to_vec();
		}
		self
	}

	fn supports_lookup(lookup: &str) -> bool {
		condition::is_supported(lookup)
	}
}
