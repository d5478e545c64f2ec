//! SQL dialects

use sea_query::{MysqlQueryBuilder, PostgresQueryBuilder, SelectStatement, SqliteQueryBuilder, Values};
use std::fmt;

/// Supported database dialects for statement rendering
///
/// Identifier quoting follows the backend:
/// - PostgreSQL and SQLite use double quotes: "column"
/// - MySQL uses backticks: \`column\`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DatabaseDialect {
	#[default]
	PostgreSQL,
	MySQL,
	Sqlite,
}

impl DatabaseDialect {
	/// Render `statement` with values inlined
	pub fn render(self, statement: &SelectStatement) -> String {
		match self {
			Self::PostgreSQL => statement.to_string(PostgresQueryBuilder),
			Self::MySQL => statement.to_string(MysqlQueryBuilder),
			Self::Sqlite => statement.to_string(SqliteQueryBuilder),
		}
	}

	/// Render `statement` with placeholders and the values to bind
	pub fn build(self, statement: &SelectStatement) -> (String, Values) {
		match self {
			Self::PostgreSQL => statement.build(PostgresQueryBuilder),
			Self::MySQL => statement.build(MysqlQueryBuilder),
			Self::Sqlite => statement.build(SqliteQueryBuilder),
		}
	}
}

impl fmt::Display for DatabaseDialect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::PostgreSQL => f.write_str("postgresql"),
			Self::MySQL => f.write_str("mysql"),
			Self::Sqlite => f.write_str("sqlite"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use sea_query::{Alias, Asterisk, Query};

	#[rstest]
	#[case(DatabaseDialect::PostgreSQL, r#"SELECT * FROM "book""#)]
	#[case(DatabaseDialect::MySQL, "SELECT * FROM `book`")]
	#[case(DatabaseDialect::Sqlite, r#"SELECT * FROM "book""#)]
	fn test_identifier_quoting(#[case] dialect: DatabaseDialect, #[case] expected: &str) {
		let statement = Query::select()
			.column(Asterisk)
			.from(Alias::new("book"))
			.to_owned();

		assert_eq!(dialect.render(&statement), expected);
	}

	#[rstest]
	fn test_default_is_postgres() {
		assert_eq!(DatabaseDialect::default(), DatabaseDialect::PostgreSQL);
		assert_eq!(DatabaseDialect::default().to_string(), "postgresql");
	}
}
