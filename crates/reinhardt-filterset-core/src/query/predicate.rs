//! Predicate trees handed to a [`Queryable`](super::Queryable)

use crate::value::FilterValue;
use serde::{Deserialize, Serialize};

/// `target <lookup> value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
	pub path: String,
	pub lookup: String,
	pub value: FilterValue,
}

/// A boolean combination of comparisons
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::query::Predicate;
///
/// let p = Predicate::or(vec![
///     Predicate::compare("status", "exact", "draft"),
///     Predicate::compare("status", "exact", "published"),
/// ]);
/// assert_eq!(p.comparisons().len(), 2);
///
/// // A single operand is not wrapped
/// let single = Predicate::or(vec![Predicate::compare("status", "exact", "draft")]);
/// assert!(matches!(single, Predicate::Comparison(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
	Comparison(Comparison),
	And(Vec<Predicate>),
	Or(Vec<Predicate>),
	Not(Box<Predicate>),
}

impl Predicate {
	pub fn compare(
		path: impl Into<String>,
		lookup: impl Into<String>,
		value: impl Into<FilterValue>,
	) -> Self {
		Self::Comparison(Comparison {
			path: path.into(),
			lookup: lookup.into(),
			value: value.into(),
		})
	}

	pub fn and(mut operands: Vec<Predicate>) -> Self {
		if operands.len() == 1 {
			return operands.remove(0);
		}
		Self::And(operands)
	}

	pub fn or(mut operands: Vec<Predicate>) -> Self {
		if operands.len() == 1 {
			return operands.remove(0);
		}
		Self::Or(operands)
	}

	pub fn negate(self) -> Self {
		Self::Not(Box::new(self))
	}

	/// All comparisons in the tree, depth first
	pub fn comparisons(&self) -> Vec<&Comparison> {
		let mut out = Vec::new();
		self.collect_comparisons(&mut out);
		out
	}

	fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
		match self {
			Self::Comparison(c) => out.push(c),
			Self::And(items) | Self::Or(items) => {
				for item in items {
					item.collect_comparisons(out);
				}
			}
			Self::Not(inner) => inner.collect_comparisons(out),
		}
	}
}

impl From<Comparison> for Predicate {
	fn from(comparison: Comparison) -> Self {
		Self::Comparison(comparison)
	}
}
