//! Ordering filters

use crate::choices::Choices;
use crate::error::FieldError;
use crate::query::OrderBy;
use indexmap::IndexMap;

/// Public ordering names mapped to the paths they sort by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderingConfig {
	fields: IndexMap<String, String>,
}

impl OrderingConfig {
	pub fn new<I, K, V>(fields: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			fields: fields
				.into_iter()
				.map(|(param, path)| (param.into(), path.into()))
				.collect(),
		}
	}

	pub fn fields(&self) -> &IndexMap<String, String> {
		&self.fields
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Parse `title,-price` into ordering terms
	///
	/// Blank terms are ignored; an unknown name fails the whole parameter.
	pub fn clean(&self, raw: &str) -> Result<Vec<OrderBy>, FieldError> {
		raw.split(',')
			.map(str::trim)
			.filter(|term| !term.is_empty())
			.map(|term| {
				let parsed = OrderBy::parse(term);
				match self.fields.get(&parsed.path) {
					Some(path) => Ok(OrderBy {
						path: path.clone(),
						descending: parsed.descending,
					}),
					None => Err(FieldError::InvalidOrdering {
						field: parsed.path,
					}),
				}
			})
			.collect()
	}

	/// Ascending and descending option per field
	pub fn choices(&self) -> Choices {
		let mut choices = Choices::new();
		for param in self.fields.keys() {
			let label = humanize(param);
			choices.push(param.clone(), label.clone());
			choices.push(format!("-{param}"), format!("{label} (descending)"));
		}
		choices
	}
}

fn humanize(param: &str) -> String {
	let spaced = param.replace("__", " ").replace('_', " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
