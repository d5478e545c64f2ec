//! Choice lists
//!
//! A choice filter validates decoded values against an ordered list of
//! `(key, label)` pairs. The list is either fixed when the filter is declared
//! ([`Choices`]) or produced at bind time by a [`ChoiceSource`], which is how relation
//! and all-values filters see rows added after the filterset was built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
	pub key: String,
	pub label: String,
}

impl Choice {
	pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
		}
	}
}

/// Ordered `(key, label)` pairs
///
/// # Examples
///
/// ```
/// use reinhardt_filterset_core::Choices;
///
/// let choices = Choices::from([("d", "Draft"), ("p", "Published")]);
/// assert!(choices.contains_key("p"));
/// assert_eq!(choices.label("d"), Some("Draft"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Choices(Vec<Choice>);

impl Choices {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, key: impl Into<String>, label: impl Into<String>) {
		self.0.push(Choice::new(key, label));
	}

	/// Choices whose label equals their key
	pub fn from_keys<I, S>(keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		keys.into_iter()
			.map(|key| {
				let key = key.into();
				Choice::new(key.clone(), key)
			})
			.collect()
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.iter().any(|choice| choice.key == key)
	}

	pub fn label(&self, key: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|choice| choice.key == key)
			.map(|choice| choice.label.as_str())
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|choice| choice.key.as_str())
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Choice> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Whether `selected` covers every key at least once
	pub fn is_fully_selected(&self, selected: &[String]) -> bool {
		!self.is_empty() && self.keys().all(|key| selected.iter().any(|s| s == key))
	}
}

impl FromIterator<Choice> for Choices {
	fn from_iter<I: IntoIterator<Item = Choice>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl From<Vec<Choice>> for Choices {
	fn from(choices: Vec<Choice>) -> Self {
		Self(choices)
	}
}

impl<K: Into<String>, L: Into<String>, const N: usize> From<[(K, L); N]> for Choices {
	fn from(pairs: [(K, L); N]) -> Self {
		pairs
			.into_iter()
			.map(|(key, label)| Choice::new(key, label))
			.collect()
	}
}

impl<'a> IntoIterator for &'a Choices {
	type Item = &'a Choice;
	type IntoIter = std::slice::Iter<'a, Choice>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Produces choices when a filterset is bound
pub trait ChoiceSource: Send + Sync {
	fn choices(&self) -> Choices;
}

impl ChoiceSource for Choices {
	fn choices(&self) -> Choices {
		self.clone()
	}
}

impl ChoiceSource for Vec<Choice> {
	fn choices(&self) -> Choices {
		Choices(self.clone())
	}
}

impl<F> ChoiceSource for F
where
	F: Fn() -> Choices + Send + Sync,
{
	fn choices(&self) -> Choices {
		self()
	}
}

/// Where a filter's choices come from
#[derive(Clone, Default)]
pub enum ChoiceSet {
	#[default]
	None,
	Static(Choices),
	Source(Arc<dyn ChoiceSource>),
}

impl ChoiceSet {
	/// Current choices; sources are queried on every call
	pub fn resolve(&self) -> Option<Choices> {
		match self {
			Self::None => None,
			Self::Static(choices) => Some(choices.clone()),
			Self::Source(source) => Some(source.choices()),
		}
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	pub fn is_live(&self) -> bool {
		matches!(self, Self::Source(_))
	}
}

impl fmt::Debug for ChoiceSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::None => f.write_str("None"),
			Self::Static(choices) => f.debug_tuple("Static").field(choices).finish(),
			Self::Source(_) => f.write_str("Source(..)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[rstest]
	#[case(&["a", "b"], true)]
	#[case(&["b", "a", "a"], true)]
	#[case(&["a"], false)]
	#[case(&[], false)]
	fn test_is_fully_selected(#[case] selected: &[&str], #[case] expected: bool) {
		let choices = Choices::from_keys(["a", "b"]);
		let selected: Vec<String> = selected.iter().map(|s| s.to_string()).collect();

		assert_eq!(choices.is_fully_selected(&selected), expected);
	}

	#[rstest]
	fn test_empty_choices_are_never_fully_selected() {
		assert!(!Choices::new().is_fully_selected(&[]));
	}

	#[rstest]
	fn test_source_is_read_on_every_resolve() {
		// Arrange
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let set = ChoiceSet::Source(Arc::new(move || {
			let n = counter.fetch_add(1, Ordering::SeqCst);
			Choices::from_keys((0..=n).map(|i| i.to_string()))
		}));

		// Act
		let first = set.resolve().unwrap();
		let second = set.resolve().unwrap();

		// Assert
		assert_eq!(first.len(), 1);
		assert_eq!(second.len(), 2);
		assert!(set.is_live());
	}
}
