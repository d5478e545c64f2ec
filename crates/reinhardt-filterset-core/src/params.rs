//! Raw query parameters
//!
//! [`QueryParams`] maps each key to every value it was given, in arrival order, like
//! Django's `QueryDict`: [`get`](QueryParams::get) returns the last value and
//! [`get_all`](QueryParams::get_all) returns all of them.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams {
	values: IndexMap<String, Vec<String>>,
}

impl QueryParams {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse `a=1&b=2&b=3`, with or without a leading `?`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_filterset_core::QueryParams;
	///
	/// let params = QueryParams::from_query_string("?status=draft&status=published&q=rust%20book")
	///     .unwrap();
	///
	/// assert_eq!(params.get("status"), Some("published"));
	/// assert_eq!(params.get_all("status"), ["draft", "published"]);
	/// assert_eq!(params.get("q"), Some("rust book"));
	/// ```
	pub fn from_query_string(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
		let query = query.strip_prefix('?').unwrap_or(query);
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
		Ok(pairs.into_iter().collect())
	}

	/// Append a value, keeping earlier values for the same key
	pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.values
			.entry(key.into())
			.or_default()
			.push(value.into());
	}

	/// Replace all values of a key with one value
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.values.insert(key.into(), vec![value.into()]);
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.append(key, value);
		self
	}

	/// Last value given for `key`
	pub fn get(&self, key: &str) -> Option<&str> {
		self.values
			.get(key)
			.and_then(|values| values.last())
			.map(String::as_str)
	}

	pub fn get_all(&self, key: &str) -> &[String] {
		self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.values.keys().map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Encode back to a query string
	pub fn to_query_string(&self) -> String {
		let pairs: Vec<(&str, &str)> = self
			.values
			.iter()
			.flat_map(|(key, values)| values.iter().map(move |v| (key.as_str(), v.as_str())))
			.collect();
		serde_urlencoded::to_string(pairs).unwrap_or_default()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::new();
		for (key, value) in iter {
			params.append(key, value);
		}
		params
	}
}

impl From<HashMap<String, String>> for QueryParams {
	fn from(map: HashMap<String, String>) -> Self {
		map.into_iter().collect()
	}
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for QueryParams {
	fn from(pairs: Vec<(K, V)>) -> Self {
		pairs.into_iter().collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_repeated_keys_keep_order() {
		let params = QueryParams::from(vec![("tag", "a"), ("tag", "b"), ("tag", "a")]);

		assert_eq!(params.get_all("tag"), ["a", "b", "a"]);
		assert_eq!(params.get("tag"), Some("a"));
		assert_eq!(params.len(), 1);
	}

	#[rstest]
	fn test_missing_key() {
		let params = QueryParams::new();

		assert_eq!(params.get("x"), None);
		assert!(params.get_all("x").is_empty());
	}

	#[rstest]
	fn test_insert_replaces() {
		let mut params = QueryParams::new().with("a", "1").with("a", "2");

		params.insert("a", "3");

		assert_eq!(params.get_all("a"), ["3"]);
	}

	#[rstest]
	fn test_query_string_roundtrip() {
		let params = QueryParams::from_query_string("price_min=5&title=a+b&tag=x&tag=y").unwrap();

		assert_eq!(params.to_query_string(), "price_min=5&title=a+b&tag=x&tag=y");
	}

	#[rstest]
	fn test_empty_values_are_kept() {
		let params = QueryParams::from_query_string("status=&q=").unwrap();

		assert_eq!(params.get("status"), Some(""));
	}

	#[rstest]
	fn test_from_hash_map() {
		let mut map = HashMap::new();
		map.insert("price".to_string(), "5".to_string());

		let params = QueryParams::from(map);

		assert_eq!(params.get("price"), Some("5"));
	}
}
