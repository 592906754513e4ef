//! Query parameters for `GET /products`.

// self
use crate::_prelude::*;

/// Path of the products endpoint relative to the API base URL.
pub const PRODUCTS_ENDPOINT: &str = "/products";

/// Flat key/value parameters serialized as a form-urlencoded query string.
///
/// Keys keep their insertion order; setting an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductQuery(Vec<(String, String)>);
impl ProductQuery {
	/// Empty query (no `?` is emitted).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		let key = key.into();
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => *slot = value,
			None => self.0.push((key, value)),
		}

		self
	}

	/// Restricts results to one category name.
	pub fn category(self, name: impl Into<String>) -> Self {
		self.param("category", name)
	}

	/// Returns `true` when no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Serialized query string without the leading `?`, or `None` when empty.
	pub fn to_query_string(&self) -> Option<String> {
		if self.0.is_empty() {
			return None;
		}

		let mut serializer = url::form_urlencoded::Serializer::new(String::new());

		serializer.extend_pairs(self.0.iter());

		Some(serializer.finish())
	}

	/// Endpoint path including the query string, if any.
	pub fn endpoint(&self) -> String {
		match self.to_query_string() {
			Some(query) => format!("{PRODUCTS_ENDPOINT}?{query}"),
			None => PRODUCTS_ENDPOINT.to_owned(),
		}
	}
}
impl<K, V> FromIterator<(K, V)> for ProductQuery
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		iter.into_iter().fold(Self::default(), |query, (key, value)| query.param(key, value))
	}
}
