//! Typed snapshots of the API's product and category resources.

// self
use crate::_prelude::*;

/// Server-assigned identifier, sent either as a JSON number or a JSON string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
	/// Numeric identifier.
	Number(i64),
	/// String identifier (UUIDs, slugs, ...).
	Text(String),
}
impl Display for ResourceId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Number(id) => write!(f, "{id}"),
			Self::Text(id) => f.write_str(id),
		}
	}
}
impl From<i64> for ResourceId {
	fn from(value: i64) -> Self {
		Self::Number(value)
	}
}
impl From<&str> for ResourceId {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

/// Product as returned by `GET /products`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
	/// Server identifier.
	pub id: ResourceId,
	/// Display name.
	pub name: String,
	/// Name of the category the product belongs to.
	pub category: String,
	/// Unit price.
	pub selling_price: f64,
	/// Marketing copy.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Product image location.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
}

/// Category as returned by `GET /categories`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
	/// Server identifier.
	pub id: ResourceId,
	/// Display name; products reference categories by this value.
	pub name: String,
}
