//! Client-side browsing over a fetched catalog: category filter, name search, and ordering.

// std
use std::cmp::Ordering;
// self
use crate::{_prelude::*, catalog::Product};

/// Category restriction applied by [`CatalogQuery`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
	/// Every category.
	#[default]
	All,
	/// Only products whose `category` equals this name exactly.
	Named(String),
}
impl CategoryFilter {
	/// Returns `true` when `product` passes the filter.
	pub fn matches(&self, product: &Product) -> bool {
		match self {
			Self::All => true,
			Self::Named(name) => product.category == *name,
		}
	}
}
impl FromStr for CategoryFilter {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(if s == "all" { Self::All } else { Self::Named(s.to_owned()) })
	}
}

/// Ordering applied by [`CatalogQuery`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
	/// Server order.
	#[default]
	Featured,
	/// Cheapest first.
	PriceLowToHigh,
	/// Most expensive first.
	PriceHighToLow,
	/// Alphabetical by name, case-insensitive.
	Name,
}
impl SortOrder {
	/// Returns the stable label used by storefront sort controls.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Featured => "featured",
			Self::PriceLowToHigh => "price-low",
			Self::PriceHighToLow => "price-high",
			Self::Name => "name",
		}
	}

	fn compare(self, a: &Product, b: &Product) -> Ordering {
		match self {
			Self::Featured => Ordering::Equal,
			Self::PriceLowToHigh => a.selling_price.total_cmp(&b.selling_price),
			Self::PriceHighToLow => b.selling_price.total_cmp(&a.selling_price),
			Self::Name => a
				.name
				.to_lowercase()
				.cmp(&b.name.to_lowercase())
				.then_with(|| a.name.cmp(&b.name)),
		}
	}
}
impl Display for SortOrder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SortOrder {
	type Err = UnknownSortOrder;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"featured" => Ok(Self::Featured),
			"price-low" => Ok(Self::PriceLowToHigh),
			"price-high" => Ok(Self::PriceHighToLow),
			"name" => Ok(Self::Name),
			other => Err(UnknownSortOrder(other.to_owned())),
		}
	}
}

/// Error returned when a sort label is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown sort order `{0}`.")]
pub struct UnknownSortOrder(pub String);

/// Filter + search + sort selection over a product list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogQuery {
	/// Category restriction.
	pub category: CategoryFilter,
	/// Case-insensitive substring matched against product names; empty matches everything.
	pub search: String,
	/// Result ordering.
	pub sort: SortOrder,
}
impl CatalogQuery {
	/// Restricts results to one category.
	pub fn with_category(mut self, category: CategoryFilter) -> Self {
		self.category = category;

		self
	}

	/// Sets the name search term.
	pub fn with_search(mut self, term: impl Into<String>) -> Self {
		self.search = term.into();

		self
	}

	/// Sets the ordering.
	pub fn with_sort(mut self, sort: SortOrder) -> Self {
		self.sort = sort;

		self
	}

	/// Returns `true` when `product` passes both the category filter and the search term.
	pub fn matches(&self, product: &Product) -> bool {
		self.category.matches(product) && name_contains(&product.name, &self.search)
	}

	/// Filters and orders `products`. Sorting is stable, so ties keep server order.
	pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
		let mut selected = products.iter().filter(|p| self.matches(p)).collect::<Vec<_>>();

		if self.sort != SortOrder::Featured {
			selected.sort_by(|a, b| self.sort.compare(a, b));
		}

		selected
	}
}

fn name_contains(name: &str, term: &str) -> bool {
	term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::catalog::Catalog;

	fn names<'a>(products: &[&'a Product]) -> Vec<&'a str> {
		products.iter().map(|p| p.name.as_str()).collect()
	}

	#[test]
	fn default_query_keeps_server_order() {
		let catalog = Catalog::demo();
		let selected = CatalogQuery::default().apply(&catalog.products);

		assert_eq!(
			names(&selected),
			["Quantum Phone Case Pro", "Neural Wireless Charger", "Holographic Headphones"],
		);
	}

	#[test]
	fn category_and_search_combine() {
		let catalog = Catalog::demo();
		let audio = CatalogQuery::default()
			.with_category("Audio".parse().expect("Category filters always parse."))
			.apply(&catalog.products);

		assert_eq!(names(&audio), ["Holographic Headphones"]);

		let search = CatalogQuery::default().with_search("CHARGER").apply(&catalog.products);

		assert_eq!(names(&search), ["Neural Wireless Charger"]);

		let none = CatalogQuery::default()
			.with_category(CategoryFilter::Named("Audio".into()))
			.with_search("case")
			.apply(&catalog.products);

		assert!(none.is_empty());
		assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
	}

	#[test]
	fn sort_orders_by_price_and_name() {
		let catalog = Catalog::demo();
		let low = CatalogQuery::default().with_sort(SortOrder::PriceLowToHigh);
		let high = CatalogQuery::default().with_sort(SortOrder::PriceHighToLow);
		let name = CatalogQuery::default().with_sort(SortOrder::Name);

		assert_eq!(
			names(&low.apply(&catalog.products)),
			["Neural Wireless Charger", "Quantum Phone Case Pro", "Holographic Headphones"],
		);
		assert_eq!(
			names(&high.apply(&catalog.products)),
			["Holographic Headphones", "Quantum Phone Case Pro", "Neural Wireless Charger"],
		);
		assert_eq!(
			names(&name.apply(&catalog.products)),
			["Holographic Headphones", "Neural Wireless Charger", "Quantum Phone Case Pro"],
		);
	}

	#[test]
	fn sort_labels_parse_and_render() {
		for sort in [
			SortOrder::Featured,
			SortOrder::PriceLowToHigh,
			SortOrder::PriceHighToLow,
			SortOrder::Name,
		] {
			assert_eq!(sort.as_str().parse::<SortOrder>(), Ok(sort));
		}

		assert_eq!("cheapest".parse::<SortOrder>(), Err(UnknownSortOrder("cheapest".into())));
	}
}
