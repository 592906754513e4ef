//! Demo catalog served while the live API is unreachable.

// self
use crate::catalog::{Catalog, Category, Product, ResourceId};

impl Catalog {
	/// Built-in demo catalog served when the live API is unavailable.
	pub fn demo() -> Self {
		let product = |id: i64, name: &str, category: &str, price: f64, description: &str| {
			Product {
				id: ResourceId::Number(id),
				name: name.into(),
				category: category.into(),
				selling_price: price,
				description: Some(description.into()),
				image_url: None,
			}
		};
		let category =
			|id: i64, name: &str| Category { id: ResourceId::Number(id), name: name.into() };

		Self {
			products: vec![
				product(
					1,
					"Quantum Phone Case Pro",
					"Cases",
					299.99,
					"Revolutionary phone case with quantum encryption and holographic display",
				),
				product(
					2,
					"Neural Wireless Charger",
					"Chargers",
					199.99,
					"AI-powered wireless charging with predictive battery optimization",
				),
				product(
					3,
					"Holographic Headphones",
					"Audio",
					599.99,
					"3D spatial audio with real-time neural processing",
				),
			],
			categories: vec![category(1, "Cases"), category(2, "Chargers"), category(3, "Audio")],
		}
	}
}
