//! Demonstrates loading the storefront catalog against a mock API, then browsing it locally
//! with a category filter and price ordering.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use storefront_client::{
	auth::Credentials,
	catalog::{CatalogQuery, CategoryFilter, SortOrder},
	client::{ApiClient, ReqwestApiClient},
	config::ClientConfig,
	transport::ReqwestTransport,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token\":\"demo-token\"}");
		})
		.await;
	let _products_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products").header("authorization", "Bearer demo-token");
			then.status(200).header("content-type", "application/json").body(
				"[{\"id\":1,\"name\":\"Quantum Phone Case Pro\",\"category\":\"Cases\",\"sellingPrice\":299.99},\
				 {\"id\":2,\"name\":\"Aurora Slim Case\",\"category\":\"Cases\",\"sellingPrice\":49.5},\
				 {\"id\":3,\"name\":\"Holographic Headphones\",\"category\":\"Audio\",\"sellingPrice\":599.99}]",
			);
		})
		.await;
	let _categories_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories").header("authorization", "Bearer demo-token");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":1,\"name\":\"Cases\"},{\"id\":2,\"name\":\"Audio\"}]");
		})
		.await;
	let config = ClientConfig::builder()
		.base_url(server.url("/api"))
		.credentials(Credentials::new("manager1", "demo-password")?)
		.build()?;
	let http_client = ReqwestTransport::client_builder(&config)
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()?;
	let client: ReqwestApiClient =
		ApiClient::with_transport(config, ReqwestTransport::with_client(http_client));
	let snapshot = client.load_catalog_or_demo().await;
	let query = CatalogQuery::default()
		.with_category(CategoryFilter::Named("Cases".into()))
		.with_sort(SortOrder::PriceLowToHigh);

	println!(
		"Loaded {} products in {} categories (degraded: {}).",
		snapshot.catalog.products.len(),
		snapshot.catalog.categories.len(),
		snapshot.is_degraded(),
	);

	for product in query.apply(&snapshot.catalog.products) {
		println!("{} [{}]: ${:.2}.", product.name, product.category, product.selling_price);
	}

	login_mock.assert_async().await;

	Ok(())
}
