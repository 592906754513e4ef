#![cfg(feature = "reqwest")]

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use storefront_client::{
	auth::Credentials,
	catalog::{CatalogQuery, ProductQuery, ResourceId, SortOrder},
	client::ApiClient,
	config::ClientConfig,
	error::{AuthError, Error, TransportError},
	transport::ReqwestTransport,
};

const PRODUCTS: &str = r#"[
	{"id":1,"name":"Quantum Phone Case Pro","category":"Cases","sellingPrice":299.99},
	{"id":"sku-2","name":"Neural Wireless Charger","category":"Chargers","sellingPrice":199.99,
		"description":"AI-powered wireless charging","imageUrl":"https://cdn.example/charger.png"}
]"#;
const CATEGORIES: &str = r#"[{"id":1,"name":"Cases"},{"id":2,"name":"Chargers"}]"#;

fn config(base_url: &str, timeout: Option<Duration>) -> ClientConfig {
	ClientConfig::builder()
		.base_url(base_url)
		.credentials(
			Credentials::new("manager1", "hunter2").expect("Test credentials should be valid."),
		)
		.timeout(timeout)
		.build()
		.expect("Loopback base URL should be accepted.")
}

/// Builds a client whose transport accepts the self-signed certificate served by `httpmock`.
fn mock_client(config: ClientConfig) -> ApiClient<ReqwestTransport> {
	let http_client = ReqwestTransport::client_builder(&config)
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure reqwest client for tests.");

	ApiClient::with_transport(config, ReqwestTransport::with_client(http_client))
}

async fn login_mock(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/login")
				.header("content-type", "application/json")
				.json_body(json!({ "username": "manager1", "password": "hunter2" }));
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"token":"abc","user":{"id":7,"role":"manager"}}"#);
		})
		.await
}

#[tokio::test]
async fn load_catalog_fetches_both_collections_with_one_login() {
	let server = MockServer::start_async().await;
	let login = login_mock(&server).await;
	let products = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products").header("authorization", "Bearer abc");
			then.status(200).header("content-type", "application/json").body(PRODUCTS);
		})
		.await;
	let categories = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories").header("authorization", "Bearer abc");
			then.status(200).header("content-type", "application/json").body(CATEGORIES);
		})
		.await;
	let client = mock_client(config(&server.url("/api"), Some(Duration::from_secs(5))));
	let catalog = client.load_catalog().await.expect("Catalog load should succeed.");

	login.assert_calls_async(1).await;
	products.assert_calls_async(1).await;
	categories.assert_calls_async(1).await;

	assert_eq!(catalog.products.len(), 2);
	assert_eq!(catalog.products[1].id, ResourceId::Text("sku-2".into()));
	assert_eq!(
		catalog.products[1].image_url.as_deref(),
		Some("https://cdn.example/charger.png"),
	);
	assert_eq!(catalog.categories[1].name, "Chargers");

	let cheapest = CatalogQuery::default().with_sort(SortOrder::PriceLowToHigh);

	assert_eq!(cheapest.apply(&catalog.products)[0].name, "Neural Wireless Charger");
}

#[tokio::test]
async fn category_filter_reaches_the_server() {
	let server = MockServer::start_async().await;
	let _login = login_mock(&server).await;
	let filtered = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products").query_param("category", "Cases");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;
	let client = mock_client(config(&server.url("/api"), None));
	let products = client
		.get_products(&ProductQuery::new().category("Cases"))
		.await
		.expect("Filtered fetch should succeed.");

	filtered.assert_calls_async(1).await;

	assert!(products.is_empty());
}

#[tokio::test]
async fn unauthorized_response_triggers_one_relogin() {
	let server = MockServer::start_async().await;
	let login = login_mock(&server).await;
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories");
			then.status(401).body(r#"{"message":"Invalid token"}"#);
		})
		.await;
	let client = mock_client(config(&server.url("/api"), None));
	let err = client.get_categories().await.expect_err("Persistent 401 should surface.");

	rejected.assert_calls_async(2).await;
	login.assert_calls_async(2).await;

	assert!(err.is_unauthorized());
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
	let server = MockServer::start_async().await;
	let _login = login_mock(&server).await;
	let _products = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products");
			then.status(200)
				.header("content-type", "text/html")
				.body("<h1>Down for maintenance</h1>");
		})
		.await;
	let client = mock_client(config(&server.url("/api"), None));
	let err = client
		.get_products(&ProductQuery::new())
		.await
		.expect_err("HTML body should not decode.");

	assert!(matches!(err, Error::Parse(ref parse) if parse.endpoint == "/products"));
}

#[tokio::test]
async fn unreachable_api_fails_during_login() {
	let client = ApiClient::new(config("http://127.0.0.1:1/api", Some(Duration::from_secs(5))))
		.expect("Client should build.");
	let err = client.get_categories().await.expect_err("Nothing listens on port 1.");

	assert!(matches!(err, Error::Auth(AuthError::Transport(_))));
}

#[tokio::test]
async fn slow_login_times_out() {
	let server = MockServer::start_async().await;
	let _login = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200).delay(Duration::from_secs(2)).body(r#"{"token":"late"}"#);
		})
		.await;
	let client = mock_client(config(&server.url("/api"), Some(Duration::from_millis(200))));
	let err = client.get_categories().await.expect_err("Login should exceed the timeout.");

	assert!(matches!(err, Error::Auth(AuthError::Transport(TransportError::Timeout { .. }))));
}
