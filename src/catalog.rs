//! Catalog fetchers built on the API client, plus the snapshot and browsing types the
//! storefront views consume.
//!
//! [`ApiClient::load_catalog`] fetches products and categories concurrently and fails as soon
//! as either fetch fails; no partial catalog is ever returned. Callers that must always render
//! something use [`ApiClient::load_catalog_or_demo`], which marks the fallback as degraded.

pub mod browse;
pub mod model;
pub mod query;

mod demo;

pub use browse::*;
pub use model::*;
pub use query::*;

// self
use crate::{
	_prelude::*,
	client::{ApiClient, RequestOptions},
	obs::{self, OpOutcome, OpSpan, Operation},
	transport::HttpTransport,
};

/// Path of the categories endpoint relative to the API base URL.
pub const CATEGORIES_ENDPOINT: &str = "/categories";

/// Products and categories fetched together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
	/// Product collection in server order.
	pub products: Vec<Product>,
	/// Category collection in server order.
	pub categories: Vec<Category>,
}

/// Where a [`CatalogSnapshot`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
	/// Fetched from the API.
	Live,
	/// Built-in demo data served because the API call failed.
	Fallback {
		/// Rendered error that triggered the fallback.
		reason: String,
	},
}

/// Catalog plus the provenance callers need to surface degraded mode.
#[derive(Clone, Debug)]
pub struct CatalogSnapshot {
	/// Catalog contents.
	pub catalog: Catalog,
	/// Live or fallback.
	pub source: CatalogSource,
	/// Instant the snapshot was produced.
	pub produced_at: OffsetDateTime,
}
impl CatalogSnapshot {
	/// Wraps live data.
	pub fn live(catalog: Catalog) -> Self {
		Self { catalog, source: CatalogSource::Live, produced_at: OffsetDateTime::now_utc() }
	}

	/// Wraps the demo catalog and records why it is being served.
	pub fn fallback(reason: impl Into<String>) -> Self {
		Self {
			catalog: Catalog::demo(),
			source: CatalogSource::Fallback { reason: reason.into() },
			produced_at: OffsetDateTime::now_utc(),
		}
	}

	/// Returns `true` when the snapshot holds demo data.
	pub fn is_degraded(&self) -> bool {
		matches!(self.source, CatalogSource::Fallback { .. })
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Fetches `GET /products`, appending `query` when it is non-empty.
	pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
		self.request_json(&query.endpoint(), RequestOptions::get()).await
	}

	/// Fetches `GET /categories`.
	pub async fn get_categories(&self) -> Result<Vec<Category>> {
		self.request_json(CATEGORIES_ENDPOINT, RequestOptions::get()).await
	}

	/// Fetches products and categories concurrently; either failure fails the whole load.
	pub async fn load_catalog(&self) -> Result<Catalog> {
		const OP: Operation = Operation::LoadCatalog;

		let span = OpSpan::new(OP, "load_catalog");
		let unfiltered = ProductQuery::new();

		obs::record_op_outcome(OP, OpOutcome::Attempt);

		let result = span
			.instrument(async {
				let (products, categories) =
					tokio::try_join!(self.get_products(&unfiltered), self.get_categories())?;

				Ok::<_, Error>(Catalog { products, categories })
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(OP, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(OP, OpOutcome::Failure),
		}

		result
	}

	/// Loads the live catalog, or the demo catalog marked as degraded when loading fails.
	pub async fn load_catalog_or_demo(&self) -> CatalogSnapshot {
		match self.load_catalog().await {
			Ok(catalog) => CatalogSnapshot::live(catalog),
			Err(err) => {
				obs::log_degraded(&err);

				CatalogSnapshot::fallback(err.to_string())
			},
		}
	}
}
