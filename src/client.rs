//! Authenticated API client with bearer injection and one-shot 401 recovery.
//!
//! [`ApiClient::request_json`] obtains a token from the shared [`TokenCache`], sends the
//! request with `Authorization: Bearer <token>`, and on a 401 invalidates that token,
//! acquires a fresh one, and replays the request exactly once. Any other non-success status
//! (including a second 401) surfaces as [`Error::Http`] without further retries. There is no
//! backoff, circuit breaking, or queueing.

mod metrics;

pub use metrics::ClientMetrics;

// crates.io
use http::{
	HeaderMap, HeaderValue, Method, StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderName},
};
// self
use crate::{
	_prelude::*,
	auth::{Authenticator, BearerToken, TokenCache},
	config::ClientConfig,
	error::{ConfigError, ParseError},
	obs::{self, OpOutcome, OpSpan, Operation},
	transport::{HttpResponse, HttpTransport},
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Per-request options: method, extra headers, and an optional JSON body.
///
/// `Content-Type` and `Authorization` are always set by the client; caller-supplied values
/// for either header are replaced.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
	/// HTTP method (defaults to `GET`).
	pub method: Method,
	/// Additional headers merged into the request.
	pub headers: HeaderMap,
	/// Serialized JSON body, if any.
	pub body: Option<Vec<u8>>,
}
impl RequestOptions {
	/// Plain `GET` with no extra headers.
	pub fn get() -> Self {
		Self::default()
	}

	/// Overrides the HTTP method.
	pub fn with_method(mut self, method: Method) -> Self {
		self.method = method;

		self
	}

	/// Adds (or replaces) a header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Serializes `body` as the JSON request payload.
	pub fn with_json<T>(mut self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		self.body =
			Some(serde_json::to_vec(body).map_err(|source| ConfigError::RequestBody { source })?);

		Ok(self)
	}
}

/// Client for the storefront API.
///
/// All state lives behind `Arc`, so clones share the token cache and metrics; concurrent
/// requests from any clone share a single login round trip.
pub struct ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Validated configuration.
	pub config: Arc<ClientConfig>,
	/// Transport used for every outbound request.
	pub transport: Arc<C>,
	/// Login helper sharing the same config + transport.
	pub authenticator: Authenticator<C>,
	/// Shared bearer-token cache.
	pub tokens: Arc<TokenCache>,
	/// Activity counters.
	pub metrics: Arc<ClientMetrics>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client over a caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: impl Into<Arc<C>>) -> Self {
		let config = Arc::new(config);
		let transport = transport.into();

		Self {
			authenticator: Authenticator::new(config.clone(), transport.clone()),
			config,
			transport,
			tokens: Default::default(),
			metrics: Default::default(),
		}
	}

	/// Sends an authenticated request and returns the raw JSON body.
	pub async fn request(
		&self,
		endpoint: &str,
		options: RequestOptions,
	) -> Result<serde_json::Value> {
		self.request_json(endpoint, options).await
	}

	/// Sends an authenticated request and decodes the JSON body as `T`.
	pub async fn request_json<T>(&self, endpoint: &str, options: RequestOptions) -> Result<T>
	where
		T: DeserializeOwned,
	{
		const OP: Operation = Operation::Request;

		let span = OpSpan::new(OP, "request");

		obs::record_op_outcome(OP, OpOutcome::Attempt);

		let result = span
			.instrument(async {
				let response = self.dispatch(endpoint, &options).await?;
				let status = response.status();

				if !status.is_success() {
					return Err(Error::Http {
						status: status.as_u16(),
						endpoint: endpoint.to_owned(),
					});
				}

				Ok(ParseError::decode(endpoint, status.as_u16(), response.body())?)
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(OP, OpOutcome::Success),
			Err(err) => {
				self.metrics.record_failure();
				obs::record_op_outcome(OP, OpOutcome::Failure);
				obs::log_failure(OP, endpoint, err);
			},
		}

		result
	}

	/// Returns the cached bearer token, logging in (once, for all concurrent callers) if needed.
	pub async fn token(&self) -> Result<BearerToken> {
		self.tokens
			.token_with(move || async move {
				self.metrics.record_login();
				self.authenticator.authenticate().await
			})
			.await
	}

	async fn dispatch(&self, endpoint: &str, options: &RequestOptions) -> Result<HttpResponse> {
		const OP: Operation = Operation::Retry;

		let url = self.config.endpoint_url(endpoint)?;
		let token = self.token().await?;
		let response = self.send(&url, options, &token).await?;

		if response.status() != StatusCode::UNAUTHORIZED {
			return Ok(response);
		}

		self.metrics.record_unauthorized_retry();
		self.tokens.invalidate(&token);
		obs::log_unauthorized_retry(endpoint);
		obs::record_op_outcome(OP, OpOutcome::Attempt);

		let retried = OpSpan::new(OP, "unauthorized_retry")
			.instrument(async {
				let fresh = self.token().await?;
				let response = self.send(&url, options, &fresh).await?;

				if response.status() == StatusCode::UNAUTHORIZED {
					self.tokens.invalidate(&fresh);
				}

				Ok::<_, Error>(response)
			})
			.await;

		match &retried {
			Ok(response) if response.status().is_success() =>
				obs::record_op_outcome(OP, OpOutcome::Success),
			_ => obs::record_op_outcome(OP, OpOutcome::Failure),
		}

		retried
	}

	async fn send(
		&self,
		url: &Url,
		options: &RequestOptions,
		token: &BearerToken,
	) -> Result<HttpResponse> {
		let mut request = http::Request::builder()
			.method(options.method.clone())
			.uri(url.as_str())
			.body(options.body.clone().unwrap_or_default())
			.map_err(ConfigError::from)?;
		let headers = request.headers_mut();

		headers.extend(options.headers.clone());
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.insert(AUTHORIZATION, token.authorization_header());

		self.metrics.record_request();

		Ok(self.transport.execute(request).await?)
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client that provisions its own reqwest transport from `config`.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let transport = ReqwestTransport::from_config(&config)?;

		Ok(Self::with_transport(config, transport))
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			transport: self.transport.clone(),
			authenticator: self.authenticator.clone(),
			tokens: self.tokens.clone(),
			metrics: self.metrics.clone(),
		}
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("username", &self.config.credentials.username)
			.field("token_cached", &self.tokens.current().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_options_default_to_plain_get() {
		let options = RequestOptions::get();

		assert_eq!(options.method, Method::GET);
		assert!(options.headers.is_empty());
		assert!(options.body.is_none());
	}

	#[test]
	fn request_options_serialize_json_bodies() {
		let options = RequestOptions::get()
			.with_method(Method::POST)
			.with_header(HeaderName::from_static("x-trace"), HeaderValue::from_static("1"))
			.with_json(&serde_json::json!({ "name": "Case" }))
			.expect("JSON body should serialize.");

		assert_eq!(options.method, Method::POST);
		assert_eq!(options.headers.len(), 1);
		assert_eq!(options.body.as_deref(), Some(br#"{"name":"Case"}"#.as_slice()));
	}
}
