//! Transport primitives for storefront API calls.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. The default
//! [`ReqwestTransport`] is enabled by the `reqwest` feature; tests and embedders can plug in
//! any other implementation, since requests and responses are plain [`http`] values with
//! buffered bodies.

// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, error::ConfigError};

/// Outbound request handed to a transport.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Fully buffered response returned by a transport.
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing storefront API requests.
///
/// Implementations must return every HTTP response, including 4xx/5xx ones, as `Ok`; only
/// failures that prevent a response from arriving belong in [`TransportError`]. Status
/// classification and the 401 retry live in the API client.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and buffers the full response body.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// API responses are returned directly, so clients built by [`ReqwestTransport::from_config`]
/// do not follow redirects.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the configured timeout and user agent.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		Ok(Self(Self::client_builder(config).build()?))
	}

	/// Returns a reqwest builder preloaded with the configured timeout, user agent, and
	/// redirect policy, for callers that need extra TLS or proxy settings.
	pub fn client_builder(config: &ClientConfig) -> reqwest::ClientBuilder {
		let builder = ReqwestClient::builder()
			.user_agent(config.user_agent.as_str())
			.redirect(reqwest::redirect::Policy::none());

		match config.timeout {
			Some(timeout) => builder.timeout(timeout),
			None => builder,
		}
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
