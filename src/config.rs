//! Client configuration: API base URL, service-account credentials, and transport limits.
//!
//! Nothing here is hardcoded. Values come from [`ClientConfigBuilder`] or from the
//! `STOREFRONT_API_*` environment variables via [`ClientConfig::from_env`].

// self
use crate::{_prelude::*, auth::Credentials, error::ConfigError};

/// Environment variable holding the API base URL (including the `/api` prefix).
pub const ENV_BASE_URL: &str = "STOREFRONT_API_BASE_URL";
/// Environment variable holding the service-account username.
pub const ENV_USERNAME: &str = "STOREFRONT_API_USERNAME";
/// Environment variable holding the service-account password.
pub const ENV_PASSWORD: &str = "STOREFRONT_API_PASSWORD";
/// Optional environment variable overriding the request timeout in seconds (`0` disables it).
pub const ENV_TIMEOUT_SECS: &str = "STOREFRONT_API_TIMEOUT_SECS";

/// Validated settings shared by the authenticator and the API client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Base URL every endpoint path is appended to.
	pub base_url: Url,
	/// Credentials exchanged for bearer tokens.
	pub credentials: Credentials,
	/// Per-request timeout; `None` waits indefinitely.
	pub timeout: Option<Duration>,
	/// `User-Agent` header sent by the default transport.
	pub user_agent: String,
}
impl ClientConfig {
	/// Timeout applied when none is configured explicitly.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

	/// Starts a new builder with default timeout and user agent.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`, which maps a variable name to its value.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let required = |name: &'static str| {
			lookup(name)
				.filter(|value| !value.trim().is_empty())
				.ok_or(ConfigError::MissingEnv { name })
		};
		let credentials = Credentials::new(required(ENV_USERNAME)?, required(ENV_PASSWORD)?)?;
		let mut builder =
			Self::builder().base_url(required(ENV_BASE_URL)?).credentials(credentials);

		if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
			let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnv {
				name: ENV_TIMEOUT_SECS,
				reason: e.to_string(),
			})?;

			builder = builder.timeout((secs > 0).then_some(Duration::from_secs(secs)));
		}

		builder.build()
	}

	/// Joins an endpoint path (optionally carrying a query string) onto the base URL.
	pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ConfigError> {
		let base = self.base_url.as_str().trim_end_matches('/');
		let joined = if endpoint.starts_with('/') {
			format!("{base}{endpoint}")
		} else {
			format!("{base}/{endpoint}")
		};

		Url::parse(&joined)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: endpoint.to_owned(), source })
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Raw base URL, parsed and validated by [`build`](Self::build).
	pub base_url: Option<String>,
	/// Credentials exchanged for bearer tokens.
	pub credentials: Option<Credentials>,
	/// Per-request timeout.
	pub timeout: Option<Duration>,
	/// `User-Agent` header sent by the default transport.
	pub user_agent: String,
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: None,
			credentials: None,
			timeout: Some(ClientConfig::DEFAULT_TIMEOUT),
			user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
		}
	}
}
impl ClientConfigBuilder {
	/// Sets the API base URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Sets the service-account credentials.
	pub fn credentials(mut self, credentials: Credentials) -> Self {
		self.credentials = Some(credentials);

		self
	}

	/// Overrides the per-request timeout; `None` disables it.
	pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let raw = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
		let base_url =
			Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl { source })?;
		let credentials = self.credentials.ok_or(ConfigError::MissingCredentials)?;

		validate_base_url(&base_url)?;

		Ok(ClientConfig {
			base_url,
			credentials,
			timeout: self.timeout,
			user_agent: self.user_agent,
		})
	}
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ConfigError::InsecureBaseUrl { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(addr)) => addr.is_loopback(),
		Some(url::Host::Ipv6(addr)) => addr.is_loopback(),
		None => false,
	}
}
