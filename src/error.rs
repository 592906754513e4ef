//! Client-level error types shared by the authenticator, API client, and catalog fetchers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The login call failed.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Response body could not be decoded into the expected shape.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Non-success status other than a successfully retried 401.
	#[error("Request to `{endpoint}` failed with HTTP status {status}.")]
	Http {
		/// HTTP status code returned by the API.
		status: u16,
		/// Endpoint path (including query) that was requested.
		endpoint: String,
	},
}
impl Error {
	/// Returns the HTTP status attached to the failure, when one was observed.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http { status, .. } => Some(*status),
			Self::Auth(AuthError::Rejected { status }) => Some(*status),
			Self::Parse(err) => Some(err.status),
			_ => None,
		}
	}

	/// Returns `true` when the API (or the login endpoint) answered with 401.
	pub fn is_unauthorized(&self) -> bool {
		self.status() == Some(401)
	}
}

/// Failures raised while exchanging credentials for a bearer token.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Login endpoint answered with a non-success status.
	#[error("Login endpoint rejected the credentials with HTTP status {status}.")]
	Rejected {
		/// HTTP status code returned by the login endpoint.
		status: u16,
	},
	/// Login call never produced a response.
	#[error("Login request could not be delivered.")]
	Transport(#[source] TransportError),
	/// Login endpoint returned a body without a usable `token` field.
	#[error("Login endpoint returned a malformed response.")]
	MalformedResponse(#[source] ParseError),
	/// Login endpoint returned a token that cannot be sent as a bearer header.
	#[error("Login endpoint returned an unusable token: {reason}.")]
	InvalidToken {
		/// Why the token was refused.
		reason: &'static str,
	},
}

/// Response body that could not be decoded as the expected JSON shape.
#[derive(Debug, ThisError)]
#[error("Response from `{endpoint}` is not valid JSON for the expected shape (at `{path}`).")]
pub struct ParseError {
	/// Endpoint path that produced the body.
	pub endpoint: String,
	/// HTTP status that accompanied the body.
	pub status: u16,
	/// JSON path where decoding stopped (`.` for the document root).
	pub path: String,
	/// Underlying decoding failure.
	#[source]
	pub source: serde_json::Error,
}
impl ParseError {
	/// Decodes `body` as `T`, recording the JSON path of the first mismatch.
	pub fn decode<T>(endpoint: &str, status: u16, body: &[u8]) -> Result<T, Self>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(body);
		let value = serde_path_to_error::deserialize(&mut de).map_err(|err| Self {
			endpoint: endpoint.to_owned(),
			status,
			path: err.path().to_string(),
			source: err.into_inner(),
		})?;

		de.end().map_err(|source| Self {
			endpoint: endpoint.to_owned(),
			status,
			path: ".".into(),
			source,
		})?;

		Ok(value)
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized as JSON.")]
	RequestBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},

	/// No base URL was supplied.
	#[error("API base URL is not configured.")]
	MissingBaseUrl,
	/// Base URL cannot be parsed.
	#[error("API base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses plain HTTP against a non-loopback host.
	#[error("API base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// URL that failed validation.
		url: String,
	},
	/// Endpoint path cannot be joined onto the base URL.
	#[error("Endpoint `{endpoint}` does not form a valid URL.")]
	InvalidEndpoint {
		/// Endpoint path supplied by the caller.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// No credentials were supplied.
	#[error("API credentials are not configured.")]
	MissingCredentials,
	/// Username is empty or whitespace.
	#[error("API username cannot be empty.")]
	EmptyUsername,
	/// Required environment variable is unset.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Environment variable holds an unusable value.
	#[error("Environment variable `{name}` is invalid: {reason}.")]
	InvalidEnv {
		/// Variable name.
		name: &'static str,
		/// Why the value was refused.
		reason: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the storefront API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured timeout.
	#[error("Request to the storefront API timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the storefront API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}
