//! Credential exchange against the login endpoint.

// crates.io
use http::{HeaderValue, Method, header::CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::BearerToken,
	config::ClientConfig,
	error::{AuthError, ConfigError, ParseError},
	obs::{self, OpOutcome, OpSpan, Operation},
	transport::HttpTransport,
};

/// Path of the login endpoint relative to the API base URL.
pub const LOGIN_ENDPOINT: &str = "/auth/login";

/// Login response; only `token` is consumed.
#[derive(Deserialize)]
struct LoginResponse {
	token: String,
}

/// Exchanges the configured credentials for a bearer token.
///
/// Each call performs exactly one `POST` to [`LOGIN_ENDPOINT`]; retry policy belongs to the
/// caller.
pub struct Authenticator<C>
where
	C: ?Sized + HttpTransport,
{
	config: Arc<ClientConfig>,
	transport: Arc<C>,
}
impl<C> Authenticator<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates an authenticator sharing the client's config and transport.
	pub fn new(config: Arc<ClientConfig>, transport: Arc<C>) -> Self {
		Self { config, transport }
	}

	/// Posts the credentials and returns the issued token.
	pub async fn authenticate(&self) -> Result<BearerToken> {
		const OP: Operation = Operation::Login;

		let span = OpSpan::new(OP, "authenticate");

		obs::record_op_outcome(OP, OpOutcome::Attempt);

		let result = span.instrument(self.exchange()).await;

		match &result {
			Ok(_) => obs::record_op_outcome(OP, OpOutcome::Success),
			Err(err) => {
				obs::record_op_outcome(OP, OpOutcome::Failure);
				obs::log_failure(OP, LOGIN_ENDPOINT, err);
			},
		}

		result
	}

	async fn exchange(&self) -> Result<BearerToken> {
		let url = self.config.endpoint_url(LOGIN_ENDPOINT)?;
		let body = serde_json::to_vec(&self.config.credentials.login_body())
			.map_err(|source| ConfigError::RequestBody { source })?;
		let mut request = http::Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.body(body)
			.map_err(ConfigError::from)?;

		request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		let response = self.transport.execute(request).await.map_err(AuthError::Transport)?;
		let status = response.status();

		if !status.is_success() {
			return Err(AuthError::Rejected { status: status.as_u16() }.into());
		}

		let login = ParseError::decode::<LoginResponse>(
			LOGIN_ENDPOINT,
			status.as_u16(),
			response.body(),
		)
		.map_err(AuthError::MalformedResponse)?;

		Ok(BearerToken::parse(login.token)?)
	}
}
impl<C> Clone for Authenticator<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { config: self.config.clone(), transport: self.transport.clone() }
	}
}
impl<C> Debug for Authenticator<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator")
			.field("login_url", &self.config.endpoint_url(LOGIN_ENDPOINT).ok())
			.field("username", &self.config.credentials.username)
			.finish()
	}
}
