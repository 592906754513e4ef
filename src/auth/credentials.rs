//! Service-account credentials exchanged for bearer tokens.

// self
use crate::{_prelude::*, error::ConfigError};

/// Redacted secret wrapper keeping passwords out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);
impl Secret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Secret").field(&"<redacted>").finish()
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Username/password pair posted to the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Account name.
	pub username: String,
	/// Account password.
	pub password: Secret,
}
impl Credentials {
	/// Creates credentials after rejecting an empty username.
	pub fn new(
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let username = username.into();

		if username.trim().is_empty() {
			return Err(ConfigError::EmptyUsername);
		}

		Ok(Self { username, password: Secret::new(password) })
	}

	pub(crate) fn login_body(&self) -> LoginBody<'_> {
		LoginBody { username: &self.username, password: self.password.expose() }
	}
}

/// JSON payload for `POST /auth/login`.
#[derive(Serialize)]
pub(crate) struct LoginBody<'a> {
	username: &'a str,
	password: &'a str,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn password_never_reaches_debug_output() {
		let credentials = Credentials::new("manager1", "hunter2").expect("Fixture should be valid.");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("manager1"));
		assert!(!rendered.contains("hunter2"));
		assert_eq!(format!("{}", credentials.password), "<redacted>");
	}

	#[test]
	fn empty_username_is_rejected() {
		assert!(matches!(Credentials::new("  ", "pw"), Err(ConfigError::EmptyUsername)));
	}

	#[test]
	fn login_body_serializes_both_fields() {
		let credentials = Credentials::new("manager1", "pw").expect("Fixture should be valid.");
		let body = serde_json::to_value(credentials.login_body())
			.expect("Login body should serialize to JSON.");

		assert_eq!(body, serde_json::json!({ "username": "manager1", "password": "pw" }));
	}
}
