//! Bearer token wrapper that redacts sensitive material.

// crates.io
use http::HeaderValue;
// self
use crate::{_prelude::*, error::AuthError};

/// Opaque bearer token issued by the login endpoint.
///
/// The value is validated once at login so building the `Authorization` header can never fail
/// later on the request path.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);
impl BearerToken {
	/// Validates a raw token string returned by the login endpoint.
	pub fn parse(raw: impl Into<String>) -> Result<Self, AuthError> {
		let raw = raw.into();

		if raw.is_empty() {
			return Err(AuthError::InvalidToken { reason: "token is empty" });
		}
		if !raw.bytes().all(|b| b.is_ascii_graphic()) {
			return Err(AuthError::InvalidToken {
				reason: "token contains whitespace or non-ASCII characters",
			});
		}

		Ok(Self(raw))
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Builds the `Authorization: Bearer <token>` header value, marked sensitive.
	pub fn authorization_header(&self) -> HeaderValue {
		let mut value = HeaderValue::try_from(format!("Bearer {}", self.0))
			.unwrap_or_else(|_| HeaderValue::from_static("Bearer"));

		value.set_sensitive(true);

		value
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BearerToken").field(&"<redacted>").finish()
	}
}
impl Display for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_formatters_redact() {
		let token = BearerToken::parse("abc").expect("Fixture token should be valid.");

		assert_eq!(format!("{token:?}"), "BearerToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
	}

	#[test]
	fn authorization_header_is_sensitive() {
		let token = BearerToken::parse("abc.def-123").expect("Fixture token should be valid.");
		let header = token.authorization_header();

		assert_eq!(header.to_str().expect("Header should be ASCII."), "Bearer abc.def-123");
		assert!(header.is_sensitive());
	}

	#[test]
	fn unusable_tokens_are_rejected() {
		assert!(BearerToken::parse("").is_err());
		assert!(BearerToken::parse("two words").is_err());
		assert!(BearerToken::parse("line\nbreak").is_err());
	}
}
