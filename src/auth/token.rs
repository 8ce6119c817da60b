//! Opaque token material delivered alongside provider callbacks.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns true when the wrapped value is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Access/refresh token pair delivered with a provider callback.
///
/// The adapter never interprets these values; they are carried so hosts can pass
/// them to downstream consumers of the authenticated session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
	/// Access token issued by the provider during the exchange.
	pub access_token: TokenSecret,
	/// Refresh token issued by the provider, when the grant includes one.
	pub refresh_token: Option<TokenSecret>,
}
impl TokenPair {
	/// Wraps an access token with no refresh counterpart.
	pub fn bearer(access: impl Into<String>) -> Self {
		Self { access_token: TokenSecret::new(access), refresh_token: None }
	}

	/// Attaches a refresh token to the pair.
	pub fn with_refresh(mut self, refresh: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(refresh));

		self
	}
}
