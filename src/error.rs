//! Adapter-level error types shared across registration and callback handling.

// self
use crate::_prelude::*;

/// Adapter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical adapter error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem raised while constructing a strategy.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provisioning failure forwarded verbatim from the host interface.
	#[error("{0}")]
	Provision(
		#[from]
		#[source]
		crate::provision::ProvisionError,
	),

	/// Provider response omitted a field the adapter cannot proceed without.
	#[error("Provider response is missing the `{missing}` field.")]
	MalformedProviderResponse {
		/// Name of the absent field.
		missing: &'static str,
	},
}

/// Configuration and validation failures raised at registration time.
///
/// All of these are fatal at startup; none is recoverable once the host begins
/// serving callbacks.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Client identifier was empty or whitespace.
	#[error("Client identifier must not be blank.")]
	MissingClientId,
	/// Client secret was empty.
	#[error("Client secret must not be blank.")]
	MissingClientSecret,
	/// Callback URL cannot be used as an OAuth redirect.
	#[error("Callback URL is invalid.")]
	InvalidCallbackUrl {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Callback URL must use HTTPS outside of loopback development hosts.
	#[error("Callback URL must use HTTPS: {url}.")]
	InsecureCallbackUrl {
		/// Callback URL that failed validation.
		url: String,
	},
	/// Provider endpoint failed to parse.
	#[error("Provider endpoint is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Strategy registration key failed identifier validation.
	#[error(transparent)]
	InvalidKey(#[from] crate::auth::IdentifierError),
}
