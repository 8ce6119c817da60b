//! Strategy configuration supplied by the host at startup.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Immutable configuration for one ORCiD strategy instance.
///
/// The host's configuration loader produces this record once at startup;
/// validation runs when the strategy is constructed, so a malformed record fails
/// the process before the first callback rather than during one.
#[derive(Clone, Debug, Deserialize)]
pub struct StrategyConfig {
	/// OAuth2 client identifier issued by ORCiD.
	pub client_id: String,
	/// OAuth2 client secret issued by ORCiD.
	pub client_secret: TokenSecret,
	/// Absolute URL the provider redirects to after consent.
	pub callback_url: Url,
	/// Targets the sandbox registry instead of production.
	#[serde(default)]
	pub sandbox: bool,
}
impl StrategyConfig {
	/// Creates a production-environment configuration.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		callback_url: Url,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			callback_url,
			sandbox: false,
		}
	}

	/// Overrides the targeted environment.
	pub fn with_sandbox(mut self, sandbox: bool) -> Self {
		self.sandbox = sandbox;

		self
	}

	pub(crate) fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingClientId);
		}
		if self.client_secret.is_empty() {
			return Err(ConfigError::MissingClientSecret);
		}

		validate_callback_url(&self.callback_url)
	}
}

fn validate_callback_url(url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"https" => Ok(()),
		// Loopback redirects are the one plain-HTTP shape the provider accepts.
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ConfigError::InsecureCallbackUrl { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain == "localhost",
		Some(url::Host::Ipv4(addr)) => addr.is_loopback(),
		Some(url::Host::Ipv6(addr)) => addr.is_loopback(),
		None => false,
	}
}
