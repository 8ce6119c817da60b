//! ORCiD endpoint metadata and OAuth2 client construction.
//!
//! Only client construction and the consent URL live here; the handshake itself
//! (redirect handling, token exchange, state validation) belongs to the host's
//! OAuth2 machinery.

// crates.io
use oauth2::{
	AuthUrl, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet, RedirectUrl, Scope,
	TokenUrl, basic::BasicClient,
};
// self
use crate::{_prelude::*, config::StrategyConfig, error::ConfigError};

/// OAuth2 client configured for one ORCiD environment: authorization and token
/// endpoints set, everything else left untouched.
pub type ConfiguredOrcidClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Scope requested for plain sign-in against the public ORCiD API.
pub const AUTHENTICATE_SCOPE: &str = "/authenticate";

/// Authorization + token endpoint pair for one ORCiD environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrcidEndpoints {
	/// Authorization endpoint users are redirected to for consent.
	pub authorization: &'static str,
	/// Token endpoint used by the host's exchange step.
	pub token: &'static str,
}
impl OrcidEndpoints {
	/// Production registry endpoints.
	pub const PRODUCTION: Self = Self {
		authorization: "https://orcid.org/oauth/authorize",
		token: "https://orcid.org/oauth/token",
	};
	/// Sandbox registry endpoints used for member integration testing.
	pub const SANDBOX: Self = Self {
		authorization: "https://sandbox.orcid.org/oauth/authorize",
		token: "https://sandbox.orcid.org/oauth/token",
	};

	/// Selects the endpoint set matching the configured environment.
	pub fn for_environment(sandbox: bool) -> Self {
		if sandbox { Self::SANDBOX } else { Self::PRODUCTION }
	}
}

/// Builds the OAuth2 client for the configured environment and callback URL.
///
/// Failure here is the registration-time fatal path: blank credentials and
/// unusable callback URLs never make it into a registry.
pub(crate) fn build_oauth_client(
	config: &StrategyConfig,
) -> Result<ConfiguredOrcidClient, ConfigError> {
	config.validate()?;

	let endpoints = OrcidEndpoints::for_environment(config.sandbox);
	let auth_url = AuthUrl::new(endpoints.authorization.to_owned())
		.map_err(|source| ConfigError::InvalidEndpoint { source })?;
	let token_url = TokenUrl::new(endpoints.token.to_owned())
		.map_err(|source| ConfigError::InvalidEndpoint { source })?;
	let redirect_url = RedirectUrl::new(config.callback_url.to_string())
		.map_err(|source| ConfigError::InvalidCallbackUrl { source })?;

	Ok(BasicClient::new(ClientId::new(config.client_id.clone()))
		.set_client_secret(ClientSecret::new(config.client_secret.expose().to_owned()))
		.set_auth_uri(auth_url)
		.set_token_uri(token_url)
		.set_redirect_uri(redirect_url))
}

/// Builds the consent URL for a caller-supplied opaque state value.
pub(crate) fn authorize_url(client: &ConfiguredOrcidClient, state: &str) -> Url {
	let state = CsrfToken::new(state.to_owned());
	let (url, _state) = client
		.authorize_url(move || state)
		.add_scope(Scope::new(AUTHENTICATE_SCOPE.to_owned()))
		.url();

	url
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[test]
	fn endpoint_sets_are_https() {
		for endpoints in [OrcidEndpoints::PRODUCTION, OrcidEndpoints::SANDBOX] {
			for endpoint in [endpoints.authorization, endpoints.token] {
				let url = Url::parse(endpoint).expect("Endpoint constant should parse.");

				assert_eq!(url.scheme(), "https");
			}
		}
	}

	#[test]
	fn environment_selection_matches_flag() {
		assert_eq!(OrcidEndpoints::for_environment(false), OrcidEndpoints::PRODUCTION);
		assert_eq!(OrcidEndpoints::for_environment(true), OrcidEndpoints::SANDBOX);
	}

	#[test]
	fn authorize_url_carries_client_state_and_scope() {
		let config = test_strategy_config();
		let client =
			build_oauth_client(&config).expect("Client should build from a valid configuration.");
		let url = authorize_url(&client, "opaque-state");
		let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

		assert_eq!(url.host_str(), Some("orcid.org"));
		assert_eq!(pairs.get("response_type"), Some(&"code".into()));
		assert_eq!(pairs.get("client_id"), Some(&config.client_id));
		assert_eq!(pairs.get("state"), Some(&"opaque-state".into()));
		assert_eq!(pairs.get("scope"), Some(&AUTHENTICATE_SCOPE.into()));
		assert_eq!(pairs.get("redirect_uri"), Some(&config.callback_url.to_string()));
	}

	#[test]
	fn sandbox_flag_switches_authorization_host() {
		let config = test_strategy_config().with_sandbox(true);
		let client =
			build_oauth_client(&config).expect("Sandbox client should build successfully.");
		let url = authorize_url(&client, "s");

		assert_eq!(url.host_str(), Some("sandbox.orcid.org"));
	}
}
