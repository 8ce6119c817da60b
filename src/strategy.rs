//! The ORCiD strategy adapter: registration and callback handling.

// self
use crate::{
	_prelude::*,
	auth::{StrategyKey, TokenPair},
	config::StrategyConfig,
	error::ConfigError,
	obs::{self, CallbackOutcome, CallbackSpan},
	profile::{CallbackParams, NormalizedProfile, ProviderProfile},
	provider::{self, ConfiguredOrcidClient},
	provision::{ProvisionRequest, ProvisionedUser, UserProvisioner},
	registry::{AuthRegistry, AuthStrategy, StrategyFuture},
};

/// Name the strategy registers under by default.
pub const PROVIDER_NAME: &str = "orcid";

/// Per-request context recovered from the host's routing layer.
///
/// Carries only the key of the strategy instance handling the in-flight request,
/// which keeps multiple concurrently configured instances of the same provider
/// distinguishable at provisioning time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackContext {
	/// Key of the strategy instance resolved for this request.
	pub strategy: StrategyKey,
}
impl CallbackContext {
	/// Creates a context for the given strategy instance key.
	pub fn new(strategy: StrategyKey) -> Self {
		Self { strategy }
	}
}

/// Bridges ORCiD sign-in to the host's user-provisioning interface.
///
/// The adapter holds no state of its own between callbacks; each invocation is an
/// independent normalize-then-provision pass. The provisioner is an explicit
/// dependency so the adapter never reaches into process-wide host state.
pub struct OrcidStrategy {
	oauth_client: ConfiguredOrcidClient,
	provisioner: Arc<dyn UserProvisioner>,
	sandbox: bool,
}
impl OrcidStrategy {
	/// Constructs the strategy, validating the configuration up front.
	///
	/// A malformed configuration (blank credentials, unusable callback URL) fails
	/// here, at startup, and never reaches a registry.
	pub fn new(
		config: StrategyConfig,
		provisioner: Arc<dyn UserProvisioner>,
	) -> Result<Self, ConfigError> {
		let sandbox = config.sandbox;
		let oauth_client = provider::build_oauth_client(&config)?;

		Ok(Self { oauth_client, provisioner, sandbox })
	}

	/// Returns true when the strategy targets the sandbox registry.
	pub fn is_sandbox(&self) -> bool {
		self.sandbox
	}

	/// Builds the consent URL for a caller-supplied opaque state value.
	///
	/// The handshake itself (redirect handling, token exchange, state validation)
	/// stays with the host's OAuth2 machinery.
	pub fn authorize_url(&self, state: &str) -> Url {
		provider::authorize_url(&self.oauth_client, state)
	}
}
impl AuthStrategy for OrcidStrategy {
	fn kind(&self) -> &'static str {
		PROVIDER_NAME
	}

	fn authenticate<'a>(
		&'a self,
		ctx: &'a CallbackContext,
		_tokens: &'a TokenPair,
		params: &'a CallbackParams,
		profile: &'a ProviderProfile,
	) -> StrategyFuture<'a, ProvisionedUser> {
		let span = CallbackSpan::new(ctx.strategy.as_ref(), "authenticate");

		Box::pin(span.instrument(async move {
			obs::record_callback_outcome(CallbackOutcome::Attempt);

			let profile = match NormalizedProfile::from_callback(params, profile) {
				Ok(profile) => profile,
				Err(err) => {
					obs::record_callback_outcome(CallbackOutcome::Failure);

					return Err(err);
				},
			};
			let request =
				ProvisionRequest { profile, provider_key: ctx.strategy.clone() };

			match self.provisioner.provision(request).await {
				Ok(user) => {
					obs::record_callback_outcome(CallbackOutcome::Success);

					Ok(user)
				},
				Err(err) => {
					obs::record_callback_outcome(CallbackOutcome::Failure);

					Err(err.into())
				},
			}
		}))
	}
}
impl Debug for OrcidStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OrcidStrategy").field("sandbox", &self.sandbox).finish()
	}
}

/// Registers one configured ORCiD strategy under the provider's name.
///
/// Re-registration under the same name replaces the prior entry; the registry is
/// otherwise untouched.
pub fn register(
	registry: &dyn AuthRegistry,
	config: StrategyConfig,
	provisioner: Arc<dyn UserProvisioner>,
) -> Result<(), ConfigError> {
	let key = StrategyKey::new(PROVIDER_NAME)?;

	register_as(registry, key, config, provisioner)
}

/// Registers a strategy under a caller-chosen key.
///
/// Supports several concurrently configured instances of the provider, each with
/// its own configuration; the key round-trips through [`CallbackContext`] and
/// ends up as the provisioned user's provider key.
pub fn register_as(
	registry: &dyn AuthRegistry,
	key: StrategyKey,
	config: StrategyConfig,
	provisioner: Arc<dyn UserProvisioner>,
) -> Result<(), ConfigError> {
	let strategy = OrcidStrategy::new(config, provisioner)?;

	registry.register(key, Arc::new(strategy));

	Ok(())
}
