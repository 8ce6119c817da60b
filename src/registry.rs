//! Host-facing strategy registry contracts and the in-memory implementation.

// self
use crate::{
	_prelude::*,
	auth::{StrategyKey, TokenPair},
	profile::{CallbackParams, ProviderProfile},
	provision::ProvisionedUser,
	strategy::CallbackContext,
};

/// Future type returned by [`AuthStrategy::authenticate`].
pub type StrategyFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Capability a host registry accepts: one named, pluggable authentication method.
///
/// Implementations must stay stateless across invocations; the host may run any
/// number of callbacks concurrently against a single instance.
pub trait AuthStrategy
where
	Self: Send + Sync,
{
	/// Stable provider kind label (e.g., `orcid`).
	fn kind(&self) -> &'static str;

	/// Handles one provider callback after a successful token exchange.
	fn authenticate<'a>(
		&'a self,
		ctx: &'a CallbackContext,
		tokens: &'a TokenPair,
		params: &'a CallbackParams,
		profile: &'a ProviderProfile,
	) -> StrategyFuture<'a, ProvisionedUser>;
}

/// Registry contract consumed at startup.
pub trait AuthRegistry
where
	Self: Send + Sync,
{
	/// Adds a strategy under `key`, replacing any prior entry with that name.
	fn register(&self, key: StrategyKey, strategy: Arc<dyn AuthStrategy>);
}

type StrategyMap = Arc<RwLock<HashMap<StrategyKey, Arc<dyn AuthStrategy>>>>;

/// Thread-safe registry that keeps strategies in-process for hosts and tests.
#[derive(Clone, Default)]
pub struct MemoryRegistry(StrategyMap);
impl MemoryRegistry {
	/// Looks up the strategy registered under `key`.
	pub fn resolve(&self, key: &str) -> Option<Arc<dyn AuthStrategy>> {
		self.0.read().get(key).cloned()
	}

	/// Number of registered strategies.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when nothing has been registered yet.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl AuthRegistry for MemoryRegistry {
	fn register(&self, key: StrategyKey, strategy: Arc<dyn AuthStrategy>) {
		self.0.write().insert(key, strategy);
	}
}
impl Debug for MemoryRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MemoryRegistry").field("len", &self.len()).finish()
	}
}
