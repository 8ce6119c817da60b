//! User-provisioning contracts and the in-memory reference implementation.

// self
use crate::{
	_prelude::*,
	auth::StrategyKey,
	profile::NormalizedProfile,
};

/// Future type returned by [`UserProvisioner`] implementations.
pub type ProvisionFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, ProvisionError>> + 'a + Send>>;

/// Host-side contract that maps an authenticated external identity to an internal
/// user record, creating or updating it.
pub trait UserProvisioner
where
	Self: Send + Sync,
{
	/// Provisions a user for the normalized profile, keyed by its email address.
	fn provision(&self, request: ProvisionRequest) -> ProvisionFuture<'_, ProvisionedUser>;
}

/// Input handed to the provisioning interface for one authenticated callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProvisionRequest {
	/// Normalized profile produced by the strategy adapter.
	pub profile: NormalizedProfile,
	/// Key of the strategy instance that authenticated the user.
	pub provider_key: StrategyKey,
}

/// Internal user record returned by the provisioning interface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProvisionedUser {
	/// Host-assigned user identifier.
	pub id: u64,
	/// Lookup address the user is keyed by.
	pub email: String,
	/// Display name recorded for the user, when known.
	pub display_name: Option<String>,
	/// Strategy instance the user last authenticated through.
	pub provider_key: StrategyKey,
	/// Instant the record was first created.
	pub created_at: OffsetDateTime,
	/// Instant the record was last updated.
	pub updated_at: OffsetDateTime,
}

/// Error type produced by [`UserProvisioner`] implementations.
///
/// Opaque to the strategy adapter, which forwards these verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProvisionError {
	/// A host-side constraint rejected the profile (e.g., duplicate key rules).
	#[error("Provisioning constraint violated: {message}.")]
	Constraint {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure in the host's user storage.
	#[error("Provisioning backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[derive(Debug, Default)]
struct ProvisionerState {
	users: HashMap<String, ProvisionedUser>,
	next_id: u64,
}

type StateHandle = Arc<RwLock<ProvisionerState>>;

/// Thread-safe provisioner that keeps user records in-process for hosts without a
/// persistence layer, demos, and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryProvisioner(StateHandle);
impl MemoryProvisioner {
	/// Looks up the user recorded under `email`, if any.
	pub fn lookup(&self, email: &str) -> Option<ProvisionedUser> {
		self.0.read().users.get(email).cloned()
	}

	/// Number of provisioned users.
	pub fn len(&self) -> usize {
		self.0.read().users.len()
	}

	/// Returns true when no user has been provisioned yet.
	pub fn is_empty(&self) -> bool {
		self.0.read().users.is_empty()
	}

	fn provision_now(
		state: StateHandle,
		request: ProvisionRequest,
	) -> Result<ProvisionedUser, ProvisionError> {
		let ProvisionRequest { profile, provider_key } = request;

		if profile.email.is_empty() {
			return Err(ProvisionError::Constraint {
				message: "profile email must not be empty".into(),
			});
		}

		let now = OffsetDateTime::now_utc();
		let mut guard = state.write();

		match guard.users.get_mut(&profile.email) {
			Some(user) => {
				if profile.display_name.is_some() {
					user.display_name = profile.display_name;
				}

				user.provider_key = provider_key;
				user.updated_at = now;

				Ok(user.clone())
			},
			None => {
				let id = guard.next_id + 1;
				let user = ProvisionedUser {
					id,
					email: profile.email.clone(),
					display_name: profile.display_name,
					provider_key,
					created_at: now,
					updated_at: now,
				};

				guard.next_id = id;
				guard.users.insert(profile.email, user.clone());

				Ok(user)
			},
		}
	}
}
impl UserProvisioner for MemoryProvisioner {
	fn provision(&self, request: ProvisionRequest) -> ProvisionFuture<'_, ProvisionedUser> {
		let state = self.0.clone();

		Box::pin(async move { Self::provision_now(state, request) })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::{auth::SubjectId, error::Error, profile::synthetic_email};

	#[test]
	fn provision_error_converts_into_adapter_error_with_source() {
		let provision_error = ProvisionError::Backend { message: "database unreachable".into() };
		let adapter_error: Error = provision_error.clone().into();

		assert!(matches!(adapter_error, Error::Provision(_)));
		assert!(adapter_error.to_string().contains("database unreachable"));

		let source = StdError::source(&adapter_error)
			.expect("Adapter error should expose the original provisioning error as its source.");

		assert_eq!(source.to_string(), provision_error.to_string());
	}

	#[tokio::test]
	async fn memory_provisioner_creates_users_keyed_by_email() {
		let provisioner = MemoryProvisioner::default();
		let subject =
			SubjectId::new("0000-0002-0000-0001").expect("Subject fixture should be valid.");
		let request = ProvisionRequest {
			profile: NormalizedProfile {
				email: synthetic_email(&subject),
				display_name: Some("Jane Doe".into()),
				extra: BTreeMap::new(),
			},
			provider_key: StrategyKey::new("orcid").expect("Key fixture should be valid."),
		};
		let user = provisioner
			.provision(request)
			.await
			.expect("Provisioning a fresh profile should succeed.");

		assert_eq!(user.email, synthetic_email(&subject));
		assert_eq!(provisioner.lookup(&user.email).map(|found| found.id), Some(user.id));
		assert_eq!(provisioner.len(), 1);
	}
}
