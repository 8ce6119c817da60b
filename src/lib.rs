//! Plug ORCiD sign-in into a host application's pluggable authentication stack: configure the
//! strategy once, let the adapter normalize provider profiles, and receive provisioned users
//! through an explicit provisioning contract.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod obs;
pub mod profile;
pub mod provider;
pub mod provision;
pub mod registry;
pub mod strategy;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience fixtures and helpers for unit tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::TokenSecret,
		config::StrategyConfig,
		provision::{ProvisionError, ProvisionFuture, ProvisionRequest, ProvisionedUser, UserProvisioner},
		strategy::OrcidStrategy,
	};

	/// Builds a valid production-environment configuration fixture.
	pub fn test_strategy_config() -> StrategyConfig {
		StrategyConfig {
			client_id: "APP-TEST".into(),
			client_secret: TokenSecret::new("test-secret"),
			callback_url: Url::parse("https://host.example.com/login/orcid/callback")
				.expect("Callback URL fixture should parse successfully."),
			sandbox: false,
		}
	}

	/// Provisioner stub that fails every request with a backend error.
	#[derive(Clone, Debug, Default)]
	pub struct FailingProvisioner;
	impl UserProvisioner for FailingProvisioner {
		fn provision(&self, _request: ProvisionRequest) -> ProvisionFuture<'_, ProvisionedUser> {
			Box::pin(async {
				Err(ProvisionError::Backend { message: "storage unavailable".into() })
			})
		}
	}

	/// Constructs an [`OrcidStrategy`] wired to the provided provisioner.
	pub fn build_test_strategy(provisioner: Arc<dyn UserProvisioner>) -> OrcidStrategy {
		OrcidStrategy::new(test_strategy_config(), provisioner)
			.expect("Strategy fixture should construct successfully.")
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
pub use url;
