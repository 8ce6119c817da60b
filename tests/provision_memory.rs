// std
use std::{collections::BTreeMap, sync::Arc};
// self
use orcid_bridge::{
	auth::{StrategyKey, SubjectId},
	profile::{NormalizedProfile, synthetic_email},
	provision::{MemoryProvisioner, ProvisionError, ProvisionRequest, UserProvisioner},
};

fn make_request(subject: &str, name: Option<&str>, provider_key: &str) -> ProvisionRequest {
	let subject =
		SubjectId::new(subject).expect("Failed to build subject identifier for provisioner tests.");

	ProvisionRequest {
		profile: NormalizedProfile {
			email: synthetic_email(&subject),
			display_name: name.map(str::to_owned),
			extra: BTreeMap::new(),
		},
		provider_key: StrategyKey::new(provider_key)
			.expect("Failed to build provider key for provisioner tests."),
	}
}

#[tokio::test]
async fn creates_users_with_sequential_identifiers() {
	let provisioner = MemoryProvisioner::default();
	let first = provisioner
		.provision(make_request("0000-0002-0000-0001", Some("First User"), "orcid"))
		.await
		.expect("First provisioning should succeed.");
	let second = provisioner
		.provision(make_request("0000-0002-0000-0002", None, "orcid"))
		.await
		.expect("Second provisioning should succeed.");

	assert_eq!(first.id, 1);
	assert_eq!(second.id, 2);
	assert_eq!(first.created_at, first.updated_at);
	assert_eq!(provisioner.len(), 2);
}

#[tokio::test]
async fn repeat_provisioning_updates_the_existing_record() {
	let provisioner = MemoryProvisioner::default();
	let created = provisioner
		.provision(make_request("0000-0002-0000-0003", Some("Original Name"), "orcid"))
		.await
		.expect("Initial provisioning should succeed.");
	let updated = provisioner
		.provision(make_request("0000-0002-0000-0003", Some("Updated Name"), "orcid-sandbox"))
		.await
		.expect("Repeat provisioning should succeed.");

	assert_eq!(updated.id, created.id);
	assert_eq!(updated.created_at, created.created_at);
	assert!(updated.updated_at >= created.updated_at);
	assert_eq!(updated.display_name.as_deref(), Some("Updated Name"));
	assert_eq!(updated.provider_key.as_ref(), "orcid-sandbox");
	assert_eq!(provisioner.len(), 1);
}

#[tokio::test]
async fn missing_display_name_keeps_the_recorded_one() {
	let provisioner = MemoryProvisioner::default();

	provisioner
		.provision(make_request("0000-0002-0000-0004", Some("Kept Name"), "orcid"))
		.await
		.expect("Initial provisioning should succeed.");

	let updated = provisioner
		.provision(make_request("0000-0002-0000-0004", None, "orcid"))
		.await
		.expect("Repeat provisioning without a name should succeed.");

	assert_eq!(updated.display_name.as_deref(), Some("Kept Name"));
}

#[tokio::test]
async fn empty_email_violates_the_lookup_key_constraint() {
	let provisioner = MemoryProvisioner::default();
	let request = ProvisionRequest {
		profile: NormalizedProfile {
			email: String::new(),
			display_name: None,
			extra: BTreeMap::new(),
		},
		provider_key: StrategyKey::new("orcid")
			.expect("Failed to build provider key for constraint test."),
	};
	let err = provisioner
		.provision(request)
		.await
		.expect_err("An empty lookup key should be rejected.");

	assert!(matches!(err, ProvisionError::Constraint { .. }));
	assert!(provisioner.is_empty());
}

#[tokio::test]
async fn concurrent_provisioning_converges_on_one_record() {
	let provisioner = Arc::new(MemoryProvisioner::default());
	let provisioner_a = provisioner.clone();
	let provisioner_b = provisioner.clone();
	let task_a = tokio::spawn(async move {
		provisioner_a
			.provision(make_request("0000-0002-0000-0005", Some("Task A"), "orcid"))
			.await
			.expect("Concurrent provisioning task A should succeed.")
	});
	let task_b = tokio::spawn(async move {
		provisioner_b
			.provision(make_request("0000-0002-0000-0005", Some("Task B"), "orcid"))
			.await
			.expect("Concurrent provisioning task B should succeed.")
	});
	let (user_a, user_b) = tokio::join!(task_a, task_b);
	let user_a = user_a.expect("Concurrent task A should not panic.");
	let user_b = user_b.expect("Concurrent task B should not panic.");

	assert_eq!(user_a.id, user_b.id, "both callbacks must land on the same user");
	assert_eq!(provisioner.len(), 1);
}
