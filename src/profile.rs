//! Provider payload records and the normalization overlay applied before provisioning.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, auth::SubjectId};

const EMAIL_LOCAL_PREFIX: &str = "not-really-an-email-";
const EMAIL_DOMAIN_SUFFIX: &str = "@fake.com";
const EMAIL_FIELD: &str = "email";
const DISPLAY_NAME_FIELD: &str = "displayName";

/// Raw profile payload returned by the provider after authentication.
///
/// The shape is provider-defined and deliberately not validated here; fields are
/// carried through to provisioning untouched unless the normalization overlay
/// claims them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderProfile(BTreeMap<String, Value>);
impl ProviderProfile {
	/// Creates an empty profile.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a field, replacing any previous value under the same name.
	pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(field.into(), value.into());
	}

	/// Returns the value stored under `field`, if any.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	/// Returns true when the provider returned no fields at all.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl FromIterator<(String, Value)> for ProviderProfile {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (String, Value)>,
	{
		Self(iter.into_iter().collect())
	}
}

/// Provider-specific token exchange parameters.
///
/// ORCiD returns the authenticated iD and the account's public name next to the
/// token payload. Only `orcid` is required downstream; everything else is kept
/// verbatim in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CallbackParams {
	/// Authenticated ORCiD iD, the unique subject identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub orcid: Option<SubjectId>,
	/// Public account name, when the account exposes one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Remaining provider-specific response parameters.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}
impl CallbackParams {
	/// Creates parameters carrying only the authenticated subject identifier.
	pub fn for_subject(subject: SubjectId) -> Self {
		Self { orcid: Some(subject), ..Default::default() }
	}

	/// Attaches the account's public name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}
}

/// Profile record handed to the user-provisioning interface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProfile {
	/// Synthetic lookup address derived from the subject identifier.
	///
	/// Always present and non-empty: the downstream provisioning interface uses
	/// it as the user-lookup key even though the provider supplies no address.
	pub email: String,
	/// Display name resolved from the callback parameters or the raw profile.
	#[serde(default, rename = "displayName", skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Remaining provider profile fields, passed through untouched.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}
impl NormalizedProfile {
	/// Applies the normalization overlay to a callback payload.
	///
	/// The synthetic email always wins over a provider-supplied `email` field and
	/// a params-supplied name wins over a provider-supplied `displayName`; every
	/// other profile field is preserved verbatim. A payload without a subject
	/// identifier is rejected outright rather than yielding a degenerate address
	/// that would alias unrelated accounts onto one lookup key.
	pub fn from_callback(params: &CallbackParams, profile: &ProviderProfile) -> Result<Self> {
		let subject =
			params.orcid.as_ref().ok_or(Error::MalformedProviderResponse { missing: "orcid" })?;
		let mut extra = profile.0.clone();

		extra.remove(EMAIL_FIELD);

		let display_name = if let Some(name) = params.name.clone() {
			extra.remove(DISPLAY_NAME_FIELD);

			Some(name)
		} else if matches!(extra.get(DISPLAY_NAME_FIELD), Some(Value::String(_))) {
			match extra.remove(DISPLAY_NAME_FIELD) {
				Some(Value::String(name)) => Some(name),
				_ => None,
			}
		} else {
			None
		};

		Ok(Self { email: synthetic_email(subject), display_name, extra })
	}
}

/// Derives the deterministic placeholder address for a subject identifier.
///
/// Deliberately not a reachable mailbox; the provider does not expose verified
/// addresses through the sign-in flow, and the host still needs a stable lookup
/// key per account.
pub fn synthetic_email(subject: &SubjectId) -> String {
	format!("{EMAIL_LOCAL_PREFIX}{subject}{EMAIL_DOMAIN_SUFFIX}")
}
