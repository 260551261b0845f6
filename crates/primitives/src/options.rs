use serde::Deserialize;

use crate::validate;

/// Options shared by every storage client family.
///
/// Registration starts from [`StorageOptions::default`] and lets the caller
/// mutate it, so every field has an empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageOptions {
	/// Storage account name. Must match the account naming pattern.
	pub account_name: String,
	/// Registration key. Absent, empty or whitespace-only means unkeyed.
	pub key: Option<String>,
	/// Client id of a managed identity used to build the credential.
	#[serde(alias = "managed_identity_client_id")]
	pub identity_hint: Option<String>,
}

impl StorageOptions {
	/// Creates options for `account_name` with no key and no identity hint.
	pub fn new(account_name: impl Into<String>) -> Self {
		Self {
			account_name: account_name.into(),
			..Self::default()
		}
	}

	/// Sets the registration key.
	pub fn with_key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Sets the identity hint.
	pub fn with_identity_hint(mut self, hint: impl Into<String>) -> Self {
		self.identity_hint = Some(hint.into());
		self
	}

	/// Returns the explicit key, treating empty and whitespace-only keys as absent.
	///
	/// The returned key is not trimmed.
	pub fn explicit_key(&self) -> Option<&str> {
		self.key.as_deref().filter(|k| !k.trim().is_empty())
	}

	/// Validates the options, returning every field message in order on failure.
	pub fn validate(&self) -> Result<(), Vec<String>> {
		let mut messages = Vec::new();
		if let Err(msg) = validate::validate_account_name(&self.account_name) {
			messages.push(format!("account_name: {msg}"));
		}
		if let Some(hint) = &self.identity_hint
			&& hint.trim().is_empty()
		{
			messages.push("identity_hint: must not be blank when set".to_string());
		}

		if messages.is_empty() {
			Ok(())
		} else {
			Err(messages)
		}
	}
}
