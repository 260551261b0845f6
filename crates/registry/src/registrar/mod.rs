//! Registration entry point.
//!
//! # Role
//!
//! [`Registrar`] owns the [`Ledger`] for one container build and drives every
//! registration through the same sequence: configure, validate, resolve a
//! credential, check and claim the slot, construct, install. Every failure
//! happens before the container is touched.

use std::any::Any;
use std::sync::Arc;

use stowage_primitives::{
	Credential, CredentialResolver, DefaultCredentialResolver, StorageOptions,
};

use crate::container::{Container, Instance};
use crate::error::RegisterError;
use crate::key::{ClientTypeId, RegistrationKey};
use crate::ledger::Ledger;

/// Validates, claims and installs storage clients.
pub struct Registrar {
	ledger: Ledger,
	resolver: Arc<dyn CredentialResolver>,
}

impl Default for Registrar {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Registrar {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registrar")
			.field("ledger", &self.ledger)
			.finish_non_exhaustive()
	}
}

impl Registrar {
	/// Creates a registrar with an empty ledger and the default credential resolver.
	pub fn new() -> Self {
		Self::with_resolver(DefaultCredentialResolver)
	}

	/// Creates a registrar with an empty ledger and a custom credential resolver.
	pub fn with_resolver(resolver: impl CredentialResolver + 'static) -> Self {
		Self {
			ledger: Ledger::new(),
			resolver: Arc::new(resolver),
		}
	}

	/// Claims recorded so far.
	pub fn ledger(&self) -> &Ledger {
		&self.ledger
	}

	/// Registers one client of family `client`.
	///
	/// `configure` mutates default options. The effective key is derived from
	/// `options.key` (see [`RegistrationKey::from_options`]). On success
	/// `factory` has run exactly once and its result is bound in `container`
	/// as a singleton (unkeyed) or keyed singleton.
	///
	/// # Errors
	///
	/// - [`RegisterError::Validation`] if the options are invalid. Nothing else runs.
	/// - [`RegisterError::DuplicateUnkeyed`] if the family already has an unkeyed
	///   client, whether claimed here or bound directly in `container`.
	/// - [`RegisterError::DuplicateKeyed`] if the key is already claimed here or
	///   bound directly in `container`.
	///
	/// The container is unchanged on error. The ledger is unchanged too, unless
	/// another writer binds the slot directly between the pre-check and the
	/// install; the slot then stays claimed since it is occupied.
	pub fn register<C, T, Cfg, F>(
		&self,
		container: &C,
		client: ClientTypeId,
		configure: Cfg,
		factory: F,
	) -> Result<(), RegisterError>
	where
		C: Container + ?Sized,
		T: Any + Send + Sync,
		Cfg: FnOnce(&mut StorageOptions),
		F: FnOnce(&StorageOptions, &Credential) -> T,
	{
		let mut options = StorageOptions::default();
		configure(&mut options);

		if let Err(messages) = options.validate() {
			tracing::debug!(%client, ?messages, "rejected invalid storage options");
			return Err(RegisterError::Validation { client, messages });
		}

		let credential = self.resolver.resolve(options.identity_hint.as_deref());
		let key = RegistrationKey::from_options(&options);

		// Bindings made outside this registrar are invisible to the ledger.
		let bound = match &key {
			RegistrationKey::Unkeyed => container.has_singleton(client),
			RegistrationKey::Keyed(k) => container.has_keyed_singleton(client, k),
		};
		if bound {
			tracing::debug!(%client, %key, "binding already present in container");
			return Err(RegisterError::duplicate(client, &key));
		}

		if !self.ledger.try_claim(client, &key) {
			tracing::debug!(%client, %key, "registration slot already claimed");
			return Err(RegisterError::duplicate(client, &key));
		}

		let instance: Instance = Arc::new(factory(&options, &credential));
		let installed = match &key {
			RegistrationKey::Unkeyed => container.install_singleton(client, instance),
			RegistrationKey::Keyed(k) => container.install_keyed_singleton(client, k, instance),
		};
		// Lost a race with a direct install. The claim stays: the slot is taken either way.
		if !installed {
			tracing::debug!(%client, %key, "container slot bound concurrently; client dropped");
			return Err(RegisterError::duplicate(client, &key));
		}

		tracing::info!(
			%client,
			%key,
			account = %options.account_name,
			%credential,
			"registered storage client",
		);
		Ok(())
	}

	/// Registers one client under `key`, overriding any key set by `configure`.
	///
	/// A blank `key` registers the unkeyed slot, the same as a blank
	/// `options.key`.
	pub fn register_keyed<C, T, Cfg, F>(
		&self,
		container: &C,
		client: ClientTypeId,
		key: impl Into<String>,
		configure: Cfg,
		factory: F,
	) -> Result<(), RegisterError>
	where
		C: Container + ?Sized,
		T: Any + Send + Sync,
		Cfg: FnOnce(&mut StorageOptions),
		F: FnOnce(&StorageOptions, &Credential) -> T,
	{
		let key = key.into();
		self.register(
			container,
			client,
			|options| {
				configure(options);
				options.key = Some(key);
			},
			factory,
		)
	}
}

#[cfg(test)]
mod tests;
