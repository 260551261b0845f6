//! Host container seam.
//!
//! # Role
//!
//! Registration installs finished clients through [`Container`] and never
//! resolves them itself, except for the unkeyed pre-check in
//! [`Registrar::register`](crate::Registrar::register). [`ServiceCollection`]
//! is a minimal thread-safe implementation holding singleton and keyed
//! singleton bindings; it has no scopes or lifetimes beyond "lives as long as
//! the collection".

use std::any::{Any, type_name};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::error::ContainerError;
use crate::key::ClientTypeId;

/// Type-erased client instance shared with the container.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Binding primitives a host container exposes to registration.
pub trait Container: Send + Sync {
	/// Installs `instance` as the singleton for `client`.
	///
	/// Returns `false` and drops `instance` if the slot is already bound.
	fn install_singleton(&self, client: ClientTypeId, instance: Instance) -> bool;

	/// Installs `instance` as the singleton for `client` under `key`.
	///
	/// Returns `false` and drops `instance` if the slot is already bound.
	fn install_keyed_singleton(&self, client: ClientTypeId, key: &str, instance: Instance) -> bool;

	/// Returns whether an unkeyed binding exists for `client`.
	fn has_singleton(&self, client: ClientTypeId) -> bool;

	/// Returns whether a binding exists for `client` under `key`.
	fn has_keyed_singleton(&self, client: ClientTypeId, key: &str) -> bool;

	/// Resolves the unkeyed binding for `client`.
	fn resolve_instance(&self, client: ClientTypeId) -> Result<Instance, ContainerError>;

	/// Resolves the binding for `client` under `key`.
	fn resolve_keyed_instance(
		&self,
		client: ClientTypeId,
		key: &str,
	) -> Result<Instance, ContainerError>;
}

/// Typed resolution over any [`Container`].
pub trait ContainerExt: Container {
	/// Resolves the unkeyed binding for `client` as a `T`.
	fn resolve<T: Any + Send + Sync>(&self, client: ClientTypeId) -> Result<Arc<T>, ContainerError> {
		downcast(client, self.resolve_instance(client)?)
	}

	/// Resolves the binding for `client` under `key` as a `T`.
	fn resolve_keyed<T: Any + Send + Sync>(
		&self,
		client: ClientTypeId,
		key: &str,
	) -> Result<Arc<T>, ContainerError> {
		downcast(client, self.resolve_keyed_instance(client, key)?)
	}
}

impl<C: Container + ?Sized> ContainerExt for C {}

fn downcast<T: Any + Send + Sync>(
	client: ClientTypeId,
	instance: Instance,
) -> Result<Arc<T>, ContainerError> {
	instance
		.downcast::<T>()
		.map_err(|_| ContainerError::TypeMismatch {
			client,
			expected: type_name::<T>(),
		})
}

/// In-memory container of singleton and keyed singleton bindings.
///
/// Bindings are never replaced: a second install into an occupied slot is
/// ignored and logged.
#[derive(Default)]
pub struct ServiceCollection {
	singletons: RwLock<HashMap<ClientTypeId, Instance>>,
	keyed: RwLock<HashMap<ClientTypeId, HashMap<Box<str>, Instance>>>,
}

impl ServiceCollection {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the explicit keys bound for `client`, sorted.
	pub fn keys(&self, client: ClientTypeId) -> Vec<String> {
		let mut keys: Vec<String> = self
			.keyed
			.read()
			.get(&client)
			.map(|bindings| bindings.keys().map(|k| k.to_string()).collect())
			.unwrap_or_default();
		keys.sort();
		keys
	}

	/// Total number of bindings, keyed and unkeyed.
	pub fn len(&self) -> usize {
		self.singletons.read().len() + self.keyed.read().values().map(HashMap::len).sum::<usize>()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl std::fmt::Debug for ServiceCollection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut singletons: Vec<_> = self.singletons.read().keys().copied().collect();
		singletons.sort();
		f.debug_struct("ServiceCollection")
			.field("singletons", &singletons)
			.field("keyed", &self.keyed.read().len())
			.finish()
	}
}

impl Container for ServiceCollection {
	fn install_singleton(&self, client: ClientTypeId, instance: Instance) -> bool {
		let mut singletons = self.singletons.write();
		if singletons.contains_key(&client) {
			tracing::warn!(%client, "singleton already bound; ignoring install");
			return false;
		}
		singletons.insert(client, instance);
		true
	}

	fn install_keyed_singleton(&self, client: ClientTypeId, key: &str, instance: Instance) -> bool {
		let mut keyed = self.keyed.write();
		let bindings = keyed.entry(client).or_default();
		if bindings.contains_key(key) {
			tracing::warn!(%client, key, "keyed singleton already bound; ignoring install");
			return false;
		}
		bindings.insert(Box::from(key), instance);
		true
	}

	fn has_singleton(&self, client: ClientTypeId) -> bool {
		self.singletons.read().contains_key(&client)
	}

	fn has_keyed_singleton(&self, client: ClientTypeId, key: &str) -> bool {
		self.keyed
			.read()
			.get(&client)
			.is_some_and(|bindings| bindings.contains_key(key))
	}

	fn resolve_instance(&self, client: ClientTypeId) -> Result<Instance, ContainerError> {
		self.singletons
			.read()
			.get(&client)
			.cloned()
			.ok_or(ContainerError::NotFound { client, key: None })
	}

	fn resolve_keyed_instance(
		&self,
		client: ClientTypeId,
		key: &str,
	) -> Result<Instance, ContainerError> {
		self.keyed
			.read()
			.get(&client)
			.and_then(|bindings| bindings.get(key))
			.cloned()
			.ok_or_else(|| ContainerError::NotFound {
				client,
				key: Some(key.to_string()),
			})
	}
}
