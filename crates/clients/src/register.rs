use stowage_primitives::StorageOptions;
use stowage_registry::{Container, RegisterError, Registrar};

use crate::client::StorageClient;

/// Typed registration of [`StorageClient`] families.
pub trait RegisterStorageClient {
	/// Registers an `S` configured by `configure`, keyed by `options.key` if set.
	fn add_client<S, C>(
		&self,
		container: &C,
		configure: impl FnOnce(&mut StorageOptions),
	) -> Result<(), RegisterError>
	where
		S: StorageClient,
		C: Container + ?Sized;

	/// Registers an `S` under `key`.
	fn add_keyed_client<S, C>(
		&self,
		container: &C,
		key: impl Into<String>,
		configure: impl FnOnce(&mut StorageOptions),
	) -> Result<(), RegisterError>
	where
		S: StorageClient,
		C: Container + ?Sized;
}

impl RegisterStorageClient for Registrar {
	fn add_client<S, C>(
		&self,
		container: &C,
		configure: impl FnOnce(&mut StorageOptions),
	) -> Result<(), RegisterError>
	where
		S: StorageClient,
		C: Container + ?Sized,
	{
		self.register(container, S::TYPE_ID, configure, S::build)
	}

	fn add_keyed_client<S, C>(
		&self,
		container: &C,
		key: impl Into<String>,
		configure: impl FnOnce(&mut StorageOptions),
	) -> Result<(), RegisterError>
	where
		S: StorageClient,
		C: Container + ?Sized,
	{
		self.register_keyed(container, S::TYPE_ID, key, configure, S::build)
	}
}
