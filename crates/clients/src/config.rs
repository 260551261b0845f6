//! Config-driven bulk registration.

use std::path::Path;

use stowage_primitives::{StorageConfig, StorageOptions};
use stowage_registry::{Container, Registrar};

use crate::client::{BlobServiceClient, QueueServiceClient, StorageClient, TableServiceClient};
use crate::error::{Error, Result};

/// Registers every entry of `config`: blob, then table, then queue, each in file order.
///
/// Stops at the first failing entry. Entries registered before it stay
/// registered; each single registration is still all-or-nothing. Returns the
/// number of clients registered.
pub fn register_config<C>(registrar: &Registrar, container: &C, config: &StorageConfig) -> Result<usize>
where
	C: Container + ?Sized,
{
	let mut count = 0;
	count += register_family::<BlobServiceClient, C>(registrar, container, &config.blob)?;
	count += register_family::<TableServiceClient, C>(registrar, container, &config.table)?;
	count += register_family::<QueueServiceClient, C>(registrar, container, &config.queue)?;
	tracing::info!(count, "registered storage clients from config");
	Ok(count)
}

/// Loads the TOML file at `path` and registers every entry.
pub fn load_and_register<C>(registrar: &Registrar, container: &C, path: impl AsRef<Path>) -> Result<usize>
where
	C: Container + ?Sized,
{
	let config = StorageConfig::load(path)?;
	register_config(registrar, container, &config)
}

fn register_family<S, C>(registrar: &Registrar, container: &C, entries: &[StorageOptions]) -> Result<usize>
where
	S: StorageClient,
	C: Container + ?Sized,
{
	for (index, entry) in entries.iter().enumerate() {
		registrar
			.register(container, S::TYPE_ID, |o| *o = entry.clone(), S::build)
			.map_err(|source| Error::Register {
				family: S::SERVICE,
				index,
				source,
			})?;
	}
	Ok(entries.len())
}
