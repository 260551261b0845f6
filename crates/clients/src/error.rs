use stowage_primitives::ConfigError;
use stowage_registry::RegisterError;
use thiserror::Error;

/// Errors from config-driven registration.
#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error("{family} entry {index}: {source}")]
	Register {
		family: &'static str,
		index: usize,
		#[source]
		source: RegisterError,
	},
}

pub type Result<T> = std::result::Result<T, Error>;
