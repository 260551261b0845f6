//! Storage configuration loaded from TOML.
//!
//! A single file lists the accounts to register per client family:
//!
//! ```toml
//! [[blob]]
//! account_name = "contosodata"
//!
//! [[blob]]
//! account_name = "contosoarchive"
//! key = "archive"
//! managed_identity_client_id = "00000000-0000-0000-0000-000000000001"
//!
//! [[table]]
//! account_name = "contosodata"
//! ```
//!
//! Entries are not validated here. Validation happens per entry at
//! registration time so a bad entry reports the same messages as a bad
//! programmatic registration.

use std::path::Path;

use serde::Deserialize;

use crate::StorageOptions;
use crate::error::{ConfigError, Result};

/// Per-family lists of storage options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
	pub blob: Vec<StorageOptions>,
	pub table: Vec<StorageOptions>,
	pub queue: Vec<StorageOptions>,
}

impl StorageConfig {
	/// Parses configuration from a TOML string.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Reads and parses configuration from `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml_str(&input)?;
		tracing::debug!(
			path = %path.display(),
			blob = config.blob.len(),
			table = config.table.len(),
			queue = config.queue.len(),
			"loaded storage config",
		);
		Ok(config)
	}

	/// Total number of entries across all families.
	pub fn len(&self) -> usize {
		self.blob.len() + self.table.len() + self.queue.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
