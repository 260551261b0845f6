//! Collaborator types for storage client registration.
//!
//! Everything the registration core treats as opaque lives here: the options
//! record and its validator, credentials and their resolver, and the TOML
//! config surface that feeds options in bulk.

/// TOML configuration loading.
pub mod config;
/// Credential values and resolvers.
pub mod credential;
/// Error types for config loading.
pub mod error;
/// Storage client options.
pub mod options;
/// Option validation rules.
pub mod validate;

pub use config::StorageConfig;
pub use credential::{Credential, CredentialResolver, DefaultCredentialResolver};
pub use error::{ConfigError, Result};
pub use options::StorageOptions;
pub use validate::{ACCOUNT_NAME_MAX, ACCOUNT_NAME_MIN, validate_account_name};
