//! Standard validators for storage options.
//!
//! These functions back [`StorageOptions::validate`](crate::StorageOptions::validate).

use std::sync::LazyLock;

use regex::Regex;

/// Minimum account name length.
pub const ACCOUNT_NAME_MIN: usize = 1;
/// Maximum account name length.
pub const ACCOUNT_NAME_MAX: usize = 24;

static ACCOUNT_NAME: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(&format!(
		"^[a-z0-9]{{{ACCOUNT_NAME_MIN},{ACCOUNT_NAME_MAX}}}$"
	))
	.expect("account name pattern is valid")
});

/// Validates a storage account name: 1-24 lowercase ASCII letters or digits.
pub fn validate_account_name(name: &str) -> Result<(), String> {
	if name.is_empty() {
		return Err("must not be empty".to_string());
	}
	if ACCOUNT_NAME.is_match(name) {
		Ok(())
	} else {
		Err(format!(
			"must be {ACCOUNT_NAME_MIN}-{ACCOUNT_NAME_MAX} lowercase letters or digits, got '{name}'"
		))
	}
}
