use std::fmt;

use stowage_primitives::StorageOptions;

/// Tag naming a client family.
///
/// Families are chosen by the caller at the call site. Two ids are the same
/// family iff their names are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientTypeId(&'static str);

impl ClientTypeId {
	pub const fn new(name: &'static str) -> Self {
		Self(name)
	}

	pub const fn name(self) -> &'static str {
		self.0
	}
}

impl fmt::Display for ClientTypeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}

/// Slot a registration claims within its family.
///
/// Keys compare by exact, case-sensitive string equality. `Unkeyed` sorts
/// before every explicit key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistrationKey {
	/// The single slot resolvable without a key.
	Unkeyed,
	/// An explicit, non-blank key.
	Keyed(String),
}

impl RegistrationKey {
	/// Derives the effective key from options.
	///
	/// Absent, empty and whitespace-only keys are unkeyed. Anything else is
	/// kept verbatim, surrounding whitespace included.
	pub fn from_options(options: &StorageOptions) -> Self {
		match options.explicit_key() {
			Some(k) => Self::Keyed(k.to_string()),
			None => Self::Unkeyed,
		}
	}

	pub fn is_unkeyed(&self) -> bool {
		matches!(self, Self::Unkeyed)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Unkeyed => None,
			Self::Keyed(k) => Some(k),
		}
	}
}

impl fmt::Display for RegistrationKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Unkeyed => f.write_str("<unkeyed>"),
			Self::Keyed(k) => write!(f, "'{k}'"),
		}
	}
}
