use crate::key::{ClientTypeId, RegistrationKey};

/// Registration failures. Each one is fatal to its call and leaves no state behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
	/// Options failed validation; nothing was resolved, claimed or built.
	#[error("invalid options for {client}: {}", .messages.join("; "))]
	Validation {
		client: ClientTypeId,
		messages: Vec<String>,
	},

	/// The unkeyed slot of this family is already taken.
	#[error("Cannot register a second {client} without a key.")]
	DuplicateUnkeyed { client: ClientTypeId },

	/// The explicit key is already taken in this family.
	#[error("A {client} is already registered with the key '{key}'.")]
	DuplicateKeyed { client: ClientTypeId, key: String },
}

impl RegisterError {
	/// Builds the conflict error for a slot that could not be claimed.
	pub(crate) fn duplicate(client: ClientTypeId, key: &RegistrationKey) -> Self {
		match key {
			RegistrationKey::Unkeyed => Self::DuplicateUnkeyed { client },
			RegistrationKey::Keyed(k) => Self::DuplicateKeyed {
				client,
				key: k.clone(),
			},
		}
	}

	pub fn client(&self) -> ClientTypeId {
		match self {
			Self::Validation { client, .. }
			| Self::DuplicateUnkeyed { client }
			| Self::DuplicateKeyed { client, .. } => *client,
		}
	}
}

/// Lookup failures raised by a container.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
	#[error("no {client} registered{}", key_suffix(.key))]
	NotFound {
		client: ClientTypeId,
		key: Option<String>,
	},

	#[error("{client} binding is not a {expected}")]
	TypeMismatch {
		client: ClientTypeId,
		expected: &'static str,
	},
}

fn key_suffix(key: &Option<String>) -> String {
	match key {
		Some(k) => format!(" with the key '{k}'"),
		None => String::new(),
	}
}
