//! Credentials handed to client factories.
//!
//! Token acquisition is out of scope: a [`Credential`] only records which
//! identity a client should authenticate as. Any failure surfaces later, when
//! the client first talks to the service.

use std::fmt;

/// Identity a storage client authenticates as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Credential {
	/// Ambient identity chain of the host environment.
	Default,
	/// A specific user-assigned managed identity.
	ManagedIdentity {
		/// Client id of the identity.
		client_id: String,
	},
}

impl fmt::Display for Credential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Default => write!(f, "default"),
			Self::ManagedIdentity { client_id } => write!(f, "managed-identity({client_id})"),
		}
	}
}

/// Produces a credential from an optional identity hint.
///
/// Resolution is synchronous and structurally infallible.
pub trait CredentialResolver: Send + Sync {
	fn resolve(&self, identity_hint: Option<&str>) -> Credential;
}

impl<F> CredentialResolver for F
where
	F: Fn(Option<&str>) -> Credential + Send + Sync,
{
	fn resolve(&self, identity_hint: Option<&str>) -> Credential {
		self(identity_hint)
	}
}

/// Maps a non-blank hint to a managed identity and everything else to [`Credential::Default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCredentialResolver;

impl CredentialResolver for DefaultCredentialResolver {
	fn resolve(&self, identity_hint: Option<&str>) -> Credential {
		let credential = match identity_hint.map(str::trim) {
			Some(id) if !id.is_empty() => Credential::ManagedIdentity {
				client_id: id.to_string(),
			},
			_ => Credential::Default,
		};
		tracing::trace!(%credential, "resolved credential");
		credential
	}
}
