//! Client family definitions.

use std::any::Any;

use stowage_primitives::{Credential, StorageOptions};
use stowage_registry::ClientTypeId;

/// A constructible storage client family.
pub trait StorageClient: Any + Send + Sync + Sized {
	/// Family tag used for ledger claims and container bindings.
	const TYPE_ID: ClientTypeId;
	/// Service label in the account endpoint host.
	const SERVICE: &'static str;

	/// Builds a client for the account in `options`.
	fn build(options: &StorageOptions, credential: &Credential) -> Self;
}

/// Endpoint of `service` for `account`.
fn endpoint(account: &str, service: &str) -> String {
	format!("https://{account}.{service}.core.windows.net/")
}

macro_rules! storage_client {
	($(#[$attr:meta])* $name:ident => $service:literal) => {
		$(#[$attr])*
		#[derive(Debug, Clone, PartialEq, Eq)]
		pub struct $name {
			account_name: String,
			endpoint: String,
			credential: Credential,
		}

		impl $name {
			pub const TYPE_ID: ClientTypeId = ClientTypeId::new(stringify!($name));

			pub fn account_name(&self) -> &str {
				&self.account_name
			}

			pub fn endpoint(&self) -> &str {
				&self.endpoint
			}

			pub fn credential(&self) -> &Credential {
				&self.credential
			}
		}

		impl StorageClient for $name {
			const TYPE_ID: ClientTypeId = $name::TYPE_ID;
			const SERVICE: &'static str = $service;

			fn build(options: &StorageOptions, credential: &Credential) -> Self {
				Self {
					account_name: options.account_name.clone(),
					endpoint: endpoint(&options.account_name, $service),
					credential: credential.clone(),
				}
			}
		}
	};
}

storage_client! {
	/// Client for the blob service of one account.
	BlobServiceClient => "blob"
}

storage_client! {
	/// Client for the table service of one account.
	TableServiceClient => "table"
}

storage_client! {
	/// Client for the queue service of one account.
	QueueServiceClient => "queue"
}
