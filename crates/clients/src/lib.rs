//! Storage client families and their registration helpers.
//!
//! Each family is a thin client record bound to one account endpoint. Network
//! calls are out of scope; the records exist so applications can register and
//! resolve them by family and key.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stowage_clients::{BlobServiceClient, RegisterStorageClient};
//! use stowage_registry::{ContainerExt, Registrar, ServiceCollection};
//!
//! let registrar = Registrar::new();
//! let services = ServiceCollection::new();
//!
//! registrar.add_client::<BlobServiceClient, _>(&services, |o| o.account_name = "contoso".into())?;
//! registrar.add_keyed_client::<BlobServiceClient, _>(&services, "archive", |o| {
//! 	o.account_name = "contosoarchive".into();
//! })?;
//!
//! let blobs = services.resolve::<BlobServiceClient>(BlobServiceClient::TYPE_ID)?;
//! ```

mod client;
mod config;
mod error;
mod register;

pub use client::{BlobServiceClient, QueueServiceClient, StorageClient, TableServiceClient};
pub use config::{load_and_register, register_config};
pub use error::{Error, Result};
pub use register::RegisterStorageClient;
