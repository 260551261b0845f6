#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Registration of storage clients into a host container.
//!
//! # Purpose
//!
//! Applications wire one client per storage account into their container at
//! startup. Two registrations for the same slot are a programmer error, so
//! this crate tracks every claimed slot and rejects conflicts before anything
//! is installed.
//!
//! # Mental Model
//!
//! 1. **Options:** the caller mutates a default [`StorageOptions`], which is then
//!    validated.
//! 2. **Claim:** the [`Ledger`] atomically reserves the `(ClientTypeId, RegistrationKey)`
//!    pair. Claims are append-only.
//! 3. **Construct:** the caller's factory builds the client once, eagerly.
//! 4. **Install:** the client becomes a singleton (unkeyed) or keyed singleton in
//!    the [`Container`].
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`ClientTypeId`] | Caller-chosen tag naming a client family. |
//! | [`RegistrationKey`] | Unkeyed slot or an explicit key. |
//! | [`Ledger`] | Per-family set of claimed keys. |
//! | [`Registrar`] | Validates, claims, constructs, installs. |
//! | [`Container`] | Host container seam; [`ServiceCollection`] is the in-memory one. |
//!
//! # Invariants
//!
//! - At most one unkeyed and at most one registration per explicit key, per family.
//!   - Enforced in: [`Ledger::try_claim`].
//!   - Tested by: [`crate::invariants::test_single_winner_under_contention`]
//!   - Failure symptom: two clients for the same slot, last install silently shadows.
//!
//! - Failed registrations leave no ledger or container state behind.
//!   - Enforced in: [`Registrar::register`] (validate, check, claim, then install).
//!   - Tested by: [`crate::invariants::test_failed_registration_is_side_effect_free`]
//!   - Failure symptom: a slot stays reserved with nothing installed.
//!
//! - Families never share a claim namespace.
//!   - Enforced in: [`Ledger::try_claim`] (claims partitioned by [`ClientTypeId`]).
//!   - Tested by: [`crate::invariants::test_families_are_partitioned`]
//!   - Failure symptom: registering a table client blocks a blob client.

mod container;
mod error;
mod key;
mod ledger;
mod registrar;

pub use container::{Container, ContainerExt, Instance, ServiceCollection};
pub use error::{ContainerError, RegisterError};
pub use key::{ClientTypeId, RegistrationKey};
pub use ledger::Ledger;
pub use registrar::Registrar;
pub use stowage_primitives::{Credential, CredentialResolver, StorageOptions};

#[cfg(any(test, doc))]
pub(crate) mod invariants;
