//! Append-only record of claimed registration slots.
//!
//! # Role
//!
//! The ledger is the single source of truth for whether a
//! `(ClientTypeId, RegistrationKey)` pair has been claimed. The unkeyed slot
//! is an explicit member of each family's set, not an absence.
//!
//! # Invariants
//!
//! - Claims are linearizable: concurrent claimants of one slot see exactly one winner
//!   (see `invariants::test_single_winner_under_contention`).
//! - Claims are never released.

use parking_lot::Mutex;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::key::{ClientTypeId, RegistrationKey};

/// Per-family sets of claimed registration keys.
#[derive(Debug, Default)]
pub struct Ledger {
	claims: Mutex<HashMap<ClientTypeId, HashSet<RegistrationKey>>>,
}

impl Ledger {
	/// Creates an empty ledger.
	pub fn new() -> Self {
		Self::default()
	}

	/// Claims `key` within `client`'s family.
	///
	/// Returns `true` if the slot was free and is now claimed, `false` if it
	/// was already claimed. A failed claim does not mutate the ledger.
	pub fn try_claim(&self, client: ClientTypeId, key: &RegistrationKey) -> bool {
		self.claims.lock().entry(client).or_default().insert(key.clone())
	}

	/// Returns whether `key` is claimed within `client`'s family.
	pub fn is_claimed(&self, client: ClientTypeId, key: &RegistrationKey) -> bool {
		self.claims
			.lock()
			.get(&client)
			.is_some_and(|keys| keys.contains(key))
	}

	/// Returns the keys claimed for `client`, unkeyed first, then explicit keys in order.
	pub fn claimed(&self, client: ClientTypeId) -> Vec<RegistrationKey> {
		let mut keys: Vec<_> = self
			.claims
			.lock()
			.get(&client)
			.map(|keys| keys.iter().cloned().collect())
			.unwrap_or_default();
		keys.sort();
		keys
	}

	/// Total number of claims across all families.
	pub fn len(&self) -> usize {
		self.claims.lock().values().map(HashSet::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
