#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use stowage_primitives::{Credential, StorageOptions};

use crate::container::ServiceCollection;
use crate::error::RegisterError;
use crate::key::{ClientTypeId, RegistrationKey};
use crate::ledger::Ledger;
use crate::registrar::Registrar;

const BLOB: ClientTypeId = ClientTypeId::new("BlobServiceClient");
const TABLE: ClientTypeId = ClientTypeId::new("TableServiceClient");
const QUEUE: ClientTypeId = ClientTypeId::new("QueueServiceClient");

const CONTENDERS: usize = 16;

struct Marker(usize);

/// Invariant: concurrent claims of one slot have exactly one winner.
///
/// Claimants race through a barrier onto the same unkeyed slot and the same
/// explicit key. Exactly one succeeds per slot, and the ledger holds exactly
/// those two claims afterwards.
pub(crate) fn inv_single_winner_under_contention() {
	let ledger = Ledger::new();
	let barrier = Barrier::new(CONTENDERS);
	let unkeyed_wins = AtomicUsize::new(0);
	let keyed_wins = AtomicUsize::new(0);
	let key = RegistrationKey::Keyed("shared".into());

	thread::scope(|s| {
		for _ in 0..CONTENDERS {
			s.spawn(|| {
				barrier.wait();
				if ledger.try_claim(BLOB, &RegistrationKey::Unkeyed) {
					unkeyed_wins.fetch_add(1, Ordering::SeqCst);
				}
				if ledger.try_claim(BLOB, &key) {
					keyed_wins.fetch_add(1, Ordering::SeqCst);
				}
			});
		}
	});

	assert_eq!(unkeyed_wins.load(Ordering::SeqCst), 1);
	assert_eq!(keyed_wins.load(Ordering::SeqCst), 1);
	assert_eq!(ledger.len(), 2);
}

#[cfg_attr(test, test)]
pub(crate) fn test_single_winner_under_contention() {
	inv_single_winner_under_contention()
}

/// Invariant: concurrent registrations through one registrar install one client per slot.
pub(crate) fn inv_single_install_under_contention() {
	let registrar = Arc::new(Registrar::new());
	let services = Arc::new(ServiceCollection::new());
	let barrier = Arc::new(Barrier::new(CONTENDERS));
	let built = Arc::new(AtomicUsize::new(0));

	let handles: Vec<_> = (0..CONTENDERS)
		.map(|i| {
			let registrar = Arc::clone(&registrar);
			let services = Arc::clone(&services);
			let barrier = Arc::clone(&barrier);
			let built = Arc::clone(&built);
			thread::spawn(move || {
				barrier.wait();
				registrar.register(
					services.as_ref(),
					QUEUE,
					|o| o.account_name = format!("acct{i}"),
					|_: &StorageOptions, _: &Credential| {
						built.fetch_add(1, Ordering::SeqCst);
						Marker(i)
					},
				)
			})
		})
		.collect();

	let results: Vec<_> = handles
		.into_iter()
		.map(|h| h.join().expect("registration thread panicked"))
		.collect();

	let winners = results.iter().filter(|r| r.is_ok()).count();
	assert_eq!(winners, 1);
	assert!(
		results
			.iter()
			.filter_map(|r| r.as_ref().err())
			.all(|e| *e == RegisterError::DuplicateUnkeyed { client: QUEUE })
	);
	assert_eq!(built.load(Ordering::SeqCst), 1);
	assert_eq!(services.len(), 1);
}

#[cfg_attr(test, test)]
pub(crate) fn test_single_install_under_contention() {
	inv_single_install_under_contention()
}

/// Invariant: a failed registration changes neither the ledger nor the container.
pub(crate) fn inv_failed_registration_is_side_effect_free() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();
	let build = |_: &StorageOptions, _: &Credential| Marker(0);

	registrar
		.register(&services, TABLE, |o| o.account_name = "first".into(), build)
		.expect("first registration succeeds");
	registrar
		.register(
			&services,
			TABLE,
			|o| {
				o.account_name = "first".into();
				o.key = Some("k".into());
			},
			build,
		)
		.expect("keyed registration succeeds");

	let claims_before = registrar.ledger().claimed(TABLE);
	let bindings_before = services.len();

	let failures = [
		registrar.register(&services, TABLE, |o| o.account_name = "second".into(), build),
		registrar.register(
			&services,
			TABLE,
			|o| {
				o.account_name = "second".into();
				o.key = Some("k".into());
			},
			build,
		),
		registrar.register(&services, TABLE, |o| o.account_name = "BAD NAME".into(), build),
		registrar.register(
			&services,
			TABLE,
			|o| {
				o.account_name = String::new();
				o.key = Some("fresh".into());
			},
			build,
		),
	];

	assert!(failures.iter().all(Result::is_err));
	assert_eq!(registrar.ledger().claimed(TABLE), claims_before);
	assert_eq!(services.len(), bindings_before);
	assert!(!registrar.ledger().is_claimed(TABLE, &RegistrationKey::Keyed("fresh".into())));
}

#[cfg_attr(test, test)]
pub(crate) fn test_failed_registration_is_side_effect_free() {
	inv_failed_registration_is_side_effect_free()
}

/// Invariant: claims in one family never block another family.
pub(crate) fn inv_families_are_partitioned() {
	let ledger = Ledger::new();
	let keys = [
		RegistrationKey::Unkeyed,
		RegistrationKey::Keyed("primary".into()),
	];

	for family in [BLOB, TABLE, QUEUE] {
		for key in &keys {
			assert!(ledger.try_claim(family, key), "{family} {key} should be free");
		}
	}
	for family in [BLOB, TABLE, QUEUE] {
		assert_eq!(ledger.claimed(family), keys.to_vec());
	}
}

#[cfg_attr(test, test)]
pub(crate) fn test_families_are_partitioned() {
	inv_families_are_partitioned()
}
