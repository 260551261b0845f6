use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;
use crate::container::{ContainerExt, ServiceCollection};
use crate::error::ContainerError;

const BLOB: ClientTypeId = ClientTypeId::new("BlobServiceClient");
const TABLE: ClientTypeId = ClientTypeId::new("TableServiceClient");

#[derive(Debug)]
struct FakeClient {
	account: String,
	credential: Credential,
}

fn fake(options: &StorageOptions, credential: &Credential) -> FakeClient {
	FakeClient {
		account: options.account_name.clone(),
		credential: credential.clone(),
	}
}

fn named(name: &'static str) -> impl FnOnce(&mut StorageOptions) {
	move |o| o.account_name = name.to_string()
}

fn named_keyed(name: &'static str, key: &'static str) -> impl FnOnce(&mut StorageOptions) {
	move |o| {
		o.account_name = name.to_string();
		o.key = Some(key.to_string());
	}
}

#[test]
fn test_register_unkeyed() {
	let _ = tracing_subscriber::fmt::try_init();
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar
		.register(&services, BLOB, named("alpha"), fake)
		.unwrap();

	let client = services.resolve::<FakeClient>(BLOB).unwrap();
	assert_eq!(client.account, "alpha");
	assert_eq!(client.credential, Credential::Default);
	assert!(registrar.ledger().is_claimed(BLOB, &RegistrationKey::Unkeyed));
}

/// A second unkeyed registration fails and the first stays resolvable.
#[test]
fn test_second_unkeyed_rejected() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar.register(&services, BLOB, named("aaa"), fake).unwrap();
	let err = registrar
		.register(&services, BLOB, named("bbb"), fake)
		.unwrap_err();

	assert_eq!(err, RegisterError::DuplicateUnkeyed { client: BLOB });
	assert!(err.to_string().contains("Cannot register a second"));
	assert!(err.to_string().contains("BlobServiceClient"));
	assert_eq!(services.resolve::<FakeClient>(BLOB).unwrap().account, "aaa");
}

#[test]
fn test_same_key_rejected() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar
		.register(&services, BLOB, named_keyed("x", "dup"), fake)
		.unwrap();
	let err = registrar
		.register(&services, BLOB, named_keyed("y", "dup"), fake)
		.unwrap_err();

	assert_eq!(
		err,
		RegisterError::DuplicateKeyed {
			client: BLOB,
			key: "dup".into()
		}
	);
	assert!(err.to_string().contains("already registered with the key 'dup'"));
	assert_eq!(
		services
			.resolve_keyed::<FakeClient>(BLOB, "dup")
			.unwrap()
			.account,
		"x"
	);
}

#[test]
fn test_distinct_keys_resolve_distinct_instances() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar
		.register(&services, BLOB, named_keyed("one", "k1"), fake)
		.unwrap();
	registrar
		.register(&services, BLOB, named_keyed("two", "k2"), fake)
		.unwrap();

	let k1 = services.resolve_keyed::<FakeClient>(BLOB, "k1").unwrap();
	let k2 = services.resolve_keyed::<FakeClient>(BLOB, "k2").unwrap();
	assert!(!Arc::ptr_eq(&k1, &k2));
	assert_eq!(k1.account, "one");
	assert_eq!(k2.account, "two");
}

/// Unkeyed and keyed registrations coexist in either order.
#[test]
fn test_unkeyed_and_keyed_independent() {
	for keyed_first in [false, true] {
		let registrar = Registrar::new();
		let services = ServiceCollection::new();
		let unkeyed = |r: &Registrar| r.register(&services, BLOB, named("plain"), fake);
		let keyed = |r: &Registrar| r.register(&services, BLOB, named_keyed("withkey", "k1"), fake);

		if keyed_first {
			keyed(&registrar).unwrap();
			unkeyed(&registrar).unwrap();
		} else {
			unkeyed(&registrar).unwrap();
			keyed(&registrar).unwrap();
		}

		let plain = services.resolve::<FakeClient>(BLOB).unwrap();
		let with_key = services.resolve_keyed::<FakeClient>(BLOB, "k1").unwrap();
		assert!(!Arc::ptr_eq(&plain, &with_key));
		assert_eq!(plain.account, "plain");
		assert_eq!(with_key.account, "withkey");
	}
}

#[test]
fn test_families_do_not_conflict() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar.register(&services, BLOB, named("shared"), fake).unwrap();
	registrar.register(&services, TABLE, named("shared"), fake).unwrap();
	registrar
		.register(&services, BLOB, named_keyed("shared", "k"), fake)
		.unwrap();
	registrar
		.register(&services, TABLE, named_keyed("shared", "k"), fake)
		.unwrap();

	assert_eq!(registrar.ledger().len(), 4);
	assert_eq!(services.len(), 4);
}

/// Invalid options never reach the factory or the ledger.
#[test]
fn test_invalid_options_skip_factory() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();
	let calls = AtomicUsize::new(0);
	let counting = |o: &StorageOptions, c: &Credential| {
		calls.fetch_add(1, Ordering::SeqCst);
		fake(o, c)
	};

	let empty = registrar
		.register(&services, BLOB, named(""), counting)
		.unwrap_err();
	let bad_pattern = registrar
		.register(&services, BLOB, named("Not_Valid"), counting)
		.unwrap_err();

	for err in [empty, bad_pattern] {
		match err {
			RegisterError::Validation { client, messages } => {
				assert_eq!(client, BLOB);
				assert_eq!(messages.len(), 1);
				assert!(messages[0].starts_with("account_name:"));
			}
			other => panic!("expected validation error, got {other:?}"),
		}
	}
	assert_eq!(calls.load(Ordering::SeqCst), 0);
	assert!(registrar.ledger().is_empty());
	assert!(services.is_empty());
}

#[test]
fn test_factory_runs_once_per_success() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();
	let calls = AtomicUsize::new(0);
	let counting = |o: &StorageOptions, c: &Credential| {
		calls.fetch_add(1, Ordering::SeqCst);
		fake(o, c)
	};

	registrar.register(&services, BLOB, named("aaa"), counting).unwrap();
	assert_eq!(calls.load(Ordering::SeqCst), 1);

	let _ = services.resolve::<FakeClient>(BLOB).unwrap();
	let _ = services.resolve::<FakeClient>(BLOB).unwrap();
	assert_eq!(calls.load(Ordering::SeqCst), 1);

	assert!(registrar.register(&services, BLOB, named("bbb"), counting).is_err());
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_whitespace_key_is_unkeyed() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar
		.register(&services, BLOB, named_keyed("aaa", "   "), fake)
		.unwrap();

	assert!(services.has_singleton(BLOB));
	assert!(services.keys(BLOB).is_empty());
	let err = registrar
		.register(&services, BLOB, named("bbb"), fake)
		.unwrap_err();
	assert_eq!(err, RegisterError::DuplicateUnkeyed { client: BLOB });
}

#[test]
fn test_keys_compare_case_sensitively() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar
		.register(&services, BLOB, named_keyed("aaa", "Primary"), fake)
		.unwrap();
	registrar
		.register(&services, BLOB, named_keyed("bbb", "primary"), fake)
		.unwrap();

	assert_eq!(services.keys(BLOB), vec!["Primary".to_string(), "primary".to_string()]);
}

#[test]
fn test_padded_key_kept_verbatim() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar
		.register(&services, BLOB, named_keyed("aaa", " k "), fake)
		.unwrap();

	assert!(services.resolve_keyed::<FakeClient>(BLOB, " k ").is_ok());
	assert!(matches!(
		services.resolve_keyed::<FakeClient>(BLOB, "k"),
		Err(ContainerError::NotFound { .. })
	));
}

/// An unkeyed binding installed directly into the container blocks unkeyed
/// registration without reserving the ledger slot.
#[test]
fn test_preexisting_container_binding() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();
	services.install_singleton(
		BLOB,
		Arc::new(FakeClient {
			account: "direct".into(),
			credential: Credential::Default,
		}),
	);

	let err = registrar
		.register(&services, BLOB, named("aaa"), fake)
		.unwrap_err();

	assert_eq!(err, RegisterError::DuplicateUnkeyed { client: BLOB });
	assert!(registrar.ledger().is_empty());
	assert_eq!(services.resolve::<FakeClient>(BLOB).unwrap().account, "direct");

	registrar
		.register(&services, BLOB, named_keyed("aaa", "k"), fake)
		.unwrap();
}

/// A keyed binding installed directly into the container blocks that key
/// without reserving the ledger slot or running the factory.
#[test]
fn test_preexisting_keyed_container_binding() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();
	let calls = AtomicUsize::new(0);
	let counting = |o: &StorageOptions, c: &Credential| {
		calls.fetch_add(1, Ordering::SeqCst);
		fake(o, c)
	};
	services.install_keyed_singleton(
		BLOB,
		"k",
		Arc::new(FakeClient {
			account: "direct".into(),
			credential: Credential::Default,
		}),
	);

	let err = registrar
		.register(&services, BLOB, named_keyed("mine", "k"), counting)
		.unwrap_err();

	assert_eq!(
		err,
		RegisterError::DuplicateKeyed {
			client: BLOB,
			key: "k".into()
		}
	);
	assert_eq!(calls.load(Ordering::SeqCst), 0);
	assert!(!registrar.ledger().is_claimed(BLOB, &RegistrationKey::Keyed("k".into())));
	assert_eq!(
		services.resolve_keyed::<FakeClient>(BLOB, "k").unwrap().account,
		"direct"
	);

	registrar
		.register(&services, BLOB, named_keyed("mine", "other"), counting)
		.unwrap();
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Container whose occupancy checks miss bindings made behind the registrar's back.
struct BlindContainer(ServiceCollection);

impl Container for BlindContainer {
	fn install_singleton(&self, client: ClientTypeId, instance: Instance) -> bool {
		self.0.install_singleton(client, instance)
	}

	fn install_keyed_singleton(&self, client: ClientTypeId, key: &str, instance: Instance) -> bool {
		self.0.install_keyed_singleton(client, key, instance)
	}

	fn has_singleton(&self, _client: ClientTypeId) -> bool {
		false
	}

	fn has_keyed_singleton(&self, _client: ClientTypeId, _key: &str) -> bool {
		false
	}

	fn resolve_instance(&self, client: ClientTypeId) -> Result<Instance, ContainerError> {
		self.0.resolve_instance(client)
	}

	fn resolve_keyed_instance(
		&self,
		client: ClientTypeId,
		key: &str,
	) -> Result<Instance, ContainerError> {
		self.0.resolve_keyed_instance(client, key)
	}
}

/// A refused install is reported as a conflict, never as success.
#[test]
fn test_refused_install_is_an_error() {
	let registrar = Registrar::new();
	let container = BlindContainer(ServiceCollection::new());
	let direct = || {
		Arc::new(FakeClient {
			account: "direct".into(),
			credential: Credential::Default,
		})
	};
	container.0.install_singleton(BLOB, direct());
	container.0.install_keyed_singleton(BLOB, "k", direct());

	let unkeyed = registrar
		.register(&container, BLOB, named("mine"), fake)
		.unwrap_err();
	let keyed = registrar
		.register(&container, BLOB, named_keyed("mine", "k"), fake)
		.unwrap_err();

	assert_eq!(unkeyed, RegisterError::DuplicateUnkeyed { client: BLOB });
	assert_eq!(
		keyed,
		RegisterError::DuplicateKeyed {
			client: BLOB,
			key: "k".into()
		}
	);
	assert_eq!(container.resolve::<FakeClient>(BLOB).unwrap().account, "direct");
	assert_eq!(
		container.resolve_keyed::<FakeClient>(BLOB, "k").unwrap().account,
		"direct"
	);
	assert_eq!(container.0.len(), 2);
}

#[test]
fn test_identity_hint_reaches_factory() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar
		.register(
			&services,
			BLOB,
			|o| {
				o.account_name = "aaa".into();
				o.identity_hint = Some("mi-client".into());
			},
			fake,
		)
		.unwrap();

	assert_eq!(
		services.resolve::<FakeClient>(BLOB).unwrap().credential,
		Credential::ManagedIdentity {
			client_id: "mi-client".into()
		}
	);
}

#[test]
fn test_custom_resolver() {
	let registrar = Registrar::with_resolver(|hint: Option<&str>| Credential::ManagedIdentity {
		client_id: format!("custom:{}", hint.unwrap_or("none")),
	});
	let services = ServiceCollection::new();

	registrar.register(&services, TABLE, named("aaa"), fake).unwrap();

	assert_eq!(
		services.resolve::<FakeClient>(TABLE).unwrap().credential,
		Credential::ManagedIdentity {
			client_id: "custom:none".into()
		}
	);
}

#[test]
fn test_register_keyed_overrides_options_key() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar
		.register_keyed(&services, BLOB, "forced", named_keyed("aaa", "ignored"), fake)
		.unwrap();

	assert_eq!(services.keys(BLOB), vec!["forced".to_string()]);
	assert_eq!(
		registrar.ledger().claimed(BLOB),
		vec![RegistrationKey::Keyed("forced".into())]
	);
}

/// Unkeyed, conflicting unkeyed, then keyed in one family.
#[test]
fn test_unkeyed_conflict_then_keyed() {
	let registrar = Registrar::new();
	let services = ServiceCollection::new();

	registrar.register(&services, TABLE, named("a"), fake).unwrap();
	let err = registrar
		.register(&services, TABLE, named("b"), fake)
		.unwrap_err();
	assert!(err.to_string().contains("Cannot register a second TableServiceClient"));

	registrar
		.register(&services, TABLE, named_keyed("c", "k1"), fake)
		.unwrap();
	let unkeyed = services.resolve::<FakeClient>(TABLE).unwrap();
	let keyed = services.resolve_keyed::<FakeClient>(TABLE, "k1").unwrap();
	assert_eq!(unkeyed.account, "a");
	assert_eq!(keyed.account, "c");
	assert!(!Arc::ptr_eq(&unkeyed, &keyed));
}
