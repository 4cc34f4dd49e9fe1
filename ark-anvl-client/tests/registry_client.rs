//! End-to-end client behavior against the in-memory registry.

use ark_anvl::marshal::record_from_args;
use ark_anvl::{AnvlRecord, BaseConfig};
use ark_anvl_client::{
    Credentials, Method, RegistryClient, RegistryError, SessionStore, SimulatedRegistry,
};

fn base() -> BaseConfig {
    BaseConfig::new("13030", "c7").unwrap()
}

fn account() -> Credentials {
    Credentials::new("apitest", "apitest")
}

#[test]
fn identifier_lifecycle() {
    let registry = SimulatedRegistry::new();
    let client = RegistryClient::new(&registry, base());

    let metadata = record_from_args(["erc.who:Quinn", "erc.what:The Eskimo, really"]).unwrap();
    let ark = client.mint(&metadata).unwrap();
    assert_eq!(ark.naan(), "13030");
    assert_eq!(ark.shoulder(), "c7");
    assert_eq!(registry.len(), 1);

    let changes = record_from_args(["erc.when:1978"]).unwrap();
    client.update(ark.as_str(), &changes).unwrap();

    let record = client.get(ark.as_str()).unwrap();
    assert_eq!(record.get("erc.what"), Some("The Eskimo, really"));
    assert_eq!(record.get("erc.when"), Some("1978"));
    assert_eq!(record.ark(), Some(ark.as_str()));

    client.delete(ark.as_str()).unwrap();
    assert!(registry.is_empty());
}

#[test]
fn shorthand_targets_the_base_shoulder() {
    let registry = SimulatedRegistry::new();
    let client = RegistryClient::new(&registry, base());

    let ark = client.create("x2w", &AnvlRecord::new()).unwrap();
    assert_eq!(ark.as_str(), "ark:/13030/c7x2w");
    assert!(registry.record("ark:/13030/c7x2w").is_some());

    // the same identifier reached three ways
    for id in ["x2w", "c7x2w", "ark:/13030/c7x2w"] {
        assert_eq!(client.get(id).unwrap().ark(), Some("ark:/13030/c7x2w"));
    }
}

#[test]
fn values_with_reserved_characters_survive() {
    let registry = SimulatedRegistry::new();
    let client = RegistryClient::new(&registry, base());

    let mut metadata = AnvlRecord::new();
    metadata.insert("_target", "http://example.org/a?b=100%");
    metadata.insert("erc.what", "line one\nline two\r\nline three");
    let ark = client.mint(&metadata).unwrap();

    let record = client.get(ark.as_str()).unwrap();
    assert_eq!(record.get("_target"), Some("http://example.org/a?b=100%"));
    assert_eq!(record.get("erc.what"), Some("line one\nline two\r\nline three"));
}

#[test]
fn duplicate_create_surfaces_registry_reason() {
    let registry = SimulatedRegistry::new();
    let client = RegistryClient::new(&registry, base());
    client.create("x2w", &AnvlRecord::new()).unwrap();

    let err = client.create("x2w", &AnvlRecord::new()).unwrap_err();
    match &err {
        RegistryError::Failed { reason, body } => {
            assert_eq!(reason, "bad request - identifier already exists");
            assert!(body.starts_with("error:"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn writes_need_authentication() {
    let registry = SimulatedRegistry::with_account(account());

    let anonymous = RegistryClient::new(&registry, base());
    let err = anonymous.mint(&AnvlRecord::new()).unwrap_err();
    assert!(matches!(err, RegistryError::Failed { .. }));

    let authorized = RegistryClient::new(&registry, base()).with_credentials(account());
    let ark = authorized.mint(&AnvlRecord::new()).unwrap();

    // reads stay public
    assert_eq!(anonymous.get(ark.as_str()).unwrap().ark(), Some(ark.as_str()));
}

#[test]
fn session_survives_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session"));
    let registry = SimulatedRegistry::with_account(account());

    // first invocation: log in and persist the cookie
    let mut first = RegistryClient::new(&registry, base()).with_credentials(account());
    let cookie = first.login().unwrap();
    store.save(&cookie).unwrap();

    // second invocation: no credentials, only the stored cookie
    let cookie = store.load().unwrap().unwrap();
    let mut second = RegistryClient::new(&registry, base()).with_session(cookie);
    let ark = second.mint(&AnvlRecord::new()).unwrap();
    assert!(registry.record(ark.as_str()).is_some());

    second.logout().unwrap();
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);

    let requests = registry.requests();
    let last = requests.last().unwrap();
    assert_eq!(last.method(), Method::Get);
    assert_eq!(last.path(), "/logout");
}

#[test]
fn requests_carry_anvl_bodies() {
    let registry = SimulatedRegistry::new();
    let client = RegistryClient::new(&registry, base());
    let metadata = record_from_args(["erc.who:Quinn: Jr."]).unwrap();
    client.create("x2w", &metadata).unwrap();

    let requests = registry.requests();
    let create = &requests[0];
    assert_eq!(create.method(), Method::Put);
    assert_eq!(create.path(), "/id/ark:/13030/c7x2w");
    assert_eq!(create.body(), Some("erc.who: Quinn%3A Jr.\n"));
}

#[test]
fn extension_delimiters_reach_the_registry() {
    let registry = SimulatedRegistry::new();
    let client = RegistryClient::new(&registry, base());

    let ark = client.create("x2w/page?2#top", &AnvlRecord::new()).unwrap();
    assert_eq!(ark.as_str(), "ark:/13030/c7x2w/page?2#top");
    assert_eq!(registry.requests()[0].path(), "/id/ark:/13030/c7x2w/page%3F2%23top");
    assert!(registry.record("ark:/13030/c7x2w/page?2#top").is_some());

    let record = client.get("c7x2w/page?2#top").unwrap();
    assert_eq!(record.ark(), Some("ark:/13030/c7x2w/page?2#top"));
}
