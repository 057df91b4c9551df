//! Property tests for login/logout against the demo directory.

use std::sync::Arc;

use hrm_auth::{
    CredentialDirectory, InMemoryStore, KeyValueStore, LoginOutcome, NoLatency, SESSION_KEY,
    SessionStore, StaticDirectory,
};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn fresh_store() -> (
    SessionStore<StaticDirectory, Arc<InMemoryStore>, NoLatency>,
    Arc<InMemoryStore>,
) {
    let storage = Arc::new(InMemoryStore::new());
    let store = SessionStore::with_latency(
        StaticDirectory::demo().unwrap(),
        Arc::clone(&storage),
        NoLatency,
    );
    store.restore();
    (store, storage)
}

const DEMO_ACCOUNTS: [(&str, &str); 3] = [
    ("admin@hrm.com", "admin123"),
    ("employee@hrm.com", "employee123"),
    ("manager@hrm.com", "manager123"),
];

proptest! {
    #[test]
    fn unknown_emails_never_log_in(email in "[a-z0-9.]{1,12}@[a-z]{1,8}\\.(com|org|net)", password in ".{0,16}") {
        let directory = StaticDirectory::demo().unwrap();
        prop_assume!(directory.lookup_identity(&email).is_none());

        let (store, storage) = fresh_store();
        let outcome = runtime().block_on(store.login(&email, &password));

        prop_assert_eq!(outcome, LoginOutcome::invalid_credentials());
        prop_assert!(!store.is_authenticated());
        prop_assert!(storage.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn wrong_passwords_never_mutate_state(idx in 0usize..3, password in ".{0,16}") {
        let (email, correct) = DEMO_ACCOUNTS[idx];
        prop_assume!(password != correct);

        let (store, storage) = fresh_store();
        let outcome = runtime().block_on(store.login(email, &password));

        prop_assert_eq!(outcome.message.as_str(), "Invalid email or password");
        prop_assert!(store.identity().is_none());
        prop_assert!(storage.is_empty());
    }

    #[test]
    fn valid_pairs_log_in_and_survive_restart(idx in 0usize..3) {
        let (email, password) = DEMO_ACCOUNTS[idx];
        let (store, storage) = fresh_store();

        let outcome = runtime().block_on(store.login(email, password));
        prop_assert!(outcome.success);
        prop_assert!(store.is_authenticated());
        let identity = store.identity().unwrap();
        prop_assert_eq!(identity.email.as_str(), email);

        let restarted = SessionStore::with_latency(
            StaticDirectory::demo().unwrap(),
            Arc::clone(&storage),
            NoLatency,
        );
        prop_assert!(restarted.restore());
        prop_assert_eq!(restarted.identity(), Some(identity));

        restarted.logout();
        prop_assert!(!restarted.is_authenticated());
        prop_assert!(storage.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn arbitrary_persisted_garbage_restores_signed_out(raw in ".{0,64}") {
        let storage = Arc::new(InMemoryStore::new());
        storage.set(SESSION_KEY, &raw).unwrap();

        let store = SessionStore::with_latency(
            StaticDirectory::demo().unwrap(),
            Arc::clone(&storage),
            NoLatency,
        );
        prop_assert!(!store.restore());
        prop_assert!(!store.is_authenticated());
        prop_assert!(!store.is_loading());
    }
}
