//! Storage engine integration tests
//!
//! The record types here are hand-written equivalents of what
//! `protostore-build` emits: a prost message plus an `Entity` impl pushing
//! key tokens in field-number order.

use std::io;

use protostore::{Entity, Error, KeyBuf, Store};

#[derive(Clone, PartialEq, prost::Message)]
struct User {
    #[prost(int64, tag = "1")]
    id: i64,
    #[prost(string, tag = "2")]
    name: String,
}

impl Entity for User {
    const TYPE_NAME: &'static str = "test.v1.User";

    fn primary_key(&self) -> Vec<u8> {
        let mut key = KeyBuf::new();
        key.push_int(self.id);
        key.finish()
    }
}

#[derive(Clone, PartialEq, prost::Message)]
struct Session {
    #[prost(string, tag = "1")]
    user: String,
    #[prost(string, tag = "2")]
    device: String,
    #[prost(uint64, tag = "3")]
    started_at: u64,
}

impl Entity for Session {
    const TYPE_NAME: &'static str = "test.v1.Session";

    fn primary_key(&self) -> Vec<u8> {
        let mut key = KeyBuf::new();
        key.push_str(&self.user);
        key.push_str(&self.device);
        key.finish()
    }
}

fn user(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

fn store() -> Store {
    let store = Store::in_memory().unwrap();
    store.init::<User>().unwrap();
    store.init::<Session>().unwrap();
    store
}

// ============================================================================
// Get / Save / Delete
// ============================================================================

#[test]
fn save_then_get_round_trips() {
    let store = store();
    store.save(&user(7, "alice")).unwrap();

    let mut found = user(7, "");
    store.get(&mut found).unwrap();
    assert_eq!(found, user(7, "alice"));
}

#[test]
fn get_missing_key_is_not_found() {
    let store = store();
    store.save(&user(1, "alice")).unwrap();

    let err = store.get(&mut user(2, "")).unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got {err}");
}

#[test]
fn get_on_empty_namespace_is_not_found_for_any_key() {
    let store = store();
    for id in [0, -1, i64::MAX] {
        let err = store.get(&mut user(id, "")).unwrap_err();
        assert!(matches!(err, Error::NotFound { namespace: "test.v1.User" }));
    }
}

#[test]
fn get_before_init_is_not_found() {
    let store = Store::in_memory().unwrap();
    let err = store.get(&mut user(1, "")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn save_is_an_upsert() {
    let store = store();
    store.save(&user(7, "alice")).unwrap();
    store.save(&user(7, "bob")).unwrap();

    let mut found = user(7, "");
    store.get(&mut found).unwrap();
    assert_eq!(found.name, "bob");

    // Still exactly one record in the namespace.
    let mut count = 0;
    store
        .for_each(&mut User::default(), |_| {
            count += 1;
            Ok(())
        })
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn delete_then_get_is_not_found() {
    let store = store();
    store.save(&user(7, "alice")).unwrap();
    store.delete(&user(7, "alice")).unwrap();

    assert!(store.get(&mut user(7, "")).unwrap_err().is_not_found());
}

#[test]
fn delete_is_idempotent() {
    let store = store();
    store.delete(&user(42, "")).unwrap();
    store.save(&user(42, "alice")).unwrap();
    store.delete(&user(42, "")).unwrap();
    store.delete(&user(42, "")).unwrap();
}

#[test]
fn init_is_idempotent_and_preserves_data() {
    let store = store();
    store.save(&user(1, "alice")).unwrap();
    store.init::<User>().unwrap();

    let mut found = user(1, "");
    store.get(&mut found).unwrap();
    assert_eq!(found.name, "alice");
}

// ============================================================================
// Iteration
// ============================================================================

#[test]
fn for_each_visits_every_record_once_in_key_byte_order() {
    let store = store();
    store.save(&user(7, "a")).unwrap();
    store.save(&user(3, "b")).unwrap();
    store.save(&user(20, "c")).unwrap();

    let mut seen = Vec::new();
    store
        .for_each(&mut User::default(), |u| {
            seen.push(u.id);
            Ok(())
        })
        .unwrap();

    // Decimal-text keys compare lexicographically: "20" < "3" < "7".
    assert_eq!(seen, vec![20, 3, 7]);
}

#[test]
fn for_each_on_uninitialized_namespace_visits_nothing() {
    let store = Store::in_memory().unwrap();
    let mut count = 0;
    store
        .for_each(&mut User::default(), |_| {
            count += 1;
            Ok(())
        })
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn for_each_callback_error_stops_iteration() {
    let store = store();
    for id in 1..=5 {
        store.save(&user(id, "x")).unwrap();
    }

    let mut visited = 0;
    let err = store
        .for_each(&mut User::default(), |_| {
            visited += 1;
            Err(Error::callback(io::Error::other("stop")))
        })
        .unwrap_err();

    assert_eq!(visited, 1);
    assert!(matches!(err, Error::Callback(_)));
}

#[test]
fn namespaces_are_isolated_per_type() {
    let store = store();
    store.save(&user(1, "alice")).unwrap();

    let mut sessions = 0;
    store
        .for_each(&mut Session::default(), |_| {
            sessions += 1;
            Ok(())
        })
        .unwrap();
    assert_eq!(sessions, 0);
}

// ============================================================================
// Composite keys
// ============================================================================

#[test]
fn composite_keys_with_shifted_boundaries_stay_distinct() {
    let store = store();
    let a = Session {
        user: "ab".into(),
        device: String::new(),
        started_at: 1,
    };
    let b = Session {
        user: "a".into(),
        device: "b".into(),
        started_at: 2,
    };
    store.save(&a).unwrap();
    store.save(&b).unwrap();

    let mut found = Session {
        user: "ab".into(),
        device: String::new(),
        started_at: 0,
    };
    store.get(&mut found).unwrap();
    assert_eq!(found.started_at, 1);

    let mut found = Session {
        user: "a".into(),
        device: "b".into(),
        started_at: 0,
    };
    store.get(&mut found).unwrap();
    assert_eq!(found.started_at, 2);
}

// ============================================================================
// Durability and corruption
// ============================================================================

#[test]
fn saved_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.redb");

    {
        let store = Store::open(&path).unwrap();
        store.init::<User>().unwrap();
        store.save(&user(7, "alice")).unwrap();
    }

    let store = Store::open(&path).unwrap();
    let mut found = user(7, "");
    store.get(&mut found).unwrap();
    assert_eq!(found.name, "alice");
}

#[test]
fn malformed_stored_bytes_fail_with_decode_not_not_found() {
    use redb::TableDefinition;

    let db = redb::Database::builder()
        .create_with_backend(redb::backends::InMemoryBackend::new())
        .unwrap();
    let table: TableDefinition<&[u8], &[u8]> = TableDefinition::new("test.v1.User");
    let key = user(1, "").primary_key();

    let txn = db.begin_write().unwrap();
    {
        let mut tbl = txn.open_table(table).unwrap();
        // Truncated varint tag: cannot be a valid message.
        tbl.insert(key.as_slice(), b"\xff\xff\xff\xff".as_slice())
            .unwrap();
    }
    txn.commit().unwrap();

    let store = Store::from_database(db);
    let err = store.get(&mut user(1, "")).unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "got {err}");
}
