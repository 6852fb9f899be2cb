use std::thread;

use crud_sim::{Filter, IdStrategy, InMemoryStore, Store, StoreError};

use crate::support::{Heritage, HERITAGE_FIXTURE};

fn fixture_store() -> InMemoryStore<Heritage> {
    InMemoryStore::from_fixture_json(HERITAGE_FIXTURE).unwrap()
}

#[test]
fn fixture_loads_all_records() {
    let store = fixture_store();
    assert_eq!(store.count().unwrap(), 3);
    assert_eq!(
        store.find_by_id("CH002").unwrap().map(|h| h.name),
        Some("Leaning Tower".to_string())
    );
}

#[test]
fn malformed_fixture_is_serde_error() {
    let err = InMemoryStore::<Heritage>::from_fixture_json("{ not json").unwrap_err();
    assert!(matches!(err, StoreError::Serde(_)));
}

#[test]
fn find_all_filters_case_insensitively() {
    let store = fixture_store();

    let mut rome: Vec<_> = store
        .find_all(&Filter::text("ROME"))
        .unwrap()
        .into_iter()
        .map(|h| h.id.unwrap())
        .collect();
    rome.sort();
    assert_eq!(rome, vec!["CH001", "CH003"]);

    assert_eq!(store.find_all(&Filter::text("tower")).unwrap().len(), 1);
    assert!(store.find_all(&Filter::text("venice")).unwrap().is_empty());
    assert_eq!(store.find_all(&Filter::all()).unwrap().len(), 3);
}

#[test]
fn find_where_uses_predicate() {
    let store = fixture_store();
    let old = store
        .find_where(&|h: &Heritage| h.year.is_some_and(|y| y < 1500))
        .unwrap();
    assert_eq!(old.len(), 2);
}

#[test]
fn save_then_find_returns_equal_copy() {
    let store = InMemoryStore::<Heritage>::with_id_strategy(IdStrategy::sequential("CH", 3));
    let saved = store.save(Heritage::new("Pantheon", "Rome")).unwrap();
    assert_eq!(saved.id.as_deref(), Some("CH001"));

    let mut found = store.find_by_id("CH001").unwrap().unwrap();
    assert_eq!(found, saved);

    found.name = "changed locally".into();
    assert_eq!(store.find_by_id("CH001").unwrap().unwrap().name, "Pantheon");
}

#[test]
fn save_with_existing_id_replaces() {
    let store = fixture_store();
    store
        .save(Heritage::new("Colosseo", "Roma").with_id("CH001"))
        .unwrap();
    assert_eq!(store.count().unwrap(), 3);
    assert_eq!(store.find_by_id("CH001").unwrap().unwrap().city, "Roma");
}

#[test]
fn delete_is_true_then_false() {
    let store = fixture_store();
    assert!(store.delete("CH001").unwrap());
    assert!(!store.delete("CH001").unwrap());
    assert!(store.find_by_id("CH001").unwrap().is_none());
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn clones_share_records() {
    let store = fixture_store();
    let handle = store.clone();
    handle.delete("CH003").unwrap();
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn concurrent_saves_get_distinct_ids() {
    let store = InMemoryStore::<Heritage>::new();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                store
                    .save(Heritage::new(&format!("Site {}", i), "Naples"))
                    .unwrap()
                    .id
                    .unwrap()
            })
        })
        .collect();

    let mut ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(store.count().unwrap(), 8);
}

#[test]
fn uuid_strategy_mints_unique_ids() {
    let store = InMemoryStore::<Heritage>::with_id_strategy(IdStrategy::Uuid);
    let a = store.save(Heritage::new("A", "x")).unwrap();
    let b = store.save(Heritage::new("B", "y")).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.id.unwrap().len(), 36);
}
