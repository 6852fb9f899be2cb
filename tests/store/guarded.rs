use std::sync::Arc;

use crud_sim::{FixedSource, GuardedStore, InMemoryStore, SimulatedConnection, Store, StoreError};

use crate::support::{Heritage, HERITAGE_FIXTURE};

fn guarded(available: bool) -> (InMemoryStore<Heritage>, GuardedStore<InMemoryStore<Heritage>>) {
    let inner = InMemoryStore::from_fixture_json(HERITAGE_FIXTURE).unwrap();
    let connection = SimulatedConnection::new(0.5)
        .with_source(FixedSource(available))
        .with_message("Connection to ETOUR server interrupted");
    let store = GuardedStore::new(inner.clone(), Arc::new(connection));
    (inner, store)
}

#[test]
fn passes_through_when_connected() {
    let (_, store) = guarded(true);
    assert_eq!(store.count().unwrap(), 3);
    assert!(store.delete("CH002").unwrap());
}

#[test]
fn outage_leaves_records_untouched() {
    let (inner, store) = guarded(false);

    let err = store.delete("CH001").unwrap_err();
    match err {
        StoreError::Unavailable(e) => {
            assert_eq!(e.message(), "Connection to ETOUR server interrupted")
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
    assert!(store.save(Heritage::new("Pompeii", "Naples")).is_err());
    assert_eq!(inner.count().unwrap(), 3);
}

#[test]
fn forced_state_overrides_source() {
    let (_, store) = guarded(false);
    store.connection().force_available(true);
    assert!(store.find_by_id("CH003").unwrap().is_some());

    store.connection().clear_forced();
    assert!(store.find_by_id("CH003").is_err());
}
