//! InMemoryStore - HashMap-backed store for tests, demos and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::record::{IdGenerator, IdStrategy, Record};

use super::{load_fixture_json, Filter, Store, StoreError};

/// In-memory store backed by a `HashMap<String, R>`.
///
/// Clone-friendly via `Arc`: clones share the same records and id counter.
/// Reads hand out copies, so callers can never mutate stored records in place.
pub struct InMemoryStore<R> {
    records: Arc<RwLock<HashMap<String, R>>>,
    ids: Arc<IdGenerator>,
}

impl<R> Clone for InMemoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            ids: Arc::clone(&self.ids),
        }
    }
}

impl<R: Record> std::fmt::Debug for InMemoryStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("collection", &R::COLLECTION)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

impl<R: Record> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> InMemoryStore<R> {
    /// Create an empty store with plain numeric ids.
    pub fn new() -> Self {
        Self::with_id_strategy(IdStrategy::default())
    }

    /// Create an empty store minting ids with `strategy`.
    pub fn with_id_strategy(strategy: IdStrategy) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            ids: Arc::new(IdGenerator::new(strategy)),
        }
    }

    /// Create a store pre-populated with `records`.
    pub fn seeded(records: impl IntoIterator<Item = R>) -> Result<Self, StoreError> {
        Self::new().with_records(records)
    }

    /// Create a store from a JSON array fixture.
    pub fn from_fixture_json(json: &str) -> Result<Self, StoreError> {
        Self::seeded(load_fixture_json::<R>(json)?)
    }

    /// Save each record, generating ids where missing.
    ///
    /// Records that carry an id are stored first so a generated id can never
    /// claim a slot that seed data asks for.
    pub fn with_records(self, records: impl IntoIterator<Item = R>) -> Result<Self, StoreError> {
        let (with_id, without_id): (Vec<R>, Vec<R>) = records
            .into_iter()
            .partition(|record| record.id().is_some_and(|id| !id.is_empty()));

        for record in with_id.into_iter().chain(without_id) {
            self.save(record)?;
        }
        Ok(self)
    }

    pub fn id_strategy(&self) -> &IdStrategy {
        self.ids.strategy()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, R>>, StoreError> {
        self.records
            .read()
            .map_err(|_| StoreError::Storage(format!("{} lock poisoned", R::COLLECTION)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, R>>, StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::Storage(format!("{} lock poisoned", R::COLLECTION)))
    }
}

impl<R: Record> Store<R> for InMemoryStore<R> {
    fn find_by_id(&self, id: &str) -> Result<Option<R>, StoreError> {
        Ok(self.read()?.get(id).cloned())
    }

    fn find_all(&self, filter: &Filter) -> Result<Vec<R>, StoreError> {
        self.find_where(&|record: &R| filter.matches(record))
    }

    fn find_where(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        let records = self.read()?;
        Ok(records
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }

    fn save(&self, mut record: R) -> Result<R, StoreError> {
        let mut records = self.write()?;

        let id = match record.id() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                // Skip ids that seed data already occupies.
                let mut id = self.ids.next_id();
                while records.contains_key(&id) {
                    id = self.ids.next_id();
                }
                record.set_id(id.clone());
                id
            }
        };

        tracing::trace!(collection = R::COLLECTION, id = %id, "save");
        records.insert(id, record.clone());
        Ok(record)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.write()?.remove(id).is_some();
        tracing::trace!(collection = R::COLLECTION, id, removed, "delete");
        Ok(removed)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }
}
