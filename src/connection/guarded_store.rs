//! GuardedStore - a store that sits behind a simulated connection.

use std::sync::Arc;

use crate::record::Record;
use crate::store::{Filter, Store, StoreError};

use super::SimulatedConnection;

/// Decorator that routes every call of an inner store through
/// [`SimulatedConnection::guard`].
///
/// When the connection is down the inner store is not touched and the call
/// fails with [`StoreError::Unavailable`].
pub struct GuardedStore<S> {
    inner: S,
    connection: Arc<SimulatedConnection>,
}

impl<S> GuardedStore<S> {
    pub fn new(inner: S, connection: Arc<SimulatedConnection>) -> Self {
        Self { inner, connection }
    }

    /// The wrapped store, bypassing the connection.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn connection(&self) -> &Arc<SimulatedConnection> {
        &self.connection
    }

    fn guarded<T>(
        &self,
        operation: impl FnOnce(&S) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        self.connection.guard(|| operation(&self.inner))?
    }
}

impl<R: Record, S: Store<R>> Store<R> for GuardedStore<S> {
    fn find_by_id(&self, id: &str) -> Result<Option<R>, StoreError> {
        self.guarded(|store| store.find_by_id(id))
    }

    fn find_all(&self, filter: &Filter) -> Result<Vec<R>, StoreError> {
        self.guarded(|store| store.find_all(filter))
    }

    fn find_where(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        self.guarded(|store| store.find_where(predicate))
    }

    fn save(&self, record: R) -> Result<R, StoreError> {
        self.guarded(|store| store.save(record))
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.guarded(|store| store.delete(id))
    }

    fn count(&self) -> Result<usize, StoreError> {
        self.guarded(|store| store.count())
    }
}
