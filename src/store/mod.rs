//! Store - generic CRUD storage for records.
//!
//! A store maps identifiers to records. It never simulates connection
//! failures itself; wrap it in a [`GuardedStore`](crate::GuardedStore) for
//! that. A read of a missing identifier is `Ok(None)`, never an error.
//!
//! ## Example
//!
//! ```ignore
//! use crud_sim::{Filter, InMemoryStore, Store};
//!
//! let store = InMemoryStore::<RefreshmentPoint>::new();
//! let saved = store.save(point)?;
//! let loaded = store.find_by_id(saved.id().unwrap())?;
//! let cafes = store.find_all(&Filter::text("cafe"))?;
//! ```

mod filter;
mod fixtures;
mod in_memory;

use std::fmt;
use std::sync::Arc;

use crate::connection::ConnectionError;
use crate::record::Record;

pub use filter::Filter;
pub use fixtures::load_fixture_json;
pub use in_memory::InMemoryStore;

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Storage-level failure (e.g. a poisoned lock).
    Storage(String),
    /// Fixture or payload (de)serialization failed.
    Serde(String),
    /// The store sits behind a simulated connection that is down.
    Unavailable(ConnectionError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Storage(msg) => write!(f, "store error: {}", msg),
            StoreError::Serde(msg) => write!(f, "store serialization error: {}", msg),
            StoreError::Unavailable(err) => write!(f, "store unavailable: {}", err.message()),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Unavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConnectionError> for StoreError {
    fn from(err: ConnectionError) -> Self {
        StoreError::Unavailable(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

/// Abstract CRUD storage for one record type.
pub trait Store<R: Record>: Send + Sync {
    /// Get a record by id. Returns `None` if not found.
    fn find_by_id(&self, id: &str) -> Result<Option<R>, StoreError>;

    /// Snapshot of all records narrowed by `filter`.
    fn find_all(&self, filter: &Filter) -> Result<Vec<R>, StoreError>;

    /// Snapshot of the records matching a predicate.
    fn find_where(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError>;

    /// Insert or overwrite by id. A record without an id gets one generated;
    /// the returned record carries it.
    fn save(&self, record: R) -> Result<R, StoreError>;

    /// Delete a record by id. Returns true if it existed.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Number of records held.
    fn count(&self) -> Result<usize, StoreError>;
}

impl<R: Record, S: Store<R> + ?Sized> Store<R> for Arc<S> {
    fn find_by_id(&self, id: &str) -> Result<Option<R>, StoreError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self, filter: &Filter) -> Result<Vec<R>, StoreError> {
        (**self).find_all(filter)
    }

    fn find_where(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        (**self).find_where(predicate)
    }

    fn save(&self, record: R) -> Result<R, StoreError> {
        (**self).save(record)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete(id)
    }

    fn count(&self) -> Result<usize, StoreError> {
        (**self).count()
    }
}

impl<R: Record, S: Store<R> + ?Sized> Store<R> for &S {
    fn find_by_id(&self, id: &str) -> Result<Option<R>, StoreError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self, filter: &Filter) -> Result<Vec<R>, StoreError> {
        (**self).find_all(filter)
    }

    fn find_where(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        (**self).find_where(predicate)
    }

    fn save(&self, record: R) -> Result<R, StoreError> {
        (**self).save(record)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete(id)
    }

    fn count(&self) -> Result<usize, StoreError> {
        (**self).count()
    }
}
