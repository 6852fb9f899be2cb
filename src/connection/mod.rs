//! Connection - stand-in for a remote dependency that may be unreachable.
//!
//! A [`SimulatedConnection`] answers "is the server reachable?" either from a
//! forced value (tests) or from a draw against a configured success
//! probability. [`SimulatedConnection::guard`] runs an operation only when the
//! connection is up. There is no retry and no backoff: an outage is reported
//! once as a [`ConnectionError`] and the caller decides what to do next.
//!
//! ## Example
//!
//! ```ignore
//! use crud_sim::{GuardedStore, InMemoryStore, SimulatedConnection};
//! use std::sync::Arc;
//!
//! let connection = Arc::new(SimulatedConnection::new(0.9));
//! connection.force_available(false);
//!
//! let store = GuardedStore::new(InMemoryStore::<Banner>::new(), connection.clone());
//! assert!(store.find_by_id("b1").is_err());
//! ```

mod error;
mod guarded_store;
mod simulated;
mod source;

pub use error::ConnectionError;
pub use guarded_store::GuardedStore;
pub use simulated::{SimulatedConnection, DEFAULT_CONNECTION_MESSAGE, DEFAULT_SUCCESS_PROBABILITY};
pub use source::{FixedSource, ProbabilitySource, RandomSource};
