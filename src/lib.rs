//! Generic CRUD over simulated backends.
//!
//! An in-memory [`Store`] keeps records, a [`SimulatedConnection`] fails
//! with a configurable probability, a [`Validator`] collects every rule
//! violation, and a [`RecordService`] runs each operation through the
//! validate, connect and execute phases.

// Lets `#[derive(Record)]` expand to `crud_sim::Record` inside this crate too.
extern crate self as crud_sim;

pub mod catalog;
pub mod config;
pub mod connection;
pub mod controller;
pub mod lock;
pub mod logging;
pub mod record;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{ConfigError, SimulationConfig};
pub use connection::{
    ConnectionError, FixedSource, GuardedStore, ProbabilitySource, RandomSource,
    SimulatedConnection,
};
pub use controller::{CommandRequest, CommandResponse, Console, Controller, HandlerError};
pub use lock::{LockError, SubmissionGuard, SubmissionPermit};
pub use record::{IdGenerator, IdStrategy, Record};
pub use service::{Deletion, ErrorKind, Invocation, Phase, Pipeline, RecordService, ServiceError};
pub use store::{load_fixture_json, Filter, InMemoryStore, Store, StoreError};
pub use validation::{Stage, ValidationResult, Validator};

// Re-export the derive macro under the trait's name
pub use crud_sim_macros::Record;
