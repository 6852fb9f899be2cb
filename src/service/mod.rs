//! Service - validate, check the connection, execute.
//!
//! Every service operation runs through a [`Pipeline`], which walks one
//! invocation through a fixed set of [`Phase`]s:
//!
//! ```text
//! START → VALIDATING → { VALIDATION_FAILED | VALIDATED }
//!       → CONNECTION_CHECK → { CONNECTION_FAILED | CONNECTED }
//!       → EXECUTING → { SUCCESS | EXECUTION_FAILED }
//! ```
//!
//! Each terminal phase maps to one outcome: data, a validation error with
//! messages, or a connection error with a message (plus not-found and
//! in-progress when execution reports them). The service is the only layer
//! that turns a failure signal into a terminal outcome.
//!
//! ## Quick Start
//!
//! ```ignore
//! use crud_sim::{InMemoryStore, RecordService, SimulatedConnection};
//! use std::sync::Arc;
//!
//! let service = RecordService::new(InMemoryStore::seeded(points)?)
//!     .with_validator(catalog::validator())
//!     .with_connection(Arc::new(SimulatedConnection::new(0.9)));
//!
//! match service.delete("RP001") {
//!     Ok(deletion) => println!("deleted: {}", deletion.was_deleted),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

mod error;
mod pipeline;
mod record_service;

pub use error::{ErrorKind, ServiceError};
pub use pipeline::{Invocation, Phase, Pipeline};
pub use record_service::{Deletion, RecordService, MAX_FILTER_LEN};
