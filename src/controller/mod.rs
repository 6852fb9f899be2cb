//! controller - presentation adapters over a [`RecordService`](crate::RecordService).
//!
//! A [`Controller`] routes named commands with JSON input to handlers. Each
//! handler receives a [`Context`] with the input and the service.
//! [`Controller::crud`] registers the five standard commands for a record
//! type: `{collection}.get`, `.search`, `.create`, `.update` and `.delete`.
//! The controller holds no business logic of its own.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use crud_sim::controller::{Console, Controller};
//! use serde_json::json;
//!
//! let controller = Controller::crud(Arc::new(catalog::service(&config)?));
//!
//! let outcome = controller.dispatch("refreshment_points.delete", json!({ "id": "RP001" }));
//! Console::new(std::io::stdout()).report("delete RP001", &outcome)?;
//!
//! // HTTP transport (requires "http" feature)
//! // controller::serve(Arc::new(controller), "0.0.0.0:3000").await?;
//! ```

mod commands;
mod console;
mod context;
mod error;

pub use commands::{CommandRequest, CommandResponse, Controller, IdInput, SearchInput};
pub use console::Console;
pub use context::Context;
pub use error::HandlerError;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};
