//! Controller - command handler registry and dispatch.
//!
//! `Controller<R, S>` fronts one `RecordService<R, S>` with a set of named
//! command handlers. Each handler receives a `Context` and returns
//! `Result<Value, HandlerError>`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::Record;
use crate::service::RecordService;
use crate::store::Store;

use super::context::Context;
use super::error::HandlerError;

type Handler<R, S> =
    Box<dyn Fn(&Context<'_, R, S>) -> Result<Value, HandlerError> + Send + Sync>;

/// Input of the `get` and `delete` commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdInput {
    pub id: String,
}

/// Input of the `search` command. A missing filter returns everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchInput {
    #[serde(default)]
    pub filter: String,
}

#[derive(Serialize)]
struct RecordBody<T> {
    record: T,
}

#[derive(Serialize)]
struct RecordsBody<T> {
    count: usize,
    records: Vec<T>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    messages: Vec<String>,
}

fn encode<T: Serialize>(value: &T) -> Result<Value, HandlerError> {
    serde_json::to_value(value).map_err(|e| HandlerError::EncodeFailed(e.to_string()))
}

/// Routes commands to handler functions over one service.
pub struct Controller<R, S> {
    service: Arc<RecordService<R, S>>,
    handlers: HashMap<String, Handler<R, S>>,
}

impl<R, S> Controller<R, S>
where
    R: Record + 'static,
    S: Store<R> + 'static,
{
    /// A controller with no commands registered.
    pub fn new(service: Arc<RecordService<R, S>>) -> Self {
        Self {
            service,
            handlers: HashMap::new(),
        }
    }

    /// A controller with the standard CRUD commands registered under the
    /// record's collection name.
    pub fn crud(service: Arc<RecordService<R, S>>) -> Self {
        let collection = R::COLLECTION;
        Self::new(service)
            .command(&format!("{}.get", collection), get_record::<R, S>)
            .command(&format!("{}.search", collection), search_records::<R, S>)
            .command(&format!("{}.create", collection), create_record::<R, S>)
            .command(&format!("{}.update", collection), update_record::<R, S>)
            .command(&format!("{}.delete", collection), delete_record::<R, S>)
    }

    /// Register a command handler.
    ///
    /// Returns `self` for chaining.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<'_, R, S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(name.to_string(), Box::new(handler));
        self
    }

    /// Dispatch a command by name.
    pub fn dispatch(&self, command: &str, input: Value) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(command, input, &self.service);
        let result = handler(&ctx);
        tracing::debug!(command, ok = result.is_ok(), "command dispatched");
        result
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        match self.dispatch(&request.command, request.input.clone()) {
            Ok(value) => CommandResponse {
                status: 200,
                body: value,
            },
            Err(e) => CommandResponse::from(e),
        }
    }

    /// List registered command names.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    pub fn service(&self) -> &Arc<RecordService<R, S>> {
        &self.service
    }
}

fn get_record<R: Record + 'static, S: Store<R>>(
    ctx: &Context<'_, R, S>,
) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    let record = ctx.service().get(&input.id)?;
    encode(&RecordBody { record })
}

fn search_records<R: Record + 'static, S: Store<R>>(
    ctx: &Context<'_, R, S>,
) -> Result<Value, HandlerError> {
    let input = if ctx.raw_input().is_null() {
        SearchInput::default()
    } else {
        ctx.input::<SearchInput>()?
    };
    let records = ctx.service().search(&input.filter)?;
    encode(&RecordsBody {
        count: records.len(),
        records,
    })
}

fn create_record<R: Record + 'static, S: Store<R>>(
    ctx: &Context<'_, R, S>,
) -> Result<Value, HandlerError> {
    let record = ctx.service().create(ctx.input::<R>()?)?;
    encode(&RecordBody { record })
}

fn update_record<R: Record + 'static, S: Store<R>>(
    ctx: &Context<'_, R, S>,
) -> Result<Value, HandlerError> {
    let record = ctx.service().update(ctx.input::<R>()?)?;
    encode(&RecordBody { record })
}

fn delete_record<R: Record + 'static, S: Store<R>>(
    ctx: &Context<'_, R, S>,
) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    let deletion = ctx.service().delete(&input.id)?;
    encode(&deletion)
}

// =============================================================================
// Request / Response types
// =============================================================================

/// An inbound command request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Command name, e.g. `refreshment_points.delete`.
    pub command: String,
    /// JSON input payload.
    #[serde(default)]
    pub input: Value,
}

/// Response from dispatching a command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body (handler result or error).
    pub body: Value,
}

impl From<HandlerError> for CommandResponse {
    fn from(err: HandlerError) -> Self {
        let messages = match &err {
            HandlerError::Service(e) => e.messages().to_vec(),
            _ => Vec::new(),
        };
        let body = ErrorBody {
            error: err.to_string(),
            kind: err.kind_label(),
            messages,
        };
        CommandResponse {
            status: err.status_code(),
            body: serde_json::to_value(&body).unwrap_or_else(|e| Value::String(e.to_string())),
        }
    }
}
