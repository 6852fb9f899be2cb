//! Context passed to command handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::service::RecordService;

use super::error::HandlerError;

/// The context passed to every command handler.
///
/// Carries the command name, the raw JSON input and a reference to the
/// service the controller fronts.
pub struct Context<'a, R, S> {
    command_name: &'a str,
    input: Value,
    service: &'a RecordService<R, S>,
}

impl<'a, R, S> Context<'a, R, S> {
    pub(crate) fn new(command_name: &'a str, input: Value, service: &'a RecordService<R, S>) -> Self {
        Self {
            command_name,
            input,
            service,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Get the raw JSON input.
    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    pub fn command_name(&self) -> &str {
        self.command_name
    }

    pub fn service(&self) -> &RecordService<R, S> {
        self.service
    }

    /// Check if the raw input contains a field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }
}
