//! Error types for controller command handlers.

use std::error::Error;
use std::fmt;

use crate::service::{ErrorKind, ServiceError};

/// Error type for command handler operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// No handler registered for this command name.
    UnknownCommand(String),
    /// Input decode / deserialization failed.
    DecodeFailed(String),
    /// Handler result could not be encoded as JSON.
    EncodeFailed(String),
    /// The service reported a terminal failure.
    Service(ServiceError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownCommand(name) => write!(f, "unknown command: {}", name),
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::EncodeFailed(msg) => write!(f, "encode failed: {}", msg),
            HandlerError::Service(e) => write!(f, "{}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Service(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        HandlerError::Service(err)
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::EncodeFailed(_) => 500,
            HandlerError::Service(e) => match e.kind() {
                ErrorKind::Validation => 422,
                ErrorKind::NotFound => 404,
                ErrorKind::InProgress => 409,
                ErrorKind::Connection => 503,
                ErrorKind::Execution => 500,
            },
        }
    }

    /// Short machine-readable label for response bodies.
    pub fn kind_label(&self) -> &'static str {
        match self {
            HandlerError::UnknownCommand(_) => "unknown_command",
            HandlerError::DecodeFailed(_) => "decode",
            HandlerError::EncodeFailed(_) => "encode",
            HandlerError::Service(e) => match e.kind() {
                ErrorKind::Validation => "validation",
                ErrorKind::NotFound => "not_found",
                ErrorKind::InProgress => "in_progress",
                ErrorKind::Connection => "connection",
                ErrorKind::Execution => "execution",
            },
        }
    }
}
