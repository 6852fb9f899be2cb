//! Error types for service operations.

use std::error::Error;
use std::fmt;

use crate::lock::LockError;
use crate::store::StoreError;

/// The kind of failure, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Connection,
    NotFound,
    InProgress,
    Execution,
}

/// Terminal failure of one service invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Input rejected; one message per violated rule. Retry with corrected input.
    Validation(Vec<String>),
    /// The simulated server was unreachable. Not retried.
    Connection(String),
    /// The identifier an operation requires is absent.
    NotFound { collection: String, id: String },
    /// Another submission for the same record is still executing.
    InProgress(String),
    /// The store failed while executing.
    Execution(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::Connection(_) => ErrorKind::Connection,
            ServiceError::NotFound { .. } => ErrorKind::NotFound,
            ServiceError::InProgress(_) => ErrorKind::InProgress,
            ServiceError::Execution(_) => ErrorKind::Execution,
        }
    }

    /// Validation messages, empty for other kinds.
    pub fn messages(&self) -> &[String] {
        match self {
            ServiceError::Validation(messages) => messages,
            _ => &[],
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Validation(messages) => {
                write!(f, "validation failed: {}", messages.join("; "))
            }
            ServiceError::Connection(msg) => write!(f, "connection error: {}", msg),
            ServiceError::NotFound { collection, id } => {
                write!(f, "not found: {}:{}", collection, id)
            }
            ServiceError::InProgress(id) => {
                write!(f, "operation already in progress for {}", id)
            }
            ServiceError::Execution(msg) => write!(f, "execution failed: {}", msg),
        }
    }
}

impl Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(err) => ServiceError::Connection(err.message().to_string()),
            other => ServiceError::Execution(other.to_string()),
        }
    }
}

impl From<LockError> for ServiceError {
    fn from(err: LockError) -> Self {
        ServiceError::Execution(err.to_string())
    }
}
