use std::fmt;

/// The simulated remote dependency was unreachable.
///
/// Carries a fixed human-readable message and nothing else; callers are not
/// told when (or whether) to try again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionError {
    message: String,
}

impl ConnectionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection error: {}", self.message)
    }
}

impl std::error::Error for ConnectionError {}
