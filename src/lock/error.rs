use std::fmt;

/// Error type for the submission guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// The in-flight set's mutex was poisoned by a panicking holder.
    Poisoned(String),
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Poisoned(key) => write!(f, "submission guard poisoned while handling {:?}", key),
        }
    }
}

impl std::error::Error for LockError {}
