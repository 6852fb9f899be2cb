use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::LockError;

/// Tracks which keys have an operation in flight.
///
/// Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Proof that the holder owns a key. Dropping it releases the key.
#[derive(Debug)]
pub struct SubmissionPermit {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` without blocking.
    ///
    /// Returns `Ok(None)` if another operation already holds it.
    pub fn try_begin(&self, key: &str) -> Result<Option<SubmissionPermit>, LockError> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| LockError::Poisoned(key.to_string()))?;

        if !in_flight.insert(key.to_string()) {
            return Ok(None);
        }

        Ok(Some(SubmissionPermit {
            key: key.to_string(),
            in_flight: Arc::clone(&self.in_flight),
        }))
    }

    pub fn is_in_flight(&self, key: &str) -> Result<bool, LockError> {
        let in_flight = self
            .in_flight
            .lock()
            .map_err(|_| LockError::Poisoned(key.to_string()))?;
        Ok(in_flight.contains(key))
    }
}

impl SubmissionPermit {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        // Release even if another holder panicked; the set itself is intact.
        let mut in_flight = match self.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        in_flight.remove(&self.key);
    }
}
