//! Identifier generation for records saved without an id.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// How a store mints identifiers for records saved without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IdStrategy {
    /// `prefix` followed by a zero-padded counter: `RP001`, `RP002`, ...
    Sequential {
        #[serde(default)]
        prefix: String,
        #[serde(default = "default_width")]
        width: usize,
    },
    /// Random v4 UUIDs.
    Uuid,
}

fn default_width() -> usize {
    1
}

impl Default for IdStrategy {
    fn default() -> Self {
        IdStrategy::Sequential {
            prefix: String::new(),
            width: default_width(),
        }
    }
}

impl IdStrategy {
    /// Sequential ids with the given prefix and zero-padding width.
    pub fn sequential(prefix: impl Into<String>, width: usize) -> Self {
        IdStrategy::Sequential {
            prefix: prefix.into(),
            width,
        }
    }
}

/// Thread-safe identifier source. Sequential values are never reused.
#[derive(Debug)]
pub struct IdGenerator {
    strategy: IdStrategy,
    counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            counter: AtomicU64::new(0),
        }
    }

    pub fn strategy(&self) -> &IdStrategy {
        &self.strategy
    }

    /// Mint the next identifier.
    pub fn next_id(&self) -> String {
        match &self.strategy {
            IdStrategy::Sequential { prefix, width } => {
                let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
                format!("{}{:0width$}", prefix, n, width = *width)
            }
            IdStrategy::Uuid => uuid::Uuid::new_v4().to_string(),
        }
    }
}
