//! Simulation settings: connection reliability, latency and id minting.
//!
//! Values come from a TOML file, then environment variables, then (in the
//! demo binary) command-line flags, each layer overriding the previous one.
//!
//! ```toml
//! success_probability = 0.8
//! latency_ms = 25
//! seed = 42
//! connection_message = "connection to the ETOUR server was interrupted"
//!
//! [id_strategy]
//! kind = "sequential"
//! prefix = "RP"
//! width = 3
//! ```

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::connection::{
    RandomSource, SimulatedConnection, DEFAULT_CONNECTION_MESSAGE, DEFAULT_SUCCESS_PROBABILITY,
};
use crate::record::IdStrategy;

pub const ENV_SUCCESS_PROBABILITY: &str = "CRUD_SIM_SUCCESS_PROBABILITY";
pub const ENV_LATENCY_MS: &str = "CRUD_SIM_LATENCY_MS";
pub const ENV_SEED: &str = "CRUD_SIM_SEED";

/// Widest zero-padding accepted for sequential ids.
pub const MAX_ID_WIDTH: usize = 32;

/// Error type for loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io { path: String, source: std::io::Error },
    /// The config file is not valid TOML for this schema.
    Parse(String),
    /// An environment variable holds an unusable value.
    Env { var: &'static str, value: String },
    /// A value is outside its allowed range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "failed to read config {}: {}", path, source),
            ConfigError::Parse(msg) => write!(f, "invalid config: {}", msg),
            ConfigError::Env { var, value } => write!(f, "invalid value for {}: {:?}", var, value),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Settings for the simulated backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Probability that a connection check succeeds, in `[0, 1]`.
    pub success_probability: f64,
    /// Pause before each guarded operation that goes ahead.
    pub latency_ms: u64,
    /// Seed for reproducible outages; entropy when absent.
    pub seed: Option<u64>,
    /// Message reported on a simulated outage.
    pub connection_message: String,
    /// How stores mint ids for records saved without one. Each domain
    /// picks its own when unset.
    pub id_strategy: Option<IdStrategy>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            success_probability: DEFAULT_SUCCESS_PROBABILITY,
            latency_ms: 0,
            seed: None,
            connection_message: DEFAULT_CONNECTION_MESSAGE.to_string(),
            id_strategy: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Override fields from `CRUD_SIM_*` environment variables.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_vars(|name| env::var(name).ok())
    }

    /// Override fields from an arbitrary variable lookup.
    pub fn apply_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SUCCESS_PROBABILITY) {
            self.success_probability = parse_var(ENV_SUCCESS_PROBABILITY, value)?;
        }
        if let Some(value) = lookup(ENV_LATENCY_MS) {
            self.latency_ms = parse_var(ENV_LATENCY_MS, value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            self.seed = Some(parse_var(ENV_SEED, value)?);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.success_probability) {
            return Err(ConfigError::Invalid(format!(
                "success_probability must be between 0 and 1, got {}",
                self.success_probability
            )));
        }
        if let Some(IdStrategy::Sequential { width, .. }) = &self.id_strategy {
            if !(1..=MAX_ID_WIDTH).contains(width) {
                return Err(ConfigError::Invalid(format!(
                    "id_strategy.width must be between 1 and {}, got {}",
                    MAX_ID_WIDTH, width
                )));
            }
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// A connection configured from these settings.
    pub fn build_connection(&self) -> SimulatedConnection {
        let source = match self.seed {
            Some(seed) => RandomSource::seeded(seed),
            None => RandomSource::from_entropy(),
        };
        SimulatedConnection::new(self.success_probability)
            .with_source(source)
            .with_message(self.connection_message.clone())
            .with_latency(self.latency())
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}
