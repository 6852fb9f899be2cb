//! SimulatedConnection - availability policy for a pretend remote server.

use std::sync::atomic::{AtomicU8, Ordering};
use std::thread;
use std::time::Duration;

use super::source::{clamp_probability, ProbabilitySource, RandomSource};
use super::ConnectionError;

/// Probability that a draw reports the server as reachable.
pub const DEFAULT_SUCCESS_PROBABILITY: f64 = 0.9;

/// Message carried by every [`ConnectionError`] unless overridden.
pub const DEFAULT_CONNECTION_MESSAGE: &str = "connection to the server was interrupted";

const NOT_FORCED: u8 = 0;
const FORCED_UP: u8 = 1;
const FORCED_DOWN: u8 = 2;

/// A remote dependency whose availability is drawn per call.
///
/// Created once per service and queried on every operation that crosses the
/// pretend network boundary. The success probability is a policy knob; tests
/// pin the outcome with [`force_available`](Self::force_available) or a
/// [`FixedSource`](super::FixedSource).
pub struct SimulatedConnection {
    success_probability: f64,
    source: Box<dyn ProbabilitySource>,
    forced: AtomicU8,
    message: String,
    latency: Duration,
}

impl Default for SimulatedConnection {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_PROBABILITY)
    }
}

impl std::fmt::Debug for SimulatedConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedConnection")
            .field("success_probability", &self.success_probability)
            .field("forced", &self.forced())
            .field("message", &self.message)
            .field("latency", &self.latency)
            .finish()
    }
}

impl SimulatedConnection {
    /// A connection that is up with the given probability, drawn from entropy.
    pub fn new(success_probability: f64) -> Self {
        Self {
            success_probability: clamp_probability(success_probability),
            source: Box::new(RandomSource::from_entropy()),
            forced: AtomicU8::new(NOT_FORCED),
            message: DEFAULT_CONNECTION_MESSAGE.to_string(),
            latency: Duration::ZERO,
        }
    }

    /// Replace the probability source.
    pub fn with_source(mut self, source: impl ProbabilitySource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Replace the message reported on outage.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Pause this long before every guarded operation that goes ahead.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Pin the availability answer until [`clear_forced`](Self::clear_forced).
    pub fn force_available(&self, available: bool) {
        let state = if available { FORCED_UP } else { FORCED_DOWN };
        self.forced.store(state, Ordering::SeqCst);
    }

    /// Go back to drawing from the probability source.
    pub fn clear_forced(&self) {
        self.forced.store(NOT_FORCED, Ordering::SeqCst);
    }

    /// The pinned answer, if any.
    pub fn forced(&self) -> Option<bool> {
        match self.forced.load(Ordering::SeqCst) {
            FORCED_UP => Some(true),
            FORCED_DOWN => Some(false),
            _ => None,
        }
    }

    /// Whether the server is reachable right now. Draws once per call
    /// unless forced.
    pub fn is_available(&self) -> bool {
        match self.forced() {
            Some(available) => available,
            None => self.source.next_bool(self.success_probability),
        }
    }

    /// Run `operation` if the connection is up.
    ///
    /// When the connection is down the operation is never called, so it has
    /// no side effects, and a [`ConnectionError`] is returned instead.
    pub fn guard<T, F>(&self, operation: F) -> Result<T, ConnectionError>
    where
        F: FnOnce() -> T,
    {
        if !self.is_available() {
            tracing::warn!(message = %self.message, "simulated connection unavailable");
            return Err(ConnectionError::new(self.message.clone()));
        }

        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        Ok(operation())
    }
}
