//! Pipeline - the per-invocation state machine shared by every operation.

use std::fmt;

use crate::connection::SimulatedConnection;
use crate::validation::ValidationResult;

use super::ServiceError;

/// Where an invocation is (or ended).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Start,
    Validating,
    ValidationFailed,
    Validated,
    ConnectionCheck,
    ConnectionFailed,
    Connected,
    Executing,
    Success,
    ExecutionFailed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Phase::ValidationFailed | Phase::ConnectionFailed | Phase::Success | Phase::ExecutionFailed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Start => "START",
            Phase::Validating => "VALIDATING",
            Phase::ValidationFailed => "VALIDATION_FAILED",
            Phase::Validated => "VALIDATED",
            Phase::ConnectionCheck => "CONNECTION_CHECK",
            Phase::ConnectionFailed => "CONNECTION_FAILED",
            Phase::Connected => "CONNECTED",
            Phase::Executing => "EXECUTING",
            Phase::Success => "SUCCESS",
            Phase::ExecutionFailed => "EXECUTION_FAILED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one finished invocation: the phases it went through and its result.
#[derive(Debug)]
pub struct Invocation<T> {
    operation: &'static str,
    phases: Vec<Phase>,
    result: Result<T, ServiceError>,
}

impl<T> Invocation<T> {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// The phase the invocation ended in.
    pub fn terminal(&self) -> Phase {
        self.phases.last().copied().unwrap_or(Phase::Start)
    }

    pub fn result(&self) -> &Result<T, ServiceError> {
        &self.result
    }

    pub fn into_result(self) -> Result<T, ServiceError> {
        self.result
    }
}

/// Runs one named operation: validate, check the connection, execute.
///
/// Without a connection the check always passes.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    operation: &'static str,
    connection: Option<&'a SimulatedConnection>,
}

impl<'a> Pipeline<'a> {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            connection: None,
        }
    }

    pub fn with_connection(mut self, connection: Option<&'a SimulatedConnection>) -> Self {
        self.connection = connection;
        self
    }

    pub fn run<T, V, E>(&self, validate: V, execute: E) -> Invocation<T>
    where
        V: FnOnce() -> ValidationResult,
        E: FnOnce() -> Result<T, ServiceError>,
    {
        let mut trace = Trace::new(self.operation);

        trace.enter(Phase::Validating);
        let validation = validate();
        if !validation.is_valid() {
            trace.enter(Phase::ValidationFailed);
            return trace.finish(Err(ServiceError::Validation(validation.into_errors())));
        }
        trace.enter(Phase::Validated);

        trace.enter(Phase::ConnectionCheck);
        let outcome = match self.connection {
            Some(connection) => connection.guard(|| {
                trace.enter(Phase::Connected);
                trace.enter(Phase::Executing);
                execute()
            }),
            None => {
                trace.enter(Phase::Connected);
                trace.enter(Phase::Executing);
                Ok(execute())
            }
        };

        match outcome {
            Err(err) => {
                trace.enter(Phase::ConnectionFailed);
                trace.finish(Err(ServiceError::Connection(err.message().to_string())))
            }
            Ok(Ok(value)) => {
                trace.enter(Phase::Success);
                trace.finish(Ok(value))
            }
            // An outage raised by the store itself still ends as a connection failure.
            Ok(Err(err @ ServiceError::Connection(_))) => {
                trace.enter(Phase::ConnectionFailed);
                trace.finish(Err(err))
            }
            Ok(Err(err)) => {
                trace.enter(Phase::ExecutionFailed);
                trace.finish(Err(err))
            }
        }
    }
}

struct Trace {
    operation: &'static str,
    phases: Vec<Phase>,
}

impl Trace {
    fn new(operation: &'static str) -> Self {
        tracing::debug!(operation, phase = %Phase::Start, "phase");
        Self {
            operation,
            phases: vec![Phase::Start],
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(operation = self.operation, phase = %phase, "phase");
        self.phases.push(phase);
    }

    fn finish<T>(self, result: Result<T, ServiceError>) -> Invocation<T> {
        match &result {
            Ok(_) => tracing::info!(operation = self.operation, "operation succeeded"),
            Err(err) => tracing::info!(
                operation = self.operation,
                kind = ?err.kind(),
                error = %err,
                "operation failed"
            ),
        }
        Invocation {
            operation: self.operation,
            phases: self.phases,
            result,
        }
    }
}
