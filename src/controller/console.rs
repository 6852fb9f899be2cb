//! Console - render operation outcomes as text lines.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use crate::service::ServiceError;

use super::error::HandlerError;

/// Writes one block per outcome. Failures are rendered, never raised, so a
/// scripted run always continues to its next step.
pub struct Console<W> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// A section title.
    pub fn heading(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "== {} ==", title)
    }

    /// Render a service outcome.
    pub fn render<T: Serialize>(
        &mut self,
        label: &str,
        outcome: &Result<T, ServiceError>,
    ) -> io::Result<()> {
        match outcome {
            Ok(data) => self.success(label, data),
            Err(err) => self.service_error(label, err),
        }
    }

    /// Render a controller dispatch outcome.
    pub fn report(&mut self, label: &str, outcome: &Result<Value, HandlerError>) -> io::Result<()> {
        match outcome {
            Ok(data) => self.success(label, data),
            Err(HandlerError::Service(err)) => self.service_error(label, err),
            Err(err) => writeln!(self.out, "[error] {}: {}", label, err),
        }
    }

    fn success<T: Serialize>(&mut self, label: &str, data: &T) -> io::Result<()> {
        let rendered = serde_json::to_string(data).map_err(io::Error::other)?;
        writeln!(self.out, "[ok] {}: {}", label, rendered)
    }

    fn service_error(&mut self, label: &str, err: &ServiceError) -> io::Result<()> {
        match err {
            ServiceError::Validation(messages) => {
                writeln!(self.out, "[validation] {}: input rejected", label)?;
                for message in messages {
                    writeln!(self.out, "  - {}", message)?;
                }
                Ok(())
            }
            ServiceError::Connection(msg) => writeln!(self.out, "[connection] {}: {}", label, msg),
            ServiceError::NotFound { collection, id } => {
                writeln!(self.out, "[not found] {}: {}:{}", label, collection, id)
            }
            ServiceError::InProgress(id) => {
                writeln!(self.out, "[busy] {}: {} is already being processed", label, id)
            }
            ServiceError::Execution(msg) => writeln!(self.out, "[error] {}: {}", label, msg),
        }
    }
}
