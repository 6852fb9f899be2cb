//! Submission locks - at most one in-flight operation per key.
//!
//! A second delete or update for the same record, arriving while the first is
//! still executing, is turned away instead of queued.

mod error;
mod submission;

pub use error::LockError;
pub use submission::{SubmissionGuard, SubmissionPermit};
