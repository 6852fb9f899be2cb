//! Controller integration tests.

mod support;
mod dispatch;
mod console;

#[cfg(feature = "http")]
mod http;
