//! Validation - accumulate every rule violation for an input.
//!
//! A [`Validator`] holds an ordered list of rules. [`Validator::validate`]
//! runs all of them (it never stops at the first failure) and collects the
//! messages into a [`ValidationResult`]. Presence rules report first, then
//! single-field rules, then cross-field rules; within a stage, rules report
//! in the order they were declared.
//!
//! ## Example
//!
//! ```ignore
//! use crud_sim::Validator;
//!
//! let validator = Validator::<Banner>::new()
//!     .required("title", |b| b.title.as_str())
//!     .range("width", |b| Some(b.width as i64), 1..=1024);
//!
//! let result = validator.validate(&banner);
//! if !result.is_valid() {
//!     for error in result.errors() { eprintln!("{}", error); }
//! }
//! ```

mod result;
mod validator;

pub use result::ValidationResult;
pub use validator::{Stage, Validator};
