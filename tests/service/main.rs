//! Service integration tests over the refreshment point catalog.

mod support;
mod pipeline;
mod outages;
