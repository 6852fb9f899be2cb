//! Store integration tests: derived records, in-memory storage and guarded access.

mod derive;
mod in_memory;
mod guarded;
