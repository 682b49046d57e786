//! Polyfall (workspace facade crate).
//!
//! Re-exports the member crates under stable paths
//! (`polyfall::{core, input, term, types}`) and hosts the pieces shared by the
//! binary and the integration tests: run configuration, argument parsing and
//! the log backend.

pub mod cli;
pub mod config;
pub mod logging;

pub use polyfall_core as core;
pub use polyfall_input as input;
pub use polyfall_term as term;
pub use polyfall_types as types;
