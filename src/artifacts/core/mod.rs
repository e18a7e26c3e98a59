//! Process-level configuration and diagnostics
//!
//! - `config`: Settings read from the environment
//! - `logging`: `tracing` subscriber setup for diagnostics on stderr

pub mod config;
pub mod logging;
