//! Command implementations
//!
//! - `porcelain`: the user-facing `cursor_log` command, run as `impl Repository` methods
//!   that write to the repository's output sink

pub mod porcelain;
