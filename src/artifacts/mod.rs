//! Git data structures and algorithms
//!
//! - `branch`: Ref names and revision parsing
//! - `core`: Configuration and logging setup
//! - `log`: Commit history traversal with resumable cursors
//! - `objects`: Git object types (commit, object IDs, headers)

pub mod branch;
pub mod core;
pub mod log;
pub mod objects;
