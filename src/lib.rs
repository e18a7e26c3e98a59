//! Resumable, reverse-chronological commit history walks.
//!
//! `git-cursor-log` prints every commit reachable from a revision, newest first,
//! each next to a cursor `<root>+<offset>` from which a later run can pick the walk
//! back up without replaying it from the start.
//!
//! - `areas`: The on-disk git directory (object database, refs)
//! - `artifacts`: Git data structures and the history walk
//! - `commands`: Command implementations on top of a `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
