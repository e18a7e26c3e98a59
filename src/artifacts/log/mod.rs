//! Commit history traversal with resumable cursors
//!
//! - `commit_store`: The source of commit records and the errors a walk can fail with
//! - `cursor`: The `<root>+<offset>` position printed next to each commit
//! - `rev_walk`: Reverse-chronological traversal over a timestamp-ordered frontier
//!
//! ## Algorithm
//!
//! The walk keeps every pending commit in a priority queue ordered by commit
//! timestamp, merging all branches of the history into a single newest-first
//! sequence. Commits reachable through several merge paths are emitted once.

pub mod commit_store;
pub mod cursor;
pub mod rev_walk;
