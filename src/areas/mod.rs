//! Storage areas of a git directory
//!
//! - `database`: Loose object storage (`objects/`)
//! - `refs`: Branches, tags and HEAD
//! - `repository`: The opened git directory tying the areas together

pub mod database;
pub mod refs;
pub mod repository;
