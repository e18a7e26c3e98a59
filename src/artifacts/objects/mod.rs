//! Git object types and operations
//!
//! Git stores all content as objects identified by SHA-1 hashes. The walker only
//! ever reads commits, but the object header is parsed for every type so that a
//! reference naming a blob, tree, or tag is reported as such:
//!
//! - **Commit**: Snapshot with metadata (author, committer, message, parent commits, tree)
//! - **Blob**, **Tree**, **Tag**: recognized by type only
//!
//! All objects share the Git object format: `<type> <size>\0<content>`

pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a raw SHA-1 digest
pub const OBJECT_ID_BYTES: usize = OBJECT_ID_LENGTH / 2;
