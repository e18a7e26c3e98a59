//! The record source consumed by the history walker

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;

/// Errors that abort a history walk
///
/// A commit that cannot be loaded is never skipped: the walk would otherwise
/// print an incomplete history whose cursors no longer resume correctly.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("unable to load commit {oid}: {reason}")]
    CommitNotFound { oid: ObjectId, reason: String },

    #[error("object {0} is not a commit")]
    NotACommit(ObjectId),
}

/// Source of commit records, keyed by object ID
pub trait CommitStore {
    fn load_commit(&self, oid: &ObjectId) -> Result<SlimCommit, WalkError>;
}

impl<S: CommitStore + ?Sized> CommitStore for &S {
    fn load_commit(&self, oid: &ObjectId) -> Result<SlimCommit, WalkError> {
        (**self).load_commit(oid)
    }
}
