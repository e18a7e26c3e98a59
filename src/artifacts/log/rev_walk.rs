//! Reverse-chronological history walk with resumable cursors
//!
//! The frontier is a max-heap keyed on `(timestamp, oid)`: the most recent pending
//! commit is emitted next, and among commits with the same timestamp the greater
//! object ID goes first. Every branch of a merge feeds the same heap, so the walk
//! interleaves branches by recency instead of visiting them one after the other.
//!
//! A commit is pushed onto the frontier at most once. Its ID enters the `seen` set
//! when it is first discovered as a parent, so a commit reachable through several
//! merge paths is loaded and emitted a single time.

use crate::artifacts::log::commit_store::{CommitStore, WalkError};
use crate::artifacts::log::cursor::Cursor;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// A pending commit, ordered by commit time then object ID
#[derive(Debug)]
struct FrontierEntry(SlimCommit);

impl FrontierEntry {
    fn key(&self) -> (chrono::DateTime<chrono::FixedOffset>, &ObjectId) {
        (self.0.timestamp, &self.0.oid)
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// One emitted commit together with the cursor that locates it
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct WalkEntry {
    pub cursor: Cursor,
    pub oid: ObjectId,
}

impl std::fmt::Display for WalkEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  {}", self.cursor, self.oid)
    }
}

/// Walks the history reachable from a start commit, newest first.
///
/// [`RevWalk::cursor`] must be read *before* [`RevWalk::advance`]: it is the
/// position of the commit the next advance returns. The [`Iterator`] impl pairs
/// them up.
///
/// Starting a new walk at a cursor's root and discarding `offset` commits yields
/// the commit that cursor was printed with, provided the history is unchanged and
/// no parent is newer than its child.
pub struct RevWalk<S> {
    store: S,
    frontier: BinaryHeap<FrontierEntry>,
    seen: HashSet<ObjectId>,
    cursor: Cursor,
}

impl<S: CommitStore> RevWalk<S> {
    pub fn new(store: S, start: SlimCommit) -> Self {
        tracing::debug!(start = %start.oid, "starting history walk");

        let cursor = Cursor::start(start.oid);
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry(start));

        RevWalk {
            store,
            frontier,
            seen: HashSet::new(),
            cursor,
        }
    }

    /// Load the start commit from the store and begin a walk at it
    pub fn from_oid(store: S, start: &ObjectId) -> Result<Self, WalkError> {
        let start = store.load_commit(start)?;
        Ok(Self::new(store, start))
    }

    pub fn has_next(&self) -> bool {
        !self.frontier.is_empty()
    }

    /// Position of the commit the next call to [`RevWalk::advance`] returns
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Emit the most recent pending commit and queue its unseen parents.
    ///
    /// Returns `Ok(None)` once the history is exhausted. A parent that cannot be
    /// loaded fails the walk and leaves it exhausted.
    pub fn advance(&mut self) -> Result<Option<ObjectId>, WalkError> {
        let Some(FrontierEntry(current)) = self.frontier.pop() else {
            return Ok(None);
        };

        self.cursor.advance(&current.parents, self.frontier.is_empty());
        tracing::debug!(commit = %current.oid, cursor = %self.cursor, "advanced");

        for parent in &current.parents {
            if self.seen.contains(parent) {
                continue;
            }

            let parent_commit = match self.store.load_commit(parent) {
                Ok(parent_commit) => parent_commit,
                Err(err) => {
                    self.frontier.clear();
                    return Err(err);
                }
            };

            tracing::trace!(commit = %parent, pending = self.frontier.len() + 1, "queued parent");
            self.frontier.push(FrontierEntry(parent_commit));
            self.seen.insert(*parent);
        }

        Ok(Some(current.oid))
    }

    /// Discard up to `count` commits, returning how many were actually discarded
    pub fn discard(&mut self, count: usize) -> Result<usize, WalkError> {
        let mut skipped = 0;

        while skipped < count && self.advance()?.is_some() {
            skipped += 1;
        }

        Ok(skipped)
    }
}

impl<S: CommitStore> Iterator for RevWalk<S> {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        // read cursor before advancing
        let cursor = self.cursor;

        self.advance()
            .map(|next| next.map(|oid| WalkEntry::new(cursor, oid)))
            .transpose()
    }
}
