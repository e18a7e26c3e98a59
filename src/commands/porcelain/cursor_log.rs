use crate::areas::repository::Repository;
use crate::artifacts::log::cursor::Cursor;
use crate::artifacts::log::rev_walk::RevWalk;
use anyhow::Context;
use std::io::Write;

/// Where a cursor log starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogStart {
    /// Walk from a revision, discarding the first `skip` commits
    Revision { reference: String, skip: usize },
    /// Continue right after the commit a previously printed cursor belongs to
    Resume(Cursor),
}

impl Repository {
    /// Print `<cursor>  <commit>` for every commit reachable from the start point,
    /// newest first.
    pub fn cursor_log(&self, start: &LogStart) -> anyhow::Result<()> {
        let (root, skip) = match start {
            LogStart::Revision { reference, skip } => (self.resolve_commit(reference)?, *skip),
            LogStart::Resume(cursor) => (*cursor.root(), cursor.offset().saturating_add(1)),
        };

        tracing::info!(root = %root, skip, "walking history");

        let mut walk = RevWalk::from_oid(self.database(), &root)
            .with_context(|| format!("unable to start history walk at {root}"))?;
        let skipped = walk.discard(skip)?;
        tracing::debug!(skipped, "discarded leading commits");

        for entry in walk {
            writeln!(self.writer(), "{}", entry?)?;
        }

        self.writer().flush()?;

        Ok(())
    }
}
