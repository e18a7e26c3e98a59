//! Resumable position within a history walk
//!
//! A cursor `<root>+<offset>` names a point in the walk started from `root`: start a
//! new walk at `root`, discard `offset` commits, and the next commit is the one
//! the cursor was printed with, carrying the same cursor.
//!
//! While history is linear the root rolls forward to the only pending commit and
//! the offset drops back to zero, keeping cursors short. As soon as more than one
//! branch is pending the root stays put and the offset grows.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct Cursor {
    root: ObjectId,
    offset: usize,
}

impl Cursor {
    /// Cursor of the very first commit of a walk
    pub fn start(root: ObjectId) -> Self {
        Self::new(root, 0)
    }

    pub fn root(&self) -> &ObjectId {
        &self.root
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move past a commit that was just taken off the frontier.
    ///
    /// `frontier_is_empty` describes the frontier after the pop and before the
    /// commit's parents are pushed. A single parent with nothing else pending is the
    /// only successor, so it becomes the new root.
    pub fn advance(&mut self, parents: &[ObjectId], frontier_is_empty: bool) {
        match parents {
            [parent] if frontier_is_empty => *self = Self::start(*parent),
            _ => self.offset += 1,
        }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}", self.root, self.offset)
    }
}

impl std::str::FromStr for Cursor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (root, offset) = s
            .split_once('+')
            .with_context(|| format!("invalid cursor '{s}': expected <commit>+<offset>"))?;
        let root = ObjectId::try_parse(root.to_string())
            .with_context(|| format!("invalid cursor '{s}': bad commit id"))?;
        if !offset.starts_with(|c: char| c.is_ascii_digit()) {
            anyhow::bail!("invalid cursor '{s}': offset must be a decimal number");
        }
        let offset = offset
            .parse::<usize>()
            .with_context(|| format!("invalid cursor '{s}': bad offset"))?;

        Ok(Self::new(root, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_bytes([byte; 20])
    }

    #[test]
    fn test_single_parent_with_empty_frontier_rolls_root() {
        let mut cursor = Cursor::new(oid(1), 5);

        cursor.advance(&[oid(2)], true);

        assert_eq!(cursor, Cursor::start(oid(2)));
    }

    #[rstest]
    #[case::pending_branches(vec![2], false)]
    #[case::root_commit(vec![], true)]
    #[case::merge_commit(vec![2, 3], true)]
    #[case::merge_with_pending(vec![2, 3], false)]
    fn test_other_steps_increment_offset(#[case] parents: Vec<u8>, #[case] frontier_is_empty: bool) {
        let parents = parents.into_iter().map(oid).collect::<Vec<_>>();
        let mut cursor = Cursor::new(oid(1), 5);

        cursor.advance(&parents, frontier_is_empty);

        assert_eq!(cursor, Cursor::new(oid(1), 6));
    }

    #[test]
    fn test_display_and_parse() {
        let cursor = Cursor::new(oid(0xab), 12);
        let text = cursor.to_string();

        assert_eq!(text, format!("{}+12", "ab".repeat(20)));
        assert_eq!(text.parse::<Cursor>().unwrap(), cursor);
    }

    #[rstest]
    #[case::missing_separator("abababababababababababababababababababab")]
    #[case::short_root("abab+1")]
    #[case::negative_offset("abababababababababababababababababababab+-1")]
    #[case::empty_offset("abababababababababababababababababababab+")]
    #[case::signed_offset("abababababababababababababababababababab++5")]
    #[case::spaced_offset("abababababababababababababababababababab+ 5")]
    fn test_parse_rejects_malformed_cursor(#[case] text: &str) {
        assert!(text.parse::<Cursor>().is_err());
    }
}
