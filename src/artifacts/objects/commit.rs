//! Git commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//! [extra headers, e.g. gpgsig, possibly continued on space-prefixed lines]
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Author or committer information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Format complete author info including timestamp
    ///
    /// # Returns
    ///
    /// String in format "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        // Split from right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid author format"));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp"))?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '<'"))?;
        let email_end = name_email_part
            .rfind('>')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '>'"))?;
        if email_end < email_start {
            return Err(anyhow::anyhow!("Invalid author format: '>' before '<'"));
        }

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let offset = chrono::DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .map_err(|_| anyhow::anyhow!("Invalid timezone: {timezone}"))?
        .timezone();
        let datetime = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp"))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp: datetime,
        })
    }
}

/// Slim representation of a commit
///
/// The record handed to the history walker: its own ID, the ordered parent IDs
/// and the committer timestamp used for ordering.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs, in the order they appear in the commit
    pub parents: Vec<ObjectId>,
    /// Committer timestamp
    pub timestamp: chrono::DateTime<chrono::FixedOffset>,
}

/// Git commit object
///
/// Represents a snapshot of the repository with metadata.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for initial commit, multiple for merge commits)
    parents: Vec<ObjectId>,
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Author who wrote the changes
    author: Author,
    /// Committer who recorded the commit
    committer: Author,
    /// Commit message
    message: String,
}

impl Commit {
    /// Create a new commit whose committer is its author
    pub fn new(
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Self::new_with_committer(parents, tree_oid, author.clone(), author, message)
    }

    pub fn new_with_committer(
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        committer: Author,
        message: String,
    ) -> Self {
        Commit {
            parents,
            tree_oid,
            author,
            committer,
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    /// Commit time, the key history is ordered by
    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.committer.timestamp()
    }

    pub fn into_slim(self, oid: ObjectId) -> SlimCommit {
        let timestamp = self.timestamp();
        SlimCommit::new(oid, self.parents, timestamp)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content_bytes = self.display().into_bytes();

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        // headers are ASCII; messages (and names) may use any `encoding`
        let content = String::from_utf8_lossy(&content);
        let mut lines = content.lines();

        let tree_line = lines
            .next()
            .context("Invalid commit object: missing tree line")?;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .context("Invalid commit object: invalid tree line")?
            .to_string();
        let tree_oid = ObjectId::try_parse(tree_oid)?;

        // Parse all parent lines (there can be 0, 1, or multiple parents)
        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing author line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing author line")?;
        }

        let author = next_line
            .strip_prefix("author ")
            .context("Invalid commit object: invalid author line")?;
        let author = Author::try_from(author)?;

        let committer_line = lines
            .next()
            .context("Invalid commit object: missing committer line")?;
        let committer = committer_line
            .strip_prefix("committer ")
            .context("Invalid commit object: invalid committer line")?;
        let committer = Author::try_from(committer)?;

        // skip extra headers (encoding, gpgsig, mergetag) up to the blank separator
        for header in lines.by_ref() {
            if header.is_empty() {
                break;
            }
        }

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new_with_committer(
            parents, tree_oid, author, committer, message,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid));
        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;

    const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbad4904";
    const LEFT: &str = "1111111111111111111111111111111111111111";
    const RIGHT: &str = "2222222222222222222222222222222222222222";

    #[test]
    fn test_parse_author_with_timezone() {
        let author = Author::try_from("Jane Doe <jane@example.com> 1700000000 +0200").unwrap();

        assert_eq!(author.name(), "Jane Doe");
        assert_eq!(author.email(), "jane@example.com");
        assert_eq!(author.timestamp().timestamp(), 1700000000);
        assert_eq!(author.display(), "Jane Doe <jane@example.com> 1700000000 +0200");
    }

    #[rstest]
    #[case::angles_reversed("Foo> <x 1 +0000")]
    #[case::missing_email("Foo 1 +0000")]
    #[case::bad_timestamp("Foo <x> soon +0000")]
    #[case::too_short("Foo")]
    fn test_parse_malformed_author_is_error(#[case] identity: &str) {
        assert!(Author::try_from(identity).is_err());
    }

    #[test]
    fn test_deserialize_latin1_message() {
        let mut body = format!(
            "tree {TREE}\nparent {LEFT}\n\
             author A <a@example.com> 100 +0000\n\
             committer A <a@example.com> 300 +0000\n\
             encoding ISO-8859-1\n\ncaf"
        )
        .into_bytes();
        body.push(0xe9);

        let commit = Commit::deserialize(Cursor::new(body)).unwrap();

        assert_eq!(
            commit.parents(),
            &[ObjectId::try_parse(LEFT.to_string()).unwrap()]
        );
        assert_eq!(commit.timestamp().timestamp(), 300);
        assert!(commit.message().starts_with("caf"));
    }

    #[test]
    fn test_deserialize_merge_commit_uses_committer_time() {
        let body = format!(
            "tree {TREE}\nparent {LEFT}\nparent {RIGHT}\n\
             author A <a@example.com> 100 +0000\n\
             committer C <c@example.com> 200 +0000\n\
             gpgsig -----BEGIN PGP SIGNATURE-----\n \n -----END PGP SIGNATURE-----\n\
             \nMerge branch 'right'\n"
        );

        let commit = Commit::deserialize(Cursor::new(body.into_bytes())).unwrap();

        assert_eq!(
            commit.parents(),
            &[
                ObjectId::try_parse(LEFT.to_string()).unwrap(),
                ObjectId::try_parse(RIGHT.to_string()).unwrap()
            ]
        );
        assert_eq!(commit.author().timestamp().timestamp(), 100);
        assert_eq!(commit.timestamp().timestamp(), 200);
        assert_eq!(commit.message(), "Merge branch 'right'");
    }

    #[test]
    fn test_deserialize_root_commit_has_no_parents() {
        let body = format!(
            "tree {TREE}\nauthor A <a@example.com> 100 +0000\ncommitter A <a@example.com> 100 +0000\n\ninit"
        );

        let commit = Commit::deserialize(Cursor::new(body.into_bytes())).unwrap();

        assert!(commit.parents().is_empty());
        assert_eq!(commit.parent(), None);
    }

    #[test]
    fn test_deserialize_rejects_missing_tree() {
        let body = "author A <a@example.com> 100 +0000\n";

        assert!(Commit::deserialize(Cursor::new(body.as_bytes().to_vec())).is_err());
    }

    #[test]
    fn test_serialized_commit_round_trips_through_parser() {
        let author = Author::try_from("A <a@example.com> 1700000000 -0500").unwrap();
        let commit = Commit::new(
            vec![ObjectId::try_parse(LEFT.to_string()).unwrap()],
            ObjectId::try_parse(TREE.to_string()).unwrap(),
            author,
            "subject".to_string(),
        );

        let mut serialized = Cursor::new(commit.serialize().unwrap().to_vec());
        let object_type = ObjectType::parse_object_type(&mut serialized).unwrap();
        let parsed = Commit::deserialize(serialized).unwrap();

        assert_eq!(object_type, ObjectType::Commit);
        assert_eq!(parsed, commit);
    }
}
