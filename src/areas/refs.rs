//! Git references (branches, HEAD, tags)
//!
//! References are human-readable names pointing to commits. They can be:
//! - Direct: Containing a commit SHA-1
//! - Symbolic: Pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## File Format
//!
//! References are stored as text files containing either:
//! - A 40-character SHA-1 hash (direct reference)
//! - `ref: <path>` for symbolic references

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Git references manager
///
/// Reads references, following symbolic indirection, and writes them under an
/// exclusive file lock.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory
    path: Box<Path>,
}

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Internal representation of a reference value
#[derive(Debug, Clone)]
enum SymRefOrOid {
    /// Symbolic reference pointing to another ref
    SymRef { sym_ref_name: SymRefName },
    /// Direct object ID
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(
                ObjectId::try_parse(content.to_string())
                    .with_context(|| format!("invalid ref file at {:?}", path))?,
            )))
        }
    }
}

impl Refs {
    /// Read a reference, following indirection
    ///
    /// Recursively follows symbolic references until finding an OID.
    /// `None` means the chain ends at a ref that does not exist yet (unborn branch).
    fn read_symref(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        let ref_content = SymRefOrOid::read_symref_or_oid(path)?;

        match ref_content {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => {
                self.read_symref(self.path.join(sym_ref_name.as_ref_path()).as_path())
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&self.head_path())
    }

    /// Resolve a ref name to the commit it points to
    ///
    /// Fails when no ref file with that name exists.
    pub fn read_ref(&self, branch_name: BranchName) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.find_path_to_branch(branch_name)?;
        self.read_symref(&ref_path)
    }

    fn find_path_to_branch(&self, branch_name: BranchName) -> anyhow::Result<Box<Path>> {
        // search for the ref file in .git, .git/refs, .git/refs/tags and .git/refs/heads
        [
            self.path.clone(),
            self.refs_path(),
            self.tags_path(),
            self.heads_path(),
        ]
        .iter()
        .map(|base_path| base_path.join(branch_name.as_ref()).into_boxed_path())
        .find(|path| path.is_file())
        .ok_or_else(|| anyhow::anyhow!("branch {} not found", branch_name))
    }

    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    /// Point `refs/heads/<name>` at a commit, creating or overwriting it
    pub fn update_branch(&self, name: &BranchName, oid: ObjectId) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(name.as_ref()).into_boxed_path();
        self.update_ref_file(branch_path, format!("{oid}\n"))
    }

    /// Make HEAD a symbolic ref to `refs/heads/<name>`
    pub fn set_head(&self, name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), format!("ref: refs/heads/{name}\n"))
    }

    /// Detach HEAD at a commit
    pub fn detach_head(&self, oid: ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), format!("{oid}\n"))
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn tags_path(&self) -> Box<Path> {
        self.refs_path().join("tags").into_boxed_path()
    }
}
