use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// An opened git directory plus the sink the commands write their output to
pub struct Repository {
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
}

impl Repository {
    /// Open the git directory at `git_dir` (the `.git` directory itself, not the worktree)
    pub fn open(git_dir: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = git_dir
            .canonicalize()
            .with_context(|| format!("unable to open git directory {}", git_dir.display()))?;

        if !path.join("objects").is_dir() {
            anyhow::bail!("not a git repository: {}", path.display());
        }

        let database = Database::new(path.join("objects").into_boxed_path());
        let refs = Refs::new(path.into_boxed_path());

        Ok(Repository {
            writer: RefCell::new(writer),
            database,
            refs,
        })
    }

    /// Create an empty git directory layout and open it
    pub fn init(git_dir: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        for dir in ["objects", "refs/heads", "refs/tags"] {
            std::fs::create_dir_all(git_dir.join(dir)).with_context(|| {
                format!("unable to create {}", git_dir.join(dir).display())
            })?;
        }

        let repository = Self::open(git_dir, writer)?;
        if !repository.refs.head_path().exists() {
            repository
                .refs
                .update_ref_file(repository.refs.head_path(), "ref: refs/heads/master\n".into())?;
        }

        Ok(repository)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Resolve a revision expression to the commit it names
    pub fn resolve_commit(&self, reference: &str) -> anyhow::Result<ObjectId> {
        let revision = Revision::try_parse(reference)
            .with_context(|| format!("invalid revision '{reference}'"))?;

        revision
            .resolve(self)
            .with_context(|| format!("unable to resolve '{reference}'"))?
            .with_context(|| format!("'{reference}' does not point to a commit"))
    }
}
