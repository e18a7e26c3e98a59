#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use git_cursor_log::areas::repository::Repository;
use git_cursor_log::artifacts::branch::branch_name::BranchName;
use git_cursor_log::artifacts::objects::commit::{Author, Commit};
use git_cursor_log::artifacts::objects::object_id::ObjectId;
use rstest::fixture;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A throwaway git directory populated through the library
pub struct TestRepository {
    _dir: TempDir,
    git_dir: PathBuf,
    repository: Repository,
    names: HashMap<String, ObjectId>,
}

impl TestRepository {
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Store a commit whose message is `name`, committed at `timestamp` seconds
    pub fn commit(&mut self, name: &str, parents: &[&str], timestamp: i64) -> ObjectId {
        let parents = parents.iter().map(|parent| self.oid(parent)).collect();
        let author = Author::try_from(
            format!("{name} <{name}@example.com> {timestamp} +0000").as_str(),
        )
        .expect("Failed to build author");
        let commit = Commit::new(parents, ObjectId::default(), author, format!("{name}\n"));
        let oid = self
            .repository
            .database()
            .store(&commit)
            .expect("Failed to store commit");

        self.names.insert(name.to_string(), oid);
        oid
    }

    pub fn branch(&self, branch: &str, commit: &str) {
        let branch = BranchName::try_parse(branch.to_string()).expect("Invalid branch name");
        self.repository
            .refs()
            .update_branch(&branch, self.oid(commit))
            .expect("Failed to update branch");
    }

    pub fn oid(&self, name: &str) -> ObjectId {
        self.names[name]
    }

    pub fn object_path(&self, name: &str) -> PathBuf {
        self.git_dir.join("objects").join(self.oid(name).to_path())
    }

    /// The expected output line for `commit` printed with cursor `root+offset`
    pub fn line(&self, root: &str, offset: usize, commit: &str) -> String {
        format!("{}+{}  {}\n", self.oid(root), offset, self.oid(commit))
    }
}

#[fixture]
pub fn repository() -> TestRepository {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let git_dir = dir.path().join(".git");
    let repository =
        Repository::init(&git_dir, Box::new(std::io::sink())).expect("Failed to init repository");

    TestRepository {
        _dir: dir,
        git_dir,
        repository,
        names: HashMap::new(),
    }
}

/// ```text
/// A <- B <- C <- D   (master)
/// ```
#[fixture]
pub fn linear_repository(mut repository: TestRepository) -> TestRepository {
    repository.commit("A", &[], 1_700_000_000);
    repository.commit("B", &["A"], 1_700_000_100);
    repository.commit("C", &["B"], 1_700_000_200);
    repository.commit("D", &["C"], 1_700_000_300);
    repository.branch("master", "D");
    repository
}

/// ```text
///   Z <- A <- B
///          \    \
///           C <- D (merge) <- E   (master)
/// ```
#[fixture]
pub fn merge_repository(mut repository: TestRepository) -> TestRepository {
    repository.commit("Z", &[], 1_700_000_000);
    repository.commit("A", &["Z"], 1_700_000_100);
    repository.commit("B", &["A"], 1_700_000_200);
    repository.commit("C", &["A"], 1_700_000_300);
    repository.commit("D", &["B", "C"], 1_700_000_400);
    repository.commit("E", &["D"], 1_700_000_500);
    repository.branch("master", "E");
    repository.branch("right", "C");
    repository
}

pub fn run_cursor_log(git_dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("git-cursor-log").expect("Failed to find binary");
    cmd.env("GIT_DIR", git_dir);
    cmd.env_remove("GIT_CURSOR_LOG");
    cmd.env_remove("RUST_LOG");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}
