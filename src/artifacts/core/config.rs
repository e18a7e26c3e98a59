use anyhow::Context;
use std::path::PathBuf;

/// Environment variable naming the git directory to read history from
pub const GIT_DIR_ENV: &str = "GIT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    git_dir: PathBuf,
}

impl Config {
    /// Load the configuration from the process environment
    ///
    /// `GIT_DIR` is required: there is no discovery from the working directory.
    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::from_git_dir(std::env::var_os(GIT_DIR_ENV).map(PathBuf::from))
    }

    fn from_git_dir(git_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let git_dir = git_dir
            .filter(|git_dir| !git_dir.as_os_str().is_empty())
            .with_context(|| format!("must set {GIT_DIR_ENV}"))?;

        Ok(Config { git_dir })
    }

    pub fn git_dir(&self) -> &PathBuf {
        &self.git_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_dir_is_required() {
        let err = Config::from_git_dir(None).unwrap_err();

        assert_eq!(err.to_string(), "must set GIT_DIR");
        assert!(Config::from_git_dir(Some(PathBuf::new())).is_err());
    }

    #[test]
    fn test_git_dir_is_kept_verbatim() {
        let config = Config::from_git_dir(Some(PathBuf::from("/tmp/repo/.git"))).unwrap();

        assert_eq!(config.git_dir(), &PathBuf::from("/tmp/repo/.git"));
    }
}
