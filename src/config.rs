use std::fmt;
use std::path::PathBuf;

use crate::error::{CarveError, Result};

/// Canonical `owner/name` identifier for a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    /// Parse an `owner/name` identifier.
    ///
    /// # Errors
    /// Returns an error when the input does not contain exactly one `/`
    /// separating two non-empty segments.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(CarveError::InvalidRepoId {
                input: input.to_string(),
            }),
        }
    }

    /// Repository short name, used as the local clone directory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// HTTPS remote URL for the repository.
    pub fn https_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.name)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Immutable settings for one extraction run, built once from the CLI.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub src_repository: RepoId,
    pub dst_repository: RepoId,
    pub target_dir: PathBuf,
    pub public: bool,
    pub archive: bool,
    pub git_user_name: Option<String>,
    pub git_user_email: Option<String>,
    pub clean: bool,
    pub timeout_secs: u64,
    pub dry_run: bool,
    pub work_dir: PathBuf,
}

impl RunConfig {
    /// Local directory the source repository is cloned into.
    pub fn clone_dir(&self) -> PathBuf {
        self.work_dir.join(self.src_repository.name())
    }
}
