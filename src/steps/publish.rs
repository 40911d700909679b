use std::path::Path;

use crate::config::RepoId;
use crate::error::Result;
use crate::exec::{CommandRunner, argv};

/// Remote name the new repository is registered under in the clone.
pub const UPSTREAM_REMOTE: &str = "upstream";
/// Branch pushed to the new repository.
pub const PUSH_BRANCH: &str = "master";

/// Create the destination repository and register it as `upstream`.
///
/// Creation failure aborts before the remote is added, so no push is ever
/// attempted against a repository that does not exist.
pub async fn create_repo_with_upstream(
    runner: &CommandRunner,
    clone_dir: &Path,
    dst: &RepoId,
    public: bool,
) -> Result<()> {
    let visibility = if public { "--public" } else { "--private" };
    runner
        .run(
            &argv(&["gh", "repo", "create", &dst.to_string(), visibility]),
            None,
        )
        .await?;
    runner
        .run(
            &argv(&["git", "remote", "add", UPSTREAM_REMOTE, &dst.https_url()]),
            Some(clone_dir),
        )
        .await?;
    Ok(())
}

/// Push the fixed branch to the `upstream` remote.
pub async fn push_branch(runner: &CommandRunner, clone_dir: &Path) -> Result<()> {
    runner
        .run(
            &argv(&["git", "push", UPSTREAM_REMOTE, PUSH_BRANCH]),
            Some(clone_dir),
        )
        .await
}

/// Archive the destination repository, bypassing the confirmation prompt.
pub async fn archive_repo(runner: &CommandRunner, dst: &RepoId) -> Result<()> {
    runner
        .run(&argv(&["gh", "repo", "archive", &dst.to_string(), "-y"]), None)
        .await
}
