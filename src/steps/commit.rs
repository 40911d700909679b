use std::path::Path;

use crate::error::Result;
use crate::exec::{CommandRunner, argv};

pub const ROOT_COMMIT_MESSAGE: &str = "chore: change root directory.";
pub const RENAME_COMMIT_MESSAGE: &str = "chore: change filenames.";

/// Stage every working-tree change and commit it with `message`.
///
/// When a committer identity is given it is pinned with repository-local
/// config first. A commit with nothing to commit exits non-zero and fails
/// the pipeline; the tool does not treat that as a benign no-op.
pub async fn commit_all(
    runner: &CommandRunner,
    clone_dir: &Path,
    user_name: Option<&str>,
    user_email: Option<&str>,
    message: &str,
) -> Result<()> {
    if let Some(name) = user_name {
        runner
            .run(
                &argv(&["git", "config", "--local", "user.name", name]),
                Some(clone_dir),
            )
            .await?;
    }
    if let Some(email) = user_email {
        runner
            .run(
                &argv(&["git", "config", "--local", "user.email", email]),
                Some(clone_dir),
            )
            .await?;
    }
    runner
        .run(&argv(&["git", "add", "."]), Some(clone_dir))
        .await?;
    runner
        .run(&argv(&["git", "commit", "-m", message]), Some(clone_dir))
        .await?;
    Ok(())
}
