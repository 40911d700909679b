pub mod cleanup;
pub mod commit;
pub mod filter;
pub mod flatten;
pub mod publish;
pub mod rename;

use std::time::Duration;

use colored::Colorize;

use crate::config::RunConfig;
use crate::error::{CarveError, Result};
use crate::exec::CommandRunner;
use crate::tools;

/// Run the whole extraction pipeline, strictly in order.
///
/// Each step's completion gates the next; any failure unwinds immediately
/// with no rollback, leaving the working clone and any created remote
/// repository in place for inspection.
pub async fn run(config: &RunConfig) -> Result<()> {
    let runner = CommandRunner::new(config.dry_run, Duration::from_secs(config.timeout_secs));

    if !tools::check_tools(&runner).await {
        return Err(CarveError::ToolsMissing);
    }

    let clone_dir = config.clone_dir();

    println!(
        "{} {} ({})",
        "Extracting".green(),
        config.src_repository,
        config.target_dir.display()
    );
    filter::extract_history(
        &runner,
        &config.src_repository,
        &config.target_dir,
        &clone_dir,
    )
    .await?;

    println!("{} {}", "Flattening".green(), clone_dir.display());
    flatten::flatten_root(&runner, &clone_dir, &config.target_dir).await?;
    commit::commit_all(
        &runner,
        &clone_dir,
        config.git_user_name.as_deref(),
        config.git_user_email.as_deref(),
        commit::ROOT_COMMIT_MESSAGE,
    )
    .await?;

    if rename::apply_renames(&runner, &clone_dir).await? {
        commit::commit_all(
            &runner,
            &clone_dir,
            config.git_user_name.as_deref(),
            config.git_user_email.as_deref(),
            commit::RENAME_COMMIT_MESSAGE,
        )
        .await?;
    }

    println!("{} {}", "Publishing".green(), config.dst_repository);
    publish::create_repo_with_upstream(&runner, &clone_dir, &config.dst_repository, config.public)
        .await?;
    publish::push_branch(&runner, &clone_dir).await?;

    if config.archive {
        publish::archive_repo(&runner, &config.dst_repository).await?;
    }
    if config.clean {
        cleanup::remove_clone(&clone_dir, config.dry_run)?;
    }

    println!("{} {}", "✓".green(), config.dst_repository);
    Ok(())
}
