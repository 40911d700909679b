use std::path::Path;

use tracing::info;

use crate::config::RepoId;
use crate::error::Result;
use crate::exec::CommandRunner;

/// Forward-slash form of `path`; the history rewrite tool is
/// separator-sensitive on Windows checkouts.
fn forward_slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

pub fn clone_args(src: &RepoId, clone_dir: &Path) -> Vec<String> {
    vec![
        "gh".to_string(),
        "repo".to_string(),
        "clone".to_string(),
        src.to_string(),
        clone_dir.display().to_string(),
    ]
}

pub fn filter_args(target_dir: &Path) -> Vec<String> {
    vec![
        "git".to_string(),
        "filter-repo".to_string(),
        "--path".to_string(),
        forward_slashed(target_dir),
    ]
}

/// Clone `src` into `clone_dir`, then rewrite the clone's history down to
/// the commits touching `target_dir`. The nested directory layout is left
/// untouched; flattening happens in a later step.
pub async fn extract_history(
    runner: &CommandRunner,
    src: &RepoId,
    target_dir: &Path,
    clone_dir: &Path,
) -> Result<()> {
    info!(
        "extracting history of {} from {src}",
        target_dir.display()
    );
    runner.run(&clone_args(src, clone_dir), None).await?;
    runner.run(&filter_args(target_dir), Some(clone_dir)).await?;
    Ok(())
}
