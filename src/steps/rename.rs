use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::exec::{CommandRunner, argv};

/// Fixed path renames applied after flattening, when the source exists.
pub const RENAMES: &[(&str, &str)] = &[("index.md", "README.md")];

/// Apply the fixed rename table inside the clone.
///
/// Absent sources are skipped with a log line, never an error. Returns
/// true when at least one rename ran so the caller knows whether a
/// follow-up commit is needed.
pub async fn apply_renames(runner: &CommandRunner, clone_dir: &Path) -> Result<bool> {
    let mut renamed = false;
    for &(src, dst) in RENAMES {
        if !clone_dir.join(src).exists() {
            info!("{src} does not exist. skip.");
            continue;
        }
        runner
            .run(&argv(&["git", "mv", src, dst]), Some(clone_dir))
            .await?;
        renamed = true;
    }
    Ok(renamed)
}
