use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;

/// Delete the local working clone.
///
/// Only reached when the whole pipeline succeeded and `--clean` was
/// requested; failed runs leave the clone on disk for post-mortem
/// inspection.
pub fn remove_clone(clone_dir: &Path, dry_run: bool) -> Result<()> {
    info!("remove: {}", clone_dir.display());
    if dry_run {
        return Ok(());
    }
    fs::remove_dir_all(clone_dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_the_clone_recursively() {
        let dir = tempfile::TempDir::new().unwrap();
        let clone = dir.path().join("mono");
        fs::create_dir_all(clone.join("src")).unwrap();
        fs::write(clone.join("src/a.txt"), "a").unwrap();

        remove_clone(&clone, false).unwrap();
        assert!(!clone.exists());
    }

    #[test]
    fn dry_run_leaves_the_clone_in_place() {
        let dir = tempfile::TempDir::new().unwrap();
        let clone = dir.path().join("mono");
        fs::create_dir_all(&clone).unwrap();

        remove_clone(&clone, true).unwrap();
        assert!(clone.exists());
    }
}
