use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::exec::{CommandRunner, argv};

/// Suffix applied when a promoted entry's name is already taken by an
/// existing root entry.
const COLLISION_SUFFIX: &str = "_test";

/// One planned `git mv` from inside the target directory up to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOp {
    /// Entry inside the target directory, relative to the clone root.
    pub source: PathBuf,
    /// Name the entry lands under at the root in the first pass.
    pub dest: String,
    /// Final name applied in the second pass when `dest` is a temporary.
    pub deferred: Option<String>,
}

/// Plan the first-pass moves for the given root and target entry names.
///
/// A collision cannot be resolved by deleting the root occupant first:
/// the deletion belongs to the same logical change and must come after
/// every move is staged, so colliding entries take a temporary name and
/// get renamed once the occupant is gone.
pub fn plan_moves(
    root_names: &BTreeSet<String>,
    target_dir: &Path,
    target_entries: &[String],
) -> Vec<MoveOp> {
    target_entries
        .iter()
        .map(|name| {
            let source = target_dir.join(name);
            if root_names.contains(name) {
                MoveOp {
                    source,
                    dest: format!("{name}{COLLISION_SUFFIX}"),
                    deferred: Some(name.clone()),
                }
            } else {
                MoveOp {
                    source,
                    dest: name.clone(),
                    deferred: None,
                }
            }
        })
        .collect()
}

fn entry_names(dir: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        names.insert(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Move the filtered subdirectory's contents up to the clone root.
///
/// First pass moves every target entry to the root (via a temporary name
/// on collision), then the snapshotted original root entries are deleted,
/// then the temporaries are renamed onto the freed names. The deletions
/// are plain filesystem removals; the later `git add .` records them.
pub async fn flatten_root(
    runner: &CommandRunner,
    clone_dir: &Path,
    target_dir: &Path,
) -> Result<()> {
    if runner.dry_run() && !clone_dir.exists() {
        info!(
            "dry-run: no clone at {}, skipping root flattening",
            clone_dir.display()
        );
        return Ok(());
    }

    let root_names = entry_names(clone_dir)?;
    let target_entries: Vec<String> = entry_names(&clone_dir.join(target_dir))?
        .into_iter()
        .collect();

    let moves = plan_moves(&root_names, target_dir, &target_entries);
    let mut deferred = Vec::new();
    for op in &moves {
        info!("move: {} to {}", op.source.display(), op.dest);
        let source = op.source.to_string_lossy().into_owned();
        runner
            .run(&argv(&["git", "mv", &source, &op.dest]), Some(clone_dir))
            .await?;
        if let Some(final_name) = &op.deferred {
            deferred.push((op.dest.clone(), final_name.clone()));
        }
    }

    for name in &root_names {
        if name == ".git" {
            continue;
        }
        info!("remove: {name}");
        if runner.dry_run() {
            continue;
        }
        let path = clone_dir.join(name);
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }

    for (tmp, final_name) in deferred {
        info!("move: {tmp} to {final_name}");
        runner
            .run(&argv(&["git", "mv", &tmp, &final_name]), Some(clone_dir))
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn plan_moves_promotes_entries_directly_without_collisions() {
        let plan = plan_moves(
            &names(&[".git", "libs"]),
            Path::new("libs/widget"),
            &["a.txt".to_string(), "src".to_string()],
        );
        assert_eq!(
            plan,
            vec![
                MoveOp {
                    source: PathBuf::from("libs/widget/a.txt"),
                    dest: "a.txt".to_string(),
                    deferred: None,
                },
                MoveOp {
                    source: PathBuf::from("libs/widget/src"),
                    dest: "src".to_string(),
                    deferred: None,
                },
            ]
        );
    }

    #[test]
    fn plan_moves_routes_collisions_through_a_temporary_name() {
        let plan = plan_moves(
            &names(&[".git", "b", "libs"]),
            Path::new("libs/widget"),
            &["a.txt".to_string(), "b".to_string()],
        );
        assert_eq!(plan[0].deferred, None);
        assert_eq!(plan[1].dest, "b_test");
        assert_eq!(plan[1].deferred, Some("b".to_string()));
    }

    #[tokio::test]
    async fn dry_run_without_a_clone_is_a_no_op() {
        let runner = CommandRunner::new(true, Duration::from_secs(5));
        let missing = Path::new("data/raw/never-cloned");
        flatten_root(&runner, missing, Path::new("libs/widget"))
            .await
            .unwrap();
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn dry_run_against_an_existing_tree_mutates_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let clone = dir.path();
        fs::create_dir_all(clone.join("libs/widget/b")).unwrap();
        fs::create_dir_all(clone.join("b")).unwrap();
        fs::create_dir_all(clone.join(".git")).unwrap();
        fs::write(clone.join("libs/widget/a.txt"), "a").unwrap();
        fs::write(clone.join("b/old.txt"), "old").unwrap();

        let runner = CommandRunner::new(true, Duration::from_secs(5));
        flatten_root(&runner, clone, Path::new("libs/widget"))
            .await
            .unwrap();

        assert!(clone.join("libs/widget/a.txt").exists());
        assert!(clone.join("b/old.txt").exists());
        assert!(!clone.join("a.txt").exists());
        assert!(!clone.join("b_test").exists());
    }

    #[tokio::test]
    async fn missing_clone_errors_outside_dry_run() {
        let runner = CommandRunner::new(false, Duration::from_secs(5));
        let result = flatten_root(
            &runner,
            Path::new("data/raw/never-cloned"),
            Path::new("libs/widget"),
        )
        .await;
        assert!(result.is_err());
    }
}
