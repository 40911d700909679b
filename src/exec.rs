use std::path::Path;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::{CarveError, Result};

/// Build an owned argv from string literals.
pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}

/// Runs external commands one at a time, honoring dry-run and a
/// per-command timeout.
///
/// Callers communicate with the external tools through exit status only;
/// stdout and stderr are inherited, never captured.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    dry_run: bool,
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(dry_run: bool, timeout: Duration) -> Self {
        Self { dry_run, timeout }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Render the argv the way a shell would accept it, for logs and
    /// dry-run output.
    pub fn render(argv: &[String]) -> String {
        shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| argv.join(" "))
    }

    /// Execute `argv`, optionally from `cwd`.
    ///
    /// In dry-run mode the command line is logged and nothing is spawned.
    /// A non-zero exit maps to `CommandFailed`; exceeding the timeout kills
    /// the child and maps to `CommandTimeout`.
    pub async fn run(&self, argv: &[String], cwd: Option<&Path>) -> Result<()> {
        let command = Self::render(argv);
        info!("=== command: `{command}`");
        if self.dry_run {
            return Ok(());
        }

        let Some((program, args)) = argv.split_first() else {
            return Err(anyhow::anyhow!("empty command line").into());
        };

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        cmd.kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| CarveError::Spawn {
            command: command.clone(),
            source,
        })?;

        let status = match timeout(self.timeout, child.wait()).await {
            Ok(waited) => waited?,
            Err(_) => {
                child.kill().await.ok();
                return Err(CarveError::CommandTimeout {
                    command,
                    timeout_secs: self.timeout.as_secs(),
                });
            }
        };

        if !status.success() {
            return Err(CarveError::CommandFailed {
                command,
                code: status.code(),
            });
        }
        debug!("=== success command");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn runner(dry_run: bool, secs: u64) -> CommandRunner {
        CommandRunner::new(dry_run, Duration::from_secs(secs))
    }

    #[test]
    fn render_round_trips_through_a_shell_split() {
        let args = argv(&["git", "commit", "-m", "chore: change root directory."]);
        let rendered = CommandRunner::render(&args);
        assert_eq!(shlex::split(&rendered).unwrap(), args);
    }

    #[tokio::test]
    async fn dry_run_spawns_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("marker");
        let args = argv(&["touch", marker.to_str().unwrap()]);

        runner(true, 5).run(&args, None).await.unwrap();

        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn zero_exit_is_success() {
        runner(false, 5).run(&argv(&["true"]), None).await.unwrap();
    }

    #[tokio::test]
    async fn nonzero_exit_maps_to_command_failed() {
        let err = runner(false, 5)
            .run(&argv(&["false"]), None)
            .await
            .unwrap_err();
        match err {
            CarveError::CommandFailed { code, .. } => assert_eq!(code, Some(1)),
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn timeout_kills_the_child() {
        let start = Instant::now();
        let err = runner(false, 1)
            .run(&argv(&["sleep", "30"]), None)
            .await
            .unwrap_err();
        match err {
            CarveError::CommandTimeout { timeout_secs, .. } => assert_eq!(timeout_secs, 1),
            other => panic!("expected CommandTimeout, got {other:?}"),
        }
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn missing_binary_maps_to_spawn_error() {
        let err = runner(false, 5)
            .run(&argv(&["carve-no-such-binary"]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CarveError::Spawn { .. }));
    }

    #[tokio::test]
    async fn cwd_applies_to_the_child() {
        let dir = tempfile::TempDir::new().unwrap();
        runner(false, 5)
            .run(&argv(&["touch", "here"]), Some(dir.path()))
            .await
            .unwrap();
        assert!(dir.path().join("here").exists());
    }
}
