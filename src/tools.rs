use tracing::{debug, error};

use crate::exec::CommandRunner;

/// One required external tool and the invocation that proves it works.
struct ToolSpec {
    /// Name reported when the tool is unavailable.
    name: &'static str,
    /// Executable resolved on PATH before invoking.
    binary: &'static str,
    /// Version subcommand used as the liveness probe.
    probe: &'static [&'static str],
}

// git filter-repo is a git extension; it resolves as `git-filter-repo`
// on PATH (https://github.com/newren/git-filter-repo).
const REQUIRED_TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "git",
        binary: "git",
        probe: &["git", "--version"],
    },
    ToolSpec {
        name: "git filter-repo",
        binary: "git-filter-repo",
        probe: &["git", "filter-repo", "--version"],
    },
    ToolSpec {
        name: "gh",
        binary: "gh",
        probe: &["gh", "--version"],
    },
];

/// Verify that every required external tool responds to its version probe.
///
/// Individual failures are logged and folded into the boolean result so
/// the caller can fail with one actionable message instead of a nested
/// command error. Must run before any step that mutates the working tree.
pub async fn check_tools(runner: &CommandRunner) -> bool {
    let mut all_present = true;
    for tool in REQUIRED_TOOLS {
        if !check_tool(runner, tool).await {
            all_present = false;
        }
    }
    all_present
}

async fn check_tool(runner: &CommandRunner, tool: &ToolSpec) -> bool {
    if !runner.dry_run() {
        match which::which(tool.binary) {
            Ok(path) => debug!("{} resolved to {}", tool.name, path.display()),
            Err(e) => {
                error!("Could not find tool: {} ({e})", tool.name);
                return false;
            }
        }
    }

    let probe: Vec<String> = tool.probe.iter().map(|s| (*s).to_string()).collect();
    match runner.run(&probe, None).await {
        Ok(()) => true,
        Err(e) => {
            error!("Could not find tool: {} ({e})", tool.name);
            false
        }
    }
}
