use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carve_tool::config::{RepoId, RunConfig};
use carve_tool::steps;

#[derive(Parser)]
#[command(name = "carve")]
#[command(about = "Extract a subdirectory's commit history into a new standalone repository")]
#[command(version)]
struct Cli {
    /// Repository the history is extracted from (`owner/repository-name`)
    src_repository: String,

    /// Subdirectory whose history is extracted
    target_dir: PathBuf,

    /// Repository the extracted history is pushed to (`owner/repository-name`)
    dst_repository: String,

    /// Create the destination repository public instead of private
    #[arg(short = 'p', long)]
    public: bool,

    /// Archive the destination repository after pushing
    #[arg(short = 'a', long)]
    archive: bool,

    /// Committer name for the generated commits
    #[arg(long)]
    git_user_name: Option<String>,

    /// Committer email for the generated commits
    #[arg(long)]
    git_user_email: Option<String>,

    /// Delete the local working clone after a successful run
    #[arg(short = 'c', long)]
    clean: bool,

    /// Per-command timeout in seconds
    #[arg(short = 't', long, default_value_t = 30)]
    timeout_sec: u64,

    /// Log the commands without executing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Increase logging verbosity (error, warn, info, debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory local clones are created under
    #[arg(long, default_value = "data/raw")]
    work_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RunConfig {
        src_repository: RepoId::parse(&cli.src_repository)?,
        dst_repository: RepoId::parse(&cli.dst_repository)?,
        target_dir: cli.target_dir,
        public: cli.public,
        archive: cli.archive,
        git_user_name: cli.git_user_name,
        git_user_email: cli.git_user_email,
        clean: cli.clean,
        timeout_secs: cli.timeout_sec,
        dry_run: cli.dry_run,
        work_dir: cli.work_dir,
    };
    info!("{config:?}");

    steps::run(&config).await?;
    Ok(())
}
