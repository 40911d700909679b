use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarveError {
    #[error("command failed with exit status {code:?}: `{command}`")]
    CommandFailed { command: String, code: Option<i32> },

    #[error("command timed out after {timeout_secs}s: `{command}`")]
    CommandTimeout { command: String, timeout_secs: u64 },

    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("required tools are missing, see the log for details")]
    ToolsMissing,

    #[error("invalid repository identifier (expected `owner/name`): {input}")]
    InvalidRepoId { input: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CarveError>;
