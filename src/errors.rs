use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Command failed: `{command}` exited with code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("Command terminated by signal: `{0}`")]
    CommandTerminated(String),

    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Solution root not found: no Tack.sln or .tack-tasks.yml in {} or any parent directory",
        .start.display()
    )]
    RootNotFound { start: PathBuf },

    #[error("Solution '{solution}' not found in {}", .root.display())]
    SolutionNotFound { solution: String, root: PathBuf },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid pattern '{0}': {1}")]
    InvalidPattern(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskError {
    /// Process exit code for this error.
    ///
    /// A failed external command hands its own code through; anything that
    /// cannot be represented as a process exit status collapses to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            TaskError::CommandFailed { code, .. } => u8::try_from(*code)
                .ok()
                .filter(|c| *c != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
