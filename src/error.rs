//! Error types for the task board

use std::path::PathBuf;

use thiserror::Error;

use crate::task::TaskId;

/// Result type alias for task board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Rejected store transitions. The store state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Task id already in use: {0}")]
    DuplicateId(TaskId),
}

/// Main error type for the application
#[derive(Debug, Error)]
pub enum BoardError {
    /// Terminal or file IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON export failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A global tracing subscriber was already installed
    #[error("Logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

impl BoardError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BoardError::Config { .. } => 2,
            _ => 1,
        }
    }
}
