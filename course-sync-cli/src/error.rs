use std::path::Path;

use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Schedule feed could not be read
    #[error("{0}")]
    Feed(#[from] course_sync_core::FeedError),

    /// Description source could not be set up
    #[error("Description source error: {0}")]
    Fetch(#[from] course_sync_fetch::FetchError),

    /// Sync aborted before reconciling anything
    #[error("{0}")]
    Pipeline(#[from] course_sync_import::PipelineError),

    /// CSV export failed
    #[error("Export error: {0}")]
    Export(#[from] course_sync_import::ExportError),

    /// Another sync holds the database
    #[error("Database is locked by {holder} ({path}); remove the lock file if no sync is running")]
    Locked { path: String, holder: String },

    /// Some table passes failed
    #[error("{failed} table(s) failed to sync")]
    Incomplete { failed: usize },
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn locked(path: &Path, pid: Option<u32>) -> Self {
        Self::Locked {
            path: path.display().to_string(),
            holder: match pid {
                Some(pid) => format!("process {pid}"),
                None => "another process".to_string(),
            },
        }
    }
}
