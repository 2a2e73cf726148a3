//! Errors of the `gsl` binary and their exit codes.

use std::path::PathBuf;

use thiserror::Error;

use gsl_core::CoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid arc '{0}', expected FROM->TO")]
    InvalidArc(String),
}

impl CliError {
    /// 1 = usage error, 2 = graph operation failure, 3 = I/O or JSON error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArc(_) => 1,
            CliError::Core(_) => 2,
            CliError::Io { .. } | CliError::Json(_) => 3,
        }
    }
}
