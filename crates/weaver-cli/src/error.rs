//! Error types for the weaver CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Exit status for rejected input (parameters, files, configuration).
pub const EXIT_USAGE: u8 = 2;

/// Exit status for an internal generator fault.
pub const EXIT_SOFTWARE: u8 = 70;

#[derive(Debug, Error)]
pub enum CliError {
    /// Parameter file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parameter file is not a valid request
    #[error("invalid parameter file: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment or flag combination is unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation or generation failure from the lacing core
    #[error(transparent)]
    Lacing(#[from] weaver_lacing::Error),
}

impl From<weaver_lacing::ValidationError> for CliError {
    fn from(err: weaver_lacing::ValidationError) -> Self {
        Self::Lacing(err.into())
    }
}

impl CliError {
    /// Process exit code: faults are defects, everything else is bad input.
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Lacing(err) if !err.is_client_error() => EXIT_SOFTWARE,
            _ => EXIT_USAGE,
        }
    }
}
