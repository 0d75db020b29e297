//! Error types for the command-line tool.

use std::io;
use std::path::PathBuf;

use rbridge_protocol::CodecError;
use thiserror::Error;

// Exit codes.
pub const FAILURE: u8 = 1;
pub const DATA_INVALID: u8 = 60;
pub const USAGE: u8 = 64;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Frame or request rejected by the codec.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Hex capture could not be parsed.
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration file could not be loaded.
    #[error("failed to load config {path}: {message}")]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Underlying failure.
        message: String,
    },

    /// Bad command-line argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Codec(_) | CliError::Hex(_) | CliError::Json(_) | CliError::Yaml(_) => {
                DATA_INVALID
            }
            CliError::Config { .. } | CliError::InvalidArgument(_) => USAGE,
            CliError::Io(_) => FAILURE,
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
