// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Could not find a lektor executable on this system")]
    ExecutableNotFound,

    #[error("Could not launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not determine lektor version from its output")]
    VersionUnavailable,

    #[error("Failed to decode project info output: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Child process did not finish within the configured timeout")]
    TimedOut,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LauncherError>;
