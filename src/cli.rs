// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::server::DEFAULT_PORT;

/// Command-line arguments for `lektor-launcher`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lektor-launcher",
    version,
    about = "Locate and drive the lektor executable.",
    long_about = None
)]
pub struct CliArgs {
    /// UI language code handed to the child via LEKTOR_UI_LANG.
    #[arg(long, value_name = "CODE", default_value = "en")]
    pub lang: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LEKTOR_LAUNCHER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: LauncherCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum LauncherCommand {
    /// Print the version reported by the lektor executable.
    Version,

    /// Print project information as JSON.
    ProjectInfo {
        /// Path to the project to inspect.
        #[arg(value_name = "PATH")]
        project: PathBuf,
    },

    /// Run the development server and stream its status output.
    Serve {
        /// Path to the project to serve.
        #[arg(value_name = "PATH")]
        project: PathBuf,

        /// TCP port for the devserver.
        #[arg(long, value_name = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
