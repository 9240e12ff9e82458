// src/lib.rs

//! Process supervision for the `lektor` executable.
//!
//! This crate is the layer a UI shell uses to drive lektor: it discovers
//! the executable (bundled copy first, then PATH), launches it with the UI
//! environment overlay, and consumes its stdout incrementally. Three
//! operations are exposed on [`LektorRunner`]:
//!
//! - [`LektorRunner::check_version`] — one-shot `--version` probe
//! - [`LektorRunner::analyze_project`] — one-shot `project-info --json`
//! - [`LektorRunner::spawn_server`] — long-lived `devserver` supervision

pub mod cli;
pub mod env;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod inspect;
pub mod locate;
pub mod logging;
pub mod platform;
pub mod probe;
pub mod runner;
pub mod server;

use std::sync::Arc;

use tracing::info;

use crate::cli::{CliArgs, LauncherCommand};
use crate::exec::launch::ProcessLauncher;

pub use crate::errors::{LauncherError, Result};
pub use crate::runner::LektorRunner;
pub use crate::server::{DEFAULT_PORT, ServerHandle, ServerOptions, ServerState};

/// High-level entry point used by `main.rs`.
pub async fn run(args: CliArgs) -> Result<()> {
    let runner = LektorRunner::new().with_launcher(ProcessLauncher::new(args.lang.clone()));

    match args.command {
        LauncherCommand::Version => {
            let version = runner.check_version().await?;
            println!("{version}");
        }

        LauncherCommand::ProjectInfo { project } => match runner.analyze_project(&project).await? {
            Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
            None => println!("null"),
        },

        LauncherCommand::Serve { project, port } => {
            let (line_tx, mut line_rx) = tokio::sync::mpsc::unbounded_channel::<String>();
            let options = ServerOptions::new(move |line| {
                let _ = line_tx.send(line);
            })
            .port(port);

            let handle = Arc::new(runner.spawn_server(&project, options)?);
            info!(url = %handle.url(), admin = %handle.admin_url(), "devserver supervised");

            // Ctrl-C → graceful shutdown.
            {
                let handle = Arc::clone(&handle);
                tokio::spawn(async move {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        eprintln!("failed to listen for Ctrl+C: {e}");
                        return;
                    }
                    handle.shutdown();
                });
            }

            // The sink owns the only sender, so this loop ends once the
            // terminal shutdown line has been delivered.
            while let Some(line) = line_rx.recv().await {
                println!("{line}");
            }
        }
    }

    Ok(())
}
