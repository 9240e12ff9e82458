// src/exec/mod.rs

//! Child process launching and stdout handling.
//!
//! - [`launch`] builds the environment overlay and spawns children with
//!   `tokio::process::Command`.
//! - [`lines`] splits child output streams into logical lines, both
//!   incrementally (server status) and accumulated (one-shot probes).

pub mod launch;
pub mod lines;

pub use launch::{LaunchSpec, ProcessLauncher, RUN_FROM_UI_KEY, UI_LANG_KEY};
pub use lines::{LineParser, collect_stream, stream_lines};
