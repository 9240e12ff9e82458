// src/runner.rs

//! High-level entry points for driving the lektor executable.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use crate::errors::{LauncherError, Result};
use crate::exec::launch::{ProcessLauncher, drain_stderr};
use crate::exec::lines::collect_stream;
use crate::locate::ExecutableLocator;

/// Language reported to spawned children when the caller sets none.
const DEFAULT_UI_LANG: &str = "en";

/// Owns executable discovery and launching for every operation.
///
/// One runner can serve any number of version probes, project inspections
/// and server spawns; the only state shared between them is the memoized
/// executable path inside the locator.
pub struct LektorRunner {
    locator: ExecutableLocator,
    launcher: ProcessLauncher,
    timeout: Option<Duration>,
}

impl LektorRunner {
    pub fn new() -> Self {
        Self {
            locator: ExecutableLocator::new(),
            launcher: ProcessLauncher::new(DEFAULT_UI_LANG),
            timeout: None,
        }
    }

    pub fn with_locator(mut self, locator: ExecutableLocator) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_launcher(mut self, launcher: ProcessLauncher) -> Self {
        self.launcher = launcher;
        self
    }

    /// Bound the one-shot operations (version probe, project inspection).
    ///
    /// Off by default: without a timeout a hanging child hangs the caller
    /// for as long as the child lives. The server supervisor is never
    /// bounded; it is fire-and-forget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn locator(&self) -> &ExecutableLocator {
        &self.locator
    }

    pub(crate) fn launcher(&self) -> &ProcessLauncher {
        &self.launcher
    }

    /// Resolve the executable or fail before anything is spawned.
    pub(crate) fn resolve(&self) -> Result<PathBuf> {
        self.locator
            .locate()
            .ok_or(LauncherError::ExecutableNotFound)
    }

    /// Spawn `args`, accumulate stdout to EOF and wait for the child.
    ///
    /// Stderr is drained in the background. When a timeout is configured
    /// and expires, the child is dropped (and killed with it) and the
    /// operation fails with [`LauncherError::TimedOut`].
    pub(crate) async fn run_to_completion<I, S>(&self, args: I) -> Result<(String, ExitStatus)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = self.resolve()?;
        let mut child = self.launcher.spawn(&program, args)?;

        let stdout = child.stdout.take();
        drain_stderr(child.stderr.take());

        let collect_and_wait = async {
            let output = match stdout {
                Some(stdout) => collect_stream(stdout).await?,
                None => String::new(),
            };
            let status = child.wait().await?;
            Ok::<_, LauncherError>((output, status))
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, collect_and_wait)
                .await
                .map_err(|_| LauncherError::TimedOut)?,
            None => collect_and_wait.await,
        }
    }
}

impl Default for LektorRunner {
    fn default() -> Self {
        Self::new()
    }
}
