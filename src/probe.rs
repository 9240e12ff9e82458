// src/probe.rs

//! One-shot version probe.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::errors::{LauncherError, Result};
use crate::runner::LektorRunner;

/// Matches the token following the word "version" in probe output.
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)version\s+(\S+)").expect("static version pattern"));

impl LektorRunner {
    /// Run `lektor --version` and extract the version token.
    ///
    /// Only the shape of the output governs success; the exit code is
    /// deliberately not consulted. Output that never mentions a version is
    /// indistinguishable from a broken launch and reported as
    /// [`LauncherError::VersionUnavailable`].
    pub async fn check_version(&self) -> Result<String> {
        let (output, status) = self.run_to_completion(["--version"]).await?;
        debug!(exit = ?status.code(), "version probe finished");

        match VERSION_RE.captures(&output) {
            Some(caps) => Ok(caps[1].to_string()),
            None => Err(LauncherError::VersionUnavailable),
        }
    }
}
