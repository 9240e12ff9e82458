// src/inspect.rs

//! One-shot project inspection.

use std::ffi::OsString;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::runner::LektorRunner;

impl LektorRunner {
    /// Run `lektor --project <path> project-info --json` and decode the
    /// output.
    ///
    /// A non-zero exit resolves to `Ok(None)` rather than an error; the
    /// exit code alone cannot distinguish "no project there" from a broken
    /// run, so the reason only shows up in the child's stderr log output.
    /// Malformed JSON on a zero exit is a [`crate::LauncherError::Decode`]
    /// failure.
    pub async fn analyze_project(&self, project: &Path) -> Result<Option<Value>> {
        let args: Vec<OsString> = vec![
            "--project".into(),
            project.as_os_str().into(),
            "project-info".into(),
            "--json".into(),
        ];

        let (output, status) = self.run_to_completion(args).await?;
        if !status.success() {
            debug!(
                exit = ?status.code(),
                project = %project.display(),
                "project inspection exited non-zero; treating as no data"
            );
            return Ok(None);
        }

        let info: Value = serde_json::from_str(&output)?;
        Ok(Some(info))
    }
}
