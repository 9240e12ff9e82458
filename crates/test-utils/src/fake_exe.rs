//! Fake `lektor` executables for tests.
//!
//! Each fake is a small `sh` script written into its own temp directory,
//! so tests can script arbitrary stdout/exit behaviour without a real
//! lektor install. Unix only; tests using this are gated on `cfg(unix)`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

pub struct FakeExe {
    dir: TempDir,
    path: PathBuf,
}

impl FakeExe {
    /// Write an executable `lektor` script with the given body
    /// (`sh` syntax; `"$@"`, `$0` etc. are available).
    pub fn with_script(body: &str) -> Result<FakeExe> {
        Self::named("lektor", body)
    }

    /// Same, but with an arbitrary file name (e.g. a fake PATH-lookup
    /// utility).
    pub fn named(name: &str, body: &str) -> Result<FakeExe> {
        let dir = TempDir::new().context("creating temp dir for fake executable")?;
        let path = dir.path().join(name);
        let script = format!("#!/bin/sh\n{body}\n");
        fs::write(&path, script).context("writing fake executable script")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .context("marking fake executable as executable")?;
        }

        Ok(FakeExe { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the script; handy for scratch files the script
    /// writes (the directory is removed when the fake is dropped).
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
