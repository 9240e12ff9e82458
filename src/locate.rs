// src/locate.rs

//! Finding the lektor executable.
//!
//! Two-stage discovery: a bundled copy shipped next to the host
//! application is preferred, falling back to a PATH lookup via the
//! platform's standard utility. A successful resolution is cached for the
//! lifetime of the locator; a miss is retried on the next call.

use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::fs::{FileSystem, RealFileSystem};
use crate::platform::Platform;

/// Command name handed to the PATH lookup utility.
pub const COMMAND_NAME: &str = "lektor";

/// Resolves a command name against PATH by running the platform's lookup
/// utility (`which` on unixy systems, `where` on Windows) synchronously.
#[derive(Debug, Clone)]
pub struct GlobalLookup {
    utility: PathBuf,
}

impl GlobalLookup {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            utility: PathBuf::from(platform.lookup_utility()),
        }
    }

    /// Use a different lookup utility. Tests point this at a script.
    pub fn with_utility(utility: impl Into<PathBuf>) -> Self {
        Self {
            utility: utility.into(),
        }
    }

    /// Run the utility and parse its output.
    ///
    /// Returns the first non-empty reported line, trimmed of surrounding
    /// whitespace, or `None` when the utility exits non-zero (command not
    /// on PATH) or cannot be run at all.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let output = match Command::new(&self.utility).arg(name).output() {
            Ok(output) => output,
            Err(err) => {
                warn!(
                    utility = %self.utility.display(),
                    error = %err,
                    "PATH lookup utility could not be run"
                );
                return None;
            }
        };

        if !output.status.success() {
            debug!(
                utility = %self.utility.display(),
                status = ?output.status.code(),
                "PATH lookup reported no match"
            );
            return None;
        }

        let text = String::from_utf8_lossy(&output.stdout);
        text.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from)
    }
}

/// Discovers the lektor executable, bundled copy first, then PATH.
#[derive(Debug)]
pub struct ExecutableLocator {
    platform: Platform,
    fs: Arc<dyn FileSystem>,
    lookup: GlobalLookup,
    bundled_dir: Option<PathBuf>,
    cached: Mutex<Option<PathBuf>>,
}

impl ExecutableLocator {
    pub fn new() -> Self {
        Self::with_platform(Platform::current())
    }

    pub fn with_platform(platform: Platform) -> Self {
        Self {
            platform,
            fs: Arc::new(RealFileSystem),
            lookup: GlobalLookup::for_platform(platform),
            bundled_dir: None,
            cached: Mutex::new(None),
        }
    }

    /// Locator pinned to a known path, skipping discovery entirely.
    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        let locator = Self::new();
        *locator.cached.lock().unwrap() = Some(path.into());
        locator
    }

    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_lookup(mut self, lookup: GlobalLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Override the directory searched for a bundled copy (normally the
    /// directory containing the host application's own executable).
    pub fn with_bundled_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundled_dir = Some(dir.into());
        self
    }

    /// Find the lektor executable.
    ///
    /// A successful resolution is memoized for the lifetime of the locator
    /// and never re-validated against the filesystem; a failed resolution
    /// is retried on the next call.
    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(found) = self.cached.lock().unwrap().clone() {
            return Some(found);
        }

        let resolved = self
            .bundled()
            .or_else(|| self.lookup.find(COMMAND_NAME));

        match &resolved {
            Some(path) => {
                debug!(path = %path.display(), "resolved lektor executable");
                *self.cached.lock().unwrap() = Some(path.clone());
            }
            None => debug!("no lektor executable found"),
        }

        resolved
    }

    /// Drop the cached resolution so the next `locate` re-discovers.
    pub fn reset(&self) {
        *self.cached.lock().unwrap() = None;
    }

    fn bundled(&self) -> Option<PathBuf> {
        let dir = match &self.bundled_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_exe().ok()?.parent()?.to_path_buf(),
        };

        let candidate = self.platform.bundled_candidate(&dir)?;
        if self.fs.is_executable(&candidate) {
            Some(candidate)
        } else {
            None
        }
    }
}

impl Default for ExecutableLocator {
    fn default() -> Self {
        Self::new()
    }
}
