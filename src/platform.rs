// src/platform.rs

//! Host platform dispatch.
//!
//! All platform-specific knowledge lives behind the [`Platform`] variant,
//! resolved once at startup, instead of `cfg!`/string comparisons scattered
//! through the call sites.

use std::path::{Path, PathBuf};

/// The platforms the launcher knows how to behave on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

impl Platform {
    /// Resolve the platform the current process runs on.
    ///
    /// Unrecognised unixy systems are treated like Linux (PATH lookup
    /// only), which is the safest fallback.
    pub fn current() -> Platform {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// File name of the lektor executable on this platform.
    pub fn executable_name(&self) -> &'static str {
        match self {
            Platform::Windows => "lektor.exe",
            _ => "lektor",
        }
    }

    /// The OS utility that resolves a command name against PATH.
    pub fn lookup_utility(&self) -> &'static str {
        match self {
            Platform::Windows => "where",
            _ => "which",
        }
    }

    /// Where a bundled copy of the executable would live, given the
    /// directory containing the host application's own binary.
    ///
    /// - macOS: app bundles ship it under `Contents/Resources`, next to
    ///   the `Contents/MacOS` directory holding the host binary.
    /// - Windows: the installer layout is not finalised; best effort is a
    ///   copy sitting right next to the host executable.
    /// - Linux: no bundling convention, PATH lookup only.
    pub fn bundled_candidate(&self, host_exe_dir: &Path) -> Option<PathBuf> {
        match self {
            Platform::MacOs => host_exe_dir
                .parent()
                .map(|contents| contents.join("Resources").join(self.executable_name())),
            Platform::Windows => Some(host_exe_dir.join(self.executable_name())),
            Platform::Linux => None,
        }
    }
}
