// src/fs/mod.rs

use std::fmt::Debug;
use std::path::Path;

pub mod mock;

/// Abstract filesystem interface for the executable checks.
///
/// The locator only ever asks whether a candidate path may be executed;
/// keeping the trait this small makes the mock trivial.
pub trait FileSystem: Send + Sync + Debug {
    /// Whether the file at `path` may be executed by the current user.
    fn is_executable(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    // Windows has no executable bit; being a file is the best check.
    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> bool {
        path.is_file()
    }
}
