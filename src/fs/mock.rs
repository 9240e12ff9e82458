// src/fs/mock.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::FileSystem;

/// In-memory filesystem for locator tests.
///
/// Stores one executable flag per path. Paths are matched exactly as
/// inserted; there is no normalisation, so tests should use absolute
/// paths throughout.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    executable: Arc<Mutex<HashMap<PathBuf, bool>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// A file that exists but may not be executed.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        self.insert(path, false);
    }

    pub fn add_executable(&self, path: impl AsRef<Path>) {
        self.insert(path, true);
    }

    fn insert(&self, path: impl AsRef<Path>, executable: bool) {
        let mut entries = self.executable.lock().unwrap();
        entries.insert(path.as_ref().to_path_buf(), executable);
    }
}

impl FileSystem for MockFileSystem {
    fn is_executable(&self, path: &Path) -> bool {
        let entries = self.executable.lock().unwrap();
        entries.get(path).copied().unwrap_or(false)
    }
}
