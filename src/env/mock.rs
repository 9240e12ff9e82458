// src/env/mock.rs

use std::ffi::OsString;

use super::EnvProvider;

/// Fixed environment for launcher tests.
///
/// Variables are reported in insertion order, so tests can also assert
/// that the overlay does not reorder inherited entries.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: Vec<(OsString, OsString)>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }
}

impl EnvProvider for MockEnv {
    fn snapshot(&self) -> Vec<(OsString, OsString)> {
        self.vars.clone()
    }
}
