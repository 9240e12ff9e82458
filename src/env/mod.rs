// src/env/mod.rs

use std::env;
use std::ffi::OsString;
use std::fmt::Debug;

pub mod mock;

/// Abstract source of the process environment.
///
/// [`crate::exec::ProcessLauncher`] snapshots the environment through this
/// trait at launch time, so tests can supply a controlled environment
/// without touching real process state.
pub trait EnvProvider: Send + Sync + Debug {
    /// A full copy of the environment as it is right now.
    fn snapshot(&self) -> Vec<(OsString, OsString)>;
}

/// Implementation that reads the real process environment.
#[derive(Debug, Clone, Default)]
pub struct RealEnv;

impl EnvProvider for RealEnv {
    fn snapshot(&self) -> Vec<(OsString, OsString)> {
        env::vars_os().collect()
    }
}
