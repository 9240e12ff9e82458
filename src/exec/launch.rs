// src/exec/launch.rs

//! Spawning lektor child processes.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};
use tracing::debug;

use crate::env::{EnvProvider, RealEnv};
use crate::errors::{LauncherError, Result};

/// Environment key marking a child as launched from the UI.
pub const RUN_FROM_UI_KEY: &str = "LEKTOR_RUN_FROM_UI";
/// Environment key carrying the active UI language code.
pub const UI_LANG_KEY: &str = "LEKTOR_UI_LANG";

/// Everything needed to start one child process.
///
/// Built fresh per launch. The environment is a full snapshot of the
/// provider's variables, in their original order, with the two UI keys
/// appended on top (any inherited copies of those keys are replaced).
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub env: Vec<(OsString, OsString)>,
}

impl LaunchSpec {
    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env_clear()
            .envs(self.env.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str())))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

/// Spawns lektor child processes with the UI environment overlay.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    env: Arc<dyn EnvProvider>,
    ui_lang: String,
}

impl ProcessLauncher {
    pub fn new(ui_lang: impl Into<String>) -> Self {
        Self {
            env: Arc::new(RealEnv),
            ui_lang: ui_lang.into(),
        }
    }

    /// Snapshot the environment through a different provider.
    pub fn with_env(mut self, env: Arc<dyn EnvProvider>) -> Self {
        self.env = env;
        self
    }

    /// Build the launch spec for `program args...` without spawning.
    pub fn launch_spec<I, S>(&self, program: &Path, args: I) -> LaunchSpec
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut env: Vec<(OsString, OsString)> = self
            .env
            .snapshot()
            .into_iter()
            .filter(|(key, _)| {
                let key = key.as_os_str();
                key != RUN_FROM_UI_KEY && key != UI_LANG_KEY
            })
            .collect();
        env.push((RUN_FROM_UI_KEY.into(), "1".into()));
        env.push((UI_LANG_KEY.into(), self.ui_lang.clone().into()));

        LaunchSpec {
            program: program.to_path_buf(),
            args: args
                .into_iter()
                .map(|arg| arg.as_ref().to_os_string())
                .collect(),
            env,
        }
    }

    /// Spawn the child and return immediately.
    ///
    /// A spawn failure (missing file, permissions) surfaces as
    /// [`LauncherError::Launch`] right away; nothing is retried or
    /// swallowed.
    pub fn spawn<I, S>(&self, program: &Path, args: I) -> Result<Child>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let spec = self.launch_spec(program, args);
        debug!(program = %spec.program.display(), args = ?spec.args, "spawning lektor");

        spec.to_command()
            .spawn()
            .map_err(|source| LauncherError::Launch {
                program: spec.program.clone(),
                source,
            })
    }
}

/// Consume stderr in the background so the child never blocks on a full
/// pipe; lines are logged at debug.
pub(crate) fn drain_stderr(stderr: Option<ChildStderr>) {
    if let Some(stderr) = stderr {
        tokio::spawn(async move {
            let reader = BufReader::new(stderr);
            let mut lines = reader.lines();

            while let Ok(Some(line)) = lines.next_line().await {
                debug!("stderr: {}", line);
            }
        });
    }
}
