// src/server.rs

//! Long-lived devserver supervision.
//!
//! `spawn_server` is fire-and-forget: after the child is up, everything
//! the caller learns arrives through the status sink, in the order the
//! child wrote it, terminated by a synthetic "Server shut down with code
//! N" line. There is no automatic restart and no readiness signal; callers
//! infer readiness from status lines or by polling the URL.

use std::ffi::OsString;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::process::{Child, ChildStdout};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::launch::drain_stderr;
use crate::exec::lines::stream_lines;
use crate::runner::LektorRunner;

/// Devserver port used when the caller does not pick one.
pub const DEFAULT_PORT: u16 = 5000;

/// Callback receiving one status line at a time.
pub type StatusSink = Box<dyn FnMut(String) + Send + 'static>;

/// Options for spawning the devserver.
pub struct ServerOptions {
    pub port: u16,
    pub on_status: StatusSink,
}

impl ServerOptions {
    pub fn new(on_status: impl FnMut(String) + Send + 'static) -> Self {
        Self {
            port: DEFAULT_PORT,
            on_status: Box::new(on_status),
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Lifecycle of a supervised devserver.
///
/// Only `Starting` and `Stopped` are ever recorded; there is no explicit
/// running transition in the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Starting,
    Stopped,
}

/// Events flowing from the child monitor to the status sink.
#[derive(Debug)]
enum ServerEvent {
    Status(String),
    Closed(i32),
}

/// Handle to one supervised devserver child.
///
/// Terminal once `shutdown` is called or the child closes on its own; a
/// handle is never reused for a second process.
#[derive(Debug)]
pub struct ServerHandle {
    port: u16,
    state: Arc<Mutex<ServerState>>,
    shutdown_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl ServerHandle {
    /// Base URL served by the child. Pure derivation from the configured
    /// port, valid before the child has finished starting.
    pub fn url(&self) -> String {
        format!("http://localhost:{}/", self.port)
    }

    /// Admin interface URL.
    pub fn admin_url(&self) -> String {
        format!("http://localhost:{}/admin/", self.port)
    }

    pub fn state(&self) -> ServerState {
        *self.state.lock().unwrap()
    }

    /// Signal the child to terminate and return immediately.
    ///
    /// Completion is reported through the status sink's terminal line,
    /// not here. Calling this more than once is a no-op.
    pub fn shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
    }
}

impl LektorRunner {
    /// Spawn `lektor --project <path> devserver --port <port>`.
    ///
    /// Status lines are forwarded to `options.on_status` in the order the
    /// child wrote them, trailing whitespace removed. When the child
    /// terminates (on its own or after [`ServerHandle::shutdown`]), a
    /// final `Server shut down with code N` line is delivered through the
    /// same sink, strictly after every preceding status line.
    pub fn spawn_server(&self, project: &Path, options: ServerOptions) -> Result<ServerHandle> {
        let program = self.resolve()?;
        let args: Vec<OsString> = vec![
            "--project".into(),
            project.as_os_str().into(),
            "devserver".into(),
            "--port".into(),
            options.port.to_string().into(),
        ];

        let mut child = self.launcher().spawn(&program, &args)?;
        info!(
            program = %program.display(),
            project = %project.display(),
            port = options.port,
            "devserver starting"
        );

        let stdout = child.stdout.take();
        drain_stderr(child.stderr.take());

        let state = Arc::new(Mutex::new(ServerState::Starting));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        // All status traffic funnels through one unbounded channel so the
        // sink sees lines in write order with the close event strictly
        // last. Unbounded on purpose: the stream has no backpressure.
        let (event_tx, event_rx) = mpsc::unbounded_channel::<ServerEvent>();

        spawn_sink_task(event_rx, options.on_status, Arc::clone(&state));
        spawn_monitor_task(child, stdout, event_tx, shutdown_rx);

        Ok(ServerHandle {
            port: options.port,
            state,
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
        })
    }
}

/// Deliver events to the caller's sink, one at a time, in order.
fn spawn_sink_task(
    mut event_rx: mpsc::UnboundedReceiver<ServerEvent>,
    mut sink: StatusSink,
    state: Arc<Mutex<ServerState>>,
) {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                ServerEvent::Status(line) => sink(line),
                ServerEvent::Closed(code) => {
                    *state.lock().unwrap() = ServerState::Stopped;
                    sink(format!("Server shut down with code {code}"));
                }
            }
        }
    });
}

/// Watch the child: stream stdout lines, wait for exit or a shutdown
/// signal, then report the close after stdout is fully drained.
fn spawn_monitor_task(
    mut child: Child,
    stdout: Option<ChildStdout>,
    event_tx: mpsc::UnboundedSender<ServerEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    tokio::spawn(async move {
        let reader = {
            let tx = event_tx.clone();
            tokio::spawn(async move {
                if let Some(stdout) = stdout {
                    let result = stream_lines(stdout, |line| {
                        let _ = tx.send(ServerEvent::Status(line.trim_end().to_string()));
                    })
                    .await;

                    if let Err(err) = result {
                        debug!(error = %err, "devserver stdout closed with error");
                    }
                }
            })
        };

        let status = tokio::select! {
            status = child.wait() => status,
            requested = &mut shutdown_rx => {
                if requested.is_ok() {
                    debug!("shutdown requested; signalling devserver child");
                    signal_terminate(&mut child);
                } else {
                    debug!("server handle dropped without shutdown; waiting for child");
                }
                child.wait().await
            }
        };

        // Let the reader drain stdout to EOF before reporting the close,
        // so the terminal line is always last.
        let _ = reader.await;

        let code = match status {
            Ok(status) => status.code().unwrap_or(-1),
            Err(err) => {
                warn!(error = %err, "failed waiting for devserver child");
                -1
            }
        };

        info!(exit_code = code, "devserver exited");
        let _ = event_tx.send(ServerEvent::Closed(code));
    });
}

/// Ask the child to terminate.
///
/// On Unix this is SIGTERM, a cooperative signal the child may catch to
/// shut down cleanly, or ignore. Elsewhere, and when the signal cannot be
/// delivered, fall back to tokio's hard kill.
fn signal_terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        let result = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if result == 0 {
            return;
        }
        warn!(
            pid,
            error = %std::io::Error::last_os_error(),
            "failed to deliver SIGTERM; falling back to kill"
        );
    }

    if let Err(err) = child.start_kill() {
        warn!(error = %err, "failed to signal devserver child");
    }
}
