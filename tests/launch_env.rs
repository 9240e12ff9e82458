// tests/launch_env.rs

//! Environment overlay behaviour of the process launcher.

mod common;

use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use lektor_launcher::LauncherError;
use lektor_launcher::env::mock::MockEnv;
use lektor_launcher::exec::{ProcessLauncher, RUN_FROM_UI_KEY, UI_LANG_KEY};

fn entry(key: &str, value: &str) -> (OsString, OsString) {
    (OsString::from(key), OsString::from(value))
}

#[test]
fn overlay_keeps_inherited_variables_in_order() {
    let env = MockEnv::new()
        .set("PATH", "/usr/bin")
        .set("HOME", "/home/demo")
        .set("EDITOR", "vi");
    let launcher = ProcessLauncher::new("de").with_env(Arc::new(env));

    let spec = launcher.launch_spec(Path::new("/usr/bin/lektor"), ["--version"]);

    assert_eq!(
        spec.env,
        vec![
            entry("PATH", "/usr/bin"),
            entry("HOME", "/home/demo"),
            entry("EDITOR", "vi"),
            entry(RUN_FROM_UI_KEY, "1"),
            entry(UI_LANG_KEY, "de"),
        ]
    );
}

#[test]
fn inherited_copies_of_overlay_keys_are_replaced() {
    let env = MockEnv::new()
        .set(RUN_FROM_UI_KEY, "stale")
        .set("TERM", "xterm");
    let launcher = ProcessLauncher::new("en").with_env(Arc::new(env));

    let spec = launcher.launch_spec(Path::new("/usr/bin/lektor"), ["--version"]);

    let from_ui: Vec<_> = spec
        .env
        .iter()
        .filter(|(key, _)| key == RUN_FROM_UI_KEY)
        .collect();
    assert_eq!(from_ui, vec![&entry(RUN_FROM_UI_KEY, "1")]);
}

#[tokio::test]
async fn spawn_failure_surfaces_immediately() {
    let launcher = ProcessLauncher::new("en");

    let err = launcher
        .spawn(Path::new("/nonexistent/lektor-binary"), ["--version"])
        .unwrap_err();

    assert!(matches!(err, LauncherError::Launch { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn child_sees_overlay_and_inherited_variables() {
    use common::FakeExe;
    use lektor_launcher::exec::collect_stream;

    common::init_tracing();

    let env = MockEnv::new().set("DEMO_MARKER", "42");
    let launcher = ProcessLauncher::new("fr").with_env(Arc::new(env));
    let fake =
        FakeExe::with_script("echo \"$LEKTOR_RUN_FROM_UI/$LEKTOR_UI_LANG/$DEMO_MARKER\"").unwrap();

    let mut child = launcher.spawn(fake.path(), Vec::<&str>::new()).unwrap();
    let stdout = child.stdout.take().unwrap();
    let output = collect_stream(stdout).await.unwrap();
    child.wait().await.unwrap();

    assert_eq!(output.trim(), "1/fr/42");
}
