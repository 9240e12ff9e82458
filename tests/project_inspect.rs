// tests/project_inspect.rs

//! `project-info --json` inspection behaviour.

#![cfg(unix)]

mod common;

use std::path::Path;

use common::{FakeExe, init_tracing, runner_for};
use lektor_launcher::LauncherError;
use serde_json::json;

#[tokio::test]
async fn decodes_json_on_zero_exit() {
    init_tracing();

    let fake = FakeExe::with_script("echo '{\"name\":\"demo\"}'").unwrap();
    let info = runner_for(&fake)
        .analyze_project(Path::new("/tmp/site"))
        .await
        .unwrap();

    assert_eq!(info, Some(json!({"name": "demo"})));
}

#[tokio::test]
async fn nonzero_exit_resolves_to_no_data() {
    init_tracing();

    let fake = FakeExe::with_script("exit 1").unwrap();
    let info = runner_for(&fake)
        .analyze_project(Path::new("/tmp/site"))
        .await
        .unwrap();

    assert_eq!(info, None);
}

#[tokio::test]
async fn invalid_json_on_zero_exit_is_a_decode_error() {
    init_tracing();

    let fake = FakeExe::with_script("echo 'not json'").unwrap();
    let err = runner_for(&fake)
        .analyze_project(Path::new("/tmp/site"))
        .await
        .unwrap_err();

    assert!(matches!(err, LauncherError::Decode(_)));
}

#[tokio::test]
async fn passes_the_documented_argument_shape() {
    init_tracing();

    let fake = FakeExe::with_script(
        "printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args.txt\"\necho '{}'",
    )
    .unwrap();

    runner_for(&fake)
        .analyze_project(Path::new("/projects/demo"))
        .await
        .unwrap();

    let recorded = std::fs::read_to_string(fake.dir().join("args.txt")).unwrap();
    let args: Vec<&str> = recorded.lines().collect();
    assert_eq!(args, ["--project", "/projects/demo", "project-info", "--json"]);
}
