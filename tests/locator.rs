// tests/locator.rs

//! Executable discovery behaviour: bundled copy first, then PATH lookup,
//! with success-only memoization.

#![cfg(unix)]

mod common;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use common::{FakeExe, init_tracing};
use lektor_launcher::fs::mock::MockFileSystem;
use lektor_launcher::locate::{ExecutableLocator, GlobalLookup};
use lektor_launcher::platform::Platform;

#[test]
fn bundled_binary_wins_without_invoking_global_lookup() {
    init_tracing();

    let mock = MockFileSystem::new();
    mock.add_executable("/App/Contents/Resources/lektor");

    // A lookup utility that records being called.
    let which = FakeExe::named(
        "which",
        "touch \"$(dirname \"$0\")/called\"\necho /usr/bin/lektor",
    )
    .unwrap();

    let locator = ExecutableLocator::with_platform(Platform::MacOs)
        .with_fs(Arc::new(mock))
        .with_bundled_dir("/App/Contents/MacOS")
        .with_lookup(GlobalLookup::with_utility(which.path()));

    assert_eq!(
        locator.locate(),
        Some(PathBuf::from("/App/Contents/Resources/lektor"))
    );
    assert!(!which.dir().join("called").exists());
}

#[test]
fn non_executable_bundled_file_falls_through_to_global_lookup() {
    init_tracing();

    let mock = MockFileSystem::new();
    mock.add_file("/App/Contents/Resources/lektor"); // present, but not executable

    let which = FakeExe::named("which", "echo /opt/lektor/bin/lektor").unwrap();

    let locator = ExecutableLocator::with_platform(Platform::MacOs)
        .with_fs(Arc::new(mock))
        .with_bundled_dir("/App/Contents/MacOS")
        .with_lookup(GlobalLookup::with_utility(which.path()));

    assert_eq!(
        locator.locate(),
        Some(PathBuf::from("/opt/lektor/bin/lektor"))
    );
}

#[test]
fn global_lookup_output_is_trimmed() {
    init_tracing();

    let which = FakeExe::named("which", "printf '  /usr/local/bin/lektor  \\n'").unwrap();

    let locator = ExecutableLocator::with_platform(Platform::Linux)
        .with_lookup(GlobalLookup::with_utility(which.path()));

    assert_eq!(
        locator.locate(),
        Some(PathBuf::from("/usr/local/bin/lektor"))
    );
}

#[test]
fn nonzero_lookup_status_means_absent() {
    init_tracing();

    let which = FakeExe::named("which", "exit 1").unwrap();

    let locator = ExecutableLocator::with_platform(Platform::Linux)
        .with_lookup(GlobalLookup::with_utility(which.path()));

    assert!(locator.locate().is_none());
}

#[test]
fn failed_resolution_is_retried_on_the_next_call() {
    init_tracing();

    // Succeeds only once a marker file exists.
    let which = FakeExe::named(
        "which",
        "dir=$(dirname \"$0\")\nif [ -f \"$dir/ready\" ]; then echo /usr/bin/lektor; else exit 1; fi",
    )
    .unwrap();

    let locator = ExecutableLocator::with_platform(Platform::Linux)
        .with_lookup(GlobalLookup::with_utility(which.path()));

    assert!(locator.locate().is_none());

    fs::write(which.dir().join("ready"), "").unwrap();
    assert_eq!(locator.locate(), Some(PathBuf::from("/usr/bin/lektor")));
}

#[test]
fn successful_resolution_is_cached_until_reset() {
    init_tracing();

    let which = FakeExe::named(
        "which",
        "dir=$(dirname \"$0\")\necho x >> \"$dir/count\"\necho /usr/bin/lektor",
    )
    .unwrap();

    let locator = ExecutableLocator::with_platform(Platform::Linux)
        .with_lookup(GlobalLookup::with_utility(which.path()));

    assert!(locator.locate().is_some());
    assert!(locator.locate().is_some());

    let count = fs::read_to_string(which.dir().join("count")).unwrap();
    assert_eq!(count.lines().count(), 1, "second locate must hit the cache");

    locator.reset();
    assert!(locator.locate().is_some());

    let count = fs::read_to_string(which.dir().join("count")).unwrap();
    assert_eq!(count.lines().count(), 2, "reset must force re-discovery");
}
