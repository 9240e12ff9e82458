// tests/common/mod.rs

#![allow(dead_code)]

pub use lektor_launcher_test_utils::fake_exe::FakeExe;
pub use lektor_launcher_test_utils::{init_tracing, with_timeout};

use lektor_launcher::LektorRunner;
use lektor_launcher::locate::ExecutableLocator;

/// Runner pinned to the given fake executable, bypassing discovery.
pub fn runner_for(fake: &FakeExe) -> LektorRunner {
    LektorRunner::new().with_locator(ExecutableLocator::fixed(fake.path()))
}
