//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system for tests, tolerating repeat calls.
///
/// Unlike [`init`], an already-installed logger is not an error, so test
/// binaries can call this from every test.
pub fn try_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
