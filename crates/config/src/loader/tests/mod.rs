//! Tests for the options loader.
//!
//! Responsibilities:
//! - Test builder methods and defaults.
//! - Test environment variable handling and precedence.
//! - Test validation of attribute names and the help key.
//!
//! Invariants:
//! - Tests touching the environment use `serial_test` and `global_test_lock()`.

use std::sync::Mutex;

pub mod basic_tests;
pub mod validation_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
