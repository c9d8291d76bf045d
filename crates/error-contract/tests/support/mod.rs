// crates/error-contract/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Result alias and assertion helper for integration tests.
// ============================================================================
//! ## Overview
//! Tests return [`TestResult`] and assert with [`ensure`], so a failed check
//! surfaces as an `Err` carrying the message instead of a panic.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use thiserror::Error;

/// Result returned by every integration test.
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Failed assertion.
#[derive(Debug, Error)]
#[error("assertion failed: {0}")]
struct AssertionFailed(String);

/// Fails with `message` unless `condition` holds.
///
/// # Errors
/// Returns an assertion failure when `condition` is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        return Ok(());
    }
    Err(Box::new(AssertionFailed(message.into())))
}
