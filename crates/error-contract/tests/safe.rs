// crates/error-contract/tests/safe.rs
// ============================================================================
// Module: Safe String Tests
// Description: Null-tolerant rendering of optional operands.
// Purpose: Ensure absent values render as `null` instead of failing.
// Dependencies: error_contract::safe
// ============================================================================
//! ## Overview
//! Integration tests for safe rendering helpers.

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

mod support;

use error_contract::Nullable;
use error_contract::safe::NULL_TEXT;
use error_contract::to_safe_string;
use support::TestResult;
use support::ensure;

#[test]
fn to_safe_string_renders_present_and_absent_values() -> TestResult {
    ensure(to_safe_string(Some(&12)) == "12", "Expected value rendering")?;
    ensure(to_safe_string::<i32>(None) == NULL_TEXT, "Expected null rendering")?;
    ensure(to_safe_string(Some("text")) == "text", "Expected unsized rendering")?;
    Ok(())
}

#[test]
fn nullable_displays_null_and_compares_like_option() -> TestResult {
    let absent: Nullable<u8> = Nullable::none();
    ensure(absent.to_string() == "null", "Expected null display")?;
    ensure(Nullable::some(3).to_string() == "3", "Expected value display")?;
    ensure(Nullable::from(Some(3)) == Nullable::some(3), "Expected option equality")?;
    ensure(absent != Nullable::some(0), "Expected absent to differ from a value")?;
    ensure(Nullable::some("x").into_inner() == Some("x"), "Expected inner option")?;
    Ok(())
}
