// crates/error-contract/tests/error.rs
// ============================================================================
// Module: Error Value Tests
// Description: Defaulting, equality, display, and serde behavior of `Error`.
// Purpose: Keep the error identity stable for downstream consumers.
// Dependencies: error_contract::error, serde_json
// ============================================================================
//! ## Overview
//! Integration tests for the `Error` value.

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

use std::collections::HashSet;

use error_contract::Error;
use error_contract::error::UNKNOWN_DESCRIPTION;
use error_contract::error::default_description;
use error_contract::error::default_name;
use support::TestResult;
use support::ensure;

#[test]
fn new_error_defaults_name_and_description_from_code() -> TestResult {
    let error = Error::new(0x1A2);
    ensure(error.code() == 0x1A2, "Expected code to be kept")?;
    ensure(error.name() == "0x000001A2", "Expected zero-padded hex name")?;
    ensure(error.description() == "Error 0x000001A2", "Expected derived description")?;
    Ok(())
}

#[test]
fn blank_parts_fall_back_to_defaults() -> TestResult {
    let error = Error::with_parts(7, "  ", "\t");
    ensure(error.name() == default_name(7), "Expected default name for blank input")?;
    ensure(error.description() == default_description(7), "Expected default description")?;

    let named = Error::with_name(7, "SEVEN");
    ensure(named.name() == "SEVEN", "Expected supplied name")?;
    ensure(named.description() == "Error 0x00000007", "Expected default description")?;
    Ok(())
}

#[test]
fn unknown_error_is_the_default() -> TestResult {
    let error = Error::default();
    ensure(error.code() == 0, "Expected code 0")?;
    ensure(error.description() == UNKNOWN_DESCRIPTION, "Expected unknown description")?;
    ensure(error == Error::unknown(), "Expected default to equal unknown")?;
    Ok(())
}

#[test]
fn equality_and_hash_use_code_only() -> TestResult {
    let left = Error::with_parts(5, "LEFT", "Left description");
    let right = Error::with_parts(5, "RIGHT", "Right description");
    let other = Error::with_parts(6, "LEFT", "Left description");

    ensure(left == left.clone(), "Expected reflexive equality")?;
    ensure(left == right, "Expected equal codes to compare equal")?;
    ensure(left != other, "Expected different codes to differ")?;
    let absent: Option<Error> = None;
    ensure(absent.as_ref() != Some(&left), "Expected an error never to equal an absent value")?;

    let set: HashSet<Error> = [left, right, other].into_iter().collect();
    ensure(set.len() == 2, "Expected hashing to collapse equal codes")?;
    Ok(())
}

#[test]
fn display_renders_code_name_and_description() -> TestResult {
    let error = Error::with_parts(42, "ANSWER", "Everything.");
    ensure(
        error.to_string() == "Error #42: ANSWER, Everything.",
        "Expected display format",
    )?;
    Ok(())
}

#[test]
fn serde_round_trip_keeps_all_parts() -> TestResult {
    let error = Error::with_parts(0x101, "ERROR_CONTRACT_GENERAL", "Violated.");
    let json = serde_json::to_string(&error)?;
    let decoded: Error = serde_json::from_str(&json)?;
    ensure(decoded == error, "Expected same code")?;
    ensure(decoded.name() == error.name(), "Expected same name")?;
    ensure(decoded.description() == error.description(), "Expected same description")?;
    Ok(())
}

#[test]
fn deserialization_reapplies_defaults() -> TestResult {
    let decoded: Error = serde_json::from_str(r#"{"code": 16, "name": " "}"#)?;
    ensure(decoded.name() == "0x00000010", "Expected blank name to be defaulted")?;
    ensure(decoded.description() == "Error 0x00000010", "Expected missing description default")?;
    Ok(())
}
