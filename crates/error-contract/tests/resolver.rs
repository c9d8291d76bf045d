// crates/error-contract/tests/resolver.rs
// ============================================================================
// Module: Description Resolver Tests
// Description: Resolution policy, including every degraded branch.
// Purpose: Ensure resolution always yields an error and never fails.
// Dependencies: error_contract::resolver, support fixtures
// ============================================================================
//! ## Overview
//! Integration tests for `DescriptionResolver::resolve`.

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

#[path = "support/fixtures.rs"]
mod fixtures;
mod support;

use std::sync::Arc;

use error_contract::DescriptionResolver;
use error_contract::MapCatalog;
use error_contract::resolver::is_degraded;
use fixtures::RecordingSink;
use fixtures::UnavailableCatalog;
use support::TestResult;
use support::ensure;

fn catalog() -> MapCatalog {
    MapCatalog::new("test-catalog")
        .with_template("PLAIN", "A plain description.")
        .with_template("TEMPLATED", "Value {0} of {1}.")
        .with_template("BLANK", "   ")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn resolves_plain_and_templated_descriptions() -> TestResult {
    let resolver = DescriptionResolver::new();
    let catalog = catalog();

    let plain = resolver.resolve(3, Some("PLAIN"), Some(&catalog), &[]);
    ensure(plain.code() == 3, "Expected code")?;
    ensure(plain.name() == "PLAIN", "Expected key as name")?;
    ensure(plain.description() == "A plain description.", "Expected plain template")?;

    let templated = resolver.resolve(4, Some("TEMPLATED"), Some(&catalog), &strings(&["1", "2"]));
    ensure(templated.description() == "Value 1 of 2.", "Expected interpolated template")?;
    Ok(())
}

#[test]
fn templates_are_verbatim_without_arguments() -> TestResult {
    let resolver = DescriptionResolver::new();
    let error = resolver.resolve(4, Some("TEMPLATED"), Some(&catalog()), &[]);
    ensure(error.description() == "Value {0} of {1}.", "Expected raw template")?;
    ensure(!is_degraded(&error), "Expected a real description")?;
    Ok(())
}

#[test]
fn missing_lookup_degrades() -> TestResult {
    let error = DescriptionResolver::new().resolve(9, Some("PLAIN"), None, &[]);
    ensure(
        error.description() == "Error retrieving description [9, PLAIN, ]: Parameter 'lookup' is null",
        "Expected missing lookup text",
    )?;
    ensure(error.name() == "PLAIN", "Expected supplied name")?;
    Ok(())
}

#[test]
fn blank_name_degrades_with_default_name() -> TestResult {
    let error = DescriptionResolver::new().resolve(9, Some(" "), Some(&catalog()), &[]);
    ensure(error.name() == "0x00000009", "Expected default name")?;
    ensure(
        error.description()
            == "Error retrieving description [9,  , test-catalog]: Parameter 'name' is null",
        "Expected missing name text",
    )?;

    let absent = DescriptionResolver::new().resolve(9, None, Some(&catalog()), &[]);
    ensure(absent.name() == "0x00000009", "Expected default name for absent key")?;
    ensure(is_degraded(&absent), "Expected degraded description")?;
    Ok(())
}

#[test]
fn unknown_or_blank_keys_degrade_as_not_found() -> TestResult {
    let resolver = DescriptionResolver::new();
    let catalog = catalog();
    for key in ["MISSING", "BLANK"] {
        let error = resolver.resolve(2, Some(key), Some(&catalog), &[]);
        ensure(
            error.description()
                == format!(
                    "Error retrieving description [2, {key}, test-catalog]: The description can't be found."
                ),
            format!("Expected not found text for {key}"),
        )?;
        ensure(error.code() == 2, "Expected code to survive degradation")?;
    }
    Ok(())
}

#[test]
fn failing_lookup_degrades_with_its_message() -> TestResult {
    let error = DescriptionResolver::new().resolve(1, Some("ANY"), Some(&UnavailableCatalog), &[]);
    ensure(
        error.description()
            == "Error retrieving description [1, ANY, unavailable]: catalog unavailable: catalog offline",
        "Expected lookup error text",
    )?;
    Ok(())
}

#[test]
fn mismatched_placeholders_degrade_instead_of_failing() -> TestResult {
    let error = DescriptionResolver::new().resolve(
        4,
        Some("TEMPLATED"),
        Some(&catalog()),
        &strings(&["only-one"]),
    );
    ensure(is_degraded(&error), "Expected degraded description")?;
    ensure(error.description().contains("test-catalog"), "Expected catalog identity")?;
    ensure(error.description().contains("index 1"), "Expected the failing index")?;
    Ok(())
}

#[test]
fn degradations_are_reported_to_the_sink() -> TestResult {
    let sink = Arc::new(RecordingSink::default());
    let resolver = DescriptionResolver::with_sink(sink.clone());
    let catalog = catalog();

    let _ = resolver.resolve(1, Some("PLAIN"), Some(&catalog), &[]);
    ensure(sink.degraded().is_empty(), "Expected no event for a clean resolution")?;

    let _ = resolver.resolve(2, Some("MISSING"), Some(&catalog), &[]);
    let events = sink.degraded();
    ensure(events.len() == 1, "Expected one degraded event")?;
    ensure(events[0].code == 2, "Expected event code")?;
    ensure(events[0].key.as_deref() == Some("MISSING"), "Expected event key")?;
    ensure(events[0].base_name.as_deref() == Some("test-catalog"), "Expected event base name")?;
    Ok(())
}
