// crates/error-contract/tests/diagnostics.rs
// ============================================================================
// Module: Diagnostic Sink Tests
// Description: JSON-line output of writer and file sinks.
// Purpose: Ensure events are structured and sinks never disturb guards.
// Dependencies: error_contract::diagnostics, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Integration tests for diagnostic sinks.

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

use std::fs;
use std::io;
use std::io::Write;
use std::sync::Arc;

use error_contract::Contract;
use error_contract::DiagnosticSink;
use error_contract::Error;
use error_contract::WriterDiagnosticSink;
use error_contract::diagnostics::DegradedDescriptionEvent;
use error_contract::diagnostics::FileDiagnosticSink;
use error_contract::diagnostics::ViolationEvent;
use serde_json::Value;
use support::TestResult;
use support::ensure;

/// Writer that always fails.
struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("broken"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("broken"))
    }
}

#[test]
fn writer_sink_emits_one_json_line_per_event() -> TestResult {
    let sink = WriterDiagnosticSink::new(Vec::new());
    let error = Error::with_parts(0x104, "ERROR_CONTRACT_THROWIFNULL", "Missing.");
    sink.record_violation(&ViolationEvent::new(&error, "user 7", "ErrorException"));
    sink.record_degraded(&DegradedDescriptionEvent::new(3, Some("KEY"), None, "not found"));

    let Some(bytes) = sink.into_inner() else {
        return Err("Expected the writer back".into());
    };
    let text = String::from_utf8(bytes)?;
    let lines: Vec<&str> = text.lines().collect();
    ensure(lines.len() == 2, "Expected two lines")?;

    let violation: Value = serde_json::from_str(lines[0])?;
    ensure(violation["event"] == "contract_violation", "Expected violation event name")?;
    ensure(violation["code"] == 0x104, "Expected violation code")?;
    ensure(violation["name"] == "ERROR_CONTRACT_THROWIFNULL", "Expected violation name")?;
    ensure(violation["message"] == "user 7", "Expected violation message")?;

    let degraded: Value = serde_json::from_str(lines[1])?;
    ensure(degraded["event"] == "description_degraded", "Expected degraded event name")?;
    ensure(degraded["key"] == "KEY", "Expected degraded key")?;
    ensure(degraded["base_name"].is_null(), "Expected absent base name")?;
    Ok(())
}

#[test]
fn broken_writers_do_not_change_guard_outcomes() -> TestResult {
    let contract = Contract::default().with_sink(Arc::new(WriterDiagnosticSink::new(BrokenWriter)));
    let result = contract.check().throw_if_false(false);
    ensure(
        result.map_err(|exception| exception.error().code()) == Err(0x105),
        "Expected the violation despite the broken sink",
    )?;
    Ok(())
}

#[test]
fn file_sink_appends_events() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("events.jsonl");
    fs::write(&path, "existing\n")?;

    let contract = Contract::default().with_sink(Arc::new(FileDiagnosticSink::new(&path)?));
    let _ = contract.check().throw_if_true(true);
    let _ = contract.check().throw_if_null(None::<u8>);

    let content = fs::read_to_string(&path)?;
    let lines: Vec<&str> = content.lines().collect();
    ensure(lines.len() == 3, "Expected existing line plus two events")?;
    ensure(lines[0] == "existing", "Expected existing content kept")?;
    let last: Value = serde_json::from_str(lines[2])?;
    ensure(last["code"] == 0x104, "Expected the null guard code")?;
    Ok(())
}
