// crates/error-contract/src/diagnostics.rs
// ============================================================================
// Module: Diagnostic Logging
// Description: Structured events for contract violations and degraded diagnostics.
// Purpose: Emit JSON-line records without a hard logging dependency.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Guards and the description resolver report what happened to a
//! [`DiagnosticSink`]. Events are plain serializable structs so deployments
//! can route them to any logging pipeline. Sink failures are swallowed: a
//! broken sink never changes the outcome of a guard.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::error::Error;

// ============================================================================
// SECTION: Events
// ============================================================================

/// A guard fired and an exception was produced.
#[derive(Debug, Clone, Serialize)]
pub struct ViolationEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Error code carried by the exception.
    pub code: u32,
    /// Error name carried by the exception.
    pub name: String,
    /// Formatted caller message (may be empty).
    pub message: String,
    /// Rust type name of the produced exception.
    pub exception: &'static str,
}

impl ViolationEvent {
    /// Creates a violation event with the current timestamp.
    #[must_use]
    pub fn new(error: &Error, message: &str, exception: &'static str) -> Self {
        Self {
            event: "contract_violation",
            timestamp_ms: now_ms(),
            code: error.code(),
            name: error.name().to_string(),
            message: message.to_string(),
            exception,
        }
    }
}

/// A requested exception type could not be built; the carrier was used instead.
#[derive(Debug, Clone, Serialize)]
pub struct FallbackEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Error code carried by the fallback carrier.
    pub code: u32,
    /// Rust type name that failed to build.
    pub requested: &'static str,
    /// Construction failure detail.
    pub reason: String,
}

impl FallbackEvent {
    /// Creates a fallback event with the current timestamp.
    #[must_use]
    pub fn new(error: &Error, requested: &'static str, reason: impl Into<String>) -> Self {
        Self {
            event: "exception_fallback",
            timestamp_ms: now_ms(),
            code: error.code(),
            requested,
            reason: reason.into(),
        }
    }
}

/// A description could not be resolved and diagnostic text was substituted.
#[derive(Debug, Clone, Serialize)]
pub struct DegradedDescriptionEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Requested error code.
    pub code: u32,
    /// Requested catalog key, when supplied.
    pub key: Option<String>,
    /// Catalog identity, when a catalog was bound.
    pub base_name: Option<String>,
    /// Degradation reason.
    pub reason: String,
}

impl DegradedDescriptionEvent {
    /// Creates a degraded-description event with the current timestamp.
    #[must_use]
    pub fn new(
        code: u32,
        key: Option<&str>,
        base_name: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            event: "description_degraded",
            timestamp_ms: now_ms(),
            code,
            key: key.map(ToString::to_string),
            base_name: base_name.map(ToString::to_string),
            reason: reason.into(),
        }
    }
}

/// Milliseconds since the Unix epoch, zero when the clock is before it.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    /// Record a guard violation.
    fn record_violation(&self, event: &ViolationEvent);

    /// Record an exception construction fallback.
    fn record_fallback(&self, _event: &FallbackEvent) {}

    /// Record a degraded description.
    fn record_degraded(&self, _event: &DegradedDescriptionEvent) {}
}

/// Sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnosticSink;

impl DiagnosticSink for NoopDiagnosticSink {
    fn record_violation(&self, _event: &ViolationEvent) {}
}

/// Sink that logs JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrDiagnosticSink;

impl DiagnosticSink for StderrDiagnosticSink {
    fn record_violation(&self, event: &ViolationEvent) {
        write_stderr(event);
    }

    fn record_fallback(&self, event: &FallbackEvent) {
        write_stderr(event);
    }

    fn record_degraded(&self, event: &DegradedDescriptionEvent) {
        write_stderr(event);
    }
}

/// Writes one JSON line to stderr, ignoring failures.
fn write_stderr<T: Serialize>(event: &T) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(io::stderr(), "{payload}");
    }
}

// ============================================================================
// SECTION: Writer Sinks
// ============================================================================

/// Sink that logs JSON lines to any writer.
pub struct WriterDiagnosticSink<W: Write + Send> {
    /// Output writer for log records.
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterDiagnosticSink<W> {
    /// Creates a sink over `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the writer.
    ///
    /// Returns `None` when the writer mutex was poisoned.
    pub fn into_inner(self) -> Option<W> {
        self.writer.into_inner().ok()
    }

    /// Writes one JSON line, ignoring failures.
    fn write_line<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut writer) = self.writer.lock()
        {
            let _ = writeln!(writer, "{payload}");
            let _ = writer.flush();
        }
    }
}

impl<W: Write + Send> DiagnosticSink for WriterDiagnosticSink<W> {
    fn record_violation(&self, event: &ViolationEvent) {
        self.write_line(event);
    }

    fn record_fallback(&self, event: &FallbackEvent) {
        self.write_line(event);
    }

    fn record_degraded(&self, event: &DegradedDescriptionEvent) {
        self.write_line(event);
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileDiagnosticSink {
    /// Append-mode file writer.
    inner: WriterDiagnosticSink<std::fs::File>,
}

impl FileDiagnosticSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            inner: WriterDiagnosticSink::new(file),
        })
    }
}

impl DiagnosticSink for FileDiagnosticSink {
    fn record_violation(&self, event: &ViolationEvent) {
        self.inner.record_violation(event);
    }

    fn record_fallback(&self, event: &FallbackEvent) {
        self.inner.record_fallback(event);
    }

    fn record_degraded(&self, event: &DegradedDescriptionEvent) {
        self.inner.record_degraded(event);
    }
}
