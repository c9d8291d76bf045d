// crates/error-contract/tests/support/fixtures.rs
// ============================================================================
// Module: Test Fixtures
// Description: Exception types, sinks, and catalogs shared by contract tests.
// ============================================================================
//! ## Overview
//! Caller exception types (one constructible, one not), a sink that records
//! events in memory, and catalogs that fail on purpose.

#![allow(
    dead_code,
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Fixtures are shared by several test crates that use different subsets."
)]

use std::fmt;
use std::sync::Mutex;

use error_contract::ConstructError;
use error_contract::ContractException;
use error_contract::DiagnosticSink;
use error_contract::Error;
use error_contract::ErrorCarrier;
use error_contract::ErrorException;
use error_contract::LookupError;
use error_contract::ResourceLookup;
use error_contract::diagnostics::DegradedDescriptionEvent;
use error_contract::diagnostics::FallbackEvent;
use error_contract::diagnostics::ViolationEvent;

// ========================================================================
// Exception Types
// ========================================================================

/// Caller exception that accepts every violation.
#[derive(Debug, Clone)]
pub struct ErrorTestException {
    /// Wrapped carrier.
    inner: ErrorException,
}

impl ErrorTestException {
    /// Returns the wrapped carrier.
    pub const fn carrier(&self) -> &ErrorException {
        &self.inner
    }
}

impl fmt::Display for ErrorTestException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl std::error::Error for ErrorTestException {}

impl ErrorCarrier for ErrorTestException {
    fn error(&self) -> &Error {
        self.inner.error()
    }
}

impl ContractException for ErrorTestException {
    fn from_violation(message: String, error: Error) -> Result<Self, ConstructError> {
        Ok(Self {
            inner: ErrorException::new(message, error),
        })
    }
}

/// Caller exception without a `(message, error)` construction.
#[derive(Debug, Clone, Default)]
pub struct WrongErrorTestException {
    /// Wrapped carrier.
    inner: ErrorException,
}

impl fmt::Display for WrongErrorTestException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl std::error::Error for WrongErrorTestException {}

impl ErrorCarrier for WrongErrorTestException {
    fn error(&self) -> &Error {
        self.inner.error()
    }
}

impl ContractException for WrongErrorTestException {
    fn from_violation(_message: String, _error: Error) -> Result<Self, ConstructError> {
        Err(ConstructError::MissingConstructor)
    }
}

// ========================================================================
// Recording Sink
// ========================================================================

/// Sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Recorded violations.
    pub violations: Mutex<Vec<ViolationEvent>>,
    /// Recorded fallbacks.
    pub fallbacks: Mutex<Vec<FallbackEvent>>,
    /// Recorded degraded descriptions.
    pub degraded: Mutex<Vec<DegradedDescriptionEvent>>,
}

impl RecordingSink {
    /// Returns the recorded violations.
    pub fn violations(&self) -> Vec<ViolationEvent> {
        self.violations.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the recorded fallbacks.
    pub fn fallbacks(&self) -> Vec<FallbackEvent> {
        self.fallbacks.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the recorded degraded descriptions.
    pub fn degraded(&self) -> Vec<DegradedDescriptionEvent> {
        self.degraded.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record_violation(&self, event: &ViolationEvent) {
        if let Ok(mut events) = self.violations.lock() {
            events.push(event.clone());
        }
    }

    fn record_fallback(&self, event: &FallbackEvent) {
        if let Ok(mut events) = self.fallbacks.lock() {
            events.push(event.clone());
        }
    }

    fn record_degraded(&self, event: &DegradedDescriptionEvent) {
        if let Ok(mut events) = self.degraded.lock() {
            events.push(event.clone());
        }
    }
}

// ========================================================================
// Catalogs
// ========================================================================

/// Catalog whose every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCatalog;

impl ResourceLookup for UnavailableCatalog {
    fn base_name(&self) -> &str {
        "unavailable"
    }

    fn template(&self, _key: &str) -> Result<Option<String>, LookupError> {
        Err(LookupError::Unavailable("catalog offline".to_string()))
    }
}
