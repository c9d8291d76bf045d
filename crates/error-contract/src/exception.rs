// crates/error-contract/src/exception.rs
// ============================================================================
// Module: Contract Exceptions
// Description: Carrier exception and the typed-exception construction protocol.
// Purpose: Transport an `Error` with a message, optionally as a caller type.
// Dependencies: serde, thiserror, crate::error
// ============================================================================

//! ## Overview
//! [`ErrorException`] is the carrier produced by every untyped guard. It holds
//! a base message, an [`Error`], and an optional inner carrier describing a
//! secondary failure.
//!
//! Callers that want their own exception type implement
//! [`ContractException`]. Construction may refuse with a [`ConstructError`];
//! the contract then returns [`TypedFailure::Fallback`] instead of the
//! requested type, so a violation is always reported.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error as ThisError;

use crate::error::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Base message used when a carrier is built from an error alone.
pub const DEFAULT_EXCEPTION_MESSAGE: &str = "An ErrorException has been thrown.";

// ============================================================================
// SECTION: Carrier
// ============================================================================

/// Exception carrying an [`Error`] and a message.
///
/// # Invariants
/// - `error` is always present; it defaults to [`Error::unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorException {
    /// Caller-supplied message, possibly empty.
    message: String,
    /// Carried error.
    #[serde(default)]
    error: Error,
    /// Nested cause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inner: Option<Box<ErrorException>>,
}

impl ErrorException {
    /// Creates a carrier with a message and an error.
    #[must_use]
    pub fn new(message: impl Into<String>, error: Error) -> Self {
        Self {
            message: message.into(),
            error,
            inner: None,
        }
    }

    /// Creates a carrier with the default message.
    #[must_use]
    pub fn from_error(error: Error) -> Self {
        Self::new(DEFAULT_EXCEPTION_MESSAGE, error)
    }

    /// Creates a carrier with a message and the unknown error.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(message, Error::unknown())
    }

    /// Attaches a nested cause.
    #[must_use]
    pub fn with_inner(mut self, inner: Self) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    /// Returns the message as supplied, without the error suffix.
    #[must_use]
    pub fn base_message(&self) -> &str {
        &self.message
    }

    /// Returns the observable message.
    ///
    /// The base message and the rendered error are separated by a newline;
    /// a blank base message yields the rendered error alone.
    #[must_use]
    pub fn message(&self) -> String {
        if self.message.trim().is_empty() {
            self.error.to_string()
        } else {
            format!("{}\n{}", self.message, self.error)
        }
    }

    /// Returns the carried error.
    #[must_use]
    pub const fn error(&self) -> &Error {
        &self.error
    }

    /// Returns the nested cause, if any.
    #[must_use]
    pub fn inner(&self) -> Option<&Self> {
        self.inner.as_deref()
    }
}

impl Default for ErrorException {
    fn default() -> Self {
        Self::from_error(Error::unknown())
    }
}

impl fmt::Display for ErrorException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ErrorException {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.as_deref().map(|inner| inner as &(dyn std::error::Error + 'static))
    }
}

// ============================================================================
// SECTION: Typed Exceptions
// ============================================================================

/// Any value that carries an [`Error`].
pub trait ErrorCarrier {
    /// Returns the carried error.
    fn error(&self) -> &Error;
}

impl ErrorCarrier for ErrorException {
    fn error(&self) -> &Error {
        &self.error
    }
}

/// Exception type a guard can raise instead of [`ErrorException`].
pub trait ContractException: ErrorCarrier + std::error::Error + Sized {
    /// Builds the exception for a violation.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError`] when the type cannot represent the violation.
    fn from_violation(message: String, error: Error) -> Result<Self, ConstructError>;
}

impl ContractException for ErrorException {
    fn from_violation(message: String, error: Error) -> Result<Self, ConstructError> {
        Ok(Self::new(message, error))
    }
}

/// Failure to build a requested exception type.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConstructError {
    /// The type offers no `(message, error)` construction.
    #[error("no (message, error) constructor is available")]
    MissingConstructor,
    /// The constructor refused the arguments.
    #[error("constructor rejected the violation: {0}")]
    Rejected(String),
}

/// Outcome of a typed raise.
#[derive(Debug, Clone)]
pub enum TypedFailure<E> {
    /// The requested exception type.
    Typed(E),
    /// The carrier used when the requested type could not be built.
    ///
    /// Its inner carrier holds the `CantInstantiateException` error.
    Fallback(ErrorException),
}

impl<E: ErrorCarrier> TypedFailure<E> {
    /// Returns the carried error, whichever variant holds it.
    #[must_use]
    pub fn error(&self) -> &Error {
        match self {
            Self::Typed(exception) => exception.error(),
            Self::Fallback(exception) => exception.error(),
        }
    }
}

impl<E> TypedFailure<E> {
    /// Returns the requested exception, if it was built.
    #[must_use]
    pub const fn typed(&self) -> Option<&E> {
        match self {
            Self::Typed(exception) => Some(exception),
            Self::Fallback(_) => None,
        }
    }

    /// Returns the fallback carrier, if the requested type was not built.
    #[must_use]
    pub const fn fallback(&self) -> Option<&ErrorException> {
        match self {
            Self::Typed(_) => None,
            Self::Fallback(exception) => Some(exception),
        }
    }

    /// Converts into the requested exception, or the fallback carrier.
    ///
    /// # Errors
    ///
    /// Returns the fallback carrier when the requested type was not built.
    pub fn into_typed(self) -> Result<E, ErrorException> {
        match self {
            Self::Typed(exception) => Ok(exception),
            Self::Fallback(exception) => Err(exception),
        }
    }
}

impl<E: ErrorCarrier> ErrorCarrier for TypedFailure<E> {
    fn error(&self) -> &Error {
        Self::error(self)
    }
}

impl<E: fmt::Display> fmt::Display for TypedFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed(exception) => exception.fmt(f),
            Self::Fallback(exception) => exception.fmt(f),
        }
    }
}

impl<E: std::error::Error> std::error::Error for TypedFailure<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Typed(exception) => exception.source(),
            Self::Fallback(exception) => exception.source(),
        }
    }
}
