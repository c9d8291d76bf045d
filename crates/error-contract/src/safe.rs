// crates/error-contract/src/safe.rs
// ============================================================================
// Module: Safe String Rendering
// Description: Null-tolerant rendering of optional values.
// Purpose: Render operands for diagnostics without failing on absent values.
// Dependencies: std::fmt
// ============================================================================

//! ## Overview
//! Diagnostics embed operand values into descriptions. Absent values render as
//! [`NULL_TEXT`] instead of being skipped, so a description always shows both
//! sides of a failed comparison.

use std::fmt;

/// Rendering used for absent values.
pub const NULL_TEXT: &str = "null";

/// Renders an optional value, using [`NULL_TEXT`] when absent.
#[must_use]
pub fn to_safe_string<T: fmt::Display + ?Sized>(value: Option<&T>) -> String {
    value.map_or_else(|| NULL_TEXT.to_string(), ToString::to_string)
}

/// Optional value that displays as [`NULL_TEXT`] when absent.
///
/// Lets optional operands flow through guards that need `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Nullable<T>(pub Option<T>);

impl<T> Nullable<T> {
    /// Wraps a present value.
    pub const fn some(value: T) -> Self {
        Self(Some(value))
    }

    /// Returns the absent value.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Returns the inner option.
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T: fmt::Display> fmt::Display for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str(NULL_TEXT),
        }
    }
}
