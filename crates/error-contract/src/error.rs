// crates/error-contract/src/error.rs
// ============================================================================
// Module: Error Value
// Description: Immutable (code, name, description) error identity.
// Purpose: Provide a code-identified error value with deterministic defaults.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`Error`] identifies a fault class by a stable numeric code. The name and
//! description are never blank: when absent they are derived from the code.
//! Equality and hashing only consider the code, so two errors resolved from
//! different catalogs (or with degraded descriptions) still compare equal.
//!
//! Codes are partitioned into ranges, see [`crate::registry::ErrorOffset`]:
//! - `0x00000000 - 0x000000FF`: core errors
//! - `0x00000100 - 0x000001FF`: contract errors

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Description of the unknown error (code 0).
pub const UNKNOWN_DESCRIPTION: &str = "Unknown error.";

// ============================================================================
// SECTION: Error
// ============================================================================

/// Error identity carried by contract failures.
///
/// # Invariants
/// - `name` and `description` are never empty or whitespace-only.
/// - Equality and hashing are defined on `code` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawError")]
pub struct Error {
    /// Globally unique numeric code.
    code: u32,
    /// Symbolic name (usually the catalog key).
    name: String,
    /// Human-readable description.
    description: String,
}

impl Error {
    /// Creates an error with the default name and description for `code`.
    #[must_use]
    pub fn new(code: u32) -> Self {
        Self {
            code,
            name: default_name(code),
            description: default_description(code),
        }
    }

    /// Creates an error with a name and the default description.
    #[must_use]
    pub fn with_name(code: u32, name: impl Into<String>) -> Self {
        Self::with_parts(code, name, String::new())
    }

    /// Creates an error from all three parts; blank parts fall back to defaults.
    #[must_use]
    pub fn with_parts(code: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let description = description.into();
        Self {
            code,
            name: if name.trim().is_empty() { default_name(code) } else { name },
            description: if description.trim().is_empty() {
                default_description(code)
            } else {
                description
            },
        }
    }

    /// Returns the unknown error (code 0).
    #[must_use]
    pub fn unknown() -> Self {
        Self::with_parts(0, String::new(), UNKNOWN_DESCRIPTION)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Returns the symbolic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Default for Error {
    fn default() -> Self {
        Self::unknown()
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Error {}

impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error #{}: {}, {}", self.code, self.name, self.description)
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default name for a code: `0x` followed by 8 upper-case hex digits.
#[must_use]
pub fn default_name(code: u32) -> String {
    format!("0x{code:08X}")
}

/// Returns the default description for a code: `Error ` followed by the default name.
#[must_use]
pub fn default_description(code: u32) -> String {
    format!("Error {}", default_name(code))
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

/// Wire form of [`Error`]; missing or blank parts are defaulted on conversion.
#[derive(Deserialize)]
struct RawError {
    /// Numeric code.
    code: u32,
    /// Optional name.
    #[serde(default)]
    name: Option<String>,
    /// Optional description.
    #[serde(default)]
    description: Option<String>,
}

impl From<RawError> for Error {
    fn from(raw: RawError) -> Self {
        Self::with_parts(raw.code, raw.name.unwrap_or_default(), raw.description.unwrap_or_default())
    }
}
