// crates/error-contract/src/codes.rs
// ============================================================================
// Module: Built-in Error Codes
// Description: Core and contract error enumerations with their catalogs.
// Purpose: Identify every guard failure by a stable code and description.
// Dependencies: crate::{lookup, registry}
// ============================================================================

//! ## Overview
//! [`CoreError`] occupies [`ErrorOffset::CORE`] and [`ContractError`]
//! occupies [`ErrorOffset::CONTRACT`]. Every enumerant has an entry in the
//! matching static catalog, keyed `ERROR_<PREFIX>_<VARIANT>`.
//!
//! Some ordinals are pinned explicitly; codes are part of the public contract
//! and must not move when variants are added.

use crate::lookup::StaticCatalog;
use crate::registry::ErrorOffset;

// ============================================================================
// SECTION: Core Errors
// ============================================================================

crate::error_codes! {
    /// General-purpose errors shared by every module.
    pub enum CoreError in ErrorOffset::CORE, prefix "CORE" {
        /// Unknown error.
        Unknown = 0,
        /// Unclassified failure.
        General,
        /// An argument was rejected.
        InvalidArgument,
        /// The operation is invalid in the current state.
        InvalidOperation,
        /// The operation is not supported.
        NotSupported,
        /// A requested item does not exist.
        NotFound,
    }
}

/// Catalog for [`CoreError`].
pub const CORE_CATALOG: StaticCatalog = StaticCatalog::new(
    "core",
    &[
        ("ERROR_CORE_UNKNOWN", "Unknown error."),
        ("ERROR_CORE_GENERAL", "General error."),
        ("ERROR_CORE_INVALIDARGUMENT", "The argument is invalid."),
        ("ERROR_CORE_INVALIDOPERATION", "The operation is invalid in the current state."),
        ("ERROR_CORE_NOTSUPPORTED", "The operation is not supported."),
        ("ERROR_CORE_NOTFOUND", "The requested item can't be found."),
    ],
);

// ============================================================================
// SECTION: Contract Errors
// ============================================================================

crate::error_codes! {
    /// Errors raised by contract guards.
    pub enum ContractError in ErrorOffset::CONTRACT, prefix "CONTRACT" {
        /// Unknown contract error.
        Unknown = 0,
        /// Violation raised without a specific guard.
        General,
        /// A requested exception type could not be built.
        CantInstantiateException,
        /// A value expected to be absent was present.
        ThrowIfNotNull,
        /// A value expected to be present was absent.
        ThrowIfNull,
        /// A condition expected to hold was false.
        ThrowIfFalse = 0x05,
        /// A condition expected not to hold was true.
        ThrowIfTrue,
        /// A string was absent, empty or whitespace.
        ThrowIfStringIsNullOrWhiteSpace,
        /// Two values expected to differ were equal.
        ThrowIfEqual,
        /// Two values expected to match were different.
        ThrowIfNotEqual,
        /// A value did not have the expected type.
        ThrowIfNotType = 0x0A,
        /// A number did not name a member of an enumeration.
        ThrowIfInvalidEnumValue,
    }
}

/// Catalog for [`ContractError`].
pub const CONTRACT_CATALOG: StaticCatalog = StaticCatalog::new(
    "contract",
    &[
        ("ERROR_CONTRACT_UNKNOWN", "Unknown contract error."),
        ("ERROR_CONTRACT_GENERAL", "The contract has been violated."),
        (
            "ERROR_CONTRACT_CANTINSTANTIATEEXCEPTION",
            "The exception of type '{0}' can't be instantiated.",
        ),
        ("ERROR_CONTRACT_THROWIFNOTNULL", "The value of type '{0}' is expected to be null, but is '{1}'."),
        ("ERROR_CONTRACT_THROWIFNULL", "The value is expected to be not null."),
        ("ERROR_CONTRACT_THROWIFFALSE", "The condition is expected to be true."),
        ("ERROR_CONTRACT_THROWIFTRUE", "The condition is expected to be false."),
        (
            "ERROR_CONTRACT_THROWIFSTRINGISNULLORWHITESPACE",
            "The string is expected to be not null, empty or whitespace.",
        ),
        ("ERROR_CONTRACT_THROWIFEQUAL", "The values '{0}' and '{1}' are expected to be different."),
        ("ERROR_CONTRACT_THROWIFNOTEQUAL", "The values '{0}' and '{1}' are expected to be equal."),
        ("ERROR_CONTRACT_THROWIFNOTTYPE", "The value of type '{0}' can't be cast to type '{1}'."),
        (
            "ERROR_CONTRACT_THROWIFINVALIDENUMVALUE",
            "The value '{0}' is not defined in the enumeration '{1}'.",
        ),
    ],
);
