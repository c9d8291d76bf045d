// crates/error-contract/src/lib.rs
// ============================================================================
// Module: Error Contract Root
// Description: Public API surface for code-identified errors and contract guards.
// Purpose: Wire together the error model, resolver, registry, and guards.
// Dependencies: crate::{codes, config, contract, diagnostics, error, exception, format, lookup,
//              registry, resolver, safe}
// ============================================================================

//! ## Overview
//! Guards check preconditions and, on violation, return an exception carrying
//! an [`Error`] with a stable numeric code, a symbolic name and a description
//! read from a catalog. Resolving a description never fails: broken catalogs
//! and bad templates degrade to diagnostic text.
//!
//! ```ignore
//! let contract = Contract::default();
//! let user = contract.check().message("user {0} is required").arg(id).throw_if_null(user)?;
//! ```

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod codes;
pub mod config;
pub mod contract;
pub mod diagnostics;
pub mod error;
pub mod exception;
pub mod format;
pub mod lookup;
pub mod registry;
pub mod resolver;
pub mod safe;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use codes::CONTRACT_CATALOG;
pub use codes::CORE_CATALOG;
pub use codes::ContractError;
pub use codes::CoreError;
pub use config::ConfigError;
pub use config::ContractConfig;
pub use contract::AnyValue;
pub use contract::Check;
pub use contract::Contract;
pub use contract::Raise;
pub use diagnostics::DiagnosticSink;
pub use diagnostics::NoopDiagnosticSink;
pub use diagnostics::StderrDiagnosticSink;
pub use diagnostics::WriterDiagnosticSink;
pub use error::Error;
pub use exception::ConstructError;
pub use exception::ContractException;
pub use exception::ErrorCarrier;
pub use exception::ErrorException;
pub use exception::TypedFailure;
pub use format::FormatError;
pub use format::format_message;
pub use format::format_template;
pub use lookup::LookupError;
pub use lookup::MapCatalog;
pub use lookup::ResourceLookup;
pub use lookup::StaticCatalog;
pub use registry::ContractEnum;
pub use registry::ErrorCodeSet;
pub use registry::ErrorOffset;
pub use registry::ErrorRegistry;
pub use resolver::DescriptionResolver;
pub use safe::Nullable;
pub use safe::to_safe_string;
