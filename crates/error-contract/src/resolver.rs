// crates/error-contract/src/resolver.rs
// ============================================================================
// Module: Description Resolver
// Description: Turns (code, name, catalog, args) into an `Error`.
// Purpose: Resolve descriptions from a catalog without ever failing.
// Dependencies: crate::{diagnostics, error, format, lookup}
// ============================================================================

//! ## Overview
//! [`DescriptionResolver::resolve`] always returns an [`Error`]. When the
//! catalog is missing, the key is unknown or blank, the lookup fails, or the
//! template does not accept the supplied arguments, the description explains
//! the failure instead:
//!
//! `Error retrieving description [<code>, <name>, <base_name>]: <reason>`
//!
//! The code is preserved in every case, so the failing condition stays
//! identifiable even when its description is not.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::diagnostics::DegradedDescriptionEvent;
use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::NoopDiagnosticSink;
use crate::error::Error;
use crate::format::format_template;
use crate::lookup::ResourceLookup;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix of every degraded description.
pub const DESCRIPTION_FAILURE_PREFIX: &str = "Error retrieving description";

/// Reason used when no catalog is bound.
pub const REASON_LOOKUP_MISSING: &str = "Parameter 'lookup' is null";

/// Reason used when the key is missing or blank.
pub const REASON_NAME_MISSING: &str = "Parameter 'name' is null";

/// Reason used when the catalog has no usable template for the key.
pub const REASON_NOT_FOUND: &str = "The description can't be found.";

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves error descriptions from catalogs.
#[derive(Clone)]
pub struct DescriptionResolver {
    /// Receives degraded-resolution events.
    sink: Arc<dyn DiagnosticSink>,
}

impl DescriptionResolver {
    /// Creates a resolver that does not report degradations.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NoopDiagnosticSink))
    }

    /// Creates a resolver reporting degradations to `sink`.
    #[must_use]
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
        }
    }

    /// Resolves an error for `code`, reading the description for `name` from `lookup`.
    ///
    /// A blank `name` falls back to the default name for `code`. `args` are
    /// interpolated into the template only when non-empty.
    #[must_use]
    pub fn resolve(
        &self,
        code: u32,
        name: Option<&str>,
        lookup: Option<&dyn ResourceLookup>,
        args: &[String],
    ) -> Error {
        let key = name.filter(|name| !name.trim().is_empty());
        let display_name = name.unwrap_or_default();

        let Some(lookup) = lookup else {
            return self.degraded(code, display_name, None, REASON_LOOKUP_MISSING);
        };
        let base_name = lookup.base_name();
        let Some(key) = key else {
            return self.degraded(code, display_name, Some(base_name), REASON_NAME_MISSING);
        };

        let template = match lookup.template(key) {
            Ok(Some(template)) if !template.trim().is_empty() => template,
            Ok(_) => return self.degraded(code, key, Some(base_name), REASON_NOT_FOUND),
            Err(err) => return self.degraded(code, key, Some(base_name), &err.to_string()),
        };

        if args.is_empty() {
            return Error::with_parts(code, key, template);
        }
        match format_template(&template, args) {
            Ok(description) => Error::with_parts(code, key, description),
            Err(err) => self.degraded(code, key, Some(base_name), &err.to_string()),
        }
    }

    /// Builds the degraded error and reports it.
    fn degraded(&self, code: u32, name: &str, base_name: Option<&str>, reason: &str) -> Error {
        let key = Some(name).filter(|name| !name.trim().is_empty());
        self.sink.record_degraded(&DegradedDescriptionEvent::new(code, key, base_name, reason));
        Error::with_parts(code, name, degraded_description(code, name, base_name, reason))
    }
}

impl Default for DescriptionResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the diagnostic description for a failed resolution.
#[must_use]
pub fn degraded_description(code: u32, name: &str, base_name: Option<&str>, reason: &str) -> String {
    format!(
        "{DESCRIPTION_FAILURE_PREFIX} [{code}, {name}, {}]: {reason}",
        base_name.unwrap_or_default()
    )
}

/// Returns true when `error` carries a degraded description.
#[must_use]
pub fn is_degraded(error: &Error) -> bool {
    error.description().starts_with(DESCRIPTION_FAILURE_PREFIX)
}
