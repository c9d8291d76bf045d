// crates/error-contract/src/lookup.rs
// ============================================================================
// Module: Resource Lookup
// Description: Catalog interface mapping keys to description templates.
// Purpose: Decouple description resolution from catalog storage.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A [`ResourceLookup`] maps a catalog key (for example
//! `ERROR_CONTRACT_THROWIFNULL`) to a raw, possibly templated description.
//! Lookups may fail; callers such as [`crate::resolver::DescriptionResolver`]
//! absorb every failure into diagnostic text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog access failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The catalog cannot be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    /// The catalog holds an unusable entry for the key.
    #[error("catalog entry '{key}' is corrupt: {reason}")]
    Corrupt {
        /// Offending key.
        key: String,
        /// Failure detail.
        reason: String,
    },
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Read-only catalog of description templates.
pub trait ResourceLookup: Send + Sync {
    /// Returns the catalog identity used in diagnostics.
    fn base_name(&self) -> &str;

    /// Returns the raw template for `key`, or `None` when the key is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the catalog cannot be read.
    fn template(&self, key: &str) -> Result<Option<String>, LookupError>;
}

// ============================================================================
// SECTION: Static Catalog
// ============================================================================

/// Catalog backed by a static key/template table.
#[derive(Debug, Clone, Copy)]
pub struct StaticCatalog {
    /// Catalog identity.
    base_name: &'static str,
    /// Key/template pairs.
    entries: &'static [(&'static str, &'static str)],
}

impl StaticCatalog {
    /// Creates a catalog over a static table.
    #[must_use]
    pub const fn new(
        base_name: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            base_name,
            entries,
        }
    }

    /// Returns the table entries.
    #[must_use]
    pub const fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

impl ResourceLookup for StaticCatalog {
    fn base_name(&self) -> &str {
        self.base_name
    }

    fn template(&self, key: &str) -> Result<Option<String>, LookupError> {
        Ok(self
            .entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, template)| (*template).to_string()))
    }
}

// ============================================================================
// SECTION: Map Catalog
// ============================================================================

/// Owned catalog, built programmatically or loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapCatalog {
    /// Catalog identity.
    base_name: String,
    /// Key/template pairs.
    templates: BTreeMap<String, String>,
}

impl MapCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            templates: BTreeMap::new(),
        }
    }

    /// Creates a catalog from existing templates.
    #[must_use]
    pub fn from_templates(base_name: impl Into<String>, templates: BTreeMap<String, String>) -> Self {
        Self {
            base_name: base_name.into(),
            templates,
        }
    }

    /// Adds or replaces a template.
    #[must_use]
    pub fn with_template(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(key.into(), template.into());
        self
    }

    /// Consumes the catalog and returns its templates.
    #[must_use]
    pub fn into_templates(self) -> BTreeMap<String, String> {
        self.templates
    }

    /// Returns the number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true when the catalog holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ResourceLookup for MapCatalog {
    fn base_name(&self) -> &str {
        &self.base_name
    }

    fn template(&self, key: &str) -> Result<Option<String>, LookupError> {
        Ok(self.templates.get(key).cloned())
    }
}
