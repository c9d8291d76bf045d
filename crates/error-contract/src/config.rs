// crates/error-contract/src/config.rs
// ============================================================================
// Module: Contract Configuration
// Description: TOML configuration for diagnostics and module catalogs.
// Purpose: Build a ready `Contract` from strict, size-limited config files.
// Dependencies: serde, thiserror, toml, crate::{contract, diagnostics, lookup, registry, resolver}
// ============================================================================

//! ## Overview
//! Configuration selects a diagnostic sink and binds description catalogs to
//! collaborator module ranges:
//!
//! ```toml
//! [diagnostics]
//! sink = "file"
//! path = "contract-events.jsonl"
//!
//! [[catalogs]]
//! module = 2
//! base_name = "payroll"
//! templates = { ERROR_PAYROLL_MISSINGEMPLOYEE = "Employee '{0}' is missing." }
//!
//! [[catalogs]]
//! module = 3
//! base_name = "billing"
//! path = "billing-errors.toml"
//! ```
//!
//! Files are read with a hard size limit and must be UTF-8. Unknown fields
//! are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::contract::Contract;
use crate::diagnostics::DiagnosticSink;
use crate::diagnostics::FileDiagnosticSink;
use crate::diagnostics::NoopDiagnosticSink;
use crate::diagnostics::StderrDiagnosticSink;
use crate::lookup::MapCatalog;
use crate::registry::ErrorOffset;
use crate::registry::ErrorRegistry;
use crate::resolver::DescriptionResolver;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "error-contract.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "ERROR_CONTRACT_CONFIG";
/// Maximum configuration or catalog file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum number of templates in one catalog.
pub const MAX_CATALOG_TEMPLATES: usize = 0x100;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Module indices reserved for the built-in ranges.
const RESERVED_MODULES: [u16; 2] = [0, 1];

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    /// Diagnostic sink selection.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    /// Catalogs for collaborator modules.
    #[serde(default)]
    pub catalogs: Vec<CatalogConfig>,
}

/// Diagnostic sink kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// Discard events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `path`.
    File,
}

/// Diagnostic sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: SinkKind,
    /// Log file for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Catalog bound to a collaborator module range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Module index; the range starts at `module * 0x100`.
    pub module: u16,
    /// Catalog identity used in diagnostics.
    pub base_name: String,
    /// Catalog file holding a `[templates]` table.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Inline templates.
    #[serde(default)]
    pub templates: Option<BTreeMap<String, String>>,
}

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ContractConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        let content = read_limited(&resolved)?;
        let config: Self =
            toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.diagnostics.validate()?;
        let mut modules = BTreeSet::new();
        for catalog in &self.catalogs {
            catalog.validate()?;
            if !modules.insert(catalog.module) {
                return Err(ConfigError::Invalid(format!(
                    "catalog module {} is declared more than once",
                    catalog.module
                )));
            }
        }
        Ok(())
    }

    /// Builds a contract with the built-in catalogs plus the configured ones.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a catalog file or the diagnostic log
    /// cannot be read or opened.
    pub fn build_contract(&self) -> Result<Contract, ConfigError> {
        self.validate()?;
        let sink = self.diagnostics.build_sink()?;
        let resolver = DescriptionResolver::with_sink(Arc::clone(&sink));
        let mut registry = ErrorRegistry::with_builtin_catalogs(resolver);
        for catalog in &self.catalogs {
            registry.register(catalog.offset(), Arc::new(catalog.load()?));
        }
        Ok(Contract::new(registry).with_sink(sink))
    }
}

impl DiagnosticsConfig {
    /// Validates sink settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (SinkKind::File, None) => {
                Err(ConfigError::Invalid("diagnostics.path is required for the file sink".to_string()))
            }
            (SinkKind::None | SinkKind::Stderr, Some(_)) => Err(ConfigError::Invalid(
                "diagnostics.path is only allowed for the file sink".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Builds the configured sink.
    fn build_sink(&self) -> Result<Arc<dyn DiagnosticSink>, ConfigError> {
        let sink: Arc<dyn DiagnosticSink> = match (self.sink, &self.path) {
            (SinkKind::File, Some(path)) => Arc::new(
                FileDiagnosticSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?,
            ),
            (SinkKind::Stderr, _) => Arc::new(StderrDiagnosticSink),
            _ => Arc::new(NoopDiagnosticSink),
        };
        Ok(sink)
    }
}

impl CatalogConfig {
    /// Returns the module range.
    #[must_use]
    pub const fn offset(&self) -> ErrorOffset {
        ErrorOffset::module(self.module)
    }

    /// Validates the catalog entry.
    fn validate(&self) -> Result<(), ConfigError> {
        if RESERVED_MODULES.contains(&self.module) {
            return Err(ConfigError::Invalid(format!(
                "catalog module {} collides with a built-in range",
                self.module
            )));
        }
        if self.base_name.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "catalog module {} requires a base_name",
                self.module
            )));
        }
        match (&self.path, &self.templates) {
            (Some(_), Some(_)) => Err(ConfigError::Invalid(format!(
                "catalog {} sets both path and templates",
                self.base_name
            ))),
            (None, None) => Err(ConfigError::Invalid(format!(
                "catalog {} requires path or templates",
                self.base_name
            ))),
            (None, Some(templates)) => validate_templates(&self.base_name, templates),
            (Some(_), None) => Ok(()),
        }
    }

    /// Builds the catalog, reading the catalog file when configured.
    fn load(&self) -> Result<MapCatalog, ConfigError> {
        match (&self.path, &self.templates) {
            (Some(path), _) => {
                let loaded = MapCatalog::load_toml(path)?;
                Ok(MapCatalog::from_templates(self.base_name.clone(), loaded.into_templates()))
            }
            (None, templates) => Ok(MapCatalog::from_templates(
                self.base_name.clone(),
                templates.clone().unwrap_or_default(),
            )),
        }
    }
}

// ============================================================================
// SECTION: Catalog Files
// ============================================================================

/// On-disk catalog shape.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    /// Catalog identity.
    base_name: String,
    /// Key/template pairs.
    #[serde(default)]
    templates: BTreeMap<String, String>,
}

impl MapCatalog {
    /// Loads a catalog file with a `base_name` and a `[templates]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, is not valid
    /// TOML, or exceeds the catalog limits.
    pub fn load_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = read_limited(path)?;
        let file: CatalogFile =
            toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        if file.base_name.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog file requires a base_name".to_string()));
        }
        validate_templates(&file.base_name, &file.templates)?;
        Ok(Self::from_templates(file.base_name, file.templates))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Reads a UTF-8 file no larger than [`MAX_CONFIG_FILE_SIZE`].
fn read_limited(path: &Path) -> Result<String, ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    String::from_utf8(bytes)
        .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))
}

/// Rejects oversize tables and blank keys.
fn validate_templates(
    base_name: &str,
    templates: &BTreeMap<String, String>,
) -> Result<(), ConfigError> {
    if templates.len() > MAX_CATALOG_TEMPLATES {
        return Err(ConfigError::Invalid(format!(
            "catalog {base_name} exceeds {MAX_CATALOG_TEMPLATES} templates"
        )));
    }
    if templates.keys().any(|key| key.trim().is_empty()) {
        return Err(ConfigError::Invalid(format!("catalog {base_name} has a blank key")));
    }
    Ok(())
}
