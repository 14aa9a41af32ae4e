// shipwright-config/src/config.rs
// ============================================================================
// Module: Configuration Model
// Description: TOML-backed configuration for server, catalog, and steps.
// Purpose: Resolve, parse, and validate deployment settings at startup.
// Dependencies: serde, shipwright-core, toml
// ============================================================================

//! ## Overview
//! Configuration is resolved from an explicit path, the `SHIPWRIGHT_CONFIG`
//! environment variable, or `shipwright.toml` in the working directory; when
//! none is present the built-in defaults apply. Every section is optional and
//! defaults to the values the original wizard shipped with. Validation runs
//! at load time so that definition errors (unknown steps, duplicate steps,
//! empty catalogs) abort startup instead of surfacing per call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use shipwright_core::StepId;
use shipwright_core::StepPlan;
use shipwright_core::ValidationCatalog;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "SHIPWRIGHT_CONFIG";

/// Default configuration file name resolved from the working directory.
const DEFAULT_CONFIG_FILE: &str = "shipwright.toml";

/// Maximum accepted configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Top-level Shipwright configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShipwrightConfig {
    /// Server transport settings.
    pub server: ServerConfig,
    /// Validation catalog contents.
    pub catalog: CatalogConfig,
    /// Enabled step set and order.
    pub steps: StepsConfig,
}

/// Server transport selection for the MCP server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// JSON-RPC over stdin/stdout with Content-Length framing.
    #[default]
    Stdio,
    /// JSON-RPC over HTTP POST.
    Http,
}

/// Server configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Transport used to serve requests.
    pub transport: ServerTransport,
    /// Bind address for the HTTP transport.
    pub bind: Option<String>,
    /// Maximum allowed request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::Stdio,
            bind: None,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Validation catalog configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Carrier names mapped to their supported services.
    pub carriers: BTreeMap<String, Vec<String>>,
    /// Allowed label sizes.
    pub label_sizes: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let defaults = ValidationCatalog::default();
        Self {
            carriers: defaults.carriers().clone(),
            label_sizes: defaults.label_sizes().to_vec(),
        }
    }
}

/// Step set configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepsConfig {
    /// Enabled step identifiers, in checklist order.
    pub enabled: Vec<String>,
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            enabled: StepId::all().iter().map(|step| step.as_str().to_string()).collect(),
        }
    }
}

impl ShipwrightConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, then `SHIPWRIGHT_CONFIG`, then
    /// `shipwright.toml` in the working directory. When none is present the
    /// built-in defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.catalog.validate()?;
        self.steps.validate()?;
        Ok(())
    }

    /// Builds the validation catalog from the configured contents.
    #[must_use]
    pub fn validation_catalog(&self) -> ValidationCatalog {
        ValidationCatalog::new(self.catalog.carriers.clone(), self.catalog.label_sizes.clone())
    }

    /// Builds the step plan from the configured step set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a step id is unknown or the
    /// plan rejects the set. Both indicate definition bugs and should abort
    /// startup.
    pub fn step_plan(&self) -> Result<StepPlan, ConfigError> {
        let order = self.steps.parsed()?;
        StepPlan::new(&order).map_err(|err| ConfigError::Invalid(err.to_string()))
    }
}

impl ServerConfig {
    /// Validates the server section.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid("max_body_bytes must be greater than zero".to_string()));
        }
        if self.transport == ServerTransport::Http {
            let bind = self
                .bind
                .as_deref()
                .ok_or_else(|| ConfigError::Invalid("http transport requires bind".to_string()))?;
            bind.parse::<SocketAddr>()
                .map_err(|_| ConfigError::Invalid(format!("invalid bind address: {bind}")))?;
        }
        Ok(())
    }
}

impl CatalogConfig {
    /// Validates the catalog section.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.carriers.is_empty() {
            return Err(ConfigError::Invalid("catalog must define at least one carrier".to_string()));
        }
        for (carrier, services) in &self.carriers {
            if carrier.trim().is_empty() {
                return Err(ConfigError::Invalid("carrier names must be non-empty".to_string()));
            }
            if services.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "carrier {carrier} must define at least one service"
                )));
            }
            if services.iter().any(|service| service.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "carrier {carrier} has an empty service name"
                )));
            }
        }
        if self.label_sizes.is_empty() {
            return Err(ConfigError::Invalid(
                "catalog must define at least one label size".to_string(),
            ));
        }
        if self.label_sizes.iter().any(|size| size.trim().is_empty()) {
            return Err(ConfigError::Invalid("label sizes must be non-empty".to_string()));
        }
        Ok(())
    }
}

impl StepsConfig {
    /// Validates the steps section.
    fn validate(&self) -> Result<(), ConfigError> {
        let _ = self.parsed()?;
        Ok(())
    }

    /// Parses the enabled step names into identifiers, preserving order.
    fn parsed(&self) -> Result<Vec<StepId>, ConfigError> {
        if self.enabled.is_empty() {
            return Err(ConfigError::Invalid("steps.enabled must not be empty".to_string()));
        }
        let mut order = Vec::with_capacity(self.enabled.len());
        for name in &self.enabled {
            let step = StepId::parse(name.trim())
                .ok_or_else(|| ConfigError::Invalid(format!("unknown step id: {name}")))?;
            if order.contains(&step) {
                return Err(ConfigError::Invalid(format!("duplicate step id: {name}")));
            }
            order.push(step);
        }
        Ok(order)
    }
}

/// Resolves the configuration file path, when one applies.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(explicit) = path {
        if !explicit.is_file() {
            return Err(ConfigError::Io(format!("config file not found: {}", explicit.display())));
        }
        return Ok(Some(explicit.to_path_buf()));
    }
    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        let candidate = PathBuf::from(env_path);
        if !candidate.is_file() {
            return Err(ConfigError::Io(format!(
                "config file not found: {}",
                candidate.display()
            )));
        }
        return Ok(Some(candidate));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default.is_file() {
        return Ok(Some(default));
    }
    Ok(None)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO failure while reading the configuration file.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing failure.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Configuration is internally inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}
