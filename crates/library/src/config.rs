//! Per-library resource configuration via TOML
//!
//! Every field is optional in the file; missing fields take the defaults
//! below. A library that needs more than the defaults overrides
//! `Library::resource_config` or ships a config file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tabula_core::{Error, Result};

/// Resource limits a library requests from the runtime
///
/// # Example
///
/// ```toml
/// max_tasks = 1000000
/// max_mappers = 1
/// max_reduction_ops = 0
/// max_projections = 0
/// max_shardings = 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Maximum number of task kinds
    pub max_tasks: u64,
    /// Maximum number of mappers
    pub max_mappers: u64,
    /// Maximum number of custom reduction operators
    pub max_reduction_ops: u64,
    /// Maximum number of projection functors
    pub max_projections: u64,
    /// Maximum number of sharding functors
    pub max_shardings: u64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            max_tasks: 1_000_000,
            max_mappers: 1,
            max_reduction_ops: 0,
            max_projections: 0,
            max_shardings: 0,
        }
    }
}

impl ResourceConfig {
    /// Default config file content with comments
    pub fn default_toml() -> &'static str {
        r#"# Library resource configuration
#
# Task kinds the library may register (default: 1000000)
max_tasks = 1000000

# Mappers; at least one is required (default: 1)
max_mappers = 1

# Custom reduction operators (default: 0)
max_reduction_ops = 0

# Projection and sharding functors (default: 0)
max_projections = 0
max_shardings = 0
"#
    }

    /// Parse and validate a config from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text is not valid TOML for this struct or
    /// fails [`validate`](Self::validate).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ResourceConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("failed to parse resource config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { reason } => {
                Error::config(format!("{} (in '{}')", reason, path.display()))
            }
            other => other,
        })
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("failed to serialize resource config: {}", e)))
    }

    /// Check limits the runtime cannot work without
    ///
    /// # Errors
    ///
    /// Returns `Config` if `max_tasks` or `max_mappers` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_tasks == 0 {
            return Err(Error::config("max_tasks must be at least 1"));
        }
        if self.max_mappers == 0 {
            return Err(Error::config("max_mappers must be at least 1"));
        }
        Ok(())
    }
}
