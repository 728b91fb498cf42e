//! Service configuration loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```toml
//! [pagination]
//! default_limit = 10
//! max_limit = 100
//!
//! [logging]
//! filter = "warn"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use warden_contracts::{WardenError, WardenResult};

/// Limits applied when listing projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    /// Page size used when the caller does not ask for one.
    pub default_limit: u32,
    /// Largest page size a caller may request.
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// Logging defaults for binaries. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `"warn"` or `"warden_acl=debug"`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `WardenError::ConfigError` if the TOML is malformed, names an
    /// unknown key, or holds inconsistent limits.
    pub fn from_toml_str(s: &str) -> WardenResult<Self> {
        let config: ServiceConfig = toml::from_str(s).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to parse service TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it with `from_toml_str`.
    pub fn from_file(path: &Path) -> WardenResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> WardenResult<()> {
        let p = &self.pagination;
        if p.default_limit == 0 || p.max_limit == 0 {
            return Err(WardenError::ConfigError {
                reason: "pagination limits must be at least 1".to_string(),
            });
        }
        if p.default_limit > p.max_limit {
            return Err(WardenError::ConfigError {
                reason: format!(
                    "pagination.default_limit ({}) exceeds pagination.max_limit ({})",
                    p.default_limit, p.max_limit
                ),
            });
        }
        Ok(())
    }
}
