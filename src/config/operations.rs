//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{LockerError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(LockerError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockerError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| LockerError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            LockerError::Config(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// - `host` must be non-empty
    /// - `port` must be non-zero
    /// - transport timeouts, when set, must be non-zero
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(LockerError::Config(
                "config validation failed: host must not be empty".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(LockerError::Config(
                "config validation failed: port must be greater than 0".to_string(),
            ));
        }

        for (field, value) in [
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("read_timeout_ms", self.read_timeout_ms),
        ] {
            if value == Some(0) {
                return Err(LockerError::Config(format!(
                    "config validation failed: {} must be greater than 0 when set",
                    field
                )));
            }
        }

        Ok(())
    }

    /// `host:port` of the configured server.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
