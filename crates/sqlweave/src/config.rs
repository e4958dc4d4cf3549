//! Builder configuration.
//!
//! A [`BuilderConfig`] names the driver whose dialect should be used and the
//! text placed between clauses. It can be built in code or loaded from TOML
//! or JSON:
//!
//! ```toml
//! driver = "pgsql"
//! separator = "\n"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::dialect;
use crate::error::{SqlError, SqlResult};

fn default_driver() -> String {
    "ansi".to_string()
}

fn default_separator() -> String {
    " ".to_string()
}

/// Configuration for [`QueryBuilder::from_config`](crate::QueryBuilder::from_config).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuilderConfig {
    /// Driver name resolved through [`dialect::for_driver`].
    #[serde(default = "default_driver")]
    pub driver: String,
    /// Text placed between clauses.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            separator: default_separator(),
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the driver name.
    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }

    /// Set the clause separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn from_toml_str(raw: &str) -> SqlResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> SqlResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> SqlResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SqlError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&raw),
            Some("toml") | None => Self::from_toml_str(&raw),
            Some(other) => Err(SqlError::config(format!(
                "unsupported config format `.{other}` for {}",
                path.display()
            ))),
        }
    }

    /// Check that the driver is known and the separator is non-empty.
    pub fn validate(&self) -> SqlResult<()> {
        dialect::for_driver(&self.driver)?;
        if self.separator.is_empty() {
            return Err(SqlError::validation("separator must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.driver, "ansi");
        assert_eq!(config.separator, " ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_fills_missing_fields() {
        let config = BuilderConfig::from_toml_str(r#"driver = "mssql""#).unwrap();
        assert_eq!(config, BuilderConfig::new().driver("mssql"));
    }

    #[test]
    fn json_config() {
        let config =
            BuilderConfig::from_json_str(r#"{"driver": "postgres", "separator": "\n"}"#).unwrap();
        assert_eq!(config.driver, "postgres");
        assert_eq!(config.separator, "\n");
    }

    #[test]
    fn invalid_configs() {
        let err = BuilderConfig::from_toml_str("driver = [").unwrap_err();
        assert!(matches!(err, SqlError::Config(_)));

        let err = BuilderConfig::from_json_str(r#"{"driver": "informix"}"#).unwrap_err();
        assert_eq!(err, SqlError::UnsupportedDriver("informix".to_string()));

        let err = BuilderConfig::new().separator("").validate().unwrap_err();
        assert_eq!(err, SqlError::validation("separator must not be empty"));
    }

    #[test]
    fn missing_file() {
        let err = BuilderConfig::load("/nonexistent/sqlweave.toml").unwrap_err();
        assert!(matches!(err, SqlError::Config(msg) if msg.contains("failed to read")));
    }
}
