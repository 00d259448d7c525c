//! Hosting process configuration.
//!
//! Values come from command-line flags, falling back to environment
//! variables. The table name has no default: `TABLE_NAME` must be set.

use crate::{DEFAULT_HOST, DEFAULT_PORT, TABLE_NAME_ENV};
use clap::Parser;
use thiserror::Error;

/// Errors found while validating the configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("table name must not be empty (set --table-name or TABLE_NAME)")]
    EmptyTableName,

    #[error("host must not be empty")]
    EmptyHost,
}

/// Server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "itemkv", version, about = "Serves the item create/get/delete handlers over HTTP")]
pub struct Config {
    /// Name of the table items are stored in
    #[arg(long, env = TABLE_NAME_ENV)]
    pub table_name: String,

    /// Host to bind to
    #[arg(long, env = "ITEMKV_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "ITEMKV_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Config {
    /// Parses the process arguments and environment, then validates.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Checks values clap cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        Ok(())
    }

    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let config =
            Config::try_parse_from(["itemkv", "--table-name", "items", "--port", "8080"]).unwrap();

        assert_eq!(config.table_name, "items");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["itemkv", "--table-name", "items"]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_blank_values_rejected() {
        let config = Config::try_parse_from(["itemkv", "--table-name", "  "]).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::EmptyTableName));

        let config =
            Config::try_parse_from(["itemkv", "--table-name", "items", "--host", ""]).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::EmptyHost));
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::try_parse_from(["itemkv", "--table-name", "t", "-p", "70000"]).is_err());
    }
}
