#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{ConfigError, FieldError};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Memory,
    File,
    Rest,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Memory => "memory",
            BackendKind::File => "file",
            BackendKind::Rest => "rest",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
    pub endpoint: Option<String>,
    pub data_dir: Option<String>,
    pub document: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl BackendConfig {
    /// Checks that the settings the selected backend needs are present and well formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.kind {
            BackendKind::Memory => {}
            BackendKind::File => {
                let data_dir = required("backend.data_dir", &self.data_dir)?;
                validate_path("backend.data_dir", data_dir)?;
                if let Some(document) = &self.document {
                    validate_path("backend.document", document)?;
                }
            }
            BackendKind::Rest => {
                let endpoint = required("backend.endpoint", &self.endpoint)?;
                validate_url("backend.endpoint", endpoint)?;
                if let Some(timeout) = self.timeout_seconds {
                    validate_positive_number("backend.timeout_seconds", timeout, 1)?;
                }
            }
        }
        Ok(())
    }
}

fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, ConfigError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(v) => Err(FieldError::new(field, v, "Value cannot be empty").into()),
        None => Err(ConfigError::Missing {
            field: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_needs_nothing() {
        assert!(BackendConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rest_requires_endpoint() {
        let config = BackendConfig {
            kind: BackendKind::Rest,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing { field }) if field == "backend.endpoint"
        ));

        let config = BackendConfig {
            kind: BackendKind::Rest,
            endpoint: Some("http://localhost:8080".to_string()),
            timeout_seconds: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_file_requires_data_dir() {
        let config = BackendConfig {
            kind: BackendKind::File,
            data_dir: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }
}
