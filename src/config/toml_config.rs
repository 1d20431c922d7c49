use crate::config::{BackendConfig, LoggingConfig};
use crate::utils::error::ConfigError;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    pub logging: Option<LoggingConfig>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${CAR_API})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.validate()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_rest_config() {
        let toml_content = r#"
[backend]
kind = "rest"
endpoint = "https://cars.example.com/api"
timeout_seconds = 5

[backend.headers]
X-Tenant = "acme"

[logging]
level = "debug"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.backend.kind, BackendKind::Rest);
        assert_eq!(
            config.backend.endpoint.as_deref(),
            Some("https://cars.example.com/api")
        );
        assert_eq!(config.backend.timeout_seconds, Some(5));
        assert_eq!(
            config.backend.headers.as_ref().unwrap().get("X-Tenant"),
            Some(&"acme".to_string())
        );
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_defaults_to_memory() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.backend.kind, BackendKind::Memory);
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CAR_SERVICE_TEST_ENDPOINT", "https://test.api.com");

        let toml_content = r#"
[backend]
kind = "rest"
endpoint = "${CAR_SERVICE_TEST_ENDPOINT}"

[backend.headers]
Authorization = "Bearer ${CAR_SERVICE_TEST_UNSET_TOKEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.backend.endpoint.as_deref(), Some("https://test.api.com"));
        assert_eq!(
            config.backend.headers.unwrap().get("Authorization"),
            Some(&"Bearer ${CAR_SERVICE_TEST_UNSET_TOKEN}".to_string())
        );

        std::env::remove_var("CAR_SERVICE_TEST_ENDPOINT");
    }

    #[test]
    fn test_unknown_backend_kind_is_parse_error() {
        let result = TomlConfig::from_toml_str("[backend]\nkind = \"oracle\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            "[backend]\nkind = \"rest\"\nendpoint = \"invalid-url\"\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[backend]\nkind = \"file\"\ndata_dir = \"./data\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.backend.kind, BackendKind::File);
        assert_eq!(config.backend.data_dir.as_deref(), Some("./data"));
    }
}
