use crate::config::{BackendConfig, BackendKind, TomlConfig};
use crate::domain::model::CarRecord;
use crate::utils::error::ConfigError;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "car-service")]
#[command(about = "Manage car records through a pluggable backend")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, value_enum, help = "Backend to use (overrides the config file)")]
    pub backend: Option<BackendKind>,

    #[arg(long, help = "Base URL of the car API (rest backend)")]
    pub endpoint: Option<String>,

    #[arg(long, help = "Directory holding the car document (file backend)")]
    pub data_dir: Option<String>,

    #[arg(long, help = "Request timeout in seconds (rest backend)")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every car
    List,
    /// Show one car
    Get { id: String },
    /// Register a new car
    Create(CarArgs),
    /// Replace every field of an existing car
    Update {
        id: String,
        #[command(flatten)]
        car: CarArgs,
    },
    /// Remove a car
    Delete { id: String },
}

#[derive(Debug, Clone, Args)]
pub struct CarArgs {
    #[arg(long)]
    pub manufacturer: String,
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub model: String,
    #[arg(long)]
    pub year: i32,
    #[arg(long)]
    pub color: String,
    #[arg(long)]
    pub price: i64,
    #[arg(long)]
    pub currency: String,
}

impl From<CarArgs> for CarRecord {
    fn from(args: CarArgs) -> Self {
        CarRecord::new(
            args.manufacturer,
            args.country,
            args.model,
            args.year,
            args.color,
            args.price,
            args.currency,
        )
    }
}

impl CliConfig {
    /// Loads the config file (if any) and applies command-line overrides.
    pub fn resolve(&self) -> Result<TomlConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config.backend);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, backend: &mut BackendConfig) {
        if let Some(kind) = self.backend {
            backend.kind = kind;
        }
        if let Some(endpoint) = &self.endpoint {
            backend.endpoint = Some(endpoint.clone());
        }
        if let Some(data_dir) = &self.data_dir {
            backend.data_dir = Some(data_dir.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            backend.timeout_seconds = Some(timeout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_command() {
        let cli = CliConfig::try_parse_from([
            "car-service",
            "--backend",
            "memory",
            "create",
            "--manufacturer",
            "Toyota",
            "--country",
            "Japan",
            "--model",
            "Corolla",
            "--year",
            "2020",
            "--color",
            "blue",
            "--price",
            "20000",
            "--currency",
            "USD",
        ])
        .unwrap();

        match cli.command {
            Command::Create(args) => assert_eq!(
                CarRecord::from(args),
                CarRecord::new("Toyota", "Japan", "Corolla", 2020, "blue", 20000, "USD")
            ),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::try_parse_from([
            "car-service",
            "--backend",
            "rest",
            "--endpoint",
            "http://localhost:9000",
            "--timeout-seconds",
            "3",
            "list",
        ])
        .unwrap();

        let config = cli.resolve().unwrap();
        assert_eq!(config.backend.kind, BackendKind::Rest);
        assert_eq!(config.backend.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.backend.timeout_seconds, Some(3));
    }

    #[test]
    fn test_rest_without_endpoint_fails_resolution() {
        let cli = CliConfig::try_parse_from(["car-service", "--backend", "rest", "list"]).unwrap();
        assert!(matches!(cli.resolve(), Err(ConfigError::Missing { .. })));
    }
}
