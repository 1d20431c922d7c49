pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    build_backend, memory::InMemoryCarService, rest::RestCarService, storage::LocalStorage,
    stored::StoredCarService,
};
pub use config::{BackendConfig, BackendKind, TomlConfig};
pub use core::traced::TracedCarService;
pub use domain::model::CarRecord;
pub use domain::ports::{CarService, Storage};
pub use utils::error::{ConfigError, ErrorCategory, Result, ServiceError};
