// Adapters layer: concrete `CarService` backends and the storage they sit on.

pub mod memory;
pub mod rest;
pub mod storage;
pub mod stored;

use crate::config::{BackendConfig, BackendKind};
use crate::domain::ports::CarService;
use crate::utils::error::ConfigError;
use std::time::Duration;

/// Builds the backend a validated `BackendConfig` describes.
pub fn build_backend(config: &BackendConfig) -> Result<Box<dyn CarService>, ConfigError> {
    config.validate()?;

    let backend: Box<dyn CarService> = match config.kind {
        BackendKind::Memory => Box::new(memory::InMemoryCarService::new()),
        BackendKind::File => {
            let data_dir = config.data_dir.clone().unwrap_or_default();
            let storage = storage::LocalStorage::new(data_dir);
            let document = config
                .document
                .clone()
                .unwrap_or_else(|| stored::DEFAULT_DOCUMENT.to_string());
            Box::new(stored::StoredCarService::with_document(storage, document))
        }
        BackendKind::Rest => {
            let endpoint = config.endpoint.as_deref().unwrap_or_default();
            let mut builder = rest::RestCarService::builder(endpoint);
            if let Some(timeout) = config.timeout_seconds {
                builder = builder.timeout(Duration::from_secs(timeout));
            }
            if let Some(headers) = &config.headers {
                builder = builder.headers(headers);
            }
            Box::new(builder.build()?)
        }
    };

    tracing::debug!("Built {} backend", config.kind);
    Ok(backend)
}
