use crate::domain::model::CarRecord;
use crate::domain::ports::{CarService, Storage};
use crate::domain::rules::{prepare_new_car, prepare_replacement, require_car_id};
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const DEFAULT_DOCUMENT: &str = "cars.json";

/// One writer lock per document key, shared by every service in the process.
fn document_lock(key: String) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<std::sync::Mutex<HashMap<String, Arc<Mutex<()>>>>> = OnceLock::new();
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    locks.entry(key).or_default().clone()
}

/// Keeps the whole collection as one JSON document in a `Storage`.
///
/// Every mutation rewrites the document in a single `write_file` call, so a
/// failed write leaves the previous collection in place. Writers of the same
/// document (by `Storage::document_key`) are serialized within the process,
/// across service instances; separate processes are not coordinated.
pub struct StoredCarService<S: Storage> {
    storage: S,
    document: String,
    write_lock: Arc<Mutex<()>>,
}

impl<S: Storage> StoredCarService<S> {
    pub fn new(storage: S) -> Self {
        Self::with_document(storage, DEFAULT_DOCUMENT)
    }

    pub fn with_document(storage: S, document: impl Into<String>) -> Self {
        let document = document.into();
        let write_lock = document_lock(storage.document_key(&document));
        Self {
            storage,
            document,
            write_lock,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn load(&self) -> Result<Vec<CarRecord>> {
        let data = self.storage.read_file(&self.document).await.map_err(|e| {
            ServiceError::unavailable(
                "car store could not be read",
                format!("reading {}: {}", self.document, e),
            )
        })?;

        match data {
            None => Ok(Vec::new()),
            Some(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::internal(
                    "car store is corrupt",
                    format!("parsing {}: {}", self.document, e),
                )
            }),
        }
    }

    async fn save(&self, cars: &[CarRecord]) -> Result<()> {
        let data = serde_json::to_vec_pretty(cars).map_err(|e| {
            ServiceError::internal("car store could not be encoded", e.to_string())
        })?;

        tracing::debug!(
            "Writing {} cars ({} bytes) to {}",
            cars.len(),
            data.len(),
            self.document
        );
        self.storage
            .write_file(&self.document, &data)
            .await
            .map_err(|e| {
                ServiceError::internal(
                    "car store could not be written",
                    format!("writing {}: {}", self.document, e),
                )
            })
    }
}

fn not_found(car_id: &str, document: &str) -> ServiceError {
    ServiceError::not_found(
        format!("car {} not found", car_id),
        format!("no record with id '{}' in {}", car_id, document),
    )
}

#[async_trait]
impl<S: Storage> CarService for StoredCarService<S> {
    async fn get_one_car(&self, car_id: &str) -> Result<CarRecord> {
        require_car_id(car_id)?;
        self.load()
            .await?
            .into_iter()
            .find(|car| car.id() == Some(car_id))
            .ok_or_else(|| not_found(car_id, &self.document))
    }

    async fn get_all_cars(&self) -> Result<Vec<CarRecord>> {
        self.load().await
    }

    async fn create_car(&self, car: CarRecord) -> Result<()> {
        prepare_new_car(&car)?;
        let _guard = self.write_lock.lock().await;

        let mut cars = self.load().await?;
        cars.push(car.with_id(Uuid::new_v4().to_string()));
        self.save(&cars).await
    }

    async fn update_car(&self, car: CarRecord) -> Result<()> {
        let id = prepare_replacement(&car)?.to_string();
        let _guard = self.write_lock.lock().await;

        let mut cars = self.load().await?;
        let slot = cars
            .iter_mut()
            .find(|existing| existing.id() == Some(id.as_str()))
            .ok_or_else(|| not_found(&id, &self.document))?;
        *slot = car;
        self.save(&cars).await
    }

    async fn delete_car(&self, car_id: &str) -> Result<()> {
        require_car_id(car_id)?;
        let _guard = self.write_lock.lock().await;

        let mut cars = self.load().await?;
        let before = cars.len();
        cars.retain(|car| car.id() != Some(car_id));
        if cars.len() == before {
            return Err(not_found(car_id, &self.document));
        }
        self.save(&cars).await
    }
}
