use crate::domain::model::CarRecord;
use crate::domain::ports::CarService;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Instant;

/// Logs every call to the wrapped backend. Results pass through unchanged.
pub struct TracedCarService<S: CarService> {
    inner: S,
    backend: String,
}

impl<S: CarService> TracedCarService<S> {
    pub fn new(inner: S, backend: impl Into<String>) -> Self {
        Self {
            inner,
            backend: backend.into(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn record<T>(&self, operation: &str, started: Instant, result: &Result<T>) {
        let elapsed = started.elapsed();
        match result {
            Ok(_) => tracing::info!(
                backend = %self.backend,
                operation,
                elapsed_ms = elapsed.as_millis() as u64,
                "car operation succeeded"
            ),
            Err(e) if e.is_client_error() => tracing::warn!(
                backend = %self.backend,
                operation,
                status = e.status(),
                original = e.original_message(),
                "car operation rejected: {}",
                e
            ),
            Err(e) => tracing::error!(
                backend = %self.backend,
                operation,
                status = e.status(),
                original = e.original_message(),
                "car operation failed: {}",
                e
            ),
        }
    }
}

#[async_trait]
impl<S: CarService> CarService for TracedCarService<S> {
    async fn get_one_car(&self, car_id: &str) -> Result<CarRecord> {
        tracing::debug!(backend = %self.backend, car_id, "get_one_car");
        let started = Instant::now();
        let result = self.inner.get_one_car(car_id).await;
        self.record("get_one_car", started, &result);
        result
    }

    async fn get_all_cars(&self) -> Result<Vec<CarRecord>> {
        tracing::debug!(backend = %self.backend, "get_all_cars");
        let started = Instant::now();
        let result = self.inner.get_all_cars().await;
        if let Ok(cars) = &result {
            tracing::debug!("Fetched {} cars", cars.len());
        }
        self.record("get_all_cars", started, &result);
        result
    }

    async fn create_car(&self, car: CarRecord) -> Result<()> {
        tracing::debug!(backend = %self.backend, "create_car {}", car);
        let started = Instant::now();
        let result = self.inner.create_car(car).await;
        self.record("create_car", started, &result);
        result
    }

    async fn update_car(&self, car: CarRecord) -> Result<()> {
        tracing::debug!(backend = %self.backend, "update_car {}", car);
        let started = Instant::now();
        let result = self.inner.update_car(car).await;
        self.record("update_car", started, &result);
        result
    }

    async fn delete_car(&self, car_id: &str) -> Result<()> {
        tracing::debug!(backend = %self.backend, car_id, "delete_car");
        let started = Instant::now();
        let result = self.inner.delete_car(car_id).await;
        self.record("delete_car", started, &result);
        result
    }
}
