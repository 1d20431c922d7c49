use crate::domain::model::CarRecord;
use crate::domain::ports::CarService;
use crate::domain::rules::{prepare_new_car, prepare_replacement, require_car_id};
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local backend. Keeps cars in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCarService {
    cars: RwLock<Vec<CarRecord>>,
}

impl InMemoryCarService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store. Records without an id get a fresh one.
    pub fn with_cars(cars: impl IntoIterator<Item = CarRecord>) -> Self {
        let cars = cars
            .into_iter()
            .map(|car| {
                if car.id().is_some() {
                    car
                } else {
                    car.with_id(Uuid::new_v4().to_string())
                }
            })
            .collect();
        Self {
            cars: RwLock::new(cars),
        }
    }

    pub async fn len(&self) -> usize {
        self.cars.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cars.read().await.is_empty()
    }
}

fn not_found(car_id: &str) -> ServiceError {
    ServiceError::not_found(
        format!("car {} not found", car_id),
        format!("no in-memory record with id '{}'", car_id),
    )
}

#[async_trait]
impl CarService for InMemoryCarService {
    async fn get_one_car(&self, car_id: &str) -> Result<CarRecord> {
        require_car_id(car_id)?;
        let cars = self.cars.read().await;
        cars.iter()
            .find(|car| car.id() == Some(car_id))
            .cloned()
            .ok_or_else(|| not_found(car_id))
    }

    async fn get_all_cars(&self) -> Result<Vec<CarRecord>> {
        Ok(self.cars.read().await.clone())
    }

    async fn create_car(&self, car: CarRecord) -> Result<()> {
        prepare_new_car(&car)?;
        let id = Uuid::new_v4().to_string();
        tracing::debug!("Registering car {} in memory", id);
        self.cars.write().await.push(car.with_id(id));
        Ok(())
    }

    async fn update_car(&self, car: CarRecord) -> Result<()> {
        let id = prepare_replacement(&car)?.to_string();
        let mut cars = self.cars.write().await;
        let slot = cars
            .iter_mut()
            .find(|existing| existing.id() == Some(id.as_str()))
            .ok_or_else(|| not_found(&id))?;
        *slot = car;
        Ok(())
    }

    async fn delete_car(&self, car_id: &str) -> Result<()> {
        require_car_id(car_id)?;
        let mut cars = self.cars.write().await;
        let position = cars
            .iter()
            .position(|car| car.id() == Some(car_id))
            .ok_or_else(|| not_found(car_id))?;
        cars.remove(position);
        Ok(())
    }
}
