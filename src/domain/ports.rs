use crate::domain::model::CarRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Create/read/update/delete over `CarRecord`.
///
/// Mutations are all-or-nothing: `Ok(())` means the change applied, an
/// error means nothing durable changed. Records passed in or returned are
/// copies of whatever the backend keeps.
#[async_trait]
pub trait CarService: Send + Sync {
    async fn get_one_car(&self, car_id: &str) -> Result<CarRecord>;
    async fn get_all_cars(&self) -> Result<Vec<CarRecord>>;
    async fn create_car(&self, car: CarRecord) -> Result<()>;
    async fn update_car(&self, car: CarRecord) -> Result<()>;
    async fn delete_car(&self, car_id: &str) -> Result<()>;
}

#[async_trait]
impl<T: CarService + ?Sized> CarService for Box<T> {
    async fn get_one_car(&self, car_id: &str) -> Result<CarRecord> {
        (**self).get_one_car(car_id).await
    }

    async fn get_all_cars(&self) -> Result<Vec<CarRecord>> {
        (**self).get_all_cars().await
    }

    async fn create_car(&self, car: CarRecord) -> Result<()> {
        (**self).create_car(car).await
    }

    async fn update_car(&self, car: CarRecord) -> Result<()> {
        (**self).update_car(car).await
    }

    async fn delete_car(&self, car_id: &str) -> Result<()> {
        (**self).delete_car(car_id).await
    }
}

#[async_trait]
impl<T: CarService + ?Sized> CarService for Arc<T> {
    async fn get_one_car(&self, car_id: &str) -> Result<CarRecord> {
        (**self).get_one_car(car_id).await
    }

    async fn get_all_cars(&self) -> Result<Vec<CarRecord>> {
        (**self).get_all_cars().await
    }

    async fn create_car(&self, car: CarRecord) -> Result<()> {
        (**self).create_car(car).await
    }

    async fn update_car(&self, car: CarRecord) -> Result<()> {
        (**self).update_car(car).await
    }

    async fn delete_car(&self, car_id: &str) -> Result<()> {
        (**self).delete_car(car_id).await
    }
}

/// Byte storage for document-backed services. A missing file reads as
/// `None`; a write either replaces the whole file or leaves it untouched.
pub trait Storage: Send + Sync {
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = std::io::Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = std::io::Result<()>> + Send;

    /// Identifies the physical document behind `path`. Services writing
    /// the same key share one writer lock within the process.
    fn document_key(&self, path: &str) -> String {
        path.to_string()
    }
}
