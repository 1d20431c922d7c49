// Preconditions shared by every backend, checked before anything is touched.

use crate::domain::model::CarRecord;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::Validate;

pub fn require_car_id(car_id: &str) -> Result<()> {
    if car_id.trim().is_empty() {
        return Err(ServiceError::bad_request(
            "car id must not be empty",
            format!("received car id '{}'", car_id),
        ));
    }
    Ok(())
}

/// Creation requests must not carry an id: the backend assigns it.
pub fn prepare_new_car(car: &CarRecord) -> Result<()> {
    if let Some(id) = car.id() {
        return Err(ServiceError::bad_request(
            "a new car must not carry an id",
            format!("create request carried id '{}'", id),
        ));
    }
    car.validate()?;
    Ok(())
}

/// Returns the id of the record being replaced.
pub fn prepare_replacement(car: &CarRecord) -> Result<&str> {
    let id = car.id().ok_or_else(|| {
        ServiceError::bad_request("car id is required for an update", "update request had no id")
    })?;
    require_car_id(id)?;
    car.validate()?;
    Ok(id)
}
