//! Driving port for car reads.

use async_trait::async_trait;

use crate::domain::{Car, CarId, Error};

/// Read-only car use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarQuery: Send + Sync {
    async fn find_car(&self, car_id: CarId) -> Result<Car, Error>;

    async fn list_cars(&self) -> Result<Vec<Car>, Error>;
}
