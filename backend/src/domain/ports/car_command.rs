//! Driving port for car mutations.

use async_trait::async_trait;

use crate::domain::{Car, CarDraft, CarId, Error};

/// Use cases that change car state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarCommand: Send + Sync {
    async fn create_car(&self, draft: CarDraft) -> Result<Car, Error>;

    /// Replace descriptive attributes; the rating history is kept.
    async fn update_car(&self, car_id: CarId, draft: CarDraft) -> Result<Car, Error>;

    /// Soft delete a car that no driver holds.
    async fn delete_car(&self, car_id: CarId) -> Result<(), Error>;

    /// Fold `rating` (between 0 and 5) into the car's running average.
    async fn rate_car(&self, car_id: CarId, rating: f64) -> Result<Car, Error>;
}
