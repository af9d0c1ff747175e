//! Driving port for driver mutations and car assignment.

use async_trait::async_trait;

use crate::domain::{CarId, Driver, DriverDraft, DriverId, Error};

/// Use cases that change driver state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverCommand: Send + Sync {
    /// Register a driver. Usernames are unique among active drivers.
    async fn create_driver(&self, draft: DriverDraft) -> Result<Driver, Error>;

    /// Soft delete a driver, releasing any car it holds.
    async fn delete_driver(&self, driver_id: DriverId) -> Result<(), Error>;

    /// Record the driver's current position.
    async fn update_location(
        &self,
        driver_id: DriverId,
        longitude: f64,
        latitude: f64,
    ) -> Result<Driver, Error>;

    /// Assign `car_id` to the driver, or release its car when `None`.
    async fn select_car(&self, driver_id: DriverId, car_id: Option<CarId>)
    -> Result<Driver, Error>;

    async fn deselect_car(&self, driver_id: DriverId) -> Result<Driver, Error>;

    /// Flip between online and offline; going offline releases the car.
    async fn toggle_online_status(&self, driver_id: DriverId) -> Result<Driver, Error>;
}
