//! Driving port for driver reads and searches.

use async_trait::async_trait;

use crate::domain::{Driver, DriverId, Error, OnlineStatus};

/// Read-only driver use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverQuery: Send + Sync {
    async fn find_driver(&self, driver_id: DriverId) -> Result<Driver, Error>;

    async fn find_drivers_by_online_status(
        &self,
        status: OnlineStatus,
    ) -> Result<Vec<Driver>, Error>;

    /// Drivers matching every recognised criterion of `query`, for example
    /// `car.rating>3,car.seatCount>1`.
    async fn filter_drivers(&self, query: &str) -> Result<Vec<Driver>, Error>;
}
