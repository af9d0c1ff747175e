//! Port abstraction for driver persistence adapters and their errors.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CarId, Driver, DriverId, NewDriver, OnlineStatus};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by driver repository adapters.
    pub enum DriverRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "driver repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "driver repository query failed: {message}",
        /// Another active driver already uses the username.
        DuplicateUsername { username: String } => "username {username} is already taken",
    }
}

/// Storage for drivers.
///
/// Soft-deleted drivers are invisible to every lookup. Drivers are returned
/// with their assigned car hydrated from current car state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Store a new driver and return it with its assigned identifier.
    async fn insert(
        &self,
        registration: &NewDriver,
        created_at: DateTime<Utc>,
    ) -> Result<Driver, DriverRepositoryError>;

    /// Persist the mutable state of an existing driver.
    async fn save(&self, driver: &Driver) -> Result<(), DriverRepositoryError>;

    async fn find_by_id(&self, id: DriverId) -> Result<Option<Driver>, DriverRepositoryError>;

    /// Every active driver, ordered by identifier.
    async fn list(&self) -> Result<Vec<Driver>, DriverRepositoryError>;

    async fn find_by_online_status(
        &self,
        status: OnlineStatus,
    ) -> Result<Vec<Driver>, DriverRepositoryError>;

    /// Active drivers currently holding `car_id`.
    async fn find_by_car_id(&self, car_id: CarId) -> Result<Vec<Driver>, DriverRepositoryError>;
}
