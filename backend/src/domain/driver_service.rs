//! Driver domain services.
//!
//! Implements the driver driving ports: registration, location updates,
//! status toggles, car assignment and the filtered driver search.
//! Assignment work is serialised through [`FleetLocks`]; `select_car` holds
//! the car lock and then the driver lock across its checks and the save.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::locks::FleetLocks;
use crate::domain::ports::{
    CarRepository, CarRepositoryError, DriverCommand, DriverQuery, DriverRepository,
    DriverRepositoryError,
};
use crate::domain::{
    CarId, Driver, DriverDraft, DriverId, Error, GeoCoordinate, NewDriver, OnlineStatus,
    filter_drivers,
};

pub(crate) fn map_driver_repository_error(error: DriverRepositoryError) -> Error {
    match error {
        DriverRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("driver repository unavailable: {message}"))
        }
        DriverRepositoryError::Query { message } => {
            Error::internal(format!("driver repository error: {message}"))
        }
        DriverRepositoryError::DuplicateUsername { username } => {
            Error::constraints_violation(format!("username {username} is already taken"))
        }
    }
}

pub(crate) fn map_car_repository_error(error: CarRepositoryError) -> Error {
    match error {
        CarRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("car repository unavailable: {message}"))
        }
        CarRepositoryError::Query { message } => {
            Error::internal(format!("car repository error: {message}"))
        }
    }
}

pub(crate) fn driver_not_found(driver_id: DriverId) -> Error {
    Error::entity_not_found(format!("could not find driver with id {driver_id}"))
}

pub(crate) fn car_not_found(car_id: CarId) -> Error {
    Error::entity_not_found(format!("could not find car with id {car_id}"))
}

/// Driver service implementing the driver driving ports.
#[derive(Clone)]
pub struct DriverService<D, C> {
    driver_repo: Arc<D>,
    car_repo: Arc<C>,
    locks: Arc<FleetLocks>,
    clock: Arc<dyn Clock>,
}

impl<D, C> DriverService<D, C> {
    /// Create a service over the given repositories.
    ///
    /// `locks` must be the same table handed to the car service so deletes
    /// and assignments of one car exclude each other.
    pub fn new(
        driver_repo: Arc<D>,
        car_repo: Arc<C>,
        locks: Arc<FleetLocks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            driver_repo,
            car_repo,
            locks,
            clock,
        }
    }
}

impl<D, C> DriverService<D, C>
where
    D: DriverRepository,
    C: CarRepository,
{
    async fn load_driver(&self, driver_id: DriverId) -> Result<Driver, Error> {
        self.driver_repo
            .find_by_id(driver_id)
            .await
            .map_err(map_driver_repository_error)?
            .ok_or_else(|| driver_not_found(driver_id))
    }

    async fn save_driver(&self, driver: &Driver) -> Result<(), Error> {
        self.driver_repo
            .save(driver)
            .await
            .map_err(map_driver_repository_error)
    }

    async fn assign(&self, driver_id: DriverId, car_id: CarId) -> Result<Driver, Error> {
        let _car_guard = self.locks.cars.lock(&car_id).await;

        let car = self
            .car_repo
            .find_by_id(car_id)
            .await
            .map_err(map_car_repository_error)?
            .ok_or_else(|| car_not_found(car_id))?;

        let holders = self
            .driver_repo
            .find_by_car_id(car_id)
            .await
            .map_err(map_driver_repository_error)?;
        if let Some(holder) = holders.iter().find(|holder| holder.id() != driver_id) {
            warn!(%driver_id, %car_id, holder_id = %holder.id(), "car already in use");
            return Err(Error::car_already_in_use(format!(
                "car {car_id} is already in use by another driver"
            )));
        }

        let _driver_guard = self.locks.drivers.lock(&driver_id).await;
        let mut driver = self.load_driver(driver_id).await?;
        if driver.online_status() != OnlineStatus::Online {
            warn!(%driver_id, %car_id, "offline driver tried to pick a car");
            return Err(Error::driver_offline_pick_car(format!(
                "driver {driver_id} must be online to pick a car"
            )));
        }

        driver.assign_car(car);
        self.save_driver(&driver).await?;
        info!(%driver_id, %car_id, "car assigned");
        Ok(driver)
    }
}

#[async_trait]
impl<D, C> DriverCommand for DriverService<D, C>
where
    D: DriverRepository,
    C: CarRepository,
{
    async fn create_driver(&self, draft: DriverDraft) -> Result<Driver, Error> {
        let registration = NewDriver::try_from(draft)
            .map_err(|err| Error::constraints_violation(format!("invalid driver: {err}")))?;
        let driver = self
            .driver_repo
            .insert(&registration, self.clock.utc())
            .await
            .map_err(|err| {
                warn!(username = registration.username(), error = %err, "driver rejected");
                map_driver_repository_error(err)
            })?;
        info!(driver_id = %driver.id(), "driver created");
        Ok(driver)
    }

    async fn delete_driver(&self, driver_id: DriverId) -> Result<(), Error> {
        let _guard = self.locks.drivers.lock(&driver_id).await;
        let mut driver = self.load_driver(driver_id).await?;
        driver.mark_deleted();
        self.save_driver(&driver).await?;
        info!(%driver_id, "driver deleted");
        Ok(())
    }

    async fn update_location(
        &self,
        driver_id: DriverId,
        longitude: f64,
        latitude: f64,
    ) -> Result<Driver, Error> {
        let _guard = self.locks.drivers.lock(&driver_id).await;
        let mut driver = self.load_driver(driver_id).await?;
        let coordinate = GeoCoordinate::new(latitude, longitude)
            .map_err(|err| Error::geo_coordinate_creation(err.to_string()))?;
        driver.relocate(coordinate, self.clock.utc());
        self.save_driver(&driver).await?;
        debug!(%driver_id, %coordinate, "driver relocated");
        Ok(driver)
    }

    async fn select_car(
        &self,
        driver_id: DriverId,
        car_id: Option<CarId>,
    ) -> Result<Driver, Error> {
        match car_id {
            Some(car_id) => self.assign(driver_id, car_id).await,
            None => self.deselect_car(driver_id).await,
        }
    }

    async fn deselect_car(&self, driver_id: DriverId) -> Result<Driver, Error> {
        let _guard = self.locks.drivers.lock(&driver_id).await;
        let mut driver = self.load_driver(driver_id).await?;
        if let Some(car) = driver.release_car() {
            self.save_driver(&driver).await?;
            info!(%driver_id, car_id = %car.id(), "car released");
        }
        Ok(driver)
    }

    async fn toggle_online_status(&self, driver_id: DriverId) -> Result<Driver, Error> {
        let _guard = self.locks.drivers.lock(&driver_id).await;
        let mut driver = self.load_driver(driver_id).await?;
        let status = driver.toggle_online_status();
        self.save_driver(&driver).await?;
        info!(%driver_id, %status, "driver status toggled");
        Ok(driver)
    }
}

#[async_trait]
impl<D, C> DriverQuery for DriverService<D, C>
where
    D: DriverRepository,
    C: CarRepository,
{
    async fn find_driver(&self, driver_id: DriverId) -> Result<Driver, Error> {
        self.load_driver(driver_id).await
    }

    async fn find_drivers_by_online_status(
        &self,
        status: OnlineStatus,
    ) -> Result<Vec<Driver>, Error> {
        self.driver_repo
            .find_by_online_status(status)
            .await
            .map_err(map_driver_repository_error)
    }

    async fn filter_drivers(&self, query: &str) -> Result<Vec<Driver>, Error> {
        let snapshot = self
            .driver_repo
            .list()
            .await
            .map_err(map_driver_repository_error)?;
        let total = snapshot.len();
        let matched = filter_drivers(query, snapshot).map_err(|err| {
            debug!(query, error = %err, "driver search rejected");
            Error::from(err)
        })?;
        debug!(query, total, matched = matched.len(), "driver search");
        Ok(matched)
    }
}

#[cfg(test)]
#[path = "driver_service_tests.rs"]
mod tests;
