//! Car domain services.
//!
//! Implements the car driving ports. Every write to an existing car holds
//! that car's lock, so concurrent ratings fold into the average one at a
//! time and a delete cannot interleave with an assignment.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::driver_service::{
    car_not_found, map_car_repository_error, map_driver_repository_error,
};
use crate::domain::locks::FleetLocks;
use crate::domain::ports::{CarCommand, CarQuery, CarRepository, DriverRepository};
use crate::domain::rating::RatingError;
use crate::domain::{Car, CarAttributes, CarDraft, CarId, Error};

fn map_rating_error(error: RatingError) -> Error {
    match error {
        RatingError::OutOfRange { .. } => Error::invalid_rating_value(error.to_string()),
        RatingError::CounterOverflow | RatingError::Unrepresentable { .. } => {
            Error::internal(format!("rating aggregation failed: {error}"))
        }
    }
}

fn validate_attributes(draft: CarDraft) -> Result<CarAttributes, Error> {
    CarAttributes::try_from(draft)
        .map_err(|err| Error::constraints_violation(format!("invalid car: {err}")))
}

/// Car service implementing the car driving ports.
#[derive(Clone)]
pub struct CarService<C, D> {
    car_repo: Arc<C>,
    driver_repo: Arc<D>,
    locks: Arc<FleetLocks>,
}

impl<C, D> CarService<C, D> {
    /// Create a service over the given repositories and shared lock table.
    pub fn new(car_repo: Arc<C>, driver_repo: Arc<D>, locks: Arc<FleetLocks>) -> Self {
        Self {
            car_repo,
            driver_repo,
            locks,
        }
    }
}

impl<C, D> CarService<C, D>
where
    C: CarRepository,
    D: DriverRepository,
{
    async fn load_car(&self, car_id: CarId) -> Result<Car, Error> {
        self.car_repo
            .find_by_id(car_id)
            .await
            .map_err(map_car_repository_error)?
            .ok_or_else(|| car_not_found(car_id))
    }

    async fn save_car(&self, car: &Car) -> Result<(), Error> {
        self.car_repo
            .save(car)
            .await
            .map_err(map_car_repository_error)
    }
}

#[async_trait]
impl<C, D> CarCommand for CarService<C, D>
where
    C: CarRepository,
    D: DriverRepository,
{
    async fn create_car(&self, draft: CarDraft) -> Result<Car, Error> {
        let attributes = validate_attributes(draft)?;
        let car = self
            .car_repo
            .insert(&attributes)
            .await
            .map_err(map_car_repository_error)?;
        info!(car_id = %car.id(), license_plate = car.attributes().license_plate(), "car created");
        Ok(car)
    }

    async fn update_car(&self, car_id: CarId, draft: CarDraft) -> Result<Car, Error> {
        let _guard = self.locks.cars.lock(&car_id).await;
        let mut car = self.load_car(car_id).await?;
        car.replace_attributes(validate_attributes(draft)?);
        self.save_car(&car).await?;
        info!(%car_id, "car updated");
        Ok(car)
    }

    async fn delete_car(&self, car_id: CarId) -> Result<(), Error> {
        let _guard = self.locks.cars.lock(&car_id).await;
        let mut car = self.load_car(car_id).await?;
        let holders = self
            .driver_repo
            .find_by_car_id(car_id)
            .await
            .map_err(map_driver_repository_error)?;
        if let Some(holder) = holders.first() {
            warn!(%car_id, holder_id = %holder.id(), "refused to delete car in use");
            return Err(Error::car_already_in_use(format!(
                "car {car_id} is in use by driver {}",
                holder.id()
            )));
        }
        car.mark_deleted();
        self.save_car(&car).await?;
        info!(%car_id, "car deleted");
        Ok(())
    }

    async fn rate_car(&self, car_id: CarId, rating: f64) -> Result<Car, Error> {
        let _guard = self.locks.cars.lock(&car_id).await;
        let mut car = self.load_car(car_id).await?;
        car.record_rating(rating).map_err(|err| {
            warn!(%car_id, rating, "rating rejected");
            map_rating_error(err)
        })?;
        self.save_car(&car).await?;
        info!(
            %car_id,
            rating = car.rating(),
            number_of_ratings = car.number_of_ratings(),
            "car rated"
        );
        Ok(car)
    }
}

#[async_trait]
impl<C, D> CarQuery for CarService<C, D>
where
    C: CarRepository,
    D: DriverRepository,
{
    async fn find_car(&self, car_id: CarId) -> Result<Car, Error> {
        self.load_car(car_id).await
    }

    async fn list_cars(&self) -> Result<Vec<Car>, Error> {
        self.car_repo.list().await.map_err(map_car_repository_error)
    }
}

#[cfg(test)]
#[path = "car_service_tests.rs"]
mod tests;
