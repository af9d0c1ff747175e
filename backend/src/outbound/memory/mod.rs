//! In-memory fleet store.
//!
//! Backs [`DriverRepository`] and [`CarRepository`] with one shared table
//! set, so drivers can be returned with their assigned car hydrated from the
//! car table. Rows are never removed; soft-deleted rows are filtered out of
//! every read. Identifiers are allocated sequentially from 1.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CarRepository, CarRepositoryError, DriverRepository, DriverRepositoryError,
};
use crate::domain::{Car, CarAttributes, CarId, Driver, DriverId, NewDriver, OnlineStatus};

/// Driver row. The car is kept as a reference; the driver value itself is
/// stored without it.
#[derive(Debug, Clone)]
struct DriverRow {
    driver: Driver,
    car_id: Option<CarId>,
}

impl DriverRow {
    fn from_driver(driver: &Driver) -> Self {
        let mut stored = driver.clone();
        let car_id = stored.release_car().map(|car| car.id());
        Self {
            driver: stored,
            car_id,
        }
    }
}

#[derive(Debug, Default)]
struct FleetTables {
    drivers: BTreeMap<DriverId, DriverRow>,
    cars: BTreeMap<CarId, Car>,
    last_driver_id: i64,
    last_car_id: i64,
}

impl FleetTables {
    fn active_car(&self, id: CarId) -> Option<&Car> {
        self.cars.get(&id).filter(|car| !car.is_deleted())
    }

    fn hydrate(&self, row: &DriverRow) -> Driver {
        let mut driver = row.driver.clone();
        if let Some(car) = row.car_id.and_then(|id| self.active_car(id)) {
            driver.assign_car(car.clone());
        }
        driver
    }

    fn active_drivers(&self) -> impl Iterator<Item = &DriverRow> {
        self.drivers.values().filter(|row| !row.driver.is_deleted())
    }

    fn drivers_where(&self, predicate: impl Fn(&DriverRow) -> bool) -> Vec<Driver> {
        self.active_drivers()
            .filter(|row| predicate(row))
            .map(|row| self.hydrate(row))
            .collect()
    }
}

/// Process-local store implementing both fleet repository ports.
///
/// # Examples
/// ```
/// use fleet_backend::domain::ports::CarRepository;
/// use fleet_backend::domain::{CarAttributes, CarDraft, EngineType};
/// use fleet_backend::outbound::memory::InMemoryFleetStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryFleetStore::new();
/// let attributes = CarAttributes::try_from(CarDraft {
///     license_plate: "123LY".into(),
///     seat_count: 2,
///     convertible: false,
///     engine_type: EngineType::Diesel,
///     manufacturer: "BMW".into(),
/// })
/// .expect("valid attributes");
/// let car = store.insert(&attributes).await.expect("stored");
/// assert_eq!(car.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryFleetStore {
    tables: RwLock<FleetTables>,
}

impl InMemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Writers never leave the tables half-updated, so a poisoned lock still
    // guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, FleetTables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FleetTables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DriverRepository for InMemoryFleetStore {
    async fn insert(
        &self,
        registration: &NewDriver,
        created_at: DateTime<Utc>,
    ) -> Result<Driver, DriverRepositoryError> {
        let mut tables = self.write();
        let taken = tables
            .active_drivers()
            .any(|row| row.driver.username() == registration.username());
        if taken {
            return Err(DriverRepositoryError::duplicate_username(
                registration.username(),
            ));
        }

        tables.last_driver_id += 1;
        let id = DriverId::new(tables.last_driver_id);
        let driver = Driver::new(id, registration.clone(), created_at);
        tables.drivers.insert(id, DriverRow::from_driver(&driver));
        Ok(driver)
    }

    async fn save(&self, driver: &Driver) -> Result<(), DriverRepositoryError> {
        let mut tables = self.write();
        if let Some(car_id) = driver.car_id() {
            if tables.active_car(car_id).is_none() {
                return Err(DriverRepositoryError::query(format!(
                    "driver {} references unknown car {car_id}",
                    driver.id()
                )));
            }
        }
        match tables.drivers.get_mut(&driver.id()) {
            Some(row) if !row.driver.is_deleted() => {
                *row = DriverRow::from_driver(driver);
                Ok(())
            }
            _ => Err(DriverRepositoryError::query(format!(
                "driver {} does not exist",
                driver.id()
            ))),
        }
    }

    async fn find_by_id(&self, id: DriverId) -> Result<Option<Driver>, DriverRepositoryError> {
        let tables = self.read();
        Ok(tables
            .drivers
            .get(&id)
            .filter(|row| !row.driver.is_deleted())
            .map(|row| tables.hydrate(row)))
    }

    async fn list(&self) -> Result<Vec<Driver>, DriverRepositoryError> {
        Ok(self.read().drivers_where(|_| true))
    }

    async fn find_by_online_status(
        &self,
        status: OnlineStatus,
    ) -> Result<Vec<Driver>, DriverRepositoryError> {
        Ok(self
            .read()
            .drivers_where(|row| row.driver.online_status() == status))
    }

    async fn find_by_car_id(&self, car_id: CarId) -> Result<Vec<Driver>, DriverRepositoryError> {
        Ok(self.read().drivers_where(|row| row.car_id == Some(car_id)))
    }
}

#[async_trait]
impl CarRepository for InMemoryFleetStore {
    async fn insert(&self, attributes: &CarAttributes) -> Result<Car, CarRepositoryError> {
        let mut tables = self.write();
        tables.last_car_id += 1;
        let id = CarId::new(tables.last_car_id);
        let car = Car::new(id, attributes.clone());
        tables.cars.insert(id, car.clone());
        Ok(car)
    }

    async fn save(&self, car: &Car) -> Result<(), CarRepositoryError> {
        let mut tables = self.write();
        match tables.cars.get_mut(&car.id()) {
            Some(stored) if !stored.is_deleted() => {
                *stored = car.clone();
                Ok(())
            }
            _ => Err(CarRepositoryError::query(format!(
                "car {} does not exist",
                car.id()
            ))),
        }
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        Ok(self.read().active_car(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Car>, CarRepositoryError> {
        Ok(self
            .read()
            .cars
            .values()
            .filter(|car| !car.is_deleted())
            .cloned()
            .collect())
    }
}
