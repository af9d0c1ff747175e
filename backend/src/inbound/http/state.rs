//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CarCommand, CarQuery, DriverCommand, DriverQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub drivers: Arc<dyn DriverCommand>,
    pub drivers_query: Arc<dyn DriverQuery>,
    pub cars: Arc<dyn CarCommand>,
    pub cars_query: Arc<dyn CarQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub drivers: Arc<dyn DriverCommand>,
    pub drivers_query: Arc<dyn DriverQuery>,
    pub cars: Arc<dyn CarCommand>,
    pub cars_query: Arc<dyn CarQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use fleet_backend::domain::{CarService, DriverService, FleetLocks};
    /// use fleet_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use fleet_backend::outbound::memory::InMemoryFleetStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryFleetStore::new());
    /// let locks = Arc::new(FleetLocks::new());
    /// let drivers = Arc::new(DriverService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     locks.clone(),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let cars = Arc::new(CarService::new(store.clone(), store, locks));
    /// let state = HttpState::new(HttpStatePorts {
    ///     drivers: drivers.clone(),
    ///     drivers_query: drivers,
    ///     cars: cars.clone(),
    ///     cars_query: cars,
    /// });
    /// let _cars = state.cars_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            drivers,
            drivers_query,
            cars,
            cars_query,
        } = ports;
        Self {
            drivers,
            drivers_query,
            cars,
            cars_query,
        }
    }
}
