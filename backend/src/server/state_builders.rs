//! Builders wiring the in-memory store into the driving ports.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;

use fleet_backend::domain::ports::{CarCommand, DriverCommand};
use fleet_backend::domain::{CarService, DriverService, FleetLocks};
use fleet_backend::inbound::http::state::{HttpState, HttpStatePorts};
use fleet_backend::outbound::memory::InMemoryFleetStore;

/// Services sharing one store and one lock table.
pub(crate) struct FleetWiring {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) drivers: Arc<dyn DriverCommand>,
    pub(crate) cars: Arc<dyn CarCommand>,
}

pub(crate) fn build_fleet(clock: Arc<dyn Clock>) -> FleetWiring {
    let store = Arc::new(InMemoryFleetStore::new());
    let locks = Arc::new(FleetLocks::new());
    let drivers = Arc::new(DriverService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&locks),
        clock,
    ));
    let cars = Arc::new(CarService::new(Arc::clone(&store), store, locks));
    let http_state = web::Data::new(HttpState::new(HttpStatePorts {
        drivers: drivers.clone(),
        drivers_query: drivers.clone(),
        cars: cars.clone(),
        cars_query: cars.clone(),
    }));
    FleetWiring {
        http_state,
        drivers,
        cars,
    }
}
