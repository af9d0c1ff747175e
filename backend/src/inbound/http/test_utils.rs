//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use crate::domain::{CarService, DriverService, FleetLocks};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryFleetStore;

/// Build HTTP state backed by real services over an empty in-memory store.
pub fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryFleetStore::new());
    let locks = Arc::new(FleetLocks::new());
    let drivers = Arc::new(DriverService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&locks),
        Arc::new(DefaultClock),
    ));
    let cars = Arc::new(CarService::new(Arc::clone(&store), store, locks));
    HttpState::new(HttpStatePorts {
        drivers: drivers.clone(),
        drivers_query: drivers,
        cars: cars.clone(),
        cars_query: cars,
    })
}

/// Application serving the versioned API over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(api_scope())
}
