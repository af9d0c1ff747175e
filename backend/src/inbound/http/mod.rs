//! HTTP inbound adapter exposing the fleet REST endpoints.

use actix_web::{Scope, web};

pub mod cars;
pub mod drivers;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Versioned API scope with every fleet handler registered.
///
/// `/drivers/filter` is registered ahead of `/drivers/{driver_id}` so the
/// literal segment wins.
pub fn api_scope() -> Scope {
    web::scope("/v1")
        .service(drivers::filter_drivers)
        .service(drivers::list_drivers)
        .service(drivers::get_driver)
        .service(drivers::create_driver)
        .service(drivers::delete_driver)
        .service(drivers::update_location)
        .service(drivers::select_car)
        .service(drivers::toggle_online_status)
        .service(cars::list_cars)
        .service(cars::get_car)
        .service(cars::create_car)
        .service(cars::update_car)
        .service(cars::delete_car)
        .service(cars::rate_car)
}
