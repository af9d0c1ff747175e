//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every fleet endpoint together with the request and
//! response bodies and the error schema wrappers ([`ErrorSchema`],
//! [`ErrorCodeSchema`]) that keep domain types free of utoipa.
//!
//! The generated specification is served by Swagger UI in debug builds and
//! printed by the `openapi-dump` binary for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::cars::{CarRequest, CarResponse};
use crate::inbound::http::drivers::{CoordinateBody, CreateDriverRequest, DriverResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fleet backend API",
        description = "Driver and car management, car assignment, ratings and driver search."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::drivers::filter_drivers,
        crate::inbound::http::drivers::list_drivers,
        crate::inbound::http::drivers::get_driver,
        crate::inbound::http::drivers::create_driver,
        crate::inbound::http::drivers::delete_driver,
        crate::inbound::http::drivers::update_location,
        crate::inbound::http::drivers::select_car,
        crate::inbound::http::drivers::toggle_online_status,
        crate::inbound::http::cars::list_cars,
        crate::inbound::http::cars::get_car,
        crate::inbound::http::cars::create_car,
        crate::inbound::http::cars::update_car,
        crate::inbound::http::cars::delete_car,
        crate::inbound::http::cars::rate_car,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateDriverRequest,
        DriverResponse,
        CoordinateBody,
        CarRequest,
        CarResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "drivers", description = "Driver lifecycle, car selection and search"),
        (name = "cars", description = "Car lifecycle and ratings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
