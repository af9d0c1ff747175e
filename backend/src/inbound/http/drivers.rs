//! Driver HTTP handlers.
//!
//! ```text
//! GET    /v1/drivers/filter?search=onlineStatus:ONLINE,car.rating>3
//! GET    /v1/drivers?onlineStatus=ONLINE
//! GET    /v1/drivers/{driver_id}
//! POST   /v1/drivers {"username":"driver01","password":"secret"}
//! DELETE /v1/drivers/{driver_id}
//! PUT    /v1/drivers/{driver_id}?longitude=10&latitude=10
//! PATCH  /v1/drivers/{driver_id}/car?carId=1
//! PATCH  /v1/drivers/{driver_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CarId, Driver, DriverDraft, DriverId, GeoCoordinate, OnlineStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cars::CarResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum_field, require};

/// Request payload for registering a driver.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[schema(example = "driver01")]
    pub username: String,
    #[schema(example = "driver01pw")]
    pub password: String,
}

impl From<CreateDriverRequest> for DriverDraft {
    fn from(value: CreateDriverRequest) -> Self {
        Self {
            username: value.username,
            password: value.password,
        }
    }
}

/// Position reported by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateBody {
    #[schema(example = 52.52)]
    pub latitude: f64,
    #[schema(example = 13.405)]
    pub longitude: f64,
}

impl From<GeoCoordinate> for CoordinateBody {
    fn from(value: GeoCoordinate) -> Self {
        Self {
            latitude: value.latitude(),
            longitude: value.longitude(),
        }
    }
}

/// Driver representation returned to clients. Never carries the password.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub username: String,
    #[schema(example = "ONLINE")]
    pub online_status: String,
    pub coordinate: Option<CoordinateBody>,
    #[schema(format = "date-time")]
    pub date_coordinate_updated: Option<String>,
    #[schema(format = "date-time")]
    pub date_created: String,
    pub car: Option<CarResponse>,
}

impl From<Driver> for DriverResponse {
    fn from(value: Driver) -> Self {
        Self {
            id: value.id().get(),
            username: value.username().to_owned(),
            online_status: value.online_status().to_string(),
            coordinate: value.coordinate().map(CoordinateBody::from),
            date_coordinate_updated: value.coordinate_updated_at().map(|at| at.to_rfc3339()),
            date_created: value.created_at().to_rfc3339(),
            car: value.car().cloned().map(CarResponse::from),
        }
    }
}

fn driver_list(drivers: Vec<Driver>) -> Vec<DriverResponse> {
    drivers.into_iter().map(DriverResponse::from).collect()
}

/// Query string for the driver search endpoint.
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub search: Option<String>,
}

/// Query string for listing drivers by status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineStatusQuery {
    pub online_status: Option<String>,
}

/// Query string for a location update.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

/// Query string for car selection. Absent `carId` releases the car.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCarQuery {
    pub car_id: Option<i64>,
}

/// Search drivers with the comma-separated criteria language.
#[utoipa::path(
    get,
    path = "/v1/drivers/filter",
    description = "Filter drivers by `key<op>value` terms joined with commas. \
        Operators are `:`, `<` and `>`; unknown keys are ignored.",
    params(
        ("search" = String, Query, description = "Criteria, e.g. `onlineStatus:ONLINE,car.rating>3`")
    ),
    responses(
        (status = 200, description = "Matching drivers", body = [DriverResponse]),
        (status = 400, description = "Malformed criteria", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "filterDrivers"
)]
#[get("/drivers/filter")]
pub async fn filter_drivers(
    state: web::Data<HttpState>,
    query: web::Query<FilterQuery>,
) -> ApiResult<web::Json<Vec<DriverResponse>>> {
    let search = require(query.into_inner().search, FieldName::new("search"))?;
    let drivers = state.drivers_query.filter_drivers(&search).await?;
    Ok(web::Json(driver_list(drivers)))
}

/// List drivers with the given online status.
#[utoipa::path(
    get,
    path = "/v1/drivers",
    params(
        ("onlineStatus" = String, Query, description = "ONLINE or OFFLINE, case-insensitive")
    ),
    responses(
        (status = 200, description = "Drivers with the status", body = [DriverResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "listDriversByOnlineStatus"
)]
#[get("/drivers")]
pub async fn list_drivers(
    state: web::Data<HttpState>,
    query: web::Query<OnlineStatusQuery>,
) -> ApiResult<web::Json<Vec<DriverResponse>>> {
    let field = FieldName::new("onlineStatus");
    let raw = require(query.into_inner().online_status, field)?;
    let status: OnlineStatus = parse_enum_field(&raw, field)?;
    let drivers = state
        .drivers_query
        .find_drivers_by_online_status(status)
        .await?;
    Ok(web::Json(driver_list(drivers)))
}

/// Fetch one driver.
#[utoipa::path(
    get,
    path = "/v1/drivers/{driver_id}",
    params(("driver_id" = i64, Path, description = "Driver identifier")),
    responses(
        (status = 200, description = "Driver", body = DriverResponse),
        (status = 404, description = "Unknown driver", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "getDriver"
)]
#[get("/drivers/{driver_id}")]
pub async fn get_driver(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DriverResponse>> {
    let driver = state
        .drivers_query
        .find_driver(DriverId::new(path.into_inner()))
        .await?;
    Ok(web::Json(DriverResponse::from(driver)))
}

/// Register a driver. New drivers start offline without a car.
#[utoipa::path(
    post,
    path = "/v1/drivers",
    request_body = CreateDriverRequest,
    responses(
        (status = 201, description = "Driver created", body = DriverResponse),
        (status = 400, description = "Blank fields or username taken", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "createDriver"
)]
#[post("/drivers")]
pub async fn create_driver(
    state: web::Data<HttpState>,
    payload: web::Json<CreateDriverRequest>,
) -> ApiResult<HttpResponse> {
    let driver = state
        .drivers
        .create_driver(DriverDraft::from(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(DriverResponse::from(driver)))
}

/// Soft delete a driver.
#[utoipa::path(
    delete,
    path = "/v1/drivers/{driver_id}",
    params(("driver_id" = i64, Path, description = "Driver identifier")),
    responses(
        (status = 204, description = "Driver deleted"),
        (status = 404, description = "Unknown driver", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "deleteDriver"
)]
#[delete("/drivers/{driver_id}")]
pub async fn delete_driver(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .drivers
        .delete_driver(DriverId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Record the driver's position.
#[utoipa::path(
    put,
    path = "/v1/drivers/{driver_id}",
    params(
        ("driver_id" = i64, Path, description = "Driver identifier"),
        ("longitude" = f64, Query, description = "Longitude in [-180, 180]"),
        ("latitude" = f64, Query, description = "Latitude in [-90, 90]")
    ),
    responses(
        (status = 200, description = "Relocated driver", body = DriverResponse),
        (status = 400, description = "Coordinate out of range", body = ErrorSchema),
        (status = 404, description = "Unknown driver", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "updateDriverLocation"
)]
#[put("/drivers/{driver_id}")]
pub async fn update_location(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    query: web::Query<LocationQuery>,
) -> ApiResult<web::Json<DriverResponse>> {
    let LocationQuery {
        longitude,
        latitude,
    } = query.into_inner();
    let longitude = require(longitude, FieldName::new("longitude"))?;
    let latitude = require(latitude, FieldName::new("latitude"))?;
    let driver = state
        .drivers
        .update_location(DriverId::new(path.into_inner()), longitude, latitude)
        .await?;
    Ok(web::Json(DriverResponse::from(driver)))
}

/// Assign a car to the driver, or release the current one when `carId` is
/// omitted.
#[utoipa::path(
    patch,
    path = "/v1/drivers/{driver_id}/car",
    params(
        ("driver_id" = i64, Path, description = "Driver identifier"),
        ("carId" = Option<i64>, Query, description = "Car to select; omit to deselect")
    ),
    responses(
        (status = 200, description = "Driver with its current car", body = DriverResponse),
        (status = 400, description = "Car in use or driver offline", body = ErrorSchema),
        (status = 404, description = "Unknown driver or car", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "selectCar"
)]
#[patch("/drivers/{driver_id}/car")]
pub async fn select_car(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    query: web::Query<SelectCarQuery>,
) -> ApiResult<web::Json<DriverResponse>> {
    let car_id = query.into_inner().car_id.map(CarId::new);
    let driver = state
        .drivers
        .select_car(DriverId::new(path.into_inner()), car_id)
        .await?;
    Ok(web::Json(DriverResponse::from(driver)))
}

/// Flip the driver between online and offline.
#[utoipa::path(
    patch,
    path = "/v1/drivers/{driver_id}",
    params(("driver_id" = i64, Path, description = "Driver identifier")),
    responses(
        (status = 200, description = "Driver with its new status", body = DriverResponse),
        (status = 404, description = "Unknown driver", body = ErrorSchema)
    ),
    tags = ["drivers"],
    operation_id = "toggleOnlineStatus"
)]
#[patch("/drivers/{driver_id}")]
pub async fn toggle_online_status(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DriverResponse>> {
    let driver = state
        .drivers
        .toggle_online_status(DriverId::new(path.into_inner()))
        .await?;
    Ok(web::Json(DriverResponse::from(driver)))
}

#[cfg(test)]
#[path = "drivers_tests.rs"]
mod tests;
