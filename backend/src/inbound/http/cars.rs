//! Car HTTP handlers.
//!
//! ```text
//! GET    /v1/car
//! GET    /v1/car/{car_id}
//! POST   /v1/car {"licensePlate":"123LY","seatCount":2,"convertible":false,
//!                  "engineType":"DIESEL","manufacturer":"BMW"}
//! PUT    /v1/car/{car_id}
//! DELETE /v1/car/{car_id}
//! PATCH  /v1/car/{car_id}/rate?carRate=4.5
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Car, CarDraft, CarId, EngineType, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum_field, require};

/// Request payload for creating or replacing a car's attributes.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarRequest {
    #[schema(example = "123LY")]
    pub license_plate: String,
    #[schema(example = 4, minimum = 2, maximum = 9)]
    pub seat_count: i32,
    pub convertible: bool,
    #[schema(example = "ELECTRIC")]
    pub engine_type: String,
    #[schema(example = "Tesla")]
    pub manufacturer: String,
}

fn parse_car_request(payload: CarRequest) -> Result<CarDraft, Error> {
    let engine_type: EngineType =
        parse_enum_field(&payload.engine_type, FieldName::new("engineType"))?;
    Ok(CarDraft {
        license_plate: payload.license_plate,
        seat_count: payload.seat_count,
        convertible: payload.convertible,
        engine_type,
        manufacturer: payload.manufacturer,
    })
}

/// Car representation returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub license_plate: String,
    pub seat_count: i32,
    pub convertible: bool,
    #[schema(example = 4.33)]
    pub rating: f64,
    pub number_of_ratings: u64,
    #[schema(example = "DIESEL")]
    pub engine_type: String,
    pub manufacturer: String,
}

impl From<Car> for CarResponse {
    fn from(value: Car) -> Self {
        let attributes = value.attributes();
        Self {
            id: value.id().get(),
            license_plate: attributes.license_plate().to_owned(),
            seat_count: attributes.seat_count().get(),
            convertible: attributes.convertible(),
            rating: value.rating(),
            number_of_ratings: value.number_of_ratings(),
            engine_type: attributes.engine_type().to_string(),
            manufacturer: attributes.manufacturer().as_str().to_owned(),
        }
    }
}

/// Query string for rating a car.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuery {
    pub car_rate: Option<f64>,
}

/// List active cars.
#[utoipa::path(
    get,
    path = "/v1/car",
    responses(
        (status = 200, description = "Active cars", body = [CarResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "listCars"
)]
#[get("/car")]
pub async fn list_cars(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<CarResponse>>> {
    let cars = state.cars_query.list_cars().await?;
    Ok(web::Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// Fetch one car.
#[utoipa::path(
    get,
    path = "/v1/car/{car_id}",
    params(("car_id" = i64, Path, description = "Car identifier")),
    responses(
        (status = 200, description = "Car", body = CarResponse),
        (status = 404, description = "Unknown car", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "getCar"
)]
#[get("/car/{car_id}")]
pub async fn get_car(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CarResponse>> {
    let car = state
        .cars_query
        .find_car(CarId::new(path.into_inner()))
        .await?;
    Ok(web::Json(CarResponse::from(car)))
}

/// Register a car with no ratings.
#[utoipa::path(
    post,
    path = "/v1/car",
    request_body = CarRequest,
    responses(
        (status = 201, description = "Car created", body = CarResponse),
        (status = 400, description = "Invalid attributes", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "createCar"
)]
#[post("/car")]
pub async fn create_car(
    state: web::Data<HttpState>,
    payload: web::Json<CarRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_car_request(payload.into_inner())?;
    let car = state.cars.create_car(draft).await?;
    Ok(HttpResponse::Created().json(CarResponse::from(car)))
}

/// Replace a car's descriptive attributes. The rating history is kept.
#[utoipa::path(
    put,
    path = "/v1/car/{car_id}",
    request_body = CarRequest,
    params(("car_id" = i64, Path, description = "Car identifier")),
    responses(
        (status = 200, description = "Updated car", body = CarResponse),
        (status = 400, description = "Invalid attributes", body = ErrorSchema),
        (status = 404, description = "Unknown car", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "updateCar"
)]
#[put("/car/{car_id}")]
pub async fn update_car(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CarRequest>,
) -> ApiResult<web::Json<CarResponse>> {
    let draft = parse_car_request(payload.into_inner())?;
    let car = state
        .cars
        .update_car(CarId::new(path.into_inner()), draft)
        .await?;
    Ok(web::Json(CarResponse::from(car)))
}

/// Soft delete a car that no driver holds.
#[utoipa::path(
    delete,
    path = "/v1/car/{car_id}",
    params(("car_id" = i64, Path, description = "Car identifier")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 400, description = "Car is held by a driver", body = ErrorSchema),
        (status = 404, description = "Unknown car", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "deleteCar"
)]
#[delete("/car/{car_id}")]
pub async fn delete_car(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.cars.delete_car(CarId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Fold a rating in `[0, 5]` into the car's running average.
#[utoipa::path(
    patch,
    path = "/v1/car/{car_id}/rate",
    params(
        ("car_id" = i64, Path, description = "Car identifier"),
        ("carRate" = f64, Query, description = "Rating between 0 and 5")
    ),
    responses(
        (status = 200, description = "Car with its new average", body = CarResponse),
        (status = 400, description = "Rating out of range", body = ErrorSchema),
        (status = 404, description = "Unknown car", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "rateCar"
)]
#[patch("/car/{car_id}/rate")]
pub async fn rate_car(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    query: web::Query<RateQuery>,
) -> ApiResult<web::Json<CarResponse>> {
    let rating = require(query.into_inner().car_rate, FieldName::new("carRate"))?;
    let car = state
        .cars
        .rate_car(CarId::new(path.into_inner()), rating)
        .await?;
    Ok(web::Json(CarResponse::from(car)))
}

#[cfg(test)]
#[path = "cars_tests.rs"]
mod tests;
