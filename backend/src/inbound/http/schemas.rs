//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The driver or car does not exist or was deleted.
    #[schema(rename = "entity_not_found")]
    EntityNotFound,
    /// Attribute validation or a uniqueness rule failed.
    #[schema(rename = "constraints_violation")]
    ConstraintsViolation,
    /// A rating outside `[0, 5]`.
    #[schema(rename = "invalid_rating_value")]
    InvalidRatingValue,
    /// Another driver already holds the car.
    #[schema(rename = "car_already_in_use")]
    CarAlreadyInUse,
    /// Only online drivers may select a car.
    #[schema(rename = "driver_offline_pick_car")]
    DriverOfflinePickCar,
    /// Latitude or longitude out of range, or a malformed `lat^lon` term.
    #[schema(rename = "geo_coordinate_creation")]
    GeoCoordinateCreation,
    /// A search term named an unknown status or engine type.
    #[schema(rename = "invalid_enum_value")]
    InvalidEnumValue,
    /// A numeric search term could not be parsed.
    #[schema(rename = "malformed_query")]
    MalformedQuery,
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "car_already_in_use")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "car 1 is already in use")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "01HZY8B2W6X5Y7Z9ABCD1234")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}
