//! Domain primitives, aggregates and services.
//!
//! Purpose: define the fleet entities (drivers and cars), the driver search
//! language and the assignment and rating rules. Nothing here knows about
//! HTTP or storage; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Driver / Car and their value objects.
//! - Criteria / FilterChain / filter_drivers: the driver search engine.
//! - DriverService / CarService: implementations of the driving ports.

pub mod car;
pub mod car_service;
pub mod criteria;
pub mod driver;
pub mod driver_service;
pub mod error;
pub mod filter;
pub mod geo;
pub mod locks;
pub mod ports;
pub mod rating;
pub mod trace_id;

pub use self::car::{
    Car, CarAttributes, CarDraft, CarId, CarValidationError, EngineType, Manufacturer,
    ParseEnumError, SeatCount,
};
pub use self::car_service::CarService;
pub use self::criteria::{Criteria, Criterion, Operator};
pub use self::driver::{
    Driver, DriverDraft, DriverId, DriverValidationError, NewDriver, OnlineStatus,
};
pub use self::driver_service::DriverService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::filter::{
    Comparison, DriverFilter, FilterChain, FilterError, FilterKey, filter_drivers,
};
pub use self::geo::{GeoCoordinate, GeoCoordinateError};
pub use self::locks::{FleetLocks, KeyedLocks};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use fleet_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::entity_not_found("no such driver"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
