//! Driver filter chain.
//!
//! A parsed [`Criteria`] set becomes a [`FilterChain`]: one slot per
//! [`FilterKey`], in a fixed order. Slots whose key is absent from the
//! criteria pass drivers through untouched; the others narrow the candidate
//! list, so present criteria combine as a logical AND. Criterion values are
//! interpreted when the chain is built, so a bad value is reported even when
//! an earlier stage has already emptied the candidate list.

use serde_json::json;
use thiserror::Error;

use super::car::{CarId, EngineType};
use super::criteria::{Criteria, Criterion, Operator};
use super::driver::{Driver, OnlineStatus};
use super::geo::{GeoCoordinate, GeoCoordinateError};

/// Failures raised while interpreting criterion values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The coordinate term could not be turned into a coordinate.
    #[error("invalid coordinate search: {0}")]
    GeoCoordinateCreation(#[from] GeoCoordinateError),
    /// A token named no known enum value.
    #[error("{value:?} is not a valid {kind}")]
    InvalidEnumValue { kind: &'static str, value: String },
    /// A numeric criterion carried a non-numeric value.
    #[error("criterion {key} has a malformed value {value:?}")]
    MalformedQuery { key: &'static str, value: String },
}

impl From<FilterError> for super::Error {
    fn from(error: FilterError) -> Self {
        let message = error.to_string();
        match error {
            FilterError::GeoCoordinateCreation(_) => Self::geo_coordinate_creation(message),
            FilterError::InvalidEnumValue { kind, value } => Self::invalid_enum_value(message)
                .with_details(json!({ "kind": kind, "value": value })),
            FilterError::MalformedQuery { key, value } => {
                Self::malformed_query(message).with_details(json!({ "key": key, "value": value }))
            }
        }
    }
}

/// Attribute paths a filter stage can target, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    /// `coordinate`
    Coordinate,
    /// `onlineStatus`
    OnlineStatus,
    /// `username`
    Username,
    /// `car.id`
    CarId,
    /// `car.manufacturer`
    CarManufacturer,
    /// `car.rating`
    CarRating,
    /// `car.convertible`
    CarConvertible,
    /// `car.seatCount`
    CarSeatCount,
    /// `car.engineType`
    CarEngineType,
}

impl FilterKey {
    /// Every key in the order the chain evaluates them.
    pub const ORDER: [Self; 9] = [
        Self::Coordinate,
        Self::OnlineStatus,
        Self::Username,
        Self::CarId,
        Self::CarManufacturer,
        Self::CarRating,
        Self::CarConvertible,
        Self::CarSeatCount,
        Self::CarEngineType,
    ];

    /// Query-language spelling of the key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coordinate => "coordinate",
            Self::OnlineStatus => "onlineStatus",
            Self::Username => "username",
            Self::CarId => "car.id",
            Self::CarManufacturer => "car.manufacturer",
            Self::CarRating => "car.rating",
            Self::CarConvertible => "car.convertible",
            Self::CarSeatCount => "car.seatCount",
            Self::CarEngineType => "car.engineType",
        }
    }
}

/// Operator-dependent comparison against a threshold.
///
/// `<` and `>` are strict; `:` is exact equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison<T> {
    /// How to compare.
    pub operator: Operator,
    /// Value parsed from the criterion.
    pub threshold: T,
}

impl<T: PartialOrd> Comparison<T> {
    /// Compare `actual` against the threshold. `Eq` means exact equality.
    pub fn matches(&self, actual: &T) -> bool {
        match self.operator {
            Operator::Lt => *actual < self.threshold,
            Operator::Gt => *actual > self.threshold,
            Operator::Eq => *actual == self.threshold,
        }
    }
}

/// One predicate stage. Car stages never accept a driver without a car.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverFilter {
    /// Exact coordinate match.
    Coordinate(GeoCoordinate),
    /// Same online status.
    OnlineStatus(OnlineStatus),
    /// Username contains the fragment.
    Username(String),
    /// Holds the car with this identifier.
    CarId(CarId),
    /// Held car's manufacturer contains the fragment.
    CarManufacturer(String),
    /// Held car's rating compares as given.
    CarRating(Comparison<f64>),
    /// Held car's roof matches.
    CarConvertible(bool),
    /// Held car's seat count compares as given.
    CarSeatCount(Comparison<i32>),
    /// Held car has this engine type.
    CarEngineType(EngineType),
}

impl DriverFilter {
    /// Interpret `criterion` as the stage for `key`.
    pub fn from_criterion(key: FilterKey, criterion: &Criterion) -> Result<Self, FilterError> {
        let raw = criterion.value();
        let filter = match key {
            FilterKey::Coordinate => Self::Coordinate(GeoCoordinate::parse_search_term(raw)?),
            FilterKey::OnlineStatus => Self::OnlineStatus(parse_enum(raw)?),
            FilterKey::Username => Self::Username(raw.to_owned()),
            FilterKey::CarId => Self::CarId(CarId::new(parse_number(key, raw)?)),
            FilterKey::CarManufacturer => Self::CarManufacturer(raw.to_owned()),
            FilterKey::CarRating => Self::CarRating(Comparison {
                operator: criterion.operator(),
                threshold: parse_number(key, raw)?,
            }),
            FilterKey::CarConvertible => Self::CarConvertible(raw.eq_ignore_ascii_case("true")),
            FilterKey::CarSeatCount => Self::CarSeatCount(Comparison {
                operator: criterion.operator(),
                threshold: parse_number(key, raw)?,
            }),
            FilterKey::CarEngineType => Self::CarEngineType(parse_enum(raw)?),
        };
        Ok(filter)
    }

    /// Whether `driver` passes this stage.
    pub fn accepts(&self, driver: &Driver) -> bool {
        match self {
            Self::Coordinate(coordinate) => driver.coordinate().as_ref() == Some(coordinate),
            Self::OnlineStatus(status) => driver.online_status() == *status,
            Self::Username(fragment) => driver.username().contains(fragment.as_str()),
            Self::CarId(id) => driver.car_id() == Some(*id),
            Self::CarManufacturer(fragment) => driver
                .car()
                .is_some_and(|car| car.attributes().manufacturer().as_str().contains(fragment.as_str())),
            Self::CarRating(comparison) => driver
                .car()
                .is_some_and(|car| comparison.matches(&car.rating())),
            Self::CarConvertible(convertible) => driver
                .car()
                .is_some_and(|car| car.attributes().convertible() == *convertible),
            Self::CarSeatCount(comparison) => driver
                .car()
                .is_some_and(|car| comparison.matches(&car.attributes().seat_count().get())),
            Self::CarEngineType(engine) => driver
                .car()
                .is_some_and(|car| car.attributes().engine_type() == *engine),
        }
    }
}

fn parse_enum<T>(raw: &str) -> Result<T, FilterError>
where
    T: std::str::FromStr<Err = super::car::ParseEnumError>,
{
    raw.parse::<T>()
        .map_err(|error| FilterError::InvalidEnumValue {
            kind: error.kind,
            value: error.value,
        })
}

fn parse_number<T: std::str::FromStr>(key: FilterKey, raw: &str) -> Result<T, FilterError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| FilterError::MalformedQuery {
            key: key.as_str(),
            value: raw.to_owned(),
        })
}

/// The fixed-order pipeline of filter stages.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain {
    stages: Vec<(FilterKey, Option<DriverFilter>)>,
}

impl FilterChain {
    /// Build one stage per [`FilterKey::ORDER`] entry. Criteria with keys
    /// outside that list are ignored.
    pub fn from_criteria(criteria: &Criteria) -> Result<Self, FilterError> {
        let stages = FilterKey::ORDER
            .into_iter()
            .map(|key| {
                let stage = criteria
                    .get(key.as_str())
                    .map(|criterion| DriverFilter::from_criterion(key, criterion))
                    .transpose()?;
                Ok((key, stage))
            })
            .collect::<Result<Vec<_>, FilterError>>()?;
        Ok(Self { stages })
    }

    /// Stages that will narrow the input, in evaluation order.
    pub fn active_stages(&self) -> impl Iterator<Item = (FilterKey, &DriverFilter)> {
        self.stages
            .iter()
            .filter_map(|(key, stage)| stage.as_ref().map(|filter| (*key, filter)))
    }

    /// Run every stage over `drivers`, preserving their relative order.
    pub fn apply(&self, mut drivers: Vec<Driver>) -> Vec<Driver> {
        for (_, filter) in self.active_stages() {
            drivers.retain(|driver| filter.accepts(driver));
        }
        drivers
    }
}

/// Parse `query` and keep the drivers matching every recognised criterion.
///
/// `drivers` should be a point-in-time snapshot; the chain never observes
/// later writes.
///
/// # Examples
/// ```
/// use fleet_backend::domain::filter_drivers;
///
/// let drivers = filter_drivers("car.rating>3", Vec::new()).expect("valid query");
/// assert!(drivers.is_empty());
/// ```
pub fn filter_drivers(query: &str, drivers: Vec<Driver>) -> Result<Vec<Driver>, FilterError> {
    let chain = FilterChain::from_criteria(&Criteria::parse(query))?;
    Ok(chain.apply(drivers))
}

#[cfg(test)]
mod tests;
