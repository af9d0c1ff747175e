//! Car data model.
//!
//! A [`Car`] is owned by the fleet store; drivers refer to it by
//! [`CarId`]. Descriptive attributes are validated once, when a
//! [`CarDraft`] becomes [`CarAttributes`], and the rating history only
//! changes through [`Car::record_rating`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rating::{RatingError, running_average};

/// Smallest seat count a car may declare.
pub const SEAT_COUNT_MIN: i32 = 2;
/// Largest seat count a car may declare.
pub const SEAT_COUNT_MAX: i32 = 9;

/// Validation errors returned when building [`CarAttributes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarValidationError {
    /// The license plate was blank.
    EmptyLicensePlate,
    /// The manufacturer name was blank.
    EmptyManufacturer,
    /// The seat count fell outside 2..=9.
    SeatCountOutOfRange { value: i32 },
}

impl fmt::Display for CarValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLicensePlate => write!(f, "license plate must not be empty"),
            Self::EmptyManufacturer => write!(f, "manufacturer must not be empty"),
            Self::SeatCountOutOfRange { value } => write!(
                f,
                "seat count must be between {SEAT_COUNT_MIN} and {SEAT_COUNT_MAX} (got {value})"
            ),
        }
    }
}

impl std::error::Error for CarValidationError {}

/// Raised when a token does not name a variant of a domain enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    /// Enum being parsed.
    pub kind: &'static str,
    /// Token that failed to parse.
    pub value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} is not a valid {}", self.value, self.kind)
    }
}

impl std::error::Error for ParseEnumError {}

/// Store-assigned car identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(i64);

impl CarId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for CarId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Propulsion kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineType {
    /// Petrol engine.
    Gas,
    /// Diesel engine.
    Diesel,
    /// Battery electric drive.
    Electric,
    /// Combined combustion and electric drive.
    Hybrid,
}

impl EngineType {
    /// Every engine type, in declaration order.
    pub const ALL: [Self; 4] = [Self::Gas, Self::Diesel, Self::Electric, Self::Hybrid];

    /// Upper-case wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gas => "GAS",
            Self::Diesel => "DIESEL",
            Self::Electric => "ELECTRIC",
            Self::Hybrid => "HYBRID",
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineType {
    type Err = ParseEnumError;

    /// Case-insensitive match against the variant names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "engine type",
                value: s.to_owned(),
            })
    }
}

/// Number of seats, constrained to `2..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeatCount(i32);

impl SeatCount {
    /// Validate a seat count.
    pub fn new(value: i32) -> Result<Self, CarValidationError> {
        if (SEAT_COUNT_MIN..=SEAT_COUNT_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CarValidationError::SeatCountOutOfRange { value })
        }
    }

    /// Number of seats.
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Manufacturer display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Manufacturer(String);

impl Manufacturer {
    /// Validate a manufacturer name.
    pub fn new(name: impl Into<String>) -> Result<Self, CarValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CarValidationError::EmptyManufacturer);
        }
        Ok(Self(name))
    }

    /// Manufacturer name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Manufacturer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unvalidated car attributes as supplied by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDraft {
    /// License plate as registered.
    pub license_plate: String,
    /// Seat count, validated to 2..=9.
    pub seat_count: i32,
    /// Whether the roof opens.
    pub convertible: bool,
    /// Engine type.
    pub engine_type: EngineType,
    /// Manufacturer name.
    pub manufacturer: String,
}

/// Validated descriptive attributes of a car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarAttributes {
    license_plate: String,
    seat_count: SeatCount,
    convertible: bool,
    engine_type: EngineType,
    manufacturer: Manufacturer,
}

impl CarAttributes {
    /// License plate as registered.
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// Validated seat count.
    pub fn seat_count(&self) -> SeatCount {
        self.seat_count
    }

    /// Whether the roof opens.
    pub fn convertible(&self) -> bool {
        self.convertible
    }

    /// Engine type.
    pub fn engine_type(&self) -> EngineType {
        self.engine_type
    }

    /// Validated manufacturer.
    pub fn manufacturer(&self) -> &Manufacturer {
        &self.manufacturer
    }
}

impl TryFrom<CarDraft> for CarAttributes {
    type Error = CarValidationError;

    fn try_from(draft: CarDraft) -> Result<Self, Self::Error> {
        if draft.license_plate.trim().is_empty() {
            return Err(CarValidationError::EmptyLicensePlate);
        }
        Ok(Self {
            license_plate: draft.license_plate,
            seat_count: SeatCount::new(draft.seat_count)?,
            convertible: draft.convertible,
            engine_type: draft.engine_type,
            manufacturer: Manufacturer::new(draft.manufacturer)?,
        })
    }
}

/// A fleet car together with its rating history.
///
/// # Examples
/// ```
/// use fleet_backend::domain::{Car, CarAttributes, CarDraft, CarId, EngineType};
///
/// let attributes = CarAttributes::try_from(CarDraft {
///     license_plate: "123LY".into(),
///     seat_count: 2,
///     convertible: false,
///     engine_type: EngineType::Diesel,
///     manufacturer: "BMW".into(),
/// })
/// .expect("valid attributes");
/// let mut car = Car::new(CarId::new(1), attributes);
/// car.record_rating(4.5).expect("in range");
/// assert_eq!(car.rating(), 4.5);
/// assert_eq!(car.number_of_ratings(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    id: CarId,
    attributes: CarAttributes,
    rating: f64,
    number_of_ratings: u64,
    deleted: bool,
}

impl Car {
    /// A freshly registered car with no ratings.
    pub fn new(id: CarId, attributes: CarAttributes) -> Self {
        Self {
            id,
            attributes,
            rating: 0.0,
            number_of_ratings: 0,
            deleted: false,
        }
    }

    /// Rebuild a car with an existing rating history.
    pub fn with_rating_history(
        id: CarId,
        attributes: CarAttributes,
        rating: f64,
        number_of_ratings: u64,
    ) -> Result<Self, RatingError> {
        super::rating::validate_rating(rating)?;
        Ok(Self {
            id,
            attributes,
            rating,
            number_of_ratings,
            deleted: false,
        })
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> CarId {
        self.id
    }

    /// Descriptive attributes.
    pub fn attributes(&self) -> &CarAttributes {
        &self.attributes
    }

    /// Average rating, rounded to two decimals.
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// How many ratings have been folded into the average.
    pub fn number_of_ratings(&self) -> u64 {
        self.number_of_ratings
    }

    /// Whether the car was soft deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Fold `value` into the running average.
    ///
    /// The car is left untouched when `value` is rejected.
    pub fn record_rating(&mut self, value: f64) -> Result<(), RatingError> {
        let update = running_average(self.rating, self.number_of_ratings, value)?;
        self.rating = update.rating;
        self.number_of_ratings = update.number_of_ratings;
        Ok(())
    }

    /// Replace descriptive attributes, keeping the rating history.
    pub fn replace_attributes(&mut self, attributes: CarAttributes) {
        self.attributes = attributes;
    }

    /// Soft delete the car.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
