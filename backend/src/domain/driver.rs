//! Driver data model.
//!
//! The assignment state lives on the driver: `car` is the car the driver is
//! currently operating, hydrated by the store when the driver is read.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::car::{Car, CarId, ParseEnumError};
use super::geo::GeoCoordinate;

/// Validation errors returned when building a [`NewDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverValidationError {
    /// The username was blank.
    EmptyUsername,
    /// The password was blank.
    EmptyPassword,
}

impl fmt::Display for DriverValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for DriverValidationError {}

/// Store-assigned driver identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(i64);

impl DriverId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for DriverId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Whether a driver is accepting work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnlineStatus {
    /// Available for assignments.
    Online,
    /// Not taking assignments.
    Offline,
}

impl OnlineStatus {
    /// Upper-case wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Offline => "OFFLINE",
        }
    }

    /// The opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Online => Self::Offline,
            Self::Offline => Self::Online,
        }
    }
}

impl fmt::Display for OnlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnlineStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Online, Self::Offline]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError {
                kind: "online status",
                value: s.to_owned(),
            })
    }
}

/// Input for registering a driver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDraft {
    /// Login name, unique among active drivers.
    pub username: String,
    /// Login credential.
    pub password: String,
}

/// Validated registration data, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDriver {
    username: String,
    password: String,
}

impl NewDriver {
    /// Validated username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl TryFrom<DriverDraft> for NewDriver {
    type Error = DriverValidationError;

    fn try_from(draft: DriverDraft) -> Result<Self, Self::Error> {
        if draft.username.trim().is_empty() {
            return Err(DriverValidationError::EmptyUsername);
        }
        if draft.password.is_empty() {
            return Err(DriverValidationError::EmptyPassword);
        }
        Ok(Self {
            username: draft.username,
            password: draft.password,
        })
    }
}

/// A fleet driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    id: DriverId,
    username: String,
    password: String,
    online_status: OnlineStatus,
    coordinate: Option<GeoCoordinate>,
    coordinate_updated_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    car: Option<Car>,
    deleted: bool,
}

impl Driver {
    /// A freshly registered driver: offline, without a car or location.
    pub fn new(id: DriverId, registration: NewDriver, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username: registration.username,
            password: registration.password,
            online_status: OnlineStatus::Offline,
            coordinate: None,
            coordinate_updated_at: None,
            created_at,
            car: None,
            deleted: false,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> DriverId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Credential supplied at registration. Never serialised.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Current availability.
    pub fn online_status(&self) -> OnlineStatus {
        self.online_status
    }

    /// Last reported position, if any.
    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        self.coordinate
    }

    /// When the position was last reported.
    pub fn coordinate_updated_at(&self) -> Option<DateTime<Utc>> {
        self.coordinate_updated_at
    }

    /// Registration time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Car currently held, if any.
    pub fn car(&self) -> Option<&Car> {
        self.car.as_ref()
    }

    /// Identifier of the held car.
    pub fn car_id(&self) -> Option<CarId> {
        self.car.as_ref().map(Car::id)
    }

    /// Whether the driver was soft deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Flip the online status. Going offline releases the car.
    pub fn toggle_online_status(&mut self) -> OnlineStatus {
        self.online_status = self.online_status.toggled();
        if self.online_status == OnlineStatus::Offline {
            self.car = None;
        }
        self.online_status
    }

    /// Set the status directly; used when restoring or seeding drivers.
    pub fn set_online_status(&mut self, status: OnlineStatus) {
        self.online_status = status;
        if status == OnlineStatus::Offline {
            self.car = None;
        }
    }

    /// Attach `car` to the driver, replacing any previous assignment.
    ///
    /// Callers are responsible for the online and availability checks.
    pub fn assign_car(&mut self, car: Car) {
        self.car = Some(car);
    }

    /// Drop the current assignment and return it.
    pub fn release_car(&mut self) -> Option<Car> {
        self.car.take()
    }

    /// Record a new position and when it was reported.
    pub fn relocate(&mut self, coordinate: GeoCoordinate, at: DateTime<Utc>) {
        self.coordinate = Some(coordinate);
        self.coordinate_updated_at = Some(at);
    }

    /// Soft delete. The driver keeps its id but loses its car.
    pub fn mark_deleted(&mut self) {
        self.car = None;
        self.deleted = true;
    }
}
