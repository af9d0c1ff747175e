//! Geographic coordinate value object.

use std::fmt;

use serde::Serialize;

/// Separator between latitude and longitude in coordinate search terms.
pub const COORDINATE_SEPARATOR: char = '^';

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// Validation errors raised when building a [`GeoCoordinate`].
#[derive(Debug, Clone, PartialEq)]
pub enum GeoCoordinateError {
    /// Latitude outside [-90, 90].
    LatitudeOutOfRange { value: f64 },
    /// Longitude outside [-180, 180].
    LongitudeOutOfRange { value: f64 },
    /// A search term did not split into exactly two numeric components.
    MalformedTerm { term: String },
}

impl fmt::Display for GeoCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatitudeOutOfRange { value } => {
                write!(f, "latitude must be between -90 and 90 (got {value})")
            }
            Self::LongitudeOutOfRange { value } => {
                write!(f, "longitude must be between -180 and 180 (got {value})")
            }
            Self::MalformedTerm { term } => write!(
                f,
                "coordinate search must be latitude{COORDINATE_SEPARATOR}longitude (got {term:?})"
            ),
        }
    }
}

impl std::error::Error for GeoCoordinateError {}

/// Immutable `(latitude, longitude)` pair compared structurally.
///
/// # Examples
/// ```
/// use fleet_backend::domain::GeoCoordinate;
///
/// let a = GeoCoordinate::new(10.0, 10.0).expect("in range");
/// let b = GeoCoordinate::parse_search_term("10^10").expect("two components");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Build a coordinate, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoCoordinateError> {
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(GeoCoordinateError::LatitudeOutOfRange { value: latitude });
        }
        if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(GeoCoordinateError::LongitudeOutOfRange { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a `lat^lon` search term.
    pub fn parse_search_term(term: &str) -> Result<Self, GeoCoordinateError> {
        let malformed = || GeoCoordinateError::MalformedTerm {
            term: term.to_owned(),
        };
        let mut parts = term.split(COORDINATE_SEPARATOR);
        let (Some(latitude), Some(longitude), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        let latitude = latitude.trim().parse::<f64>().map_err(|_| malformed())?;
        let longitude = longitude.trim().parse::<f64>().map_err(|_| malformed())?;
        Self::new(latitude, longitude)
    }

    /// Degrees north, in [-90, 90].
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Degrees east, in [-180, 180].
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{COORDINATE_SEPARATOR}{}", self.latitude, self.longitude)
    }
}
