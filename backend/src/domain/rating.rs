//! Running-average aggregation for car ratings.
//!
//! Averages are computed in decimal arithmetic and rounded half-up to two
//! places, so `(4 * 2 + 2) / 3` stores `3.33` rather than a binary
//! approximation of `3.333…`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 0.0;
/// Highest accepted rating.
pub const MAX_RATING: f64 = 5.0;

const RATING_DECIMAL_PLACES: u32 = 2;

/// Failures raised while folding a new rating into an average.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    /// The rating fell outside [0, 5].
    #[error("the rating value must be between 0 and 5 (got {value})")]
    OutOfRange { value: f64 },
    /// The ratings counter would overflow.
    #[error("the number of ratings overflowed")]
    CounterOverflow,
    /// The new average does not fit an `f64`.
    #[error("rating average {value} cannot be represented")]
    Unrepresentable { value: f64 },
}

/// Result of folding one rating into an average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingUpdate {
    /// New average, rounded to two decimals.
    pub rating: f64,
    /// New ratings count.
    pub number_of_ratings: u64,
}

/// Check that `value` is a finite rating within `[0, 5]`.
pub fn validate_rating(value: f64) -> Result<f64, RatingError> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(RatingError::OutOfRange { value })
    }
}

/// Fold `new_rating` into an average built from `current_count` ratings.
///
/// # Examples
/// ```
/// use fleet_backend::domain::rating::running_average;
///
/// let update = running_average(4.0, 2, 2.0).expect("valid rating");
/// assert_eq!(update.rating, 3.33);
/// assert_eq!(update.number_of_ratings, 3);
/// ```
pub fn running_average(
    current_rating: f64,
    current_count: u64,
    new_rating: f64,
) -> Result<RatingUpdate, RatingError> {
    validate_rating(new_rating)?;
    let number_of_ratings = current_count
        .checked_add(1)
        .ok_or(RatingError::CounterOverflow)?;

    let current = to_decimal(current_rating)?;
    let incoming = to_decimal(new_rating)?;
    let total = current
        .checked_mul(Decimal::from(current_count))
        .and_then(|sum| sum.checked_add(incoming))
        .ok_or(RatingError::Unrepresentable {
            value: current_rating,
        })?;
    let average = total
        .checked_div(Decimal::from(number_of_ratings))
        .ok_or(RatingError::Unrepresentable {
            value: current_rating,
        })?
        .round_dp_with_strategy(RATING_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    let rating = average.to_f64().ok_or(RatingError::Unrepresentable {
        value: current_rating,
    })?;
    let rating = rating.clamp(MIN_RATING, MAX_RATING);
    Ok(RatingUpdate {
        rating,
        number_of_ratings,
    })
}

fn to_decimal(value: f64) -> Result<Decimal, RatingError> {
    Decimal::from_f64(value).ok_or(RatingError::Unrepresentable { value })
}
