//! Wear floats and their quantized buckets.

use std::fmt;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Significant digits used when comparing wear floats across marketplaces.
pub const WEAR_DIGITS: u32 = 2;

/// Visual condition of one item instance, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Wear(f64);

impl Wear {
    /// Validate and wrap a raw wear float.
    pub fn try_new(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::WearOutOfRange { value })
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Quantize to `digits` significant decimal digits, rounding half to even.
    ///
    /// Two wears are the same bucket only when these values are equal; this is
    /// a coarse identity check, not a tolerance.
    #[must_use]
    pub fn bucket(self, digits: u32) -> Decimal {
        if self.0 == 0.0 {
            return Decimal::ZERO;
        }
        Decimal::from_f64_retain(self.0)
            .and_then(|d| d.round_sf_with_strategy(digits, RoundingStrategy::MidpointNearestEven))
            .map(|d| d.normalize())
            .unwrap_or(Decimal::ZERO)
    }
}

impl TryFrom<f64> for Wear {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Wear> for f64 {
    fn from(wear: Wear) -> Self {
        wear.0
    }
}

impl fmt::Display for Wear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn buckets_use_significant_digits_not_places() {
        assert_eq!(Wear::try_new(0.0712).unwrap().bucket(2), dec!(0.071));
        assert_eq!(Wear::try_new(0.2449).unwrap().bucket(2), dec!(0.24));
        assert_eq!(Wear::try_new(0.00153).unwrap().bucket(2), dec!(0.0015));
    }

    #[test]
    fn zero_wear_has_a_bucket() {
        assert_eq!(Wear::try_new(0.0).unwrap().bucket(2), Decimal::ZERO);
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert!(Wear::try_new(-0.01).is_err());
        assert!(Wear::try_new(1.01).is_err());
        assert!(Wear::try_new(f64::NAN).is_err());
        assert!(Wear::try_new(1.0).is_ok());
    }
}
