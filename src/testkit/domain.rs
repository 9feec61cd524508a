//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{NormalizedRecord, Quality, SearchParameters, SkinIdentity, Wear};

/// A [`Wear`] that must be valid.
///
/// # Panics
///
/// Panics when `value` is outside `[0, 1]`.
pub fn wear(value: f64) -> Wear {
    Wear::try_new(value).expect("wear in range")
}

/// A walked-side listing without overpay.
///
/// # Panics
///
/// Panics on an invalid wear or a non-positive price.
pub fn listing(price: Decimal, wear_value: f64) -> NormalizedRecord {
    NormalizedRecord::try_new("AK-47 | Redline (Field-Tested)", wear(wear_value), price)
        .expect("valid listing")
}

/// A pool-side listing whose adjusted price is `price + overpay`.
///
/// # Panics
///
/// Panics on an invalid wear or a non-positive price.
pub fn pool_listing(price: Decimal, overpay: Decimal, wear_value: f64) -> NormalizedRecord {
    listing(price, wear_value).with_overpay(overpay)
}

/// `AK-47 | Redline (Field-Tested)`.
pub fn params() -> SearchParameters {
    SearchParameters::new("AK-47", "Redline", Quality::FieldTested, false)
}

/// Identity as the wiki would report it.
pub fn identity(item_class: &str, pattern: &str, qualities: &[&str]) -> SkinIdentity {
    SkinIdentity {
        item_class: item_class.to_string(),
        pattern: pattern.to_string(),
        qualities: qualities.iter().map(|q| (*q).to_string()).collect(),
    }
}
