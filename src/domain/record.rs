//! Normalized listing records and resolved item identities.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::quality::Quality;
use super::wear::Wear;

/// One listing, normalized so records from different marketplaces compare.
///
/// Produced by exactly one normalizer and never mutated afterwards.
/// `adjusted_price` is the price plus whatever overpay the marketplace charges
/// for the wear value; it defaults to `price`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    display_name: String,
    wear: Wear,
    price: Decimal,
    adjusted_price: Decimal,
    overpay: Option<Decimal>,
    link: Option<String>,
    seed: Option<u32>,
}

impl NormalizedRecord {
    /// Create a record with a positive post-fee price.
    pub fn try_new(
        display_name: impl Into<String>,
        wear: Wear,
        price: Decimal,
    ) -> Result<Self, DomainError> {
        if price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price });
        }
        Ok(Self {
            display_name: display_name.into(),
            wear,
            price,
            adjusted_price: price,
            overpay: None,
            link: None,
            seed: None,
        })
    }

    /// Set the overpay the marketplace adds for this wear value.
    ///
    /// `adjusted_price` becomes `price + overpay`, rounded to 4 significant digits.
    #[must_use]
    pub fn with_overpay(mut self, overpay: Decimal) -> Self {
        let adjusted = self.price + overpay;
        self.adjusted_price = adjusted.round_sf(4).unwrap_or(adjusted).normalize();
        self.overpay = Some(overpay);
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn wear(&self) -> Wear {
        self.wear
    }

    /// Post-fee price in the marketplace currency.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub const fn adjusted_price(&self) -> Decimal {
        self.adjusted_price
    }

    #[must_use]
    pub const fn overpay(&self) -> Option<Decimal> {
        self.overpay
    }

    /// Listing link, when the marketplace exposes one.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Paint seed, when the marketplace exposes one.
    #[must_use]
    pub const fn seed(&self) -> Option<u32> {
        self.seed
    }
}

/// Canonical name of an item and the quality tiers it exists in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkinIdentity {
    pub item_class: String,
    pub pattern: String,
    pub qualities: Vec<String>,
}

impl SkinIdentity {
    /// Known tiers that parse as a [`Quality`]; unrecognized headings are ignored.
    #[must_use]
    pub fn known_qualities(&self) -> Vec<Quality> {
        self.qualities
            .iter()
            .filter_map(|q| q.parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn wear(v: f64) -> Wear {
        Wear::try_new(v).unwrap()
    }

    #[test]
    fn adjusted_price_defaults_to_price() {
        let record = NormalizedRecord::try_new("AK-47 | Redline", wear(0.2), dec!(12.5)).unwrap();
        assert_eq!(record.adjusted_price(), dec!(12.5));
        assert_eq!(record.overpay(), None);
    }

    #[test]
    fn overpay_is_added_at_four_significant_digits() {
        let record = NormalizedRecord::try_new("AK-47 | Redline", wear(0.2), dec!(12.34))
            .unwrap()
            .with_overpay(dec!(0.567));
        assert_eq!(record.adjusted_price(), dec!(12.91));
        assert_eq!(record.overpay(), Some(dec!(0.567)));
    }

    #[test]
    fn rejects_non_positive_price() {
        let result = NormalizedRecord::try_new("x", wear(0.5), Decimal::ZERO);
        assert!(matches!(result, Err(DomainError::NonPositivePrice { .. })));
    }

    #[test]
    fn known_qualities_skip_foreign_headings() {
        let identity = SkinIdentity {
            item_class: "AK-47".into(),
            pattern: "Redline".into(),
            qualities: vec!["Field-Tested".into(), "Price".into(), "Well-Worn".into()],
        };
        assert_eq!(
            identity.known_qualities(),
            vec![Quality::FieldTested, Quality::WellWorn]
        );
    }
}
