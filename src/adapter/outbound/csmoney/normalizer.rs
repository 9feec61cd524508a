use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use tracing::warn;

use super::dto::{ListingItem, ListingPage};
use super::fetcher::PriceLookup;
use super::SOURCE;
use crate::domain::{NormalizedRecord, Wear};
use crate::error::{Error, Result};
use crate::port::{Normalizer, RawDocument};

/// Significant digits kept for post-fee prices.
const PRICE_DIGITS: u32 = 4;

/// Turns listing pages into records priced after the market fee.
///
/// Only listings the market charges a wear overpay for are kept. Each kept
/// listing needs one price lookup; lookups for a page run concurrently.
pub struct CsmoneyNormalizer {
    prices: Arc<dyn PriceLookup>,
    fee_percent: Decimal,
    fallback_name: String,
}

impl CsmoneyNormalizer {
    pub fn new(
        prices: Arc<dyn PriceLookup>,
        fee_percent: Decimal,
        fallback_name: impl Into<String>,
    ) -> Self {
        Self {
            prices,
            fee_percent,
            fallback_name: fallback_name.into(),
        }
    }

    /// `default_price` minus the fee, at four significant digits.
    #[must_use]
    pub fn after_fee(&self, default_price: Decimal) -> Decimal {
        let price = default_price - default_price / Decimal::ONE_HUNDRED * self.fee_percent;
        price.round_sf(PRICE_DIGITS).unwrap_or(price).normalize()
    }

    async fn record(&self, item: ListingItem, overpay: Decimal) -> Option<NormalizedRecord> {
        let default_price = match self.prices.default_price(item.asset_id).await {
            Ok(price) => price,
            Err(e) => {
                warn!(source = SOURCE, asset_id = item.asset_id, error = %e, "Price lookup failed, skipping listing");
                return None;
            }
        };

        let built = Wear::try_new(item.float).and_then(|wear| {
            let name = item.full_name.unwrap_or_else(|| self.fallback_name.clone());
            NormalizedRecord::try_new(name, wear, self.after_fee(default_price))
        });
        match built {
            Ok(record) => {
                let record = record.with_overpay(overpay);
                Some(match item.pattern {
                    Some(seed) => record.with_seed(seed),
                    None => record,
                })
            }
            Err(e) => {
                warn!(source = SOURCE, asset_id = item.asset_id, error = %e, "Invalid listing, skipping");
                None
            }
        }
    }
}

#[async_trait]
impl Normalizer for CsmoneyNormalizer {
    type Output = NormalizedRecord;

    async fn normalize(&self, document: RawDocument) -> Result<Vec<NormalizedRecord>> {
        let RawDocument::Json(value) = document else {
            return Err(Error::malformed(SOURCE, "expected a JSON listing page"));
        };
        let page: ListingPage =
            serde_json::from_value(value).map_err(|e| Error::malformed(SOURCE, e.to_string()))?;

        let lookups = page.items.into_iter().filter_map(|item| {
            let overpay = item.overpay_float()?;
            Some(self.record(item, overpay))
        });
        Ok(join_all(lookups).await.into_iter().flatten().collect())
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use rust_decimal_macros::dec;
    use serde_json::json;

    struct FixedPrices;

    #[async_trait]
    impl PriceLookup for FixedPrices {
        async fn default_price(&self, asset_id: u64) -> Result<Decimal> {
            match asset_id {
                1 => Ok(dec!(100)),
                2 => Ok(dec!(12.345)),
                _ => Err(TransportError::Status {
                    url: "price".into(),
                    status: 500,
                }
                .into()),
            }
        }
    }

    fn normalizer() -> CsmoneyNormalizer {
        CsmoneyNormalizer::new(Arc::new(FixedPrices), dec!(8), "AK-47 | Redline")
    }

    #[test]
    fn fee_is_deducted_at_four_significant_digits() {
        let n = normalizer();
        assert_eq!(n.after_fee(dec!(100)), dec!(92));
        assert_eq!(n.after_fee(dec!(12.345)), dec!(11.36));
    }

    #[tokio::test]
    async fn keeps_priced_overpay_listings_in_page_order() {
        let page = json!({ "items": [
            { "assetId": 1, "fullName": "first", "float": 0.251, "pattern": 661, "overpay": { "float": 3 } },
            { "assetId": 2, "float": "0.3", "overpay": { "float": 0.5 } },
            { "assetId": 1, "float": 0.2, "overpay": null },
            { "assetId": 9, "float": 0.2, "overpay": { "float": 1 } }
        ]});

        let records = normalizer().normalize(RawDocument::Json(page)).await.unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].display_name(), "first");
        assert_eq!(records[0].price(), dec!(92));
        assert_eq!(records[0].adjusted_price(), dec!(95));
        assert_eq!(records[0].seed(), Some(661));

        assert_eq!(records[1].display_name(), "AK-47 | Redline");
        assert_eq!(records[1].adjusted_price(), dec!(11.86));
    }

    #[tokio::test]
    async fn page_without_items_is_malformed() {
        let err = normalizer()
            .normalize(RawDocument::Json(json!({ "total": 0 })))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "malformed_response");
    }
}
