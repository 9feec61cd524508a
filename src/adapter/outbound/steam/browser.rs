//! Steam market read through a browser driver.
//!
//! The rendered listing table shows wear and seed through a float-checker
//! extension; the driver hands each row over as plain text.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;
use url::Url;

use super::locator::{ListingRef, SteamLocator};
use crate::domain::{NormalizedRecord, Wear};
use crate::error::{Error, Result};
use crate::port::{BrowserListing, Fetcher, ListingBrowser, Normalizer, RawDocument};
use crate::stream::StreamWriter;

const SOURCE: &str = "steam-browser";

pub struct SteamBrowserFetcher {
    browser: Arc<dyn ListingBrowser>,
    url: Url,
    max_pages: usize,
}

impl SteamBrowserFetcher {
    #[must_use]
    pub fn new(browser: Arc<dyn ListingBrowser>, url: Url, max_pages: usize) -> Self {
        Self {
            browser,
            url,
            max_pages,
        }
    }
}

#[async_trait]
impl Fetcher for SteamBrowserFetcher {
    async fn fetch(&self, out: &StreamWriter<RawDocument>) -> Result<()> {
        self.browser.open(self.url.as_str()).await?;

        for page in 0..self.max_pages {
            let rows = self.browser.listings().await?;
            debug!(source = SOURCE, page, rows = rows.len(), "Listing page read");
            for row in rows {
                out.put(RawDocument::BrowserRow(row)).await?;
            }
            if page + 1 == self.max_pages || !self.browser.next_page().await? {
                break;
            }
        }
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

/// Parses one scraped row into a record. Sold rows yield nothing.
pub struct SteamBrowserNormalizer {
    locator: SteamLocator,
}

impl SteamBrowserNormalizer {
    #[must_use]
    pub const fn new(locator: SteamLocator) -> Self {
        Self { locator }
    }

    fn record(&self, row: &BrowserListing) -> Result<Option<NormalizedRecord>> {
        if row.price_text.to_lowercase().contains("sold") {
            return Ok(None);
        }

        let (wear, seed) = parse_wear_text(&row.wear_text).ok_or_else(|| {
            Error::malformed(SOURCE, format!("unreadable float cell '{}'", row.wear_text))
        })?;
        let price = parse_price(&row.price_text).ok_or_else(|| {
            Error::malformed(SOURCE, format!("unreadable price '{}'", row.price_text))
        })?;
        let link = parse_buy_listing(&row.buy_link)
            .map_or_else(|| row.buy_link.clone(), |listing| self.locator.buy_link(listing));

        let record = NormalizedRecord::try_new(self.locator.hash_name(), Wear::try_new(wear)?, price)?
            .with_link(link);
        Ok(Some(match seed {
            Some(seed) => record.with_seed(seed),
            None => record,
        }))
    }
}

#[async_trait]
impl Normalizer for SteamBrowserNormalizer {
    type Output = NormalizedRecord;

    async fn normalize(&self, document: RawDocument) -> Result<Vec<NormalizedRecord>> {
        let RawDocument::BrowserRow(row) = document else {
            return Err(Error::malformed(SOURCE, "expected a listing row"));
        };
        Ok(self.record(&row)?.into_iter().collect())
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

/// `"Float: 0.15234 ⓘ\nPaint Seed: 661"` → `(0.15234, Some(661))`.
fn parse_wear_text(text: &str) -> Option<(f64, Option<u32>)> {
    let mut wear = None;
    let mut seed = None;
    for line in text.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.split_whitespace().next();
        match label.trim().to_lowercase().as_str() {
            "float" => wear = value.and_then(|v| v.parse().ok()),
            "paint seed" => seed = value.and_then(|v| v.parse().ok()),
            _ => {}
        }
    }
    wear.map(|w| (w, seed))
}

/// `"$1,234.56 USD"` → `1234.56`.
fn parse_price(text: &str) -> Option<Decimal> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.trim_matches('.').parse().ok()
}

/// `javascript:BuyMarketListing('listing', '4420', 730, '2', '3590')`.
fn parse_buy_listing(href: &str) -> Option<ListingRef> {
    let args = href.split_once('(')?.1.split_once(')')?.0;
    let mut fields = args
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '\'' || c == '"'))
        .skip(1);
    Some(ListingRef {
        listing_id: fields.next()?.parse().ok()?,
        app_id: fields.next()?.parse().ok()?,
        context_id: fields.next()?.parse().ok()?,
        asset_id: fields.next()?.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Quality, SearchParameters};
    use rust_decimal_macros::dec;

    fn normalizer() -> SteamBrowserNormalizer {
        let params = SearchParameters::new("AK-47", "Redline", Quality::FieldTested, false);
        SteamBrowserNormalizer::new(SteamLocator::new("https://s.test/730", &params).unwrap())
    }

    fn row(wear: &str, price: &str) -> RawDocument {
        RawDocument::BrowserRow(BrowserListing {
            wear_text: wear.into(),
            price_text: price.into(),
            buy_link: "javascript:BuyMarketListing('listing', '4420', 730, '2', '3590')".into(),
        })
    }

    #[tokio::test]
    async fn parses_float_seed_price_and_link() {
        let records = normalizer()
            .normalize(row("Float: 0.15234 ⓘ\nPaint Seed: 661", "$1,234.56 USD"))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert!((record.wear().value() - 0.15234).abs() < 1e-12);
        assert_eq!(record.seed(), Some(661));
        assert_eq!(record.price(), dec!(1234.56));
        assert!(record.link().unwrap().ends_with("#buylisting|4420|730|2|3590"));
    }

    #[tokio::test]
    async fn sold_rows_are_dropped() {
        let records = normalizer()
            .normalize(row("Float: 0.1\nPaint Seed: 1", "Sold!"))
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn unreadable_float_is_malformed() {
        let err = normalizer()
            .normalize(row("loading…", "$1.00"))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "malformed_response");
    }

    #[test]
    fn foreign_links_are_kept_verbatim() {
        assert_eq!(parse_buy_listing("https://steamcommunity.com/x"), None);
    }
}
