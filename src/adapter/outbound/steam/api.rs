//! Steam market render API pipeline stages.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::{join_all, try_join_all};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::inspect::{InspectLookup, InspectParams};
use super::locator::{ListingRef, SteamLocator};
use crate::adapter::outbound::http::HttpSource;
use crate::domain::{NormalizedRecord, Wear};
use crate::error::{Error, Result};
use crate::port::{Fetcher, Normalizer, RawDocument};
use crate::stream::StreamWriter;

const SOURCE: &str = "steam-api";

/// Requests a fixed number of render pages concurrently.
pub struct SteamApiFetcher {
    http: HttpSource,
    locator: SteamLocator,
    page_size: usize,
    max_pages: usize,
    currency: u32,
}

impl SteamApiFetcher {
    #[must_use]
    pub const fn new(
        http: HttpSource,
        locator: SteamLocator,
        page_size: usize,
        max_pages: usize,
        currency: u32,
    ) -> Self {
        Self {
            http,
            locator,
            page_size,
            max_pages,
            currency,
        }
    }
}

#[async_trait]
impl Fetcher for SteamApiFetcher {
    async fn fetch(&self, out: &StreamWriter<RawDocument>) -> Result<()> {
        let urls: Vec<_> = (0..self.max_pages)
            .map(|page| {
                self.locator
                    .render_url(page * self.page_size, self.page_size, self.currency)
            })
            .collect();

        let pages = try_join_all(urls.iter().map(|url| self.http.get_json(url.as_str()))).await?;
        debug!(source = SOURCE, pages = pages.len(), "Render pages fetched");

        for page in pages {
            out.put(RawDocument::Json(page)).await?;
        }
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    listingid: String,
    #[serde(default)]
    converted_price_per_unit: Option<i64>,
    #[serde(default)]
    converted_fee_per_unit: Option<i64>,
    asset: Asset,
}

#[derive(Debug, Deserialize)]
struct Asset {
    appid: u32,
    contextid: String,
    id: String,
    #[serde(default)]
    market_actions: Vec<MarketAction>,
}

#[derive(Debug, Deserialize)]
struct MarketAction {
    link: String,
}

/// A listing with everything but wear and seed resolved.
#[derive(Debug, Clone, PartialEq)]
struct PendingListing {
    inspect_link: String,
    buy_link: String,
    price: Decimal,
}

/// Turns render pages into records by inspecting every listing.
///
/// Listings keep the order the market sent them in. A listing whose inspect
/// link does not parse, or whose inspect lookup fails, is skipped.
pub struct SteamApiNormalizer {
    locator: SteamLocator,
    inspector: Arc<dyn InspectLookup>,
}

impl SteamApiNormalizer {
    pub fn new(locator: SteamLocator, inspector: Arc<dyn InspectLookup>) -> Self {
        Self { locator, inspector }
    }

    fn pending(&self, listing: Listing) -> Option<PendingListing> {
        let price = Decimal::new(
            listing.converted_price_per_unit? + listing.converted_fee_per_unit.unwrap_or(0),
            2,
        );
        let template = &listing.asset.market_actions.first()?.link;
        let inspect_link = template
            .replace("%listingid%", &listing.listingid)
            .replace("%assetid%", &listing.asset.id);

        let Some(params) = InspectParams::parse(&inspect_link) else {
            warn!(source = SOURCE, link = %inspect_link, "Unparseable inspect link, skipping listing");
            return None;
        };
        let buy_link = self.locator.buy_link(ListingRef {
            listing_id: listing.listingid.parse().ok()?,
            app_id: listing.asset.appid,
            context_id: listing.asset.contextid.parse().ok()?,
            asset_id: params.a,
        });

        Some(PendingListing {
            inspect_link,
            buy_link,
            price,
        })
    }

    async fn inspect(&self, pending: PendingListing) -> Option<NormalizedRecord> {
        let inspected = match self.inspector.inspect(&pending.inspect_link).await {
            Ok(inspected) => inspected,
            Err(e) => {
                warn!(source = SOURCE, error = %e, "Inspect lookup failed, skipping listing");
                return None;
            }
        };

        let record = Wear::try_new(inspected.wear)
            .and_then(|wear| NormalizedRecord::try_new(self.locator.hash_name(), wear, pending.price));
        match record {
            Ok(record) => {
                let record = record.with_link(pending.buy_link);
                Some(match inspected.seed {
                    Some(seed) => record.with_seed(seed),
                    None => record,
                })
            }
            Err(e) => {
                warn!(source = SOURCE, error = %e, "Invalid listing, skipping");
                None
            }
        }
    }
}

#[async_trait]
impl Normalizer for SteamApiNormalizer {
    type Output = NormalizedRecord;

    async fn normalize(&self, document: RawDocument) -> Result<Vec<NormalizedRecord>> {
        let RawDocument::Json(mut page) = document else {
            return Err(Error::malformed(SOURCE, "expected a JSON render page"));
        };
        let listing_info = page
            .get_mut("listinginfo")
            .map(Value::take)
            .ok_or_else(|| Error::malformed(SOURCE, "missing listinginfo"))?;

        // An empty result set is serialized as `[]` rather than `{}`.
        if listing_info.as_array().is_some_and(Vec::is_empty) {
            return Ok(Vec::new());
        }
        let Value::Object(listings) = listing_info else {
            return Err(Error::malformed(SOURCE, "listinginfo is not an object"));
        };
        let mut pending = Vec::with_capacity(listings.len());
        for (id, listing) in listings {
            let listing: Listing = serde_json::from_value(listing)
                .map_err(|e| Error::malformed(SOURCE, format!("listing {id}: {e}")))?;
            pending.extend(self.pending(listing));
        }

        let records = join_all(pending.into_iter().map(|p| self.inspect(p))).await;
        Ok(records.into_iter().flatten().collect())
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}
