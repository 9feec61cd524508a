//! Paging fetcher for CS.MONEY sell orders, and the per-asset price client.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::AssetPrice;
use super::locator::CsmoneyLocator;
use super::SOURCE;
use crate::adapter::outbound::http::HttpSource;
use crate::error::{Error, Result};
use crate::port::{Fetcher, RawDocument};
use crate::stream::StreamWriter;

/// Walks listing pages until the API reports a truthy `error`.
pub struct CsmoneyFetcher {
    http: HttpSource,
    locator: CsmoneyLocator,
    max_pages: usize,
}

impl CsmoneyFetcher {
    #[must_use]
    pub const fn new(http: HttpSource, locator: CsmoneyLocator, max_pages: usize) -> Self {
        Self {
            http,
            locator,
            max_pages,
        }
    }
}

#[async_trait]
impl Fetcher for CsmoneyFetcher {
    async fn fetch(&self, out: &StreamWriter<RawDocument>) -> Result<()> {
        for page in 0..self.max_pages {
            let url = self.locator.page_url(page);
            let body = self.http.get_text(url.as_str()).await?;

            let Ok(document) = serde_json::from_str::<Value>(&body) else {
                warn!(source = SOURCE, page, "Listing page is not JSON, skipping");
                continue;
            };
            if document.get("error").is_some_and(is_truthy) {
                debug!(source = SOURCE, page, "No more listing pages");
                return Ok(());
            }
            out.put(RawDocument::Json(document)).await?;
        }

        warn!(source = SOURCE, max_pages = self.max_pages, "Stopped paging at page limit");
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        SOURCE
    }
}

/// `false`, `0`, `""`, `[]`, `{}` and `null` do not end paging.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Price of one listed asset, before fees.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn default_price(&self, asset_id: u64) -> Result<Decimal>;
}

/// [`PriceLookup`] backed by the CS.MONEY price endpoint.
pub struct CsmoneyPriceClient {
    http: HttpSource,
    locator: CsmoneyLocator,
}

impl CsmoneyPriceClient {
    #[must_use]
    pub const fn new(http: HttpSource, locator: CsmoneyLocator) -> Self {
        Self { http, locator }
    }
}

#[async_trait]
impl PriceLookup for CsmoneyPriceClient {
    async fn default_price(&self, asset_id: u64) -> Result<Decimal> {
        let url = self.locator.price_url(asset_id);
        let body = self.http.get_json(url.as_str()).await?;
        let price: AssetPrice = serde_json::from_value(body)
            .map_err(|e| Error::malformed(SOURCE, format!("price of asset {asset_id}: {e}")))?;
        Ok(price.default_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_truthy_errors_end_paging() {
        for falsy in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should not end paging");
        }
        for truthy in [json!(true), json!(2), json!("no items"), json!({ "code": 1 })] {
            assert!(is_truthy(&truthy), "{truthy} should end paging");
        }
    }
}
