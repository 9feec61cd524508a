//! CS.MONEY market and wiki configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;

/// Listing and price endpoints of the CS.MONEY market.
#[derive(Debug, Clone, Deserialize)]
pub struct CsmoneyConfig {
    /// Sell-order listing endpoint.
    #[serde(default = "default_listings_url")]
    pub listings_url: String,
    /// Per-asset price endpoint.
    #[serde(default = "default_price_url")]
    pub price_url: String,
    /// Listings requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Hard stop for paging when the API never reports an end.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Marketplace fee deducted from the listed price, in percent.
    #[serde(default = "default_fee_percent")]
    pub fee_percent: Decimal,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_listings_url() -> String {
    "https://cs.money/1.0/market/sell-orders".into()
}

fn default_price_url() -> String {
    "https://cs.money/skin_info".into()
}

const fn default_page_size() -> usize {
    60
}

const fn default_max_pages() -> usize {
    20
}

fn default_fee_percent() -> Decimal {
    Decimal::from(8)
}

impl Default for CsmoneyConfig {
    fn default() -> Self {
        Self {
            listings_url: default_listings_url(),
            price_url: default_price_url(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            fee_percent: default_fee_percent(),
            http: HttpConfig::default(),
        }
    }
}

/// CS.MONEY wiki, used to canonicalize item names.
#[derive(Debug, Clone, Deserialize)]
pub struct CsmoneyWikiConfig {
    #[serde(default = "default_wiki_url")]
    pub base_url: String,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_wiki_url() -> String {
    "https://wiki.cs.money/weapons".into()
}

impl Default for CsmoneyWikiConfig {
    fn default() -> Self {
        Self {
            base_url: default_wiki_url(),
            http: HttpConfig::default(),
        }
    }
}
