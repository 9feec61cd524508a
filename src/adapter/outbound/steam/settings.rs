//! Steam Community Market configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct SteamConfig {
    /// Listing page root for the game, without the item name.
    #[serde(default = "default_market_url")]
    pub market_url: String,
    /// Listings requested per render call.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Render calls (or browser pages) per search.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Steam currency code prices are converted to. `1` is USD.
    #[serde(default = "default_currency")]
    pub currency: u32,
    /// Inspect service resolving an inspect link to wear and seed.
    #[serde(default = "default_inspect_url")]
    pub inspect_url: String,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_market_url() -> String {
    "https://steamcommunity.com/market/listings/730".into()
}

const fn default_page_size() -> usize {
    100
}

const fn default_max_pages() -> usize {
    3
}

const fn default_currency() -> u32 {
    1
}

fn default_inspect_url() -> String {
    "https://api.csfloat.com/".into()
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            market_url: default_market_url(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            currency: default_currency(),
            inspect_url: default_inspect_url(),
            http: HttpConfig::default(),
        }
    }
}
