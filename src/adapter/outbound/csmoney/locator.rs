//! Request descriptions for CS.MONEY endpoints.

use url::Url;

use crate::domain::SearchParameters;
use crate::error::Result;

/// CS.MONEY application id for the game's items.
const APP_ID: &str = "730";

/// Builds listing page and price URLs for one search.
#[derive(Debug, Clone)]
pub struct CsmoneyLocator {
    listings: Url,
    price: Url,
    page_size: usize,
}

impl CsmoneyLocator {
    /// Validate the base URLs and fix the query for `params`.
    pub fn new(
        listings_url: &str,
        price_url: &str,
        page_size: usize,
        params: &SearchParameters,
    ) -> Result<Self> {
        let mut listings = Url::parse(listings_url)?;
        listings
            .query_pairs_mut()
            .append_pair("hasTradeLock", "false")
            .append_pair("isStatTrak", bool_str(params.is_stattrak()))
            .append_pair("limit", &page_size.to_string())
            .append_pair(
                "name",
                &format!("{} {}", params.item_class(), params.pattern()),
            )
            .append_pair("order", "asc")
            .append_pair("priceWithBonus", "35")
            .append_pair("quality", params.quality().code())
            .append_pair("sort", "float")
            .append_pair("withStack", "true");

        Ok(Self {
            listings,
            price: Url::parse(price_url)?,
            page_size,
        })
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Listing page `page`, counted from zero.
    #[must_use]
    pub fn page_url(&self, page: usize) -> Url {
        let mut url = self.listings.clone();
        url.query_pairs_mut()
            .append_pair("offset", &(page * self.page_size).to_string());
        url
    }

    #[must_use]
    pub fn price_url(&self, asset_id: u64) -> Url {
        let mut url = self.price.clone();
        url.query_pairs_mut()
            .append_pair("appId", APP_ID)
            .append_pair("id", &asset_id.to_string())
            .append_pair("isBot", "true")
            .append_pair("botInventory", "true");
        url
    }
}

/// Wiki page of one item: `<base>/<item-class>/<pattern>`.
pub fn wiki_url(base_url: &str, params: &SearchParameters) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    let class = slug(params.item_class());
    let pattern = slug(&params.pattern().replace('\'', ""));
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(&class).push(&pattern);
    }
    Ok(url)
}

fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

const fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
