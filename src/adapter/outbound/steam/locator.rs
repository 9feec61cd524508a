//! Steam market URLs for one item.

use url::Url;

use crate::domain::SearchParameters;
use crate::error::Result;

/// Identifies one listing well enough to buy it from the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingRef {
    pub listing_id: u64,
    pub app_id: u32,
    pub context_id: u64,
    pub asset_id: u64,
}

#[derive(Debug, Clone)]
pub struct SteamLocator {
    listing: Url,
    hash_name: String,
}

impl SteamLocator {
    pub fn new(market_url: &str, params: &SearchParameters) -> Result<Self> {
        let hash_name = market_hash_name(params);
        let mut listing = Url::parse(market_url)?;
        if let Ok(mut segments) = listing.path_segments_mut() {
            segments.pop_if_empty().push(&hash_name);
        }
        Ok(Self { listing, hash_name })
    }

    /// Market name, e.g. `StatTrak™ AK-47 | Redline (Field-Tested)`.
    #[must_use]
    pub fn hash_name(&self) -> &str {
        &self.hash_name
    }

    #[must_use]
    pub const fn listing_url(&self) -> &Url {
        &self.listing
    }

    /// JSON render endpoint for `count` listings starting at `start`.
    #[must_use]
    pub fn render_url(&self, start: usize, count: usize, currency: u32) -> Url {
        let mut url = self.listing.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push("render").push("");
        }
        url.query_pairs_mut()
            .append_pair("start", &start.to_string())
            .append_pair("count", &count.to_string())
            .append_pair("currency", &currency.to_string());
        url
    }

    /// Listing page link that opens the buy dialog for `listing`.
    #[must_use]
    pub fn buy_link(&self, listing: ListingRef) -> String {
        format!(
            "{}#buylisting|{}|{}|{}|{}",
            self.listing, listing.listing_id, listing.app_id, listing.context_id, listing.asset_id
        )
    }
}

fn market_hash_name(params: &SearchParameters) -> String {
    let stattrak = if params.is_stattrak() { "StatTrak™ " } else { "" };
    format!(
        "{stattrak}{} | {} ({})",
        params.item_class().trim(),
        params.pattern().trim(),
        params.quality()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quality;

    fn locator() -> SteamLocator {
        let params = SearchParameters::new("AK-47", "Redline", Quality::FieldTested, false);
        SteamLocator::new("https://steamcommunity.com/market/listings/730", &params).unwrap()
    }

    #[test]
    fn listing_url_percent_encodes_the_name() {
        assert_eq!(
            locator().listing_url().as_str(),
            "https://steamcommunity.com/market/listings/730/AK-47%20|%20Redline%20(Field-Tested)"
        );
    }

    #[test]
    fn render_url_pages_through_listings() {
        let url = locator().render_url(200, 100, 1);
        assert!(url.path().ends_with("/render/"));
        assert_eq!(url.query(), Some("start=200&count=100&currency=1"));
    }

    #[test]
    fn buy_link_appends_listing_fragment() {
        let link = locator().buy_link(ListingRef {
            listing_id: 11,
            app_id: 730,
            context_id: 2,
            asset_id: 33,
        });
        assert!(link.ends_with("(Field-Tested)#buylisting|11|730|2|33"));
    }

    #[test]
    fn stattrak_prefix_is_part_of_the_name() {
        let params = SearchParameters::new("AK-47", "Redline", Quality::MinimalWear, true);
        let locator = SteamLocator::new("https://s.test/730", &params).unwrap();
        assert_eq!(locator.hash_name(), "StatTrak™ AK-47 | Redline (Minimal Wear)");
    }
}
