//! Inspect links and the service that resolves them to wear and seed.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::adapter::outbound::http::HttpSource;
use crate::error::{Result, TransportError};

/// Decoded `S…A…D…` / `M…A…D…` tail of an inspect link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectParams {
    /// Owner id; zero for market listings.
    pub s: u64,
    /// Market listing id; zero for inventory items.
    pub m: u64,
    pub a: u64,
    pub d: u64,
}

impl InspectParams {
    /// Parse the parameters from a full inspect link.
    #[must_use]
    pub fn parse(link: &str) -> Option<Self> {
        let tail = link
            .rsplit_once("csgo_econ_action_preview")
            .map_or(link, |(_, tail)| tail);
        let tail = tail.trim_start_matches("%20").trim();

        let (owner, rest) = tail.split_once('A')?;
        let (a, d) = rest.split_once('D')?;
        let id: u64 = owner.get(1..)?.parse().ok()?;
        let (s, m) = match owner.get(..1)? {
            "S" => (id, 0),
            "M" => (0, id),
            _ => return None,
        };
        Some(Self {
            s,
            m,
            a: a.parse().ok()?,
            d: d.parse().ok()?,
        })
    }
}

/// Wear float and paint seed of one inspected item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inspected {
    pub wear: f64,
    pub seed: Option<u32>,
}

/// Resolves an inspect link to the item's wear and seed.
#[async_trait]
pub trait InspectLookup: Send + Sync {
    async fn inspect(&self, link: &str) -> Result<Inspected>;
}

#[derive(Debug, Deserialize)]
struct InspectResponse {
    iteminfo: ItemInfo,
}

#[derive(Debug, Deserialize)]
struct ItemInfo {
    floatvalue: f64,
    #[serde(default)]
    paintseed: Option<u32>,
}

/// [`InspectLookup`] backed by an HTTP inspect service (`GET <base>?url=<link>`).
pub struct HttpInspectClient {
    http: HttpSource,
    base: Url,
}

impl HttpInspectClient {
    pub fn new(http: HttpSource, base_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            base: Url::parse(base_url)?,
        })
    }
}

#[async_trait]
impl InspectLookup for HttpInspectClient {
    async fn inspect(&self, link: &str) -> Result<Inspected> {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair("url", link);

        let body = self.http.get_json(url.as_str()).await?;
        let response: InspectResponse = serde_json::from_value(body)
            .map_err(|e| TransportError::Inspect(format!("{link}: {e}")))?;
        Ok(Inspected {
            wear: response.iteminfo.floatvalue,
            seed: response.iteminfo.paintseed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_market_listing_links() {
        let link = "steam://rungame/730/76561202255233023/+csgo_econ_action_preview%20M4204491374557405853A38650385373D7845329391387834116";
        assert_eq!(
            InspectParams::parse(link),
            Some(InspectParams {
                s: 0,
                m: 4_204_491_374_557_405_853,
                a: 38_650_385_373,
                d: 7_845_329_391_387_834_116,
            })
        );
    }

    #[test]
    fn parses_inventory_links() {
        let link = "steam://rungame/730/76561202255233023/+csgo_econ_action_preview S76561198000000000A123D456";
        let params = InspectParams::parse(link).unwrap();
        assert_eq!((params.s, params.m, params.a, params.d), (76_561_198_000_000_000, 0, 123, 456));
    }

    #[test]
    fn rejects_unknown_shapes() {
        assert_eq!(InspectParams::parse("steam://nothing"), None);
        assert_eq!(InspectParams::parse("X1A2D3"), None);
        assert_eq!(InspectParams::parse("M1A2Dx"), None);
    }
}
