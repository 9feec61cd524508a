//! CS.MONEY adapters: paged sell-order listings and the item wiki.
//!
//! The listing pipeline pays one price request per listing that carries a
//! wear overpay; listings without one are not comparable and are dropped.

mod dto;
pub mod fetcher;
pub mod locator;
pub mod normalizer;
pub mod settings;
pub mod wiki;

pub use fetcher::{CsmoneyFetcher, CsmoneyPriceClient, PriceLookup};
pub use locator::{wiki_url, CsmoneyLocator};
pub use normalizer::CsmoneyNormalizer;
pub use settings::{CsmoneyConfig, CsmoneyWikiConfig};
pub use wiki::{WikiFetcher, WikiNormalizer};

pub(crate) const SOURCE: &str = "csmoney";
