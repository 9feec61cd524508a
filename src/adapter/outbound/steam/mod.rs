//! Steam Community Market adapters.
//!
//! Two ways in: the JSON render API, which needs an inspect service for wear
//! and seed, and a browser session driven through [`crate::port::ListingBrowser`].

pub mod api;
pub mod browser;
pub mod inspect;
pub mod locator;
pub mod settings;

pub use api::{SteamApiFetcher, SteamApiNormalizer};
pub use browser::{SteamBrowserFetcher, SteamBrowserNormalizer};
pub use inspect::{HttpInspectClient, InspectLookup, InspectParams, Inspected};
pub use locator::{ListingRef, SteamLocator};
pub use settings::SteamConfig;
