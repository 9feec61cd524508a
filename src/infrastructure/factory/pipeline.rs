//! Pipeline registry.
//!
//! Owns the per-market configuration and shared clients, and wires a locator,
//! fetcher and normalizer into a [`SourcePipeline`] for each
//! [`PipelineId`]. Construction performs no I/O.

use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::csmoney::{
    wiki_url, CsmoneyConfig, CsmoneyFetcher, CsmoneyLocator, CsmoneyNormalizer,
    CsmoneyPriceClient, CsmoneyWikiConfig, WikiFetcher, WikiNormalizer,
};
use crate::adapter::outbound::http::HttpSource;
use crate::adapter::outbound::steam::{
    HttpInspectClient, InspectLookup, SteamApiFetcher, SteamApiNormalizer, SteamBrowserFetcher,
    SteamBrowserNormalizer, SteamConfig, SteamLocator,
};
use crate::application::pipeline::{Pipeline, PipelineFactory, PipelineId, SourcePipeline};
use crate::domain::SearchParameters;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::ListingBrowser;

/// Builds every known pipeline from configuration.
pub struct PipelineRegistry {
    capacity: usize,
    csmoney: CsmoneyConfig,
    csmoney_http: HttpSource,
    wiki: CsmoneyWikiConfig,
    wiki_http: HttpSource,
    wiki_normalizer: Arc<WikiNormalizer>,
    steam: SteamConfig,
    steam_http: HttpSource,
    inspector: Arc<dyn InspectLookup>,
    browser: Option<Arc<dyn ListingBrowser>>,
}

impl PipelineRegistry {
    /// Build the shared clients for every market section of `config`.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &Config) -> Result<Self> {
        let markets = &config.markets;
        let steam_http = HttpSource::from_config(&markets.steam.http);
        let inspector = HttpInspectClient::new(steam_http.clone(), &markets.steam.inspect_url)?;
        let wiki_normalizer = WikiNormalizer::new().map_err(|e| ConfigError::InvalidValue {
            field: "csmoney_wiki",
            reason: e.to_string(),
        })?;

        Ok(Self {
            capacity: config.pipeline.stream_capacity,
            csmoney: markets.csmoney.clone(),
            csmoney_http: HttpSource::from_config(&markets.csmoney.http),
            wiki: markets.csmoney_wiki.clone(),
            wiki_http: HttpSource::from_config(&markets.csmoney_wiki.http),
            wiki_normalizer: Arc::new(wiki_normalizer),
            steam: markets.steam.clone(),
            steam_http,
            inspector: Arc::new(inspector),
            browser: None,
        })
    }

    /// Enable the `steam-browser` pipeline with the given driver.
    #[must_use]
    pub fn with_browser(mut self, browser: Arc<dyn ListingBrowser>) -> Self {
        self.browser = Some(browser);
        self
    }

    /// Replace the inspect service used by `steam-api`.
    #[must_use]
    pub fn with_inspector(mut self, inspector: Arc<dyn InspectLookup>) -> Self {
        self.inspector = inspector;
        self
    }

    /// Whether `id` can be built with the current wiring.
    #[must_use]
    pub fn is_available(&self, id: PipelineId) -> bool {
        match id {
            PipelineId::SteamBrowser => self.browser.is_some(),
            PipelineId::Csmoney | PipelineId::CsmoneyWiki | PipelineId::SteamApi => true,
        }
    }

    fn csmoney(&self, params: &SearchParameters) -> Result<Pipeline> {
        let config = &self.csmoney;
        let locator = CsmoneyLocator::new(
            &config.listings_url,
            &config.price_url,
            config.page_size,
            params,
        )?;
        let fetcher = CsmoneyFetcher::new(self.csmoney_http.clone(), locator.clone(), config.max_pages);
        let prices = CsmoneyPriceClient::new(self.csmoney_http.clone(), locator);
        let normalizer =
            CsmoneyNormalizer::new(Arc::new(prices), config.fee_percent, params.to_string());

        Ok(Pipeline::Listings(SourcePipeline::new(
            PipelineId::Csmoney,
            Arc::new(fetcher),
            Arc::new(normalizer),
            self.capacity,
        )))
    }

    fn csmoney_wiki(&self, params: &SearchParameters) -> Result<Pipeline> {
        let url = wiki_url(&self.wiki.base_url, params)?;
        let fetcher = WikiFetcher::new(self.wiki_http.clone(), url);

        Ok(Pipeline::Identity(SourcePipeline::new(
            PipelineId::CsmoneyWiki,
            Arc::new(fetcher),
            self.wiki_normalizer.clone(),
            self.capacity,
        )))
    }

    fn steam_api(&self, params: &SearchParameters) -> Result<Pipeline> {
        let config = &self.steam;
        let locator = SteamLocator::new(&config.market_url, params)?;
        let fetcher = SteamApiFetcher::new(
            self.steam_http.clone(),
            locator.clone(),
            config.page_size,
            config.max_pages,
            config.currency,
        );
        let normalizer = SteamApiNormalizer::new(locator, Arc::clone(&self.inspector));

        Ok(Pipeline::Listings(SourcePipeline::new(
            PipelineId::SteamApi,
            Arc::new(fetcher),
            Arc::new(normalizer),
            self.capacity,
        )))
    }

    fn steam_browser(&self, params: &SearchParameters) -> Result<Pipeline> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| ConfigError::PipelineUnavailable {
                pipeline: PipelineId::SteamBrowser.to_string(),
                reason: "no browser driver configured".into(),
            })?;
        let locator = SteamLocator::new(&self.steam.market_url, params)?;
        let fetcher = SteamBrowserFetcher::new(
            Arc::clone(browser),
            locator.listing_url().clone(),
            self.steam.max_pages,
        );
        let normalizer = SteamBrowserNormalizer::new(locator);

        Ok(Pipeline::Listings(SourcePipeline::new(
            PipelineId::SteamBrowser,
            Arc::new(fetcher),
            Arc::new(normalizer),
            self.capacity,
        )))
    }
}

impl PipelineFactory for PipelineRegistry {
    fn create(&self, id: PipelineId, params: &SearchParameters) -> Result<Pipeline> {
        debug!(pipeline = %id, search = %params, "Building pipeline");
        match id {
            PipelineId::Csmoney => self.csmoney(params),
            PipelineId::CsmoneyWiki => self.csmoney_wiki(params),
            PipelineId::SteamBrowser => self.steam_browser(params),
            PipelineId::SteamApi => self.steam_api(params),
        }
    }
}
