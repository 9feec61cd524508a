//! Composition root: wires adapters into the search and watch services.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::catalog::FileCatalog;
use crate::adapter::outbound::directory::StaticRecipients;
use crate::adapter::outbound::scheduler::TokioScheduler;
use crate::application::orchestration::{SearchService, WatchService};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::{build_notifier_registry, PipelineRegistry};
use crate::port::{ListingBrowser, Notifier, NotifierRegistry, RecipientId};

/// Fully wired runtime services.
pub struct App {
    pub search: Arc<SearchService>,
    pub watch: WatchService,
    pub catalog: Arc<FileCatalog>,
    pub recipients: Arc<StaticRecipients>,
    notifier: Arc<NotifierRegistry>,
}

impl App {
    /// Wire every component from `config`.
    ///
    /// Must be called from within a Tokio runtime.
    #[allow(clippy::result_large_err)]
    pub fn build(config: &Config) -> Result<Self> {
        Self::build_with(config, None)
    }

    /// Like [`App::build`], with a browser driver for `steam-browser`.
    #[allow(clippy::result_large_err)]
    pub fn build_with(config: &Config, browser: Option<Arc<dyn ListingBrowser>>) -> Result<Self> {
        let mut registry = PipelineRegistry::from_config(config)?;
        if let Some(browser) = browser {
            registry = registry.with_browser(browser);
        }

        let seed = config.catalog.items.clone();
        let catalog = Arc::new(match config.catalog.file() {
            Some(path) => FileCatalog::open(path, seed)?,
            None => FileCatalog::ephemeral(seed),
        });
        let recipients = Arc::new(StaticRecipients::new(
            config.telegram.recipients.iter().copied().map(RecipientId::new),
        ));
        let notifier = Arc::new(build_notifier_registry(config));

        let search = Arc::new(SearchService::new(
            Arc::new(registry),
            catalog.clone(),
            notifier.clone(),
            config.matching.search_settings(),
        ));
        let watch = WatchService::new(
            Arc::new(TokioScheduler::new()),
            Arc::clone(&search),
            recipients.clone(),
            config.schedule.interval(),
        );

        info!(
            source_a = %config.matching.source_a,
            source_b = %config.matching.source_b,
            catalog = catalog.len(),
            "Application wired"
        );

        Ok(Self {
            search,
            watch,
            catalog,
            recipients,
            notifier,
        })
    }

    /// Flush pending notifications. Call before the process exits.
    pub async fn shutdown(&self) {
        self.notifier.shutdown().await;
        info!("Application stopped");
    }
}
