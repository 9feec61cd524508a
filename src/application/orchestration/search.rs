//! Search use case: resolve, match, notify.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::matching::{MatchingEngine, MatchingRules};
use crate::application::pipeline::{PipelineFactory, PipelineId};
use crate::domain::{MatchResult, SearchParameters};
use crate::error::{Error, Result};
use crate::port::{Catalog, Event, Notifier, RecipientDirectory, RecipientId};

/// Which pipelines a search pits against each other, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Pool side; its adjusted price is the denominator.
    pub source_a: PipelineId,
    /// Walked side, in arrival order.
    pub source_b: PipelineId,
    pub rules: MatchingRules,
    /// Canonicalize interactive input through the wiki first.
    pub resolve_names: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            source_a: PipelineId::Csmoney,
            source_b: PipelineId::SteamApi,
            rules: MatchingRules::default(),
            resolve_names: true,
        }
    }
}

/// Runs matching rounds and forwards their outcome to the notifier.
pub struct SearchService {
    factory: Arc<dyn PipelineFactory>,
    catalog: Arc<dyn Catalog>,
    notifier: Arc<dyn Notifier>,
    settings: SearchSettings,
}

impl SearchService {
    pub fn new(
        factory: Arc<dyn PipelineFactory>,
        catalog: Arc<dyn Catalog>,
        notifier: Arc<dyn Notifier>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            factory,
            catalog,
            notifier,
            settings,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// One full round for `params`, without notifying anyone.
    pub async fn find_matches(&self, params: &SearchParameters) -> Result<Vec<MatchResult>> {
        let source_a = self.factory.listings(self.settings.source_a, params)?;
        let source_b = self.factory.listings(self.settings.source_b, params)?;

        let round = MatchingEngine::new(self.settings.rules)
            .run(Box::new(source_a), Box::new(source_b))
            .await?;
        Ok(round.collect().await)
    }

    /// Canonicalize the item name through the wiki pipeline and remember it.
    pub async fn resolve(&self, params: &SearchParameters) -> Result<SearchParameters> {
        let identities = self
            .factory
            .identity(PipelineId::CsmoneyWiki, params)?
            .run()
            .await?;
        let identity = identities
            .into_iter()
            .next()
            .ok_or_else(|| Error::NameResolution(params.to_string()))?;

        let added = self
            .catalog
            .record_known_item(
                &identity.item_class,
                &identity.pattern,
                params.is_stattrak(),
                &identity.known_qualities(),
            )
            .await?;
        if added {
            info!(item_class = %identity.item_class, pattern = %identity.pattern, "New item cataloged");
        }

        Ok(params.renamed(identity.item_class, identity.pattern))
    }

    /// Interactive search on behalf of `recipient`.
    ///
    /// Every result is forwarded to the recipient; an empty round and a failed
    /// round are reported to them as well. The error is also returned.
    pub async fn search(
        &self,
        recipient: RecipientId,
        params: SearchParameters,
    ) -> Result<Vec<MatchResult>> {
        match self.resolve_and_match(&params).await {
            Ok(results) => {
                if results.is_empty() {
                    self.notifier
                        .notify(recipient, Event::NoMatches { search: params });
                }
                for result in &results {
                    self.notifier
                        .notify(recipient, Event::MatchFound(result.clone()));
                }
                Ok(results)
            }
            Err(e) => {
                warn!(%recipient, search = %params, error = %e, "Search failed");
                self.notifier.notify(
                    recipient,
                    Event::SearchFailed {
                        search: params,
                        category: e.category(),
                        reason: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    /// One scheduled round: draw an item from the catalog and broadcast
    /// every result to every recipient in `directory`.
    ///
    /// Failures are logged and swallowed so the schedule keeps running.
    pub async fn scheduled_round(&self, directory: &dyn RecipientDirectory) {
        match self.try_scheduled_round(directory).await {
            Ok(Some(sent)) => info!(sent, "Scheduled round finished"),
            Ok(None) => info!("Catalog is empty, skipping scheduled round"),
            Err(e) => warn!(error = %e, category = e.category(), "Scheduled round failed"),
        }
    }

    async fn try_scheduled_round(&self, directory: &dyn RecipientDirectory) -> Result<Option<usize>> {
        let Some(params) = self.catalog.next_random_search().await? else {
            return Ok(None);
        };
        info!(search = %params, "Scheduled round starting");

        let results = self.find_matches(&params).await?;
        if results.is_empty() {
            return Ok(Some(0));
        }

        let recipients = directory.recipients().await?;
        for result in &results {
            for recipient in &recipients {
                self.notifier
                    .notify(*recipient, Event::MatchFound(result.clone()));
            }
        }
        Ok(Some(results.len() * recipients.len()))
    }

    /// Resolve `params` when enabled, then run one round. Nobody is notified.
    pub async fn resolve_and_match(&self, params: &SearchParameters) -> Result<Vec<MatchResult>> {
        let params = if self.settings.resolve_names {
            self.resolve(params).await?
        } else {
            params.clone()
        };
        self.find_matches(&params).await
    }
}
