//! In-memory item catalog.

use async_trait::async_trait;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Quality, SearchParameters};
use crate::error::Result;
use crate::port::Catalog;

/// One known item and the quality tiers it exists in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub item_class: String,
    pub pattern: String,
    #[serde(default)]
    pub stattrak: bool,
    #[serde(default)]
    pub qualities: Vec<Quality>,
}

impl CatalogItem {
    fn same_item(&self, item_class: &str, pattern: &str, stattrak: bool) -> bool {
        self.stattrak == stattrak
            && self.item_class.eq_ignore_ascii_case(item_class)
            && self.pattern.eq_ignore_ascii_case(pattern)
    }
}

/// Catalog held in memory, seeded from configuration.
///
/// Items are unique by class, pattern and StatTrak flag, compared without
/// regard to ASCII case.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<Vec<CatalogItem>>,
}

/// What [`InMemoryCatalog::merge`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    Added,
    /// Already known; at least one new quality was attached.
    Widened,
    Unchanged,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(seed: Vec<CatalogItem>) -> Self {
        let catalog = Self::default();
        for item in seed {
            catalog.merge(&item.item_class, &item.pattern, item.stattrak, &item.qualities);
        }
        catalog
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    #[must_use]
    pub fn items(&self) -> Vec<CatalogItem> {
        self.items.read().clone()
    }

    /// Insert the item, or add unseen qualities to the known one.
    pub fn merge(
        &self,
        item_class: &str,
        pattern: &str,
        stattrak: bool,
        qualities: &[Quality],
    ) -> Merge {
        let mut items = self.items.write();
        if let Some(known) = items
            .iter_mut()
            .find(|known| known.same_item(item_class, pattern, stattrak))
        {
            let before = known.qualities.len();
            for quality in qualities {
                if !known.qualities.contains(quality) {
                    known.qualities.push(*quality);
                }
            }
            return if known.qualities.len() > before {
                Merge::Widened
            } else {
                Merge::Unchanged
            };
        }

        debug!(item_class, pattern, stattrak, "Cataloging item");
        items.push(CatalogItem {
            item_class: item_class.to_string(),
            pattern: pattern.to_string(),
            stattrak,
            qualities: qualities.to_vec(),
        });
        Merge::Added
    }

    /// A random item at one of its known qualities.
    #[must_use]
    pub fn draw(&self) -> Option<SearchParameters> {
        let mut rng = rand::thread_rng();
        let items = self.items.read();
        let item = items.choose(&mut rng)?;
        let quality = item
            .qualities
            .choose(&mut rng)
            .copied()
            .unwrap_or_default();
        Some(SearchParameters::new(
            item.item_class.clone(),
            item.pattern.clone(),
            quality,
            item.stattrak,
        ))
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn next_random_search(&self) -> Result<Option<SearchParameters>> {
        Ok(self.draw())
    }

    async fn record_known_item(
        &self,
        item_class: &str,
        pattern: &str,
        stattrak: bool,
        qualities: &[Quality],
    ) -> Result<bool> {
        Ok(self.merge(item_class, pattern, stattrak, qualities) == Merge::Added)
    }
}
