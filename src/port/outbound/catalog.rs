//! Catalog and recipient directory ports.

use async_trait::async_trait;

use crate::domain::{Quality, SearchParameters};
use crate::error::Result;

use super::notifier::RecipientId;

/// Persistent catalog of items worth searching for.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// One item to search for, drawn at random; `None` when the catalog is empty.
    async fn next_random_search(&self) -> Result<Option<SearchParameters>>;

    /// Remember an item. Returns `false` when it was already known.
    async fn record_known_item(
        &self,
        item_class: &str,
        pattern: &str,
        stattrak: bool,
        qualities: &[Quality],
    ) -> Result<bool>;
}

/// Everyone who receives broadcast results.
#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    async fn recipients(&self) -> Result<Vec<RecipientId>>;
}
