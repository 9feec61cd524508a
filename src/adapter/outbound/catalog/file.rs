//! JSON file persistence for the catalog.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::memory::{CatalogItem, InMemoryCatalog, Merge};
use crate::domain::{Quality, SearchParameters};
use crate::error::{ConfigError, Result};
use crate::port::Catalog;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Stored {
    #[serde(default)]
    items: Vec<CatalogItem>,
}

/// Catalog whose items survive restarts.
///
/// The whole catalog is rewritten whenever an item is added or gains a
/// quality. Writes go to a sibling temp file first and are renamed into
/// place. Without a path the catalog lives in memory only.
#[derive(Debug)]
pub struct FileCatalog {
    items: InMemoryCatalog,
    path: Option<PathBuf>,
    write: Mutex<()>,
}

impl FileCatalog {
    /// Memory-only catalog.
    #[must_use]
    pub fn ephemeral(seed: Vec<CatalogItem>) -> Self {
        Self {
            items: InMemoryCatalog::new(seed),
            path: None,
            write: Mutex::new(()),
        }
    }

    /// Load the stored items at `path`, then merge `seed` into them.
    ///
    /// A missing file is an empty catalog. An unreadable one is an error.
    #[allow(clippy::result_large_err)]
    pub fn open(path: impl Into<PathBuf>, seed: Vec<CatalogItem>) -> Result<Self> {
        let path = path.into();
        let stored = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<Stored>(&text).map_err(|e| {
                ConfigError::InvalidValue {
                    field: "catalog.path",
                    reason: format!("{}: {e}", path.display()),
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Stored::default(),
            Err(e) => return Err(e.into()),
        };
        info!(path = %path.display(), stored = stored.items.len(), "Catalog loaded");

        let mut items = stored.items;
        items.extend(seed);
        Ok(Self {
            items: InMemoryCatalog::new(items),
            path: Some(path),
            write: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> Vec<CatalogItem> {
        self.items.items()
    }

    async fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let _guard = self.write.lock().await;

        let body = serde_json::to_string_pretty(&Stored {
            items: self.items.items(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let staging = path.with_extension("tmp");
        tokio::fs::write(&staging, body).await?;
        if let Err(e) = tokio::fs::rename(&staging, path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }

        debug!(path = %path.display(), items = self.items.len(), "Catalog saved");
        Ok(())
    }
}

#[async_trait]
impl Catalog for FileCatalog {
    async fn next_random_search(&self) -> Result<Option<SearchParameters>> {
        Ok(self.items.draw())
    }

    async fn record_known_item(
        &self,
        item_class: &str,
        pattern: &str,
        stattrak: bool,
        qualities: &[Quality],
    ) -> Result<bool> {
        let merged = self.items.merge(item_class, pattern, stattrak, qualities);
        if merged != Merge::Unchanged {
            self.persist().await?;
        }
        Ok(merged == Merge::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn redline() -> CatalogItem {
        CatalogItem {
            item_class: "AK-47".into(),
            pattern: "Redline".into(),
            stattrak: false,
            qualities: vec![Quality::FieldTested],
        }
    }

    #[tokio::test]
    async fn recorded_items_are_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");

        let first = FileCatalog::open(&path, Vec::new()).unwrap();
        assert!(first.is_empty());
        assert!(first
            .record_known_item("AWP", "Asiimov", false, &[Quality::FieldTested])
            .await
            .unwrap());

        let second = FileCatalog::open(&path, vec![redline()]).unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second.items()[0].item_class, "AWP");
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn widened_qualities_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let catalog = FileCatalog::open(&path, vec![redline()]).unwrap();
        assert!(!catalog
            .record_known_item("AK-47", "Redline", false, &[Quality::MinimalWear])
            .await
            .unwrap());

        let reopened = FileCatalog::open(&path, Vec::new()).unwrap();
        assert_eq!(
            reopened.items()[0].qualities,
            vec![Quality::FieldTested, Quality::MinimalWear]
        );
    }

    #[tokio::test]
    async fn unchanged_items_do_not_touch_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let catalog = FileCatalog::open(&path, vec![redline()]).unwrap();
        catalog
            .record_known_item("AK-47", "Redline", false, &[Quality::FieldTested])
            .await
            .unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileCatalog::open(&path, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "catalog.path", .. })
        ));
    }

    #[tokio::test]
    async fn ephemeral_catalog_writes_nothing() {
        let catalog = FileCatalog::ephemeral(Vec::new());
        assert!(catalog.path().is_none());
        assert!(catalog
            .record_known_item("AK-47", "Redline", false, &[])
            .await
            .unwrap());
        assert_eq!(catalog.len(), 1);
    }
}
