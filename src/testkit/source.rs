//! Scripted pipeline stages and fixed listing sources.
//!
//! - [`ScriptedFetcher`] writes numbered documents, optionally failing after
//!   a given count.
//! - [`ScriptedNormalizer`] answers document `i` with batch `i`, after an
//!   optional per-document delay, so completion order can be forced.
//! - [`StaticSource`] and [`FailingSource`] stand in for whole pipelines in
//!   matching tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::matching::ListingSource;
use crate::application::pipeline::{PipelineId, SourcePipeline};
use crate::domain::NormalizedRecord;
use crate::error::{Error, Result, TransportError};
use crate::port::{Fetcher, Normalizer, RawDocument};
use crate::stream::StreamWriter;

/// Stage name used by scripted fetchers and normalizers.
pub const SCRIPTED: &str = "scripted";

/// Writes `RawDocument::Json(i)` for `i` in `0..documents`.
pub struct ScriptedFetcher {
    documents: usize,
    fail_after: Option<usize>,
    written: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    pub fn new(documents: usize) -> Self {
        Self {
            documents,
            fail_after: None,
            written: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail with a transport error once `count` documents were written.
    pub fn fail_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Shared counter of documents written so far.
    pub fn written(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.written)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, out: &StreamWriter<RawDocument>) -> Result<()> {
        for index in 0..self.documents {
            if self.fail_after == Some(index) {
                return Err(TransportError::Status {
                    url: format!("scripted://{index}"),
                    status: 503,
                }
                .into());
            }
            out.put(RawDocument::Json(serde_json::json!(index))).await?;
            self.written.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        SCRIPTED
    }
}

/// Answers document `i` with `batches[i]`; a `None` batch is a malformed response.
pub struct ScriptedNormalizer<O> {
    batches: Vec<Option<Vec<O>>>,
    delays: Vec<Duration>,
}

impl<O: Clone + Send + Sync + 'static> ScriptedNormalizer<O> {
    pub fn new(batches: Vec<Vec<O>>) -> Self {
        Self {
            batches: batches.into_iter().map(Some).collect(),
            delays: Vec::new(),
        }
    }

    /// Batches where `None` makes the matching document fail.
    pub fn with_failures(batches: Vec<Option<Vec<O>>>) -> Self {
        Self {
            batches,
            delays: Vec::new(),
        }
    }

    /// Sleep `delays[i]` before answering document `i`.
    pub fn with_delays(mut self, delays: Vec<Duration>) -> Self {
        self.delays = delays;
        self
    }
}

#[async_trait]
impl<O: Clone + Send + Sync + 'static> Normalizer for ScriptedNormalizer<O> {
    type Output = O;

    async fn normalize(&self, document: RawDocument) -> Result<Vec<O>> {
        let index = match document {
            RawDocument::Json(value) => value.as_u64().map(|i| i as usize),
            _ => None,
        }
        .ok_or_else(|| Error::malformed(SCRIPTED, "expected a document index"))?;

        if let Some(delay) = self.delays.get(index) {
            tokio::time::sleep(*delay).await;
        }
        match self.batches.get(index) {
            Some(Some(batch)) => Ok(batch.clone()),
            _ => Err(Error::malformed(SCRIPTED, format!("no batch for document {index}"))),
        }
    }

    fn source_name(&self) -> &'static str {
        SCRIPTED
    }
}

/// A pipeline emitting `batches` in order, one document per batch.
pub fn scripted_pipeline<O: Clone + Send + Sync + 'static>(
    id: PipelineId,
    batches: Vec<Vec<O>>,
) -> SourcePipeline<O> {
    let documents = batches.len();
    SourcePipeline::new(
        id,
        Arc::new(ScriptedFetcher::new(documents)),
        Arc::new(ScriptedNormalizer::new(batches)),
        4,
    )
}

/// A listing source that yields a fixed list, optionally after a delay.
pub struct StaticSource {
    name: &'static str,
    records: Vec<NormalizedRecord>,
    delay: Option<Duration>,
    finished: Arc<AtomicBool>,
}

impl StaticSource {
    pub fn new(name: &'static str, records: Vec<NormalizedRecord>) -> Self {
        Self {
            name,
            records,
            delay: None,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set once `collect` returned its records.
    pub fn finished(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.finished)
    }

    pub fn boxed(self) -> Box<dyn ListingSource> {
        Box::new(self)
    }
}

#[async_trait]
impl ListingSource for StaticSource {
    fn name(&self) -> String {
        self.name.to_string()
    }

    async fn collect(self: Box<Self>) -> Result<Vec<NormalizedRecord>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.finished.store(true, Ordering::SeqCst);
        Ok(self.records)
    }
}

/// A listing source that fails with a transport error.
pub struct FailingSource {
    name: &'static str,
}

impl FailingSource {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn boxed(self) -> Box<dyn ListingSource> {
        Box::new(self)
    }
}

#[async_trait]
impl ListingSource for FailingSource {
    fn name(&self) -> String {
        self.name.to_string()
    }

    async fn collect(self: Box<Self>) -> Result<Vec<NormalizedRecord>> {
        Err(TransportError::Browser(format!("{} is unreachable", self.name)).into())
    }
}
