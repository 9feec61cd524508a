//! Fetcher/normalizer pair connected by streams.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::port::{Fetcher, Normalizer, RawDocument};
use crate::stream::{self, StreamReader, StreamWriter};

use super::PipelineId;

/// One marketplace source: a fetcher feeding a normalizer.
///
/// [`SourcePipeline::run`] drives both stages concurrently through a private
/// fetch stream and result stream, and returns once both have finished.
pub struct SourcePipeline<O> {
    id: PipelineId,
    fetcher: Arc<dyn Fetcher>,
    normalizer: Arc<dyn Normalizer<Output = O>>,
    capacity: usize,
}

impl<O: Send + 'static> SourcePipeline<O> {
    pub fn new(
        id: PipelineId,
        fetcher: Arc<dyn Fetcher>,
        normalizer: Arc<dyn Normalizer<Output = O>>,
        capacity: usize,
    ) -> Self {
        Self {
            id,
            fetcher,
            normalizer,
            capacity,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PipelineId {
        self.id
    }

    /// Run fetch and normalize to completion and return every output value.
    ///
    /// Output follows document arrival order even though documents are
    /// normalized concurrently. Any stage failure fails the whole run; no
    /// partial output is returned.
    pub async fn run(self) -> Result<Vec<O>> {
        let (fetch_tx, fetch_rx) = stream::channel(self.capacity);
        let (result_tx, result_rx) = stream::channel(self.capacity);

        let fetcher = Arc::clone(&self.fetcher);
        let fetch = async move {
            let fetched = fetcher.fetch(&fetch_tx).await;
            // Closed on every exit path so the normalizer cannot wait forever.
            let closed = fetch_tx.close().map_err(Into::into);
            fetched.and(closed)
        };
        let normalize = normalize_stage(Arc::clone(&self.normalizer), fetch_rx, result_tx);

        let (fetched, normalized, output) = tokio::join!(fetch, normalize, result_rx.collect());

        // A failed normalizer drops its input, which the fetcher then sees as
        // a dropped reader; report the root cause first.
        normalized?;
        fetched?;

        info!(pipeline = %self.id, values = output.len(), "Pipeline finished");
        Ok(output)
    }
}

async fn normalize_stage<O: Send + 'static>(
    normalizer: Arc<dyn Normalizer<Output = O>>,
    input: StreamReader<RawDocument>,
    output: StreamWriter<O>,
) -> Result<()> {
    let result = fan_out(normalizer, input, &output).await;
    let closed = output.close().map_err(Into::into);
    result.and(closed)
}

/// Start one unit per document as it arrives and forward results in order.
async fn fan_out<O: Send + 'static>(
    normalizer: Arc<dyn Normalizer<Output = O>>,
    mut input: StreamReader<RawDocument>,
    output: &StreamWriter<O>,
) -> Result<()> {
    let mut units: JoinSet<(usize, Result<Vec<O>>)> = JoinSet::new();
    let mut ordered = InOrder::default();
    let mut next_index = 0;
    let mut input_open = true;

    loop {
        tokio::select! {
            document = input.next(), if input_open => match document {
                Some(document) => {
                    let normalizer = Arc::clone(&normalizer);
                    let index = next_index;
                    next_index += 1;
                    debug!(source = normalizer.source_name(), index, "Normalizing document");
                    units.spawn(async move { (index, normalizer.normalize(document).await) });
                }
                None => input_open = false,
            },
            Some(joined) = units.join_next() => {
                let (index, values) = joined?;
                ordered.insert(index, values?);
                for value in ordered.drain_ready() {
                    output.put(value).await?;
                }
            }
            else => break,
        }
    }

    Ok(())
}

/// Reassembles per-document results into document order.
struct InOrder<O> {
    pending: BTreeMap<usize, Vec<O>>,
    next: usize,
}

impl<O> Default for InOrder<O> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
            next: 0,
        }
    }
}

impl<O> InOrder<O> {
    fn insert(&mut self, index: usize, values: Vec<O>) {
        self.pending.insert(index, values);
    }

    fn drain_ready(&mut self) -> Vec<O> {
        let mut ready = Vec::new();
        while let Some(values) = self.pending.remove(&self.next) {
            ready.extend(values);
            self.next += 1;
        }
        ready
    }
}
