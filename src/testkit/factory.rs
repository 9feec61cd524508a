//! Pipeline factory over fixed scripts.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::application::pipeline::{
    OutputKind, Pipeline, PipelineFactory, PipelineId, SourcePipeline,
};
use crate::domain::{NormalizedRecord, SearchParameters, SkinIdentity};
use crate::error::{ConfigError, Result};

use super::source::{scripted_pipeline, ScriptedFetcher, ScriptedNormalizer};

#[derive(Clone)]
enum Script {
    Listings(Vec<Vec<NormalizedRecord>>),
    Identity(Vec<SkinIdentity>),
    /// Fetch fails with a transport error before the first document.
    Unreachable,
}

/// Builds scripted pipelines and records every request it was asked for.
///
/// Unscripted identifiers are reported as unknown pipelines.
#[derive(Clone, Default)]
pub struct ScriptedFactory {
    scripts: HashMap<PipelineId, Script>,
    requests: Arc<Mutex<Vec<(PipelineId, SearchParameters)>>>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// `id` emits `records` as a single document.
    pub fn with_listings(self, id: PipelineId, records: Vec<NormalizedRecord>) -> Self {
        self.with_batches(id, vec![records])
    }

    /// `id` emits one document per batch.
    pub fn with_batches(mut self, id: PipelineId, batches: Vec<Vec<NormalizedRecord>>) -> Self {
        self.scripts.insert(id, Script::Listings(batches));
        self
    }

    pub fn with_identity(mut self, id: PipelineId, identities: Vec<SkinIdentity>) -> Self {
        self.scripts.insert(id, Script::Identity(identities));
        self
    }

    pub fn with_unreachable(mut self, id: PipelineId) -> Self {
        self.scripts.insert(id, Script::Unreachable);
        self
    }

    /// Every `(id, params)` passed to `create`, in call order.
    pub fn requests(&self) -> Vec<(PipelineId, SearchParameters)> {
        self.requests.lock().clone()
    }
}

impl PipelineFactory for ScriptedFactory {
    fn create(&self, id: PipelineId, params: &SearchParameters) -> Result<Pipeline> {
        self.requests.lock().push((id, params.clone()));

        let script = self
            .scripts
            .get(&id)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownPipeline {
                name: id.to_string(),
            })?;
        Ok(match script {
            Script::Listings(batches) => Pipeline::Listings(scripted_pipeline(id, batches)),
            Script::Identity(identities) => {
                Pipeline::Identity(scripted_pipeline(id, vec![identities]))
            }
            Script::Unreachable => match id.output_kind() {
                OutputKind::Listings => Pipeline::Listings(unreachable(id)),
                OutputKind::Identity => Pipeline::Identity(unreachable(id)),
            },
        })
    }
}

fn unreachable<O: Clone + Send + Sync + 'static>(id: PipelineId) -> SourcePipeline<O> {
    SourcePipeline::new(
        id,
        Arc::new(ScriptedFetcher::new(1).fail_after(0)),
        Arc::new(ScriptedNormalizer::<O>::new(Vec::new())),
        4,
    )
}
