//! Round setup: both sources are collected concurrently into one pool.
//!
//! ```
//! use floatarb::application::matching::{MatchingEngine, MatchingRules};
//!
//! let engine = MatchingEngine::new(MatchingRules::default());
//! assert_eq!(engine.rules().wear_digits, 2);
//! ```

use tracing::{info, info_span, Instrument};

use crate::domain::{NormalizedRecord, RecordPool, RoundId};
use crate::error::Result;

use super::round::MatchRound;
use super::{ListingSource, MatchingRules};

/// Starts matching rounds.
///
/// The engine is stateless between rounds; each call to [`run`](Self::run)
/// builds a fresh pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingEngine {
    rules: MatchingRules,
}

impl MatchingEngine {
    #[must_use]
    pub const fn new(rules: MatchingRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub const fn rules(&self) -> MatchingRules {
        self.rules
    }

    /// Collect both sources concurrently and return the round, ready to compare.
    ///
    /// When source A finishes with no listings the round is returned already
    /// done and source B is dropped without waiting for it. Any source error
    /// fails the round.
    pub async fn run(
        &self,
        source_a: Box<dyn ListingSource>,
        source_b: Box<dyn ListingSource>,
    ) -> Result<MatchRound> {
        let id = RoundId::new();
        let span = info_span!("round", round_id = %id);
        let names = (source_a.name(), source_b.name());

        let collected = collect_both(source_a, source_b).instrument(span.clone()).await?;
        let _entered = span.enter();

        let Some((records_a, records_b)) = collected else {
            info!(source_a = %names.0, "Source A is empty, skipping comparison");
            return Ok(MatchRound::new(id, self.rules, RecordPool::default(), Vec::new()));
        };

        info!(
            source_a = %names.0,
            source_b = %names.1,
            pool = records_a.len(),
            candidates = records_b.len(),
            "Sources collected"
        );
        Ok(MatchRound::new(
            id,
            self.rules,
            RecordPool::new(records_a),
            records_b,
        ))
    }
}

/// `None` when source A came back empty.
async fn collect_both(
    source_a: Box<dyn ListingSource>,
    source_b: Box<dyn ListingSource>,
) -> Result<Option<(Vec<NormalizedRecord>, Vec<NormalizedRecord>)>> {
    let mut a = source_a.collect();
    let mut b = source_b.collect();

    tokio::select! {
        records_a = &mut a => {
            let records_a = records_a?;
            if records_a.is_empty() {
                return Ok(None);
            }
            Ok(Some((records_a, b.await?)))
        }
        records_b = &mut b => {
            let records_b = records_b?;
            let records_a = a.await?;
            if records_a.is_empty() {
                return Ok(None);
            }
            Ok(Some((records_a, records_b)))
        }
    }
}
