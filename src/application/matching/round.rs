//! One matching round: greedy best-candidate pairing over a collected pool.

use std::collections::VecDeque;

use futures_util::future::join_all;
use futures_util::stream::{self, Stream};
use tracing::{debug, info};

use crate::domain::{best_candidate, evaluate, MatchResult, NormalizedRecord, RecordPool, RoundId};

use super::MatchingRules;

/// Where a round is in its lifecycle once collection has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Comparing,
    Done,
}

/// Counters for one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundStats {
    /// Source A listings in the pool at the start of comparison.
    pub pool_size: usize,
    /// Source B listings collected.
    pub b_records: usize,
    /// Pair evaluations performed.
    pub candidates_seen: usize,
    /// Per-listing comparison fan-outs started.
    pub fan_outs: usize,
    pub matches: usize,
}

/// One round of greedy matching over a shrinking pool.
///
/// B listings are taken in arrival order. For each, every listing still in the
/// pool is evaluated concurrently against it; the best accepted candidate is
/// removed from the pool and emitted. Each pool listing backs at most one
/// result.
pub struct MatchRound {
    id: RoundId,
    rules: MatchingRules,
    pool: RecordPool,
    pending: VecDeque<NormalizedRecord>,
    stats: RoundStats,
    phase: RoundPhase,
}

impl MatchRound {
    pub(super) fn new(
        id: RoundId,
        rules: MatchingRules,
        pool: RecordPool,
        records_b: Vec<NormalizedRecord>,
    ) -> Self {
        let stats = RoundStats {
            pool_size: pool.len(),
            b_records: records_b.len(),
            ..RoundStats::default()
        };
        let phase = if pool.is_empty() {
            RoundPhase::Done
        } else {
            RoundPhase::Comparing
        };
        Self {
            id,
            rules,
            pool,
            pending: records_b.into(),
            stats,
            phase,
        }
    }

    #[must_use]
    pub const fn id(&self) -> RoundId {
        self.id
    }

    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub const fn stats(&self) -> RoundStats {
        self.stats
    }

    /// Pool listings not yet matched.
    #[must_use]
    pub fn remaining_pool(&self) -> usize {
        self.pool.len()
    }

    /// Advance until the next accepted pairing, or `None` when the round is done.
    pub async fn next_match(&mut self) -> Option<MatchResult> {
        while self.phase == RoundPhase::Comparing {
            let Some(b) = self.pending.pop_front() else {
                self.finish();
                break;
            };
            if self.pool.is_empty() {
                self.pending.clear();
                self.finish();
                break;
            }
            if let Some(result) = self.compare(b).await {
                return Some(result);
            }
        }
        None
    }

    /// Drain the round into a list of results.
    pub async fn collect(mut self) -> Vec<MatchResult> {
        let mut results = Vec::new();
        while let Some(result) = self.next_match().await {
            results.push(result);
        }
        results
    }

    /// Lazy stream of results, in B arrival order.
    pub fn into_stream(self) -> impl Stream<Item = MatchResult> + Send {
        stream::unfold(self, |mut round| async move {
            round.next_match().await.map(|result| (result, round))
        })
    }

    async fn compare(&mut self, b: NormalizedRecord) -> Option<MatchResult> {
        // Frozen before the fan-out; removal happens only after the join.
        let live = self.pool.snapshot();
        self.stats.fan_outs += 1;
        self.stats.candidates_seen += live.len();

        let rules = self.rules;
        let pool = &self.pool;
        let b_ref = &b;
        let evaluations = live.into_iter().map(|index| async move {
            let a = pool.get(index)?;
            evaluate(index, a, b_ref, rules.wear_digits, rules.threshold_percent)
        });
        let best = best_candidate(join_all(evaluations).await.into_iter().flatten())?;

        let a = self.pool.take(best.pool_index)?;
        self.stats.matches += 1;
        debug!(
            round_id = %self.id,
            pool_index = best.pool_index,
            percent = best.arbitrage_percent,
            "Listing matched"
        );
        Some(MatchResult::new(self.id, a, b, best.arbitrage_percent))
    }

    fn finish(&mut self) {
        self.phase = RoundPhase::Done;
        info!(
            round_id = %self.id,
            pool = self.stats.pool_size,
            candidates = self.stats.b_records,
            comparisons = self.stats.candidates_seen,
            matches = self.stats.matches,
            "Round finished"
        );
    }
}
