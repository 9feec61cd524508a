//! Matching engine: pairs listings from two sources by wear bucket.
//!
//! # Modules
//!
//! - `engine`: [`MatchingEngine`], collects both sources concurrently
//! - `round`: [`MatchRound`], the greedy comparison over one pool

mod engine;
mod round;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::pipeline::SourcePipeline;
use crate::domain::{NormalizedRecord, DEFAULT_THRESHOLD_PERCENT, WEAR_DIGITS};
use crate::error::Result;

pub use engine::MatchingEngine;
pub use round::{MatchRound, RoundPhase, RoundStats};

/// Acceptance rules for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingRules {
    /// Smallest accepted arbitrage percentage, inclusive.
    pub threshold_percent: i64,
    /// Significant digits kept when bucketing wear floats.
    pub wear_digits: u32,
}

impl Default for MatchingRules {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
            wear_digits: WEAR_DIGITS,
        }
    }
}

/// Anything that yields a finite list of listings once.
///
/// Implemented by listing pipelines; tests substitute fixed lists.
#[async_trait]
pub trait ListingSource: Send {
    /// Name used in logs.
    fn name(&self) -> String;

    async fn collect(self: Box<Self>) -> Result<Vec<NormalizedRecord>>;
}

#[async_trait]
impl ListingSource for SourcePipeline<NormalizedRecord> {
    fn name(&self) -> String {
        self.id().to_string()
    }

    async fn collect(self: Box<Self>) -> Result<Vec<NormalizedRecord>> {
        self.run().await
    }
}
