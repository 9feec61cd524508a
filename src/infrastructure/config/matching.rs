//! Matching round configuration.

use serde::Deserialize;

use crate::application::matching::MatchingRules;
use crate::application::orchestration::SearchSettings;
use crate::application::pipeline::PipelineId;
use crate::domain::{DEFAULT_THRESHOLD_PERCENT, WEAR_DIGITS};

/// Which sources a round compares and the acceptance rules.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MatchingConfig {
    /// Pool side, whose adjusted price is the sell price.
    #[serde(default = "default_source_a")]
    pub source_a: PipelineId,
    /// Walked side, whose price is the buy price.
    #[serde(default = "default_source_b")]
    pub source_b: PipelineId,
    #[serde(default = "default_threshold_percent")]
    pub threshold_percent: i64,
    #[serde(default = "default_wear_digits")]
    pub wear_digits: u32,
    /// Canonicalize interactive searches through the wiki.
    #[serde(default = "default_true")]
    pub resolve_names: bool,
}

const fn default_source_a() -> PipelineId {
    PipelineId::Csmoney
}

const fn default_source_b() -> PipelineId {
    PipelineId::SteamApi
}

const fn default_threshold_percent() -> i64 {
    DEFAULT_THRESHOLD_PERCENT
}

const fn default_wear_digits() -> u32 {
    WEAR_DIGITS
}

const fn default_true() -> bool {
    true
}

impl MatchingConfig {
    #[must_use]
    pub const fn rules(&self) -> MatchingRules {
        MatchingRules {
            threshold_percent: self.threshold_percent,
            wear_digits: self.wear_digits,
        }
    }

    #[must_use]
    pub const fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            source_a: self.source_a,
            source_b: self.source_b,
            rules: self.rules(),
            resolve_names: self.resolve_names,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            source_a: default_source_a(),
            source_b: default_source_b(),
            threshold_percent: default_threshold_percent(),
            wear_digits: default_wear_digits(),
            resolve_names: default_true(),
        }
    }
}
