//! Marketplace-agnostic domain types and arbitrage math.

pub mod arbitrage;
pub mod error;
pub mod pool;
pub mod quality;
pub mod record;
pub mod search;
pub mod wear;

pub use arbitrage::{
    arbitrage_percent, best_candidate, evaluate, is_match, MatchCandidate, MatchResult, RoundId,
    DEFAULT_THRESHOLD_PERCENT,
};
pub use pool::RecordPool;
pub use quality::Quality;
pub use record::{NormalizedRecord, SkinIdentity};
pub use search::SearchParameters;
pub use wear::{Wear, WEAR_DIGITS};
