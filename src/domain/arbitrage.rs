//! Arbitrage math and match results.
//!
//! Source A is the marketplace whose listings form the pool; source B is the
//! one whose listings are walked in arrival order. A B-listing and an A-listing
//! describe the same item instance when their wear floats land in the same
//! bucket, and the percentage compares B's raw price to A's adjusted price.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use super::record::NormalizedRecord;

/// Smallest accepted arbitrage percentage.
pub const DEFAULT_THRESHOLD_PERCENT: i64 = 15;

/// True when both records' wear floats quantize to the same bucket.
///
/// Symmetric and independent of price.
#[must_use]
pub fn is_match(a: &NormalizedRecord, b: &NormalizedRecord, digits: u32) -> bool {
    a.wear().bucket(digits) == b.wear().bucket(digits)
}

/// `100 - floor(100 * price_b / adjusted_a)`.
///
/// The numerator uses B's raw price while the denominator uses A's
/// fee-adjusted price. Returns `None` when `adjusted_a` is not positive or the
/// arithmetic overflows.
#[must_use]
pub fn arbitrage_percent(price_b: Decimal, adjusted_a: Decimal) -> Option<i64> {
    if adjusted_a <= Decimal::ZERO {
        return None;
    }
    let ratio = price_b
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(adjusted_a)?
        .floor();
    ratio.to_i64().map(|r| 100 - r)
}

/// Identifier of one matching round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RoundId(Uuid);

impl RoundId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A provisional pairing inside one comparison step.
///
/// `pool_index` addresses the A-record in the round's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate {
    pub pool_index: usize,
    pub arbitrage_percent: i64,
}

/// Evaluate one A-record against one B-record.
///
/// Returns the candidate when the wear buckets agree and the percentage
/// reaches `threshold`.
#[must_use]
pub fn evaluate(
    pool_index: usize,
    a: &NormalizedRecord,
    b: &NormalizedRecord,
    digits: u32,
    threshold: i64,
) -> Option<MatchCandidate> {
    if !is_match(a, b, digits) {
        return None;
    }
    let arbitrage_percent = arbitrage_percent(b.price(), a.adjusted_price())?;
    (arbitrage_percent >= threshold).then_some(MatchCandidate {
        pool_index,
        arbitrage_percent,
    })
}

/// Highest percentage wins; ties keep the earliest candidate in pool order.
#[must_use]
pub fn best_candidate(candidates: impl IntoIterator<Item = MatchCandidate>) -> Option<MatchCandidate> {
    candidates.into_iter().fold(None, |best, c| match best {
        Some(b) if b.arbitrage_percent >= c.arbitrage_percent => Some(b),
        _ => Some(c),
    })
}

/// A confirmed pairing of one A-listing with one B-listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    round_id: RoundId,
    source_a: NormalizedRecord,
    source_b: NormalizedRecord,
    arbitrage_percent: i64,
    found_at: DateTime<Utc>,
}

impl MatchResult {
    #[must_use]
    pub fn new(
        round_id: RoundId,
        source_a: NormalizedRecord,
        source_b: NormalizedRecord,
        arbitrage_percent: i64,
    ) -> Self {
        Self {
            round_id,
            source_a,
            source_b,
            arbitrage_percent,
            found_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn round_id(&self) -> RoundId {
        self.round_id
    }

    /// The pool-side listing this result consumed.
    #[must_use]
    pub const fn source_a(&self) -> &NormalizedRecord {
        &self.source_a
    }

    #[must_use]
    pub const fn source_b(&self) -> &NormalizedRecord {
        &self.source_b
    }

    #[must_use]
    pub const fn arbitrage_percent(&self) -> i64 {
        self.arbitrage_percent
    }

    #[must_use]
    pub const fn found_at(&self) -> DateTime<Utc> {
        self.found_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wear::Wear;
    use rust_decimal_macros::dec;

    fn record(wear: f64, price: Decimal) -> NormalizedRecord {
        NormalizedRecord::try_new("AK-47 | Redline", Wear::try_new(wear).unwrap(), price).unwrap()
    }

    #[test]
    fn threshold_boundary_on_floor_formula() {
        assert_eq!(arbitrage_percent(dec!(85), dec!(100)), Some(15));
        assert_eq!(arbitrage_percent(dec!(86), dec!(100)), Some(14));
        assert_eq!(arbitrage_percent(dec!(85.5), dec!(100)), Some(15));
    }

    #[test]
    fn evaluate_accepts_exactly_the_threshold() {
        let a = record(0.25, dec!(100));
        assert!(evaluate(0, &a, &record(0.25, dec!(85)), 2, 15).is_some());
        assert!(evaluate(0, &a, &record(0.25, dec!(86)), 2, 15).is_none());
    }

    #[test]
    fn evaluate_divides_by_adjusted_price() {
        let a = record(0.25, dec!(90)).with_overpay(dec!(10));
        let candidate = evaluate(3, &a, &record(0.25, dec!(80)), 2, 15).unwrap();
        assert_eq!(candidate.pool_index, 3);
        assert_eq!(candidate.arbitrage_percent, 20);
    }

    #[test]
    fn is_match_ignores_price_and_is_symmetric() {
        let a = record(0.2512, dec!(1));
        let b = record(0.2549, dec!(1000));
        assert!(is_match(&a, &b, 2));
        assert!(is_match(&b, &a, 2));
        assert!(!is_match(&a, &record(0.26, dec!(1)), 2));
    }

    #[test]
    fn non_positive_denominator_yields_nothing() {
        assert_eq!(arbitrage_percent(dec!(1), Decimal::ZERO), None);
    }

    #[test]
    fn best_candidate_prefers_higher_then_earlier() {
        let picked = best_candidate([
            MatchCandidate { pool_index: 0, arbitrage_percent: 20 },
            MatchCandidate { pool_index: 1, arbitrage_percent: 35 },
            MatchCandidate { pool_index: 2, arbitrage_percent: 35 },
        ]);
        assert_eq!(picked.map(|c| c.pool_index), Some(1));
        assert_eq!(best_candidate(std::iter::empty()), None);
    }
}
