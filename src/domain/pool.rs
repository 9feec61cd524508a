//! The shrinking working set of pool-side records.

use super::record::NormalizedRecord;

/// Index-addressable set of records where removal leaves a tombstone.
///
/// Indices are stable for the lifetime of the pool and iteration follows
/// insertion order. The pool only shrinks.
#[derive(Debug, Default)]
pub struct RecordPool {
    slots: Vec<Option<NormalizedRecord>>,
    live: usize,
}

impl RecordPool {
    #[must_use]
    pub fn new(records: Vec<NormalizedRecord>) -> Self {
        let live = records.len();
        Self {
            slots: records.into_iter().map(Some).collect(),
            live,
        }
    }

    /// Number of records still available.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&NormalizedRecord> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Frozen list of live indices, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| i))
            .collect()
    }

    /// Remove and return the record at `index`, if still present.
    pub fn take(&mut self, index: usize) -> Option<NormalizedRecord> {
        let record = self.slots.get_mut(index)?.take()?;
        self.live -= 1;
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wear::Wear;
    use rust_decimal_macros::dec;

    fn pool(n: usize) -> RecordPool {
        RecordPool::new(
            (0..n)
                .map(|i| {
                    NormalizedRecord::try_new(format!("r{i}"), Wear::try_new(0.1).unwrap(), dec!(1))
                        .unwrap()
                })
                .collect(),
        )
    }

    #[test]
    fn take_leaves_tombstone_and_keeps_indices_stable() {
        let mut pool = pool(3);
        let taken = pool.take(1).unwrap();
        assert_eq!(taken.display_name(), "r1");
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.snapshot(), vec![0, 2]);
        assert_eq!(pool.get(2).map(NormalizedRecord::display_name), Some("r2"));
    }

    #[test]
    fn take_twice_is_a_no_op() {
        let mut pool = pool(1);
        assert!(pool.take(0).is_some());
        assert!(pool.take(0).is_none());
        assert!(pool.take(7).is_none());
        assert!(pool.is_empty());
    }
}
