//! Deduplicated collision bookkeeping
//!
//! Pairs are keyed by stable vehicle IDs, never by position in the vehicle list.

use std::collections::BTreeSet;

/// Unordered vehicle-ID pairs that have already been counted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionLedger {
    pairs: BTreeSet<(u32, u32)>,
}

#[inline]
fn pair_key(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

impl CollisionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the pair; returns true only if it was not already recorded
    pub fn record_if_new(&mut self, a: u32, b: u32) -> bool {
        self.pairs.insert(pair_key(a, b))
    }

    pub fn contains(&self, a: u32, b: u32) -> bool {
        self.pairs.contains(&pair_key(a, b))
    }

    /// Forget every pair for which `release` returns true
    pub fn release_where(&mut self, mut release: impl FnMut(u32, u32) -> bool) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|&(a, b)| !release(a, b));
        before - self.pairs.len()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.pairs.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_order_independent() {
        let mut ledger = CollisionLedger::new();
        assert!(ledger.record_if_new(4, 2));
        assert!(!ledger.record_if_new(2, 4));
        assert!(!ledger.record_if_new(4, 2));
        assert!(ledger.contains(2, 4));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_release_where() {
        let mut ledger = CollisionLedger::new();
        ledger.record_if_new(1, 2);
        ledger.record_if_new(1, 3);
        ledger.record_if_new(5, 6);

        let released = ledger.release_where(|a, _| a == 1);
        assert_eq!(released, 2);
        assert_eq!(ledger.iter().collect::<Vec<_>>(), vec![(5, 6)]);

        // A released pair counts again
        assert!(ledger.record_if_new(2, 1));
    }
}
