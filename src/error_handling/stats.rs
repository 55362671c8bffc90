//! Load statistics tracking.
//!
//! Tracks how many source rows were dropped or degraded, by reason, during
//! loading. Counters are atomic so the tracker can be shared behind an
//! `Arc` without additional locking.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::DropReason;

/// Thread-safe per-reason counters for rows dropped or degraded at load time.
///
/// All reasons are initialized to zero on creation, so a snapshot always
/// covers the full set of reasons.
pub struct LoadStats {
    drops: HashMap<DropReason, AtomicUsize>,
}

impl LoadStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut drops = HashMap::new();
        for reason in DropReason::iter() {
            drops.insert(reason, AtomicUsize::new(0));
        }
        LoadStats { drops }
    }

    /// Increments the counter for `reason`.
    pub fn increment(&self, reason: DropReason) {
        if let Some(counter) = self.drops.get(&reason) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in LoadStats initialization.",
                reason
            );
        }
    }

    /// Returns the current count for `reason`.
    pub fn count(&self, reason: DropReason) -> usize {
        self.drops
            .get(&reason)
            .map(|counter| counter.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of rows discarded entirely (field-level degradations excluded).
    pub fn rows_dropped(&self) -> usize {
        DropReason::iter()
            .filter(DropReason::drops_row)
            .map(|reason| self.count(reason))
            .sum()
    }

    /// Snapshot of all non-zero counters, in declaration order.
    pub fn snapshot(&self) -> Vec<(DropReason, usize)> {
        DropReason::iter()
            .map(|reason| (reason, self.count(reason)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = LoadStats::new();
        for reason in DropReason::iter() {
            assert_eq!(stats.count(reason), 0);
        }
        assert!(stats.snapshot().is_empty());
    }

    #[test]
    fn test_increment_and_snapshot() {
        let stats = LoadStats::new();
        stats.increment(DropReason::UnparseableTimestamp);
        stats.increment(DropReason::UnparseableTimestamp);
        stats.increment(DropReason::BadLatitude);

        assert_eq!(stats.count(DropReason::UnparseableTimestamp), 2);
        assert_eq!(stats.count(DropReason::BadLatitude), 1);
        assert_eq!(stats.rows_dropped(), 2);
        assert_eq!(
            stats.snapshot(),
            vec![
                (DropReason::UnparseableTimestamp, 2),
                (DropReason::BadLatitude, 1),
            ]
        );
    }
}
