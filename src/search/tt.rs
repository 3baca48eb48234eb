//! Transposition Table for caching search results
//!
//! The transposition table stores search results indexed by board hash,
//! enabling reuse of previous search results for positions we've seen before.
//!
//! The search always runs to terminal positions, so entries carry no depth and
//! a store always replaces whatever occupied the slot.
//!
//! # Example
//!
//! ```
//! use tictactoe::search::{Bound, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1024);
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 100, Bound::Exact);
//!
//! assert_eq!(tt.probe(hash, -1000, 1000), Some(100));
//! ```

/// How a stored score relates to the true value of its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bound {
    /// Exact score - every child was searched inside the window
    #[default]
    Exact,
    /// Lower bound - true value >= stored value (search failed high)
    LowerBound,
    /// Upper bound - true value <= stored value (search failed low)
    UpperBound,
}

impl Bound {
    /// Classify a node result against the window the node was entered with.
    #[inline]
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Bound {
        if score >= beta {
            Bound::LowerBound
        } else if score <= alpha {
            Bound::UpperBound
        } else {
            Bound::Exact
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, Default)]
struct TTEntry {
    hash: u64,
    score: i16,
    bound: Bound,
    occupied: bool,
}

/// Direct-mapped transposition table with an always-replace policy.
///
/// The slot count is a power of two so the index is `hash & mask`. A table
/// created with capacity 0 (or whose allocation failed) is disabled: every
/// probe misses and every store is dropped.
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    mask: usize,
    /// Occupied slots
    used: usize,
    hits: u64,
    misses: u64,
    collisions: u64,
}

impl TranspositionTable {
    /// Create a table with room for `capacity` entries, rounded up to a power
    /// of two.
    ///
    /// ```
    /// use tictactoe::search::TranspositionTable;
    ///
    /// let tt = TranspositionTable::new(1000);
    /// assert_eq!(tt.size(), 1024);
    /// assert!(!TranspositionTable::new(0).is_enabled());
    /// ```
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut tt = Self {
            entries: Vec::new(),
            mask: 0,
            used: 0,
            hits: 0,
            misses: 0,
            collisions: 0,
        };
        tt.resize(capacity);
        tt
    }

    /// Discard all contents and reallocate for `capacity` entries.
    ///
    /// Falls back to a disabled table when the allocation cannot be made.
    pub fn resize(&mut self, capacity: usize) {
        self.entries = Vec::new();
        self.mask = 0;
        self.used = 0;
        self.reset_stats();

        if capacity == 0 {
            return;
        }

        let size = round_up_pow2(capacity);
        let mut entries = Vec::new();
        if let Err(e) = entries.try_reserve_exact(size) {
            let mb = size as f64 * std::mem::size_of::<TTEntry>() as f64 / (1024.0 * 1024.0);
            log::warn!(
                "failed to allocate transposition table \
                 ({capacity} requested, {size} slots, {mb:.1} MB): {e}; continuing without it"
            );
            return;
        }
        entries.resize(size, TTEntry::default());
        self.entries = entries;
        self.mask = size - 1;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of slots (0 when disabled)
    #[inline]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Probe the table for a usable score.
    ///
    /// An `Exact` entry is always usable. A `LowerBound` entry is usable only
    /// when it already reaches `beta`, an `UpperBound` only when it is already
    /// at or below `alpha`.
    pub fn probe(&mut self, hash: u64, alpha: i32, beta: i32) -> Option<i32> {
        if !self.is_enabled() {
            self.misses += 1;
            return None;
        }

        let entry = self.entries[hash as usize & self.mask];
        if !entry.occupied {
            self.misses += 1;
            return None;
        }
        if entry.hash != hash {
            self.collisions += 1;
            self.misses += 1;
            return None;
        }

        let score = i32::from(entry.score);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::LowerBound => score >= beta,
            Bound::UpperBound => score <= alpha,
        };

        if usable {
            self.hits += 1;
            Some(score)
        } else {
            self.misses += 1;
            None
        }
    }

    /// Store a result, overwriting whatever the slot held.
    ///
    /// `score` must fit in an `i16`; search scores stay within ±100.
    #[inline]
    pub fn store(&mut self, hash: u64, score: i32, bound: Bound) {
        if !self.is_enabled() {
            return;
        }
        debug_assert!(i16::try_from(score).is_ok(), "score {score} does not fit an entry");
        let slot = &mut self.entries[hash as usize & self.mask];
        if !slot.occupied {
            self.used += 1;
        }
        *slot = TTEntry {
            hash,
            score: score as i16,
            bound,
            occupied: true,
        };
    }

    /// Clear all entries and counters.
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::default());
        self.used = 0;
        self.reset_stats();
    }

    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.collisions = 0;
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        TTStats {
            size: self.size(),
            used: self.used,
            hits: self.hits,
            misses: self.misses,
            collisions: self.collisions,
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Round up to the next power of two, saturating at the largest one.
fn round_up_pow2(n: usize) -> usize {
    n.max(1)
        .checked_next_power_of_two()
        .unwrap_or(1 << (usize::BITS - 1))
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Probes that returned a usable score
    pub hits: u64,
    /// Probes that did not (includes collisions)
    pub misses: u64,
    /// Probes that found a slot holding a different position
    pub collisions: u64,
}

impl TTStats {
    /// Hit rate in percent over all probes
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tt_store_probe_exact() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0x1234_5678_9ABC_DEF0;

        tt.store(hash, 100, Bound::Exact);
        assert_eq!(tt.probe(hash, -1000, 1000), Some(100));
        // Exact is usable whatever the window
        assert_eq!(tt.probe(hash, 200, 300), Some(100));
    }

    #[test]
    fn test_tt_lower_bound_cutoff() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0x1234_5678_9ABC_DEF0;

        tt.store(hash, 50, Bound::LowerBound);

        // Score (50) >= beta (40), usable
        assert_eq!(tt.probe(hash, -100, 40), Some(50));
        assert_eq!(tt.probe(hash, -100, 50), Some(50));
        // Score (50) < beta (60), not usable
        assert_eq!(tt.probe(hash, -100, 60), None);
    }

    #[test]
    fn test_tt_upper_bound_cutoff() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0x1234_5678_9ABC_DEF0;

        tt.store(hash, -20, Bound::UpperBound);

        // Score (-20) <= alpha (0), usable
        assert_eq!(tt.probe(hash, 0, 100), Some(-20));
        assert_eq!(tt.probe(hash, -20, 100), Some(-20));
        // Score (-20) > alpha (-50), not usable
        assert_eq!(tt.probe(hash, -50, 100), None);
    }

    #[test]
    fn test_tt_collision_misses() {
        let mut tt = TranspositionTable::new(16);
        let hash1 = 0x0000_0000_0000_0003;
        let hash2 = 0x0000_0001_0000_0003; // Same slot, different position

        tt.store(hash1, 100, Bound::Exact);
        assert_eq!(tt.probe(hash2, -1000, 1000), None);

        let stats = tt.stats();
        assert_eq!(stats.collisions, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_tt_always_replace() {
        let mut tt = TranspositionTable::new(16);
        let hash1 = 0x10;
        let hash2 = 0x20; // Both map to slot 0

        tt.store(hash1, 100, Bound::Exact);
        tt.store(hash2, -100, Bound::Exact);

        assert_eq!(tt.probe(hash1, -1000, 1000), None);
        assert_eq!(tt.probe(hash2, -1000, 1000), Some(-100));
    }

    #[test]
    fn test_tt_disabled() {
        let mut tt = TranspositionTable::new(0);
        assert!(!tt.is_enabled());
        tt.store(0x1, 100, Bound::Exact);
        assert_eq!(tt.probe(0x1, -1000, 1000), None);
        assert_eq!(tt.stats().size, 0);
        assert_eq!(tt.stats().misses, 1);
    }

    #[test]
    fn test_tt_allocation_failure_disables() {
        let mut tt = TranspositionTable::new(usize::MAX);
        assert!(!tt.is_enabled());
        assert_eq!(tt.size(), 0);

        tt.store(0x7, 100, Bound::Exact);
        assert_eq!(tt.probe(0x7, -1000, 1000), None);
        let stats = tt.stats();
        assert_eq!(stats.used, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);

        // A later resize can still bring it back
        tt.resize(16);
        assert!(tt.is_enabled());
    }

    #[test]
    fn test_tt_used_counts_slots() {
        let mut tt = TranspositionTable::new(16);
        tt.store(0x1, 1, Bound::Exact);
        tt.store(0x1, 2, Bound::LowerBound);
        tt.store(0x11, 3, Bound::Exact); // same slot as 0x1
        tt.store(0x2, 4, Bound::UpperBound);
        assert_eq!(tt.stats().used, 2);

        tt.clear();
        assert_eq!(tt.stats().used, 0);
        tt.store(0x3, 0, Bound::Exact);
        assert_eq!(tt.stats().used, 1);
    }

    #[test]
    fn test_tt_power_of_two_sizing() {
        assert_eq!(TranspositionTable::new(1).size(), 1);
        assert_eq!(TranspositionTable::new(3).size(), 4);
        assert_eq!(TranspositionTable::new(100_000).size(), 131_072);
        assert_eq!(round_up_pow2(usize::MAX), 1 << (usize::BITS - 1));
    }

    #[test]
    fn test_tt_resize_discards_contents() {
        let mut tt = TranspositionTable::new(64);
        tt.store(0x5, 1, Bound::Exact);
        tt.resize(64);
        assert_eq!(tt.probe(0x5, -1000, 1000), None);
        assert_eq!(tt.stats().used, 0);
    }

    #[test]
    fn test_tt_clear() {
        let mut tt = TranspositionTable::new(64);
        let hash = 0x1234_5678_9ABC_DEF0;

        tt.store(hash, 100, Bound::Exact);
        tt.probe(hash, -1000, 1000);
        tt.clear();

        let stats = tt.stats();
        assert_eq!(stats.used, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(tt.probe(hash, -1000, 1000), None);
    }

    #[test]
    fn test_tt_stats() {
        let mut tt = TranspositionTable::new(1024);

        let stats = tt.stats();
        assert_eq!(stats.used, 0);
        assert_eq!(stats.hit_rate(), 0.0);

        tt.store(0x111, 100, Bound::Exact);
        tt.store(0x222, 100, Bound::Exact);
        tt.probe(0x111, -1000, 1000);
        tt.probe(0x333, -1000, 1000);

        let stats = tt.stats();
        assert_eq!(stats.used, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 50.0);
    }

    #[test]
    fn test_tt_score_boundaries() {
        let mut tt = TranspositionTable::new(64);
        tt.store(0x1, 100, Bound::Exact);
        tt.store(0x2, -100, Bound::Exact);
        tt.store(0x3, 0, Bound::Exact);
        assert_eq!(tt.probe(0x1, -1000, 1000), Some(100));
        assert_eq!(tt.probe(0x2, -1000, 1000), Some(-100));
        assert_eq!(tt.probe(0x3, -1000, 1000), Some(0));
    }

    #[test]
    fn test_bound_classify() {
        assert_eq!(Bound::classify(10, -5, 10), Bound::LowerBound);
        assert_eq!(Bound::classify(-5, -5, 10), Bound::UpperBound);
        assert_eq!(Bound::classify(0, -5, 10), Bound::Exact);
    }
}
