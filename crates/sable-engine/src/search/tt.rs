//! Transposition table: hash-indexed memo of previously searched positions.
//!
//! Fixed-size table with one entry per bucket, addressed by
//! `hash & (slots - 1)`. A probe is a hit only when the stored hash matches
//! the query exactly; index collisions between distinct hashes degrade to
//! a miss, never to wrong data. Single-threaded by design; a parallel
//! search would need sharding, locking, or per-thread tables.

/// Default table size: 2^23 single-entry buckets.
pub const DEFAULT_SLOTS: usize = 1 << 23;

/// What a stored score proves about the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact search value.
    Exact,
    /// The score is a lower bound (the search failed high).
    LowerBound,
    /// The score is an upper bound (the search failed low).
    UpperBound,
}

/// A stored search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Remaining depth the score was computed at.
    pub depth: i8,
    /// Score from the perspective of that position's side to move.
    pub score: i32,
    /// What the score proves.
    pub bound: Bound,
}

/// How a store treats an occupied bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementPolicy {
    /// Unconditional overwrite. Cheap, but can evict valuable deep entries.
    #[default]
    AlwaysReplace,
    /// Keep the existing entry when it is deeper than the incoming one.
    DepthPreferred,
}

/// Errors from table configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TtError {
    /// Bucket addressing requires a power-of-two slot count.
    #[error("slot count must be a nonzero power of two, got {0}")]
    InvalidSlotCount(usize),
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    hash: u64,
    entry: Option<Entry>,
}

const EMPTY_SLOT: Slot = Slot {
    hash: 0,
    entry: None,
};

/// Fixed-size transposition table.
#[derive(Debug)]
pub struct TranspositionTable {
    slots: Box<[Slot]>,
    mask: u64,
    policy: ReplacementPolicy,
}

impl TranspositionTable {
    /// Create a table with [`DEFAULT_SLOTS`] buckets and unconditional
    /// overwrite on replacement.
    pub fn new() -> Self {
        match Self::with_slots(DEFAULT_SLOTS, ReplacementPolicy::default()) {
            Ok(tt) => tt,
            // DEFAULT_SLOTS is a power of two by construction.
            Err(_) => unreachable!("default slot count is a power of two"),
        }
    }

    /// Create a table with a custom bucket count and replacement policy.
    pub fn with_slots(slots: usize, policy: ReplacementPolicy) -> Result<Self, TtError> {
        if slots == 0 || !slots.is_power_of_two() {
            return Err(TtError::InvalidSlotCount(slots));
        }
        Ok(Self {
            slots: vec![EMPTY_SLOT; slots].into_boxed_slice(),
            mask: (slots - 1) as u64,
            policy,
        })
    }

    /// Look up `hash`. Returns the stored entry only on an exact hash match.
    pub fn probe(&self, hash: u64) -> Option<Entry> {
        let slot = &self.slots[(hash & self.mask) as usize];
        if slot.hash == hash { slot.entry } else { None }
    }

    /// Store a search result for `hash`, subject to the replacement policy.
    pub fn store(&mut self, hash: u64, depth: i8, score: i32, bound: Bound) {
        let slot = &mut self.slots[(hash & self.mask) as usize];

        if self.policy == ReplacementPolicy::DepthPreferred
            && let Some(existing) = slot.entry
            && existing.depth > depth
        {
            return;
        }

        *slot = Slot {
            hash,
            entry: Some(Entry {
                depth,
                score,
                bound,
            }),
        };
    }

    /// Drop all entries, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.fill(EMPTY_SLOT);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
