use std::{mem::size_of, time::Instant};

use crate::{chess::chessmove::Move, evaluation::MINIMUM_MATE_SCORE, util::MEGABYTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Bound {
    Upper = 1,
    Lower = 2,
    Exact = 3,
}

impl Bound {
    pub fn is_lower(self) -> bool {
        self as u8 & 0b10 != 0
    }

    pub fn is_upper(self) -> bool {
        self as u8 & 0b01 != 0
    }
}

/// A single slot. The full key is kept so that index collisions read as misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry<T> {
    pub key: u64,
    pub depth: usize,
    pub value: T,
}

/// Payload stored by the searcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEntry {
    /// Score with mate distances measured from this node, not the root.
    pub score: i32,
    pub best_move: Option<Move>,
    pub bound: Bound,
}

/// A direct-mapped cache of `T` keyed by Zobrist hash.
///
/// Each key maps to exactly one slot (`key % capacity`). A store always
/// overwrites that slot, and a probe only hits when both the full key and
/// the recorded depth match.
#[derive(Debug, Clone)]
pub struct TranspositionTable<T> {
    table: Vec<Option<TTEntry<T>>>,
}

impl<T: Copy> TranspositionTable<T> {
    /// Allocates as many slots as fit in `megabytes`, but never fewer than one.
    pub fn new(megabytes: usize) -> Self {
        let start = Instant::now();
        let capacity = (megabytes * MEGABYTE / size_of::<Option<TTEntry<T>>>()).max(1);
        let out = Self::with_capacity(capacity);
        log::info!(
            "hash initialisation of {megabytes}mb ({} entries) complete in {}us",
            out.capacity(),
            start.elapsed().as_micros()
        );
        out
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: vec![None; capacity.max(1)],
        }
    }

    fn wrap_key(&self, key: u64) -> usize {
        #![allow(clippy::cast_possible_truncation)]
        (key % self.table.len() as u64) as usize
    }

    /// Returns the stored value for `key` if it was recorded at exactly `depth`.
    pub fn probe(&self, key: u64, depth: usize) -> Option<T> {
        match self.table[self.wrap_key(key)] {
            Some(entry) if entry.key == key && entry.depth == depth => Some(entry.value),
            _ => None,
        }
    }

    /// Returns whatever is stored for `key`, at any depth.
    pub fn probe_any(&self, key: u64) -> Option<TTEntry<T>> {
        self.table[self.wrap_key(key)].filter(|entry| entry.key == key)
    }

    pub fn store(&mut self, key: u64, depth: usize, value: T) {
        let index = self.wrap_key(key);
        self.table[index] = Some(TTEntry { key, depth, value });
    }

    pub fn clear(&mut self) {
        self.table.fill(None);
    }

    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Per-mille of sampled slots that are occupied.
    pub fn hashfull(&self) -> usize {
        let sample = self.table.len().min(1000);
        let hit = self.table[..sample].iter().filter(|e| e.is_some()).count();
        hit * 1000 / sample
    }
}

/// Converts a root-relative mate score into a node-relative one for storage.
pub const fn normalise_mate_score(mut score: i32, ply: usize) -> i32 {
    #![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    if score >= MINIMUM_MATE_SCORE {
        score += ply as i32;
    } else if score <= -MINIMUM_MATE_SCORE {
        score -= ply as i32;
    }
    score
}

/// Inverse of [`normalise_mate_score`].
pub const fn reconstruct_mate_score(mut score: i32, ply: usize) -> i32 {
    #![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    if score >= MINIMUM_MATE_SCORE {
        score -= ply as i32;
    } else if score <= -MINIMUM_MATE_SCORE {
        score += ply as i32;
    }
    score
}
