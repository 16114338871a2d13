// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zobrist position fingerprints and repetition history

use crate::grid::Grid;
use crate::{Color, Coord};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fixed pseudo-random keys for every (point, color) pair of one board size.
///
/// Generated once from a seed and never mutated afterwards. Keys are laid out
/// over the padded grid so a coordinate indexes the table directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristTable {
    width: usize,
    keys: Vec<[u64; 2]>,
}

impl ZobristTable {
    /// Build the table for a board size from a seed
    pub fn new(size: u8, seed: u64) -> Self {
        let width = size as usize + 2;
        let mut rng = Pcg64::seed_from_u64(seed);
        let keys = (0..width * width)
            .map(|_| [rng.gen_range(1..1u64 << 63), rng.gen_range(1..1u64 << 63)])
            .collect();
        Self { width, keys }
    }

    /// Key contributed by a stone of `color` at `coord`
    pub fn key(&self, coord: Coord, color: Color) -> u64 {
        self.keys[coord.y as usize * self.width + coord.x as usize][color.index()]
    }

    /// Fingerprint of a grid computed from scratch
    pub fn hash_grid(&self, grid: &Grid) -> u64 {
        grid.stones()
            .fold(0, |hash, (coord, color)| hash ^ self.key(coord, color))
    }
}

/// Saved fingerprint value and repetition history.
///
/// Always an owned copy: later commits on the live fingerprint never reach
/// a snapshot taken earlier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FingerprintSnapshot {
    /// Fingerprint value at snapshot time
    pub value: u64,
    /// Every fingerprint committed up to snapshot time
    pub seen: HashSet<u64>,
}

/// Running position fingerprint plus the set of positions seen so far
#[derive(Debug, Clone)]
pub struct Fingerprint {
    table: ZobristTable,
    value: u64,
    seen: HashSet<u64>,
}

impl Fingerprint {
    /// Fingerprint of the empty board; the empty position counts as seen
    pub fn new(table: ZobristTable) -> Self {
        let mut fingerprint = Self {
            table,
            value: 0,
            seen: HashSet::new(),
        };
        fingerprint.reset();
        fingerprint
    }

    /// Keys used by this fingerprint
    pub fn table(&self) -> &ZobristTable {
        &self.table
    }

    /// Current fingerprint value
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Add or remove a stone; XOR is its own inverse
    pub fn toggle(&mut self, coord: Coord, color: Color) {
        self.value ^= self.table.key(coord, color);
    }

    /// Whether a fingerprint value was already committed
    pub fn contains(&self, value: u64) -> bool {
        self.seen.contains(&value)
    }

    /// Record the current value in the repetition history
    pub fn commit(&mut self) {
        tracing::trace!(value = self.value, "fingerprint committed");
        self.seen.insert(self.value);
    }

    /// Number of distinct positions seen
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Deep copy of the value and the repetition history
    pub fn snapshot(&self) -> FingerprintSnapshot {
        FingerprintSnapshot {
            value: self.value,
            seen: self.seen.clone(),
        }
    }

    /// Restore an earlier snapshot; the snapshot itself stays untouched
    pub fn restore(&mut self, snapshot: &FingerprintSnapshot) {
        self.value = snapshot.value;
        self.seen = snapshot.seen.clone();
    }

    /// Back to the empty board with only the empty position seen
    pub fn reset(&mut self) {
        self.value = 0;
        self.seen.clear();
        self.seen.insert(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_deterministic_per_seed() {
        let a = ZobristTable::new(9, 7);
        let b = ZobristTable::new(9, 7);
        let c = ZobristTable::new(9, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let coord = Coord::new(4, 4);
        assert_ne!(a.key(coord, Color::Black), 0);
        assert_ne!(a.key(coord, Color::Black), a.key(coord, Color::White));
    }

    #[test]
    fn toggle_is_self_inverse() {
        let mut fp = Fingerprint::new(ZobristTable::new(9, 0));
        let coord = Coord::new(3, 5);
        fp.toggle(coord, Color::White);
        assert_ne!(fp.value(), 0);
        fp.toggle(coord, Color::White);
        assert_eq!(fp.value(), 0);
    }

    #[test]
    fn snapshot_is_not_shared_with_live_history() {
        let mut fp = Fingerprint::new(ZobristTable::new(9, 0));
        fp.toggle(Coord::new(1, 1), Color::Black);
        fp.commit();
        let snapshot = fp.snapshot();

        fp.toggle(Coord::new(2, 2), Color::White);
        fp.commit();
        assert_eq!(fp.seen_count(), 3);
        assert_eq!(snapshot.seen.len(), 2);
        assert!(!snapshot.seen.contains(&fp.value()));

        fp.restore(&snapshot);
        assert_eq!(fp.value(), snapshot.value);
        fp.toggle(Coord::new(5, 5), Color::Black);
        fp.commit();
        assert_eq!(snapshot.seen.len(), 2);
    }

    #[test]
    fn empty_position_is_seen_after_reset() {
        let mut fp = Fingerprint::new(ZobristTable::new(5, 3));
        assert!(fp.contains(0));
        fp.toggle(Coord::new(1, 1), Color::Black);
        fp.commit();
        fp.reset();
        assert_eq!(fp.value(), 0);
        assert_eq!(fp.seen_count(), 1);
    }
}
