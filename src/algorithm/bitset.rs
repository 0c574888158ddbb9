use bitvec::prelude::*;
use std::fmt;

/// Fixed-capacity bitset of tile indices still admissible for a cell
///
/// Indices are 0-based positions in the tile set. Inserting an index at or
/// beyond the capacity is ignored, so the set never holds an unknown tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PossibilitySet {
    bits: BitVec,
}

impl PossibilitySet {
    /// Create a set with no tiles present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every tile index below `capacity`
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Create a set holding exactly one tile
    pub fn singleton(capacity: usize, tile: usize) -> Self {
        let mut set = Self::new(capacity);
        set.insert(tile);
        set
    }

    /// Number of tile indices the set can address
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile index
    pub fn insert(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Keep only the tiles for which `keep` returns true
    ///
    /// `keep` is called once per present tile, in ascending order.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        for (tile, mut bit) in self.bits.iter_mut().enumerate() {
            if *bit && !keep(tile) {
                bit.set(false);
            }
        }
    }

    /// Replace the contents with exactly one tile
    pub fn collapse_to(&mut self, tile: usize) {
        self.bits.fill(false);
        self.insert(tile);
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The `n`-th present tile in ascending order
    pub fn nth(&self, n: usize) -> Option<usize> {
        self.bits.iter_ones().nth(n)
    }

    /// Iterate present tiles in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all tile indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for PossibilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PossibilitySet({} tiles: {:?})", self.count(), self.to_vec())
    }
}
