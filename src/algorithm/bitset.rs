use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over tile ids
///
/// Tile ids are zero-based and dense, so a plain bit vector gives O(1)
/// membership tests, word-parallel intersection, and population-count
/// cardinality. Both per-cell possibility sets and adjacency rule sets use
/// this representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    tile_count: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(tile_count: usize) -> Self {
        Self {
            bits: bitvec![0; tile_count],
            tile_count,
        }
    }

    /// Create a bitset containing every tile id below `tile_count`
    pub fn all(tile_count: usize) -> Self {
        Self {
            bits: bitvec![1; tile_count],
            tile_count,
        }
    }

    /// Create a bitset holding exactly one tile id
    pub fn singleton(tile: usize, tile_count: usize) -> Self {
        let mut set = Self::new(tile_count);
        set.insert(tile);
        set
    }

    /// Insert a tile id
    pub fn insert(&mut self, tile: usize) {
        if tile < self.tile_count {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of tile ids the set ranges over
    pub const fn capacity(&self) -> usize {
        self.tile_count
    }

    /// Iterate over member tile ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// The single member id, if the set holds exactly one tile
    pub fn sole_member(&self) -> Option<usize> {
        if self.count() == 1 {
            self.bits.first_one()
        } else {
            None
        }
    }

    /// Extract all member tile ids as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl FromIterator<usize> for TileBitset {
    /// Collect tile ids into a set sized to the largest id seen
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let ids: Vec<usize> = iter.into_iter().collect();
        let tile_count = ids.iter().max().map_or(0, |&max| max + 1);
        let mut set = Self::new(tile_count);
        for id in ids {
            set.insert(id);
        }
        set
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
