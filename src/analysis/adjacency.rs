//! Overlap-compatibility adjacency between extracted patterns
//!
//! Tile B may sit immediately to the right of tile A when the rightmost
//! N-1 columns of A equal the leftmost N-1 columns of B, pixel-exact; the
//! other three directions are analogous. Rather than comparing every pixel
//! of every ordered pair, each tile gets four "overlap signatures" (the raw
//! bytes of the relevant slab) and tiles are bucketed by signature, which
//! turns the pair test into a hash lookup.

use crate::algorithm::bitset::TileBitset;
use crate::analysis::patterns::Pattern;
use crate::spatial::grid::Direction;
use std::collections::HashMap;

/// Byte key of one (N-1)-deep overlap slab
type Signature = Vec<u8>;

// The four slab keys of a single tile
struct OverlapSignatures {
    top: Signature,
    bottom: Signature,
    left: Signature,
    right: Signature,
}

/// Derive adjacency rule sets for every tile and direction
///
/// All ordered pairs participate, including a tile against itself. For
/// N = 1 the slabs are empty, so every tile neighbours every tile in every
/// direction.
pub fn build_adjacency(patterns: &[Pattern]) -> Vec<[TileBitset; 4]> {
    let tile_count = patterns.len();
    let signatures: Vec<OverlapSignatures> = patterns.iter().map(overlap_signatures).collect();

    // Bucket tile ids by the signature the rule compares against
    let mut by_top: HashMap<&Signature, Vec<usize>> = HashMap::new();
    let mut by_bottom: HashMap<&Signature, Vec<usize>> = HashMap::new();
    let mut by_left: HashMap<&Signature, Vec<usize>> = HashMap::new();
    let mut by_right: HashMap<&Signature, Vec<usize>> = HashMap::new();

    for (id, sigs) in signatures.iter().enumerate() {
        by_top.entry(&sigs.top).or_default().push(id);
        by_bottom.entry(&sigs.bottom).or_default().push(id);
        by_left.entry(&sigs.left).or_default().push(id);
        by_right.entry(&sigs.right).or_default().push(id);
    }

    debug_assert_eq!(Direction::Up.index(), 0);

    let rules: Vec<[TileBitset; 4]> = signatures
        .iter()
        .map(|sigs| {
            // Array order follows Direction::index: Up, Down, Left, Right.
            // B above A: top slab of A equals bottom slab of B, and so on.
            [
                collect_bucket(by_bottom.get(&sigs.top), tile_count),
                collect_bucket(by_top.get(&sigs.bottom), tile_count),
                collect_bucket(by_right.get(&sigs.left), tile_count),
                collect_bucket(by_left.get(&sigs.right), tile_count),
            ]
        })
        .collect();

    debug_assert!(is_symmetric(&rules));
    rules
}

// B in adj[A][dir] must imply A in adj[B][opposite(dir)]
fn is_symmetric(rules: &[[TileBitset; 4]]) -> bool {
    rules.iter().enumerate().all(|(a, dirs)| {
        Direction::ALL.iter().all(|&direction| {
            dirs.get(direction.index()).is_some_and(|permitted| {
                permitted.iter().all(|b| {
                    rules
                        .get(b)
                        .and_then(|back| back.get(direction.opposite().index()))
                        .is_some_and(|back| back.contains(a))
                })
            })
        })
    })
}

fn collect_bucket(bucket: Option<&Vec<usize>>, tile_count: usize) -> TileBitset {
    let mut set = TileBitset::new(tile_count);
    if let Some(ids) = bucket {
        for &id in ids {
            set.insert(id);
        }
    }
    set
}

fn overlap_signatures(pattern: &Pattern) -> OverlapSignatures {
    let n = pattern.size();
    OverlapSignatures {
        top: slab_key(pattern, 0..n.saturating_sub(1), 0..n),
        bottom: slab_key(pattern, 1..n, 0..n),
        left: slab_key(pattern, 0..n, 0..n.saturating_sub(1)),
        right: slab_key(pattern, 0..n, 1..n),
    }
}

// Row-major RGBA bytes of the given row/column ranges
fn slab_key(
    pattern: &Pattern,
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
) -> Signature {
    let mut key = Vec::with_capacity(rows.len() * cols.len() * 4);
    for row in rows {
        for col in cols.clone() {
            key.extend_from_slice(&pattern.pixel(col, row));
        }
    }
    key
}
