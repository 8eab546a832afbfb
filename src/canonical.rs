//! Symmetry-normalized state keys for visited-state deduplication.
//!
//! Two positions are the same search state when their grids agree cell for
//! cell after replacing each block id with its *shape class*: blocks of
//! congruent shape are interchangeable, so swapping two identical blocks
//! must not count as a new state. The target block always keeps a class of
//! its own, because the goal test cares about its identity.
//!
//! The board is also bilaterally symmetric: a position is valid exactly when
//! its left-right mirror image is, so whenever a state is recorded its
//! [`mirror_key`] is recorded alongside it and mirror-equivalent states are
//! never re-explored.

use rustc_hash::FxHashMap;

use crate::board::{Block, Board, Coord, EMPTY};

/// A shape-class encoding of a grid, one byte per cell.
pub type GridKey = Vec<u8>;

/// Class byte for empty cells.
const EMPTY_CLASS: u8 = 0;

/// Class byte reserved for the target block.
const TARGET_CLASS: u8 = 1;

/// First class byte handed out to non-target shapes.
const SHAPE_CLASS_BASE: u8 = 2;

/// Cell offsets normalized so the minimum row and column are zero, sorted.
///
/// Two blocks have the same signature exactly when one is a pure translation
/// of the other.
pub(crate) fn shape_signature(cells: &[Coord]) -> Vec<Coord> {
    let min_r = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_c = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let mut signature: Vec<Coord> = cells
        .iter()
        .map(|&(r, c)| (r - min_r, c - min_c))
        .collect();
    signature.sort_unstable();
    signature
}

/// Mapping from block id to shape class byte for one block set.
///
/// Classes are assigned in ascending block id order, so the same block set
/// always yields the same mapping.
pub struct ShapeClasses {
    by_id: Vec<u8>,
}

impl ShapeClasses {
    pub fn new(blocks: &[Block]) -> Self {
        let max_id = blocks.iter().map(|b| b.id).max().unwrap_or(0);
        let mut by_id = vec![EMPTY_CLASS; max_id as usize + 1];
        let mut assigned: FxHashMap<Vec<Coord>, u8> = FxHashMap::default();
        let mut next = SHAPE_CLASS_BASE;
        for block in blocks {
            if block.is_target {
                by_id[block.id as usize] = TARGET_CLASS;
                continue;
            }
            let class = *assigned
                .entry(shape_signature(&block.cells))
                .or_insert_with(|| {
                    let class = next;
                    next += 1;
                    class
                });
            by_id[block.id as usize] = class;
        }
        Self { by_id }
    }

    #[inline]
    fn class_of(&self, id: u8) -> u8 {
        if id == EMPTY {
            EMPTY_CLASS
        } else {
            self.by_id[id as usize]
        }
    }
}

/// The canonical key of a board: its grid with every cell value replaced by
/// the occupying block's shape class. Linear in grid size.
pub fn canonical_key(board: &Board, classes: &ShapeClasses) -> GridKey {
    let mut key = Vec::with_capacity(board.rows() * board.cols());
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            key.push(classes.class_of(board.cell((r as i32, c as i32))));
        }
    }
    key
}

/// The key of the left-right mirrored grid: each row reversed in place.
pub fn mirror_key(key: &[u8], cols: usize) -> GridKey {
    let mut mirrored = Vec::with_capacity(key.len());
    for row in key.chunks(cols) {
        mirrored.extend(row.iter().rev());
    }
    mirrored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Direction;
    use crate::puzzle::Puzzle;
    use proptest::prelude::*;

    fn classic_key() -> (GridKey, usize) {
        let puzzle = Puzzle::classic();
        let classes = ShapeClasses::new(puzzle.start().blocks());
        (canonical_key(puzzle.start(), &classes), puzzle.start().cols())
    }

    #[test]
    fn congruent_blocks_are_interchangeable() {
        // Blocks 8 and 9 are both 1x1; exchanging their positions must not
        // produce a new state.
        let puzzle = Puzzle::classic();
        let swapped = Puzzle::from_grid(
            &[
                &[1, 10, 10, 4],
                &[1, 10, 10, 4],
                &[2, 7, 7, 5],
                &[2, 9, 8, 5],
                &[3, 0, 0, 6],
            ],
            10,
            vec![(4, 1), (4, 2)],
        )
        .unwrap();

        let classes = ShapeClasses::new(puzzle.start().blocks());
        assert_eq!(
            canonical_key(puzzle.start(), &classes),
            canonical_key(swapped.start(), &classes),
        );
    }

    #[test]
    fn the_target_block_keeps_its_own_class() {
        // Two congruent 2x2 blocks, one of them the target. Exchanging them
        // changes which block sits on the goal, so the keys must differ.
        let top = Puzzle::from_grid(
            &[&[1, 1], &[1, 1], &[2, 2], &[2, 2]],
            1,
            vec![(3, 0), (3, 1)],
        )
        .unwrap();
        let bottom = Puzzle::from_grid(
            &[&[2, 2], &[2, 2], &[1, 1], &[1, 1]],
            1,
            vec![(3, 0), (3, 1)],
        )
        .unwrap();

        let classes = ShapeClasses::new(top.start().blocks());
        assert_ne!(
            canonical_key(top.start(), &classes),
            canonical_key(bottom.start(), &classes),
        );
    }

    #[test]
    fn key_commutes_with_board_mirroring() {
        let puzzle = Puzzle::classic();
        let mirrored = Puzzle::from_grid(
            &[
                &[4, 10, 10, 1],
                &[4, 10, 10, 1],
                &[5, 7, 7, 2],
                &[5, 9, 8, 2],
                &[6, 0, 0, 3],
            ],
            10,
            vec![(4, 1), (4, 2)],
        )
        .unwrap();

        let classes = ShapeClasses::new(puzzle.start().blocks());
        let key = canonical_key(puzzle.start(), &classes);
        assert_eq!(
            canonical_key(mirrored.start(), &classes),
            mirror_key(&key, puzzle.start().cols()),
        );
    }

    #[test]
    fn key_changes_when_the_occupancy_pattern_changes() {
        let puzzle = Puzzle::classic();
        let classes = ShapeClasses::new(puzzle.start().blocks());
        let key = canonical_key(puzzle.start(), &classes);
        let moved = puzzle.start().try_move(8, Direction::Down).unwrap();
        assert_ne!(canonical_key(&moved, &classes), key);
    }

    #[test]
    fn mirroring_the_classic_key_twice_is_identity() {
        let (key, cols) = classic_key();
        assert_eq!(mirror_key(&mirror_key(&key, cols), cols), key);
    }

    fn key_and_cols() -> impl Strategy<Value = (usize, Vec<u8>)> {
        (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(any::<u8>(), rows * cols)
                .prop_map(move |key| (cols, key))
        })
    }

    proptest! {
        #[test]
        fn mirror_is_an_involution((cols, key) in key_and_cols()) {
            prop_assert_eq!(mirror_key(&mirror_key(&key, cols), cols), key);
        }
    }
}
