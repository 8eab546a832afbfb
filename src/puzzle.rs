//! Validated puzzle configurations and the solver entry points.
//!
//! A [`Puzzle`] owns the initial board and the goal region. Construction
//! checks every structural invariant once, so the search drivers can assume
//! a well-formed position throughout.

use crate::board::{Block, Board, Coord, Move, EMPTY};
use crate::solver;

/// A structurally invalid puzzle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleError {
    #[display("the grid has no cells")]
    EmptyGrid,
    #[display("grid rows have differing lengths")]
    RaggedGrid,
    #[display("block id 0 is reserved for empty cells")]
    ReservedId,
    #[display("block id {id} is used by more than one block")]
    DuplicateId { id: u8 },
    #[display("block {id} has no cells")]
    EmptyBlock { id: u8 },
    #[display("block {id} has cell {cell:?} outside the grid")]
    CellOutOfBounds { id: u8, cell: Coord },
    #[display("blocks {first} and {second} both occupy cell {cell:?}")]
    OverlappingBlocks { first: u8, second: u8, cell: Coord },
    #[display("no block is marked as the target")]
    NoTarget,
    #[display("blocks {first} and {second} are both marked as the target")]
    MultipleTargets { first: u8, second: u8 },
    #[display("the goal region has no cells")]
    EmptyGoal,
    #[display("goal cell {cell:?} is outside the grid")]
    GoalOutOfBounds { cell: Coord },
}

/// A move sequence that cannot be applied from the initial position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ReplayError {
    #[display("step {step}: no block with id {id}")]
    UnknownBlock { step: usize, id: u8 },
    #[display("step {step}: move \"{mv}\" is illegal from the current position")]
    IllegalMove { step: usize, mv: Move },
}

/// A sliding-block puzzle: an initial position plus a goal region the
/// target block must cover.
#[derive(Debug, Clone)]
pub struct Puzzle {
    start: Board,
    goal: Vec<Coord>,
}

impl Puzzle {
    /// Builds a puzzle from grid dimensions, a block list (exactly one block
    /// marked as target), and the goal region.
    pub fn new(
        rows: usize,
        cols: usize,
        mut blocks: Vec<Block>,
        goal: Vec<Coord>,
    ) -> Result<Self, PuzzleError> {
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        if goal.is_empty() {
            return Err(PuzzleError::EmptyGoal);
        }
        let in_bounds =
            |(r, c): Coord| r >= 0 && (r as usize) < rows && c >= 0 && (c as usize) < cols;
        for &cell in &goal {
            if !in_bounds(cell) {
                return Err(PuzzleError::GoalOutOfBounds { cell });
            }
        }

        blocks.sort_by_key(|b| b.id);
        let mut target = None;
        let mut occupancy = vec![EMPTY; rows * cols];
        for (index, block) in blocks.iter().enumerate() {
            if block.id == EMPTY {
                return Err(PuzzleError::ReservedId);
            }
            if index > 0 && blocks[index - 1].id == block.id {
                return Err(PuzzleError::DuplicateId { id: block.id });
            }
            if block.cells.is_empty() {
                return Err(PuzzleError::EmptyBlock { id: block.id });
            }
            for &cell in &block.cells {
                if !in_bounds(cell) {
                    return Err(PuzzleError::CellOutOfBounds { id: block.id, cell });
                }
                let slot = &mut occupancy[cell.0 as usize * cols + cell.1 as usize];
                if *slot != EMPTY {
                    return Err(PuzzleError::OverlappingBlocks {
                        first: *slot,
                        second: block.id,
                        cell,
                    });
                }
                *slot = block.id;
            }
            if block.is_target {
                if let Some(first) = target {
                    return Err(PuzzleError::MultipleTargets {
                        first,
                        second: block.id,
                    });
                }
                target = Some(block.id);
            }
        }
        if target.is_none() {
            return Err(PuzzleError::NoTarget);
        }

        Ok(Self {
            start: Board::new(rows, cols, blocks),
            goal,
        })
    }

    /// Builds a puzzle from an occupancy grid, deriving each block's cell
    /// set by scanning for its id. `target` names the target block.
    pub fn from_grid(grid: &[&[u8]], target: u8, goal: Vec<Coord>) -> Result<Self, PuzzleError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, |row| row.len());
        if grid.iter().any(|row| row.len() != cols) {
            return Err(PuzzleError::RaggedGrid);
        }

        let mut ids: Vec<u8> = grid.iter().flat_map(|row| row.iter().copied()).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut blocks = Vec::new();
        for id in ids.into_iter().filter(|&id| id != EMPTY) {
            let cells: Vec<Coord> = (0..rows)
                .flat_map(|r| (0..cols).map(move |c| (r as i32, c as i32)))
                .filter(|&(r, c)| grid[r as usize][c as usize] == id)
                .collect();
            blocks.push(if id == target {
                Block::target(id, cells)
            } else {
                Block::new(id, cells)
            });
        }
        Self::new(rows, cols, blocks, goal)
    }

    /// The classic 5x4 ten-block layout: four 2x1 uprights, one 1x2 bar,
    /// four 1x1 singles, and the 2x2 target that must reach the two middle
    /// cells of the bottom row.
    pub fn classic() -> Self {
        const LAYOUT: [[u8; 4]; 5] = [
            [1, 10, 10, 4],
            [1, 10, 10, 4],
            [2, 7, 7, 5],
            [2, 8, 9, 5],
            [3, 0, 0, 6],
        ];
        let rows: Vec<&[u8]> = LAYOUT.iter().map(|row| row.as_slice()).collect();
        Self::from_grid(&rows, 10, vec![(4, 1), (4, 2)]).expect("classic layout is valid")
    }

    /// The initial position.
    pub fn start(&self) -> &Board {
        &self.start
    }

    /// The cells the target block must cover.
    pub fn goal(&self) -> &[Coord] {
        &self.goal
    }

    /// Every shortest move sequence from the initial position to a goal
    /// position. Empty when no goal position is reachable; all returned
    /// sequences have the same, globally minimal length.
    pub fn solve_all_shortest(&self) -> Vec<Vec<Move>> {
        solver::solve_all_shortest(&self.start, &self.goal)
    }

    /// One shortest path per distinct reachable goal position, in discovery
    /// order. Unlike [`Puzzle::solve_all_shortest`] the lengths differ: each
    /// path is minimal for its own goal position only.
    pub fn goal_paths(&self) -> Vec<Vec<Move>> {
        solver::goal_paths(&self.start, &self.goal)
    }

    /// Some path to a goal position found by exhaustive backtracking, with
    /// no shortest-path guarantee. `None` when no goal position is
    /// reachable.
    pub fn solve_one(&self) -> Option<Vec<Move>> {
        solver::solve_one(&self.start, &self.goal)
    }

    /// Applies `moves` from the initial position, returning every board
    /// along the way (the initial one included).
    pub fn replay(&self, moves: &[Move]) -> Result<Vec<Board>, ReplayError> {
        let mut boards = vec![self.start.clone()];
        for (step, &mv) in moves.iter().enumerate() {
            let current = boards.last().unwrap_or(&self.start);
            if current.block(mv.block).is_none() {
                return Err(ReplayError::UnknownBlock { step, id: mv.block });
            }
            let next = current
                .try_move(mv.block, mv.direction)
                .ok_or(ReplayError::IllegalMove { step, mv })?;
            boards.push(next);
        }
        Ok(boards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Direction;

    #[test]
    fn classic_layout_is_well_formed() {
        let puzzle = Puzzle::classic();
        let board = puzzle.start();
        assert_eq!(board.rows(), 5);
        assert_eq!(board.cols(), 4);
        assert_eq!(board.blocks().len(), 10);
        assert_eq!(board.target_id(), 10);
        assert_eq!(board.occupied_cells(), 18);
        assert_eq!(board.block(10).unwrap().cells.len(), 4);
        assert!(!board.is_solved(puzzle.goal()));
    }

    #[test]
    fn overlapping_blocks_are_rejected() {
        let result = Puzzle::new(
            2,
            2,
            vec![
                Block::target(1, vec![(0, 0), (0, 1)]),
                Block::new(2, vec![(0, 1)]),
            ],
            vec![(1, 0)],
        );
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::OverlappingBlocks {
                first: 1,
                second: 2,
                cell: (0, 1)
            }
        );
    }

    #[test]
    fn out_of_bounds_cells_are_rejected() {
        let result = Puzzle::new(
            2,
            2,
            vec![Block::target(1, vec![(0, 0), (0, 2)])],
            vec![(1, 0)],
        );
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::CellOutOfBounds {
                id: 1,
                cell: (0, 2)
            }
        );
    }

    #[test]
    fn exactly_one_target_is_required() {
        let none = Puzzle::new(1, 2, vec![Block::new(1, vec![(0, 0)])], vec![(0, 1)]);
        assert_eq!(none.unwrap_err(), PuzzleError::NoTarget);

        let both = Puzzle::new(
            1,
            3,
            vec![
                Block::target(1, vec![(0, 0)]),
                Block::target(2, vec![(0, 1)]),
            ],
            vec![(0, 2)],
        );
        assert_eq!(
            both.unwrap_err(),
            PuzzleError::MultipleTargets { first: 1, second: 2 }
        );
    }

    #[test]
    fn reserved_and_duplicate_ids_are_rejected() {
        let zero = Puzzle::new(1, 2, vec![Block::target(0, vec![(0, 0)])], vec![(0, 1)]);
        assert_eq!(zero.unwrap_err(), PuzzleError::ReservedId);

        let twice = Puzzle::new(
            1,
            3,
            vec![
                Block::target(1, vec![(0, 0)]),
                Block::new(1, vec![(0, 1)]),
            ],
            vec![(0, 2)],
        );
        assert_eq!(twice.unwrap_err(), PuzzleError::DuplicateId { id: 1 });
    }

    #[test]
    fn goal_region_is_validated() {
        let empty = Puzzle::new(1, 2, vec![Block::target(1, vec![(0, 0)])], vec![]);
        assert_eq!(empty.unwrap_err(), PuzzleError::EmptyGoal);

        let outside = Puzzle::new(1, 2, vec![Block::target(1, vec![(0, 0)])], vec![(0, 5)]);
        assert_eq!(
            outside.unwrap_err(),
            PuzzleError::GoalOutOfBounds { cell: (0, 5) }
        );
    }

    #[test]
    fn replay_walks_a_legal_sequence() {
        let puzzle = Puzzle::classic();
        let moves = [
            Move::new(3, Direction::Right),
            Move::new(9, Direction::Down),
        ];
        let boards = puzzle.replay(&moves).unwrap();
        assert_eq!(boards.len(), 3);
        assert_eq!(boards[1].cell((4, 1)), 3);
        assert_eq!(boards[2].cell((4, 2)), 9);
    }

    #[test]
    fn replay_reports_bad_steps() {
        let puzzle = Puzzle::classic();

        let unknown = puzzle.replay(&[Move::new(42, Direction::Up)]);
        assert_eq!(
            unknown.unwrap_err(),
            ReplayError::UnknownBlock { step: 0, id: 42 }
        );

        let illegal = puzzle.replay(&[
            Move::new(3, Direction::Right),
            Move::new(3, Direction::Up),
        ]);
        assert_eq!(
            illegal.unwrap_err(),
            ReplayError::IllegalMove {
                step: 1,
                mv: Move::new(3, Direction::Up)
            }
        );
    }
}
