//! Board and block model for sliding-block puzzles.
//!
//! A puzzle state is a grid of cell occupancy values (0 for empty, otherwise
//! a block id) plus the list of blocks occupying it. Moving a block never
//! mutates a board in place: applying a move produces a brand-new `Board`,
//! so search drivers can hold earlier states for path reconstruction.

use std::fmt;

/// A grid coordinate as (row, col).
pub type Coord = (i32, i32);

/// Value of an empty grid cell.
pub const EMPTY: u8 = 0;

/// One of the four unit translations a block can make.
///
/// The variant order is the enumeration order used by [`Board::legal_moves`],
/// which in turn fixes the tie-breaking order of the search drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The (row, col) shift this direction applies to every cell of a block.
    #[inline]
    pub fn delta(self) -> Coord {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// The direction that undoes this one.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// A single step of one block in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub block: u8,
    pub direction: Direction,
}

impl Move {
    pub fn new(block: u8, direction: Direction) -> Self {
        Self { block, direction }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.block, self.direction)
    }
}

/// A rigid set of grid cells that moves as a unit.
///
/// The block's shape is implicit in the relative offsets between its cells
/// and is preserved by every move, since movement is a uniform translation
/// of all cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: u8,
    pub cells: Vec<Coord>,
    pub is_target: bool,
}

impl Block {
    /// A regular block.
    pub fn new(id: u8, cells: Vec<Coord>) -> Self {
        Self {
            id,
            cells,
            is_target: false,
        }
    }

    /// The block whose final position decides puzzle completion.
    pub fn target(id: u8, cells: Vec<Coord>) -> Self {
        Self {
            id,
            cells,
            is_target: true,
        }
    }

    /// A copy of this block with every cell shifted one step.
    fn translated(&self, direction: Direction) -> Block {
        let (dr, dc) = direction.delta();
        Block {
            id: self.id,
            cells: self.cells.iter().map(|&(r, c)| (r + dr, c + dc)).collect(),
            is_target: self.is_target,
        }
    }
}

/// An immutable snapshot of a puzzle position.
///
/// Invariant: every non-empty grid cell holds the id of exactly one block,
/// and that block's cell set contains exactly that coordinate. Boards are
/// only built by [`crate::puzzle::Puzzle`] (which validates the initial
/// layout) or by [`Board::try_move`] (which preserves the invariant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    grid: Vec<u8>,
    blocks: Vec<Block>,
    target: u8,
}

impl Board {
    /// Builds a board from an already-validated block list.
    pub(crate) fn new(rows: usize, cols: usize, blocks: Vec<Block>) -> Self {
        let mut grid = vec![EMPTY; rows * cols];
        let mut target = EMPTY;
        for block in &blocks {
            if block.is_target {
                target = block.id;
            }
            for &(r, c) in &block.cells {
                grid[r as usize * cols + c as usize] = block.id;
            }
        }
        Self {
            rows,
            cols,
            grid,
            blocks,
            target,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Id of the target block.
    pub fn target_id(&self) -> u8 {
        self.target
    }

    /// All blocks on this board, in ascending id order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Looks up a block by id.
    pub fn block(&self, id: u8) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Occupancy value at `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the grid.
    pub fn cell(&self, cell: Coord) -> u8 {
        assert!(self.in_bounds(cell), "cell {cell:?} out of bounds");
        self.grid[cell.0 as usize * self.cols + cell.1 as usize]
    }

    fn in_bounds(&self, (r, c): Coord) -> bool {
        r >= 0 && (r as usize) < self.rows && c >= 0 && (c as usize) < self.cols
    }

    /// Whether `block` can legally shift one step in `direction`.
    ///
    /// Every translated cell must stay within grid bounds on both axes and
    /// land on a cell that is either empty or occupied by the moving block
    /// itself (a block is allowed to move into cells it is vacating).
    pub fn can_move_block(&self, block: &Block, direction: Direction) -> bool {
        let (dr, dc) = direction.delta();
        block.cells.iter().all(|&(r, c)| {
            let cell = (r + dr, c + dc);
            if !self.in_bounds(cell) {
                return false;
            }
            let value = self.cell(cell);
            value == EMPTY || value == block.id
        })
    }

    /// Whether the block with `id` can legally shift one step in `direction`.
    ///
    /// An unknown id is never legal. Callers may probe arbitrary ids.
    pub fn can_move(&self, id: u8, direction: Direction) -> bool {
        match self.block(id) {
            Some(block) => self.can_move_block(block, direction),
            None => false,
        }
    }

    /// Applies one legality-checked step, producing the successor board.
    ///
    /// Returns `None` when the block does not exist or the step is illegal,
    /// so an unchecked application can never corrupt the occupancy
    /// invariant.
    pub fn try_move(&self, id: u8, direction: Direction) -> Option<Board> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        let block = &self.blocks[index];
        if !self.can_move_block(block, direction) {
            return None;
        }
        let moved = block.translated(direction);
        let mut next = self.clone();
        for &(r, c) in &block.cells {
            next.grid[r as usize * self.cols + c as usize] = EMPTY;
        }
        for &(r, c) in &moved.cells {
            next.grid[r as usize * self.cols + c as usize] = moved.id;
        }
        next.blocks[index] = moved;
        Some(next)
    }

    /// Every legal (block, direction) step from this position.
    ///
    /// Enumeration order is fixed: directions in [`Direction::ALL`] order,
    /// then blocks by ascending id. Search results depend on this order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for direction in Direction::ALL {
            for block in &self.blocks {
                if self.can_move_block(block, direction) {
                    moves.push(Move::new(block.id, direction));
                }
            }
        }
        moves
    }

    /// Whether every cell of `goal` is occupied by the target block.
    pub fn is_solved(&self, goal: &[Coord]) -> bool {
        goal.iter().all(|&cell| self.cell(cell) == self.target)
    }

    /// Number of occupied grid cells.
    pub fn occupied_cells(&self) -> usize {
        self.grid.iter().filter(|&&v| v != EMPTY).count()
    }
}

impl fmt::Display for Board {
    /// One text row per grid row: `.` for empty, the block id as a single
    /// hex-style character otherwise (`1`-`9`, then `A`, `B`, ...).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.cols {
                let value = self.grid[r * self.cols + c];
                let ch = match value {
                    EMPTY => '.',
                    1..=9 => char::from(b'0' + value),
                    10..=35 => char::from(b'A' + value - 10),
                    _ => '?',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
