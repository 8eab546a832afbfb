//! Sliding-Block Puzzle Solver Library
//!
//! Provides the core solving functionality for sliding-block (Klotski)
//! puzzles: a board/block model producing immutable successor states, a
//! symmetry-normalized canonical key for visited-state deduplication, and
//! two search drivers — an exhaustive breadth-first search over the state
//! graph that finds every shortest solution, and a depth-first backtracking
//! search that finds one solution quickly.

pub mod board;
pub mod canonical;
pub mod puzzle;
mod solver;

pub use board::{Block, Board, Coord, Direction, Move};
pub use puzzle::{Puzzle, PuzzleError, ReplayError};
