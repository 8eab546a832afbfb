//! Search drivers over the implicit graph of puzzle positions.
//!
//! Both drivers walk the graph defined by [`Board::legal_moves`] and
//! deduplicate positions through their canonical keys (and mirror keys, so
//! mirror-equivalent positions are explored once):
//!
//! - a breadth-first search that records a shortest path to every distinct
//!   reachable goal position, and
//! - a depth-first backtracking search that stops at the first goal
//!   position it reaches.
//!
//! Discovered positions live in a grow-only arena; each node stores the
//! index of its parent and the move that produced it, so a path is
//! reconstructed by walking parent indices back to the root. The
//! depth-first driver keeps an explicit stack of arena indices instead of
//! recursing, so exploration depth is not bounded by the call stack.

use std::collections::VecDeque;

use log::debug;
use rustc_hash::FxHashSet;

use crate::board::{Board, Coord, Move};
use crate::canonical::{canonical_key, mirror_key, GridKey, ShapeClasses};

/// One discovered position. `parent` and `via` are set once at discovery
/// and never change; the root has neither.
struct Node {
    board: Board,
    parent: Option<usize>,
    via: Option<Move>,
    depth: u32,
}

/// Moves from the root to `nodes[index]`, in start-to-goal order.
fn trace_moves(nodes: &[Node], mut index: usize) -> Vec<Move> {
    let mut moves = Vec::with_capacity(nodes[index].depth as usize);
    while let (Some(parent), Some(via)) = (nodes[index].parent, nodes[index].via) {
        moves.push(via);
        index = parent;
    }
    moves.reverse();
    moves
}

/// Visited-key set seeded with the root position and its mirror.
fn seed_visited(start: &Board, classes: &ShapeClasses) -> FxHashSet<GridKey> {
    let mut visited = FxHashSet::default();
    let key = canonical_key(start, classes);
    visited.insert(mirror_key(&key, start.cols()));
    visited.insert(key);
    visited
}

/// Breadth-first exhaustive search.
///
/// Returns a shortest move sequence to every distinct goal position, in
/// discovery order. Goal positions are leaves: they are recorded and not
/// expanded further. Since positions are expanded in non-decreasing
/// distance order and marked visited at first discovery, each returned
/// sequence is minimal for the goal position it reaches.
pub(crate) fn goal_paths(start: &Board, goal: &[Coord]) -> Vec<Vec<Move>> {
    if start.is_solved(goal) {
        return vec![Vec::new()];
    }

    let classes = ShapeClasses::new(start.blocks());
    let cols = start.cols();
    let mut visited = seed_visited(start, &classes);
    let mut nodes = vec![Node {
        board: start.clone(),
        parent: None,
        via: None,
        depth: 0,
    }];
    let mut frontier = VecDeque::from([0usize]);
    let mut paths = Vec::new();

    while let Some(index) = frontier.pop_front() {
        let depth = nodes[index].depth + 1;
        for mv in nodes[index].board.legal_moves() {
            let Some(next) = nodes[index].board.try_move(mv.block, mv.direction) else {
                continue;
            };
            let key = canonical_key(&next, &classes);
            if visited.contains(&key) {
                continue;
            }
            visited.insert(mirror_key(&key, cols));
            visited.insert(key);

            let discovered = nodes.len();
            let solved = next.is_solved(goal);
            nodes.push(Node {
                board: next,
                parent: Some(index),
                via: Some(mv),
                depth,
            });
            if solved {
                paths.push(trace_moves(&nodes, discovered));
            } else {
                frontier.push_back(discovered);
            }
        }
    }

    debug!(
        "breadth-first search explored {} positions, reached {} goal positions",
        nodes.len(),
        paths.len()
    );
    paths
}

/// Every shortest solution: the goal paths of minimal length.
pub(crate) fn solve_all_shortest(start: &Board, goal: &[Coord]) -> Vec<Vec<Move>> {
    let mut paths = goal_paths(start, goal);
    if let Some(best) = paths.iter().map(Vec::len).min() {
        paths.retain(|path| path.len() == best);
    }
    paths
}

/// Depth-first backtracking search for a single solution.
///
/// Successors of a position are generated (and marked visited) as a batch,
/// then explored in enumeration order; the first goal position reached ends
/// the search. The returned sequence is a solution but not necessarily a
/// shortest one.
pub(crate) fn solve_one(start: &Board, goal: &[Coord]) -> Option<Vec<Move>> {
    let classes = ShapeClasses::new(start.blocks());
    let cols = start.cols();
    let mut visited = seed_visited(start, &classes);
    let mut nodes = vec![Node {
        board: start.clone(),
        parent: None,
        via: None,
        depth: 0,
    }];
    let mut stack = vec![0usize];

    while let Some(index) = stack.pop() {
        if nodes[index].board.is_solved(goal) {
            debug!(
                "backtracking search explored {} positions, found a {}-move path",
                nodes.len(),
                nodes[index].depth
            );
            return Some(trace_moves(&nodes, index));
        }

        let depth = nodes[index].depth + 1;
        let first_child = nodes.len();
        for mv in nodes[index].board.legal_moves() {
            let Some(next) = nodes[index].board.try_move(mv.block, mv.direction) else {
                continue;
            };
            let key = canonical_key(&next, &classes);
            if visited.contains(&key) {
                continue;
            }
            visited.insert(mirror_key(&key, cols));
            visited.insert(key);
            nodes.push(Node {
                board: next,
                parent: Some(index),
                via: Some(mv),
                depth,
            });
        }
        // Reversed so the first successor in enumeration order pops first.
        for child in (first_child..nodes.len()).rev() {
            stack.push(child);
        }
    }

    debug!(
        "backtracking search exhausted {} positions without reaching a goal",
        nodes.len()
    );
    None
}
