//! Depth-bounded exploration of the move graph.
//!
//! Every distinct `(board, depth, orientation)` state reachable within the move budget is
//! collected once, including states that still have moves left. Nothing is pruned on
//! arithmetic validity; the solver filters the whole set afterwards.
//!
//! With rotation allowed the board is turned before the first move and explored a second
//! time from there, so every upside-down state is a plain sequence of relocations away from
//! the rotated start.

use std::collections::HashSet;

use instant::Instant;
use log::debug;

use crate::board::BitBoard;
use crate::moves::{MoveGenerator, Padding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub max_depth: usize,
    pub allow_flip: bool,
    pub allow_prepend: bool,
    pub allow_append: bool,
}

impl SearchOptions {
    pub fn padding(&self) -> Padding {
        Padding { front: self.allow_prepend, back: self.allow_append }
    }
}

/// One node of the move graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub board: BitBoard,
    /// Moves spent to reach `board`.
    pub depth: usize,
    /// `board` is held rotated by 180°.
    pub flipped: bool,
}

/// Everything a search reached, plus the boards move lists are diffed against.
#[derive(Debug, Clone)]
pub struct Exploration {
    /// The starting board with its pad cells.
    pub start: BitBoard,
    /// `start` rotated, if it can be.
    pub flipped_start: Option<BitBoard>,
    pub states: HashSet<SearchState>,
}

impl Exploration {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

struct SearchCtx {
    generator: MoveGenerator,
    max_depth: usize,
}

/// Explore every state reachable from `board` within `options.max_depth` moves.
///
/// The start state (padded, depth 0, upright) is always part of the result, and so is its
/// rotation when `options.allow_flip` is set and the board can be turned.
pub fn search_board(board: &BitBoard, options: &SearchOptions) -> Exploration {
    let start = board.padded(options.allow_prepend, options.allow_append);
    let flipped_start = if options.allow_flip { start.flipped() } else { None };

    let ctx = SearchCtx {
        generator: MoveGenerator::new(options.padding()),
        max_depth: options.max_depth,
    };

    let started = Instant::now();
    let mut states = HashSet::new();
    explore(&ctx, start.clone(), 0, false, &mut states);
    if let Some(turned) = &flipped_start {
        explore(&ctx, turned.clone(), 0, true, &mut states);
    }

    debug!(
        "explored {} states from {:?} (max depth {}) in {:?}",
        states.len(),
        board,
        options.max_depth,
        started.elapsed()
    );

    Exploration { start, flipped_start, states }
}

/// Depth-first expansion. Each state is recorded before its children so that a state reached
/// again by another move order is not expanded twice.
fn explore(ctx: &SearchCtx, board: BitBoard, depth: usize, flipped: bool, states: &mut HashSet<SearchState>) {
    debug_assert!(depth <= ctx.max_depth, "depth {depth} exceeds budget {}", ctx.max_depth);

    let state = SearchState { board, depth, flipped };
    if depth == ctx.max_depth {
        states.insert(state);
        return;
    }
    if !states.insert(state.clone()) {
        return;
    }

    let remaining = ctx.max_depth - depth;
    for mutation in ctx.generator.mutations(&state.board, flipped, remaining) {
        explore(ctx, mutation.board, depth + 1, flipped, states);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn bits(equation: &str) -> BitBoard {
        BitBoard::from(&Board::from_equation(equation))
    }

    fn options(max_depth: usize, allow_flip: bool) -> SearchOptions {
        SearchOptions { max_depth, allow_flip, allow_prepend: false, allow_append: false }
    }

    #[test]
    fn test_depth_zero_is_just_the_start() {
        let exploration = search_board(&bits("1+1=3"), &options(0, false));
        assert_eq!(1, exploration.len());
        let only = exploration.states.iter().next().unwrap();
        assert_eq!(bits("1+1=3"), only.board);
        assert_eq!((0, false), (only.depth, only.flipped));

        let both = search_board(&bits("6+2=11"), &options(0, true));
        assert_eq!(2, both.len());
        assert!(both.states.contains(&SearchState { board: bits("11=2+9"), depth: 0, flipped: true }));
    }

    #[test]
    fn test_depth_one_collects_start_and_every_mutation() {
        let board = bits("1");
        let exploration = search_board(&board, &options(1, false));
        // start plus 22 distinct single moves
        assert_eq!(23, exploration.len());
        assert!(exploration.states.iter().all(|s| s.depth <= 1 && !s.flipped));
    }

    #[test]
    fn test_states_are_unique_per_depth() {
        // moving a stick there and back reaches the start again at depth 2
        let board = bits("7");
        let exploration = search_board(&board, &options(2, false));
        assert!(exploration.states.contains(&SearchState { board: board.clone(), depth: 0, flipped: false }));
        assert!(exploration.states.contains(&SearchState { board, depth: 2, flipped: false }));
    }

    #[test]
    fn test_every_state_keeps_stick_count() {
        let board = bits("6+2=11");
        let exploration = search_board(&board, &options(1, true));
        let count = board.matchstick_count();
        assert!(exploration.states.iter().all(|s| s.board.matchstick_count() == count));
        assert!(exploration.states.iter().any(|s| s.flipped));
    }

    #[test]
    fn test_flipped_start_recorded() {
        let exploration = search_board(&bits("6+2=11"), &options(1, true));
        assert_eq!(Some(bits("11=2+9")), exploration.flipped_start);

        let no_flip = search_board(&bits("6+2=11"), &options(1, false));
        assert_eq!(None, no_flip.flipped_start);

        let division = search_board(&bits("8/2=4"), &options(1, true));
        assert_eq!(None, division.flipped_start);
        assert!(division.states.iter().all(|s| !s.flipped));
    }

    #[test]
    fn test_rotated_states_are_relocations_of_the_rotated_start() {
        // the '1' keeps its slots when turned, so rotating after a move is not the same as
        // moving after a rotation; rotated states must stay within budget of the rotated start
        let board = bits("9+1=7");
        let exploration = search_board(&board, &options(1, true));
        let turned = exploration.flipped_start.clone().unwrap();
        for state in exploration.states.iter().filter(|s| s.flipped) {
            let moves = crate::moves::diff_boards(&turned, &state.board);
            assert_eq!(state.depth, moves.len(), "{:?}", state.board);
        }
    }

    #[test]
    fn test_padding_applied_to_start() {
        let opts = SearchOptions { max_depth: 1, allow_flip: false, allow_prepend: true, allow_append: true };
        let exploration = search_board(&bits("1"), &opts);
        assert_eq!(&[0u16, 0b110, 0], exploration.start.cells());
        assert!(exploration.states.iter().all(|s| s.board.len() == 3));
    }

    #[test]
    fn test_deeper_search_is_a_superset_of_shallower() {
        let board = bits("1+1=3");
        let shallow = search_board(&board, &options(1, false));
        let deep = search_board(&board, &options(2, false));
        assert!(shallow.states.is_subset(&deep.states));
    }
}
