//! Solve a matchstick equation: explore, filter, diff, rank.
//!
//! `solve` runs the bounded search from the starting board, reads every explored board back
//! as text (in its own orientation and, when rotation is allowed, upside down as well), keeps
//! the ones that are true equations different from the input, and attaches the stick moves
//! that lead there.
//!
//! Moves of an upright solution apply to the input board. Moves of an upside-down solution
//! apply to the input board after it has been turned, in the turned board's coordinates.
//!
//! Results are ordered upright first, then by number of moves; for each resulting equation
//! only the first entry in that order is kept.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::arithmetic::is_true_equation;
use crate::board::{normalize_equation, BitBoard, Board};
use crate::moves::{diff_boards, MatchstickMove};
use crate::search::{search_board, Exploration, SearchOptions, SearchState};
use crate::slots::ALPHABET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolveOptions {
    /// Move budget; sticks relocated at most this many times.
    pub max_moves: usize,
    /// Also read the board upside down, before or after moving.
    pub allow_flip: bool,
    /// Allow building a new character in front of the equation.
    pub allow_prepend: bool,
    /// Allow building a new character after the equation.
    pub allow_append: bool,
}

impl Default for SolveOptions {
    fn default() -> SolveOptions {
        SolveOptions { max_moves: 1, allow_flip: true, allow_prepend: false, allow_append: false }
    }
}

impl SolveOptions {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_depth: self.max_moves,
            allow_flip: self.allow_flip,
            allow_prepend: self.allow_prepend,
            allow_append: self.allow_append,
        }
    }
}

/// A true equation reachable from the input, and how to get there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub equation: String,
    pub moves: Vec<MatchstickMove>,
    /// The board is read upside down.
    pub flipped: bool,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.equation)?;
        if self.flipped {
            write!(f, " (upside down)")?;
        }
        if !self.moves.is_empty() {
            let moves: Vec<String> = self.moves.iter().map(ToString::to_string).collect();
            write!(f, "  [{}]", moves.join(", "))?;
        }
        Ok(())
    }
}

/// Anything that can answer a solve request.
pub trait SolveStrategy {
    fn solve(&self, equation: &str, options: &SolveOptions) -> Vec<Solution>;
}

/// Exhaustive bounded search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchSolver;

impl SolveStrategy for SearchSolver {
    fn solve(&self, equation: &str, options: &SolveOptions) -> Vec<Solution> {
        solve(equation, options)
    }
}

/// All true equations reachable from `equation` within the move budget, best first.
///
/// An equation that is already true has nothing to solve and yields an empty list, as does
/// one whose characters cannot all be drawn.
pub fn solve(equation: &str, options: &SolveOptions) -> Vec<Solution> {
    let original = normalize_equation(equation);
    if let Some(unknown) = original.chars().find(|&c| !ALPHABET.contains(c)) {
        debug!("\"{original}\" has no matchstick form for {unknown:?}");
        return Vec::new();
    }
    if is_true_equation(&original) {
        debug!("\"{original}\" already holds");
        return Vec::new();
    }

    let board = BitBoard::from(&Board::from_equation(&original));
    let exploration = search_board(&board, &options.search_options());

    let mut candidates = Vec::new();
    for state in &exploration.states {
        if let Some(equation) = accepted_equation(&state.board, &original) {
            let moves = moves_to(&exploration, state);
            candidates.push(Solution { equation, moves, flipped: state.flipped });
        }
        if options.allow_flip && !state.flipped {
            if let Some(candidate) = turned_reading(&exploration, state, &original, options.max_moves) {
                candidates.push(candidate);
            }
        }
    }

    let solutions = rank(candidates);
    debug!(
        "\"{original}\": {} solutions from {} explored states",
        solutions.len(),
        exploration.len()
    );
    solutions
}

/// The text `board` reads as, if it is a true equation other than `original`.
fn accepted_equation(board: &BitBoard, original: &str) -> Option<String> {
    let text = normalize_equation(&board.to_equation().ok()?);
    (text != original && is_true_equation(&text)).then_some(text)
}

/// Moves from the start, held in the state's orientation, to the state.
fn moves_to(exploration: &Exploration, state: &SearchState) -> Vec<MatchstickMove> {
    let start = if state.flipped { exploration.flipped_start.as_ref() } else { Some(&exploration.start) };
    start.map_or_else(Vec::new, |start| diff_boards(start, &state.board))
}

/// An upright state read upside down. Its moves are taken on the turned start, and the reading
/// is dropped when those exceed the budget: a `1` keeps its slots when turned, so moving then
/// turning can land further from the turned start than the moves made upright.
fn turned_reading(exploration: &Exploration, state: &SearchState, original: &str, max_moves: usize) -> Option<Solution> {
    let start = exploration.flipped_start.as_ref()?;
    let turned = state.board.flipped()?;
    let equation = accepted_equation(&turned, original)?;
    let moves = diff_boards(start, &turned);
    (moves.len() <= max_moves).then_some(Solution { equation, moves, flipped: true })
}

/// Stable order: upright before upside down, fewer moves first; equation text and move list
/// break the remaining ties so the output does not depend on hash order. Then the first
/// entry per equation wins.
pub(crate) fn rank(mut candidates: Vec<Solution>) -> Vec<Solution> {
    candidates.sort_by(|a, b| {
        (a.flipped, a.moves.len(), &a.equation, &a.moves).cmp(&(b.flipped, b.moves.len(), &b.equation, &b.moves))
    });
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates.retain(|s| seen.insert(s.equation.clone()));
    candidates
}
