//! Single-matchstick relocations on a [`BitBoard`].
//!
//! A move lifts one lit stick and lays it on one dark slot anywhere on the board. Boards held
//! upside down move the same way, in their own (rotated) cell and slot coordinates; the
//! search turns the board once, before any stick is moved.
//!
//! Pad cells (the empty cells that prepend/append add) only accept a first stick on a
//! slot that can still grow into a readable character with the moves that are left.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{BitBoard, SlotRef};
use crate::slots::{Slot, Slots};

/// Relocation of exactly one matchstick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchstickMove {
    pub from_char: usize,
    pub from_bit: usize,
    pub to_char: usize,
    pub to_bit: usize,
}

impl MatchstickMove {
    pub fn new(from: SlotRef, to: SlotRef) -> MatchstickMove {
        MatchstickMove {
            from_char: from.cell,
            from_bit: from.slot.index(),
            to_char: to.cell,
            to_bit: to.slot.index(),
        }
    }
}

impl fmt::Display for MatchstickMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot_name = |bit| Slot::from_index(bit).map_or("?", Slot::name);
        write!(
            f,
            "{}:{} → {}:{}",
            self.from_char,
            slot_name(self.from_bit),
            self.to_char,
            slot_name(self.to_bit)
        )
    }
}

/// Which ends of the board carry an empty pad cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub front: bool,
    pub back: bool,
}

impl Padding {
    /// Whether `cell` is a pad cell on a board of `len` cells. A rotated board carries its
    /// leading pad at the back and its trailing pad at the front.
    pub fn is_pad_cell(self, cell: usize, len: usize, flipped: bool) -> bool {
        let (leading, trailing) = if flipped { (self.back, self.front) } else { (self.front, self.back) };
        (leading && cell == 0) || (trailing && cell + 1 == len)
    }
}

/// Slots a first stick may take in an empty pad cell, given the moves left including this one.
///
/// With one move left the only single-stick character is `-`. With two or more, any stick of
/// a two-stick character (`1`, `+`, `=`, `x`, `/`) may start it.
pub const fn starter_slots(remaining: usize) -> Slots {
    match remaining {
        0 => Slots::EMPTY,
        1 => Slots::G,
        _ => Slots::G
            .union(Slots::ADDV)
            .union(Slots::MUL_TL_BR)
            .union(Slots::MUL_TR_BL)
            .union(Slots::ALTG)
            .union(Slots::DIVB)
            .union(Slots::DIVT)
            .union(Slots::B)
            .union(Slots::C),
    }
}

/// A board one move away from its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub board: BitBoard,
    /// The stick that was lifted and where it went, in the parent's coordinates.
    pub relocation: MatchstickMove,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator {
    padding: Padding,
}

impl MoveGenerator {
    pub fn new(padding: Padding) -> MoveGenerator {
        MoveGenerator { padding }
    }

    /// Every board reachable from `board` by relocating one stick to a different slot.
    ///
    /// `flipped` is the orientation `board` is held in and only decides where its pad cells
    /// are; the result keeps that orientation. `remaining` counts this move.
    pub fn mutations<'a>(
        &'a self,
        board: &'a BitBoard,
        flipped: bool,
        remaining: usize,
    ) -> impl Iterator<Item = Mutation> + 'a {
        board.lit_slots().flat_map(move |from| {
            let removed = board.toggled(from);
            let targets: Vec<SlotRef> = self
                .placements(&removed, flipped, remaining)
                .filter(|&to| to != from)
                .collect();
            targets.into_iter().map(move |to| Mutation {
                board: removed.toggled(to),
                relocation: MatchstickMove::new(from, to),
            })
        })
    }

    /// Dark slots of `board` that may receive a stick.
    fn placements<'b>(
        &'b self,
        board: &'b BitBoard,
        flipped: bool,
        remaining: usize,
    ) -> impl Iterator<Item = SlotRef> + 'b {
        let len = board.len();
        let starters = starter_slots(remaining);
        board.unlit_slots().filter(move |at| {
            let fresh_pad = self.padding.is_pad_cell(at.cell, len, flipped) && board.cells()[at.cell] == 0;
            !fresh_pad || starters.is_lit(at.slot)
        })
    }
}

/// Moves that turn `from` into `to`.
///
/// Removed and added sticks are paired in (cell, bit) encounter order. Boards of different
/// length, or with different stick counts, have no diff and yield an empty list.
pub fn diff_boards(from: &BitBoard, to: &BitBoard) -> Vec<MatchstickMove> {
    if from.len() != to.len() {
        return Vec::new();
    }
    let removed: Vec<SlotRef> = from.lit_slots().filter(|&at| !to.is_lit(at)).collect();
    let added: Vec<SlotRef> = to.lit_slots().filter(|&at| !from.is_lit(at)).collect();

    if removed.len() != added.len() {
        return Vec::new();
    }
    removed.into_iter().zip(added).map(|(r, a)| MatchstickMove::new(r, a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn bits(equation: &str) -> BitBoard {
        BitBoard::from(&Board::from_equation(equation))
    }

    fn toggled_positions(a: &BitBoard, b: &BitBoard) -> usize {
        a.cells().iter().zip(b.cells()).map(|(x, y)| (x ^ y).count_ones() as usize).sum()
    }

    #[test]
    fn test_upright_mutation_count() {
        // '1' has 2 sticks and 11 dark slots; each stick can go to any of them
        let generator = MoveGenerator::default();
        let board = bits("1");
        assert_eq!(22, generator.mutations(&board, false, 1).count());
    }

    #[test]
    fn test_rotated_board_moves_in_its_own_coordinates() {
        // 7+1=9 held upside down reads 6=1+L; lifting from the rotated 6 must use rotated slots
        let generator = MoveGenerator::default();
        let upright = bits("7+1=9");
        let turned = upright.flipped().unwrap();
        for m in generator.mutations(&turned, true, 1) {
            let from = SlotRef { cell: m.relocation.from_char, slot: Slot::from_index(m.relocation.from_bit).unwrap() };
            let to = SlotRef { cell: m.relocation.to_char, slot: Slot::from_index(m.relocation.to_bit).unwrap() };
            assert!(turned.is_lit(from) && !turned.is_lit(to));
            assert_eq!(turned.toggled(from).toggled(to), m.board);
        }
    }

    #[test]
    fn test_relocation_replays_onto_mutation() {
        let generator = MoveGenerator::new(Padding { front: true, back: true });
        let board = bits("9+1=7").padded(true, true);
        for m in generator.mutations(&board, false, 2) {
            assert_eq!(vec![m.relocation], diff_boards(&board, &m.board));
        }
    }

    #[test]
    fn test_mutations_preserve_stick_count() {
        let generator = MoveGenerator::new(Padding { front: true, back: true });
        let board = bits("5+7=2").padded(true, true);
        let count = board.matchstick_count();
        for m in generator.mutations(&board, false, 2) {
            assert_eq!(count, m.board.matchstick_count());
        }
    }

    #[test]
    fn test_upright_mutations_move_exactly_one_stick() {
        let generator = MoveGenerator::default();
        let board = bits("6-2=7");
        for m in generator.mutations(&board, false, 1) {
            assert_eq!(2, toggled_positions(&board, &m.board));
            assert_eq!(1, diff_boards(&board, &m.board).len());
        }
    }

    #[test]
    fn test_fresh_pad_accepts_only_middle_bar_on_last_move() {
        let generator = MoveGenerator::new(Padding { front: true, back: false });
        let board = bits("1").padded(true, false);
        let into_pad: Vec<u16> = generator
            .mutations(&board, false, 1)
            .map(|m| m.board.cells()[0])
            .filter(|&pad| pad != 0)
            .collect();
        assert_eq!(vec![Slots::G.bits(); 2], into_pad);
    }

    #[test]
    fn test_fresh_pad_widens_with_budget() {
        let generator = MoveGenerator::new(Padding { front: true, back: false });
        let board = bits("1").padded(true, false);
        let starters = starter_slots(2);
        let mut seen = Slots::EMPTY;
        for m in generator.mutations(&board, false, 2) {
            let pad = Slots::from_bits_truncate(m.board.cells()[0]);
            assert!(starters.contains(pad), "pad got {pad:?}");
            seen = seen | pad;
        }
        assert_eq!(starters, seen);
        assert!(starter_slots(2).contains(starter_slots(1)));
    }

    #[test]
    fn test_started_pad_is_unrestricted() {
        let generator = MoveGenerator::new(Padding { front: true, back: false });
        let board = BitBoard::new(vec![Slots::G.bits(), (Slots::B | Slots::C).bits()]);
        let plus = (Slots::G | Slots::ADDV).bits();
        assert!(generator.mutations(&board, false, 1).any(|m| m.board.cells()[0] == plus));
    }

    #[test]
    fn test_pad_cell_follows_rotation() {
        let padding = Padding { front: true, back: false };
        assert!(padding.is_pad_cell(0, 4, false));
        assert!(!padding.is_pad_cell(3, 4, false));
        assert!(padding.is_pad_cell(3, 4, true));
        assert!(!padding.is_pad_cell(0, 4, true));
        assert!(!Padding::default().is_pad_cell(0, 4, false));
    }

    #[test]
    fn test_diff_single_move() {
        let moves = diff_boards(&bits("1+1=3"), &bits("1+1=2"));
        assert_eq!(
            vec![MatchstickMove { from_char: 4, from_bit: Slot::C.index(), to_char: 4, to_bit: Slot::E.index() }],
            moves
        );
    }

    #[test]
    fn test_diff_pairs_in_encounter_order() {
        // 5+3=5 -> 6-3=3: the '+' stroke and the top-left of the last 5 move
        let moves = diff_boards(&bits("5+3=5"), &bits("6-3=3"));
        assert_eq!(2, moves.len());
        assert_eq!((1, Slot::AddV.index()), (moves[0].from_char, moves[0].from_bit));
        assert_eq!((0, Slot::E.index()), (moves[0].to_char, moves[0].to_bit));
        assert_eq!((4, Slot::F.index()), (moves[1].from_char, moves[1].from_bit));
        assert_eq!((4, Slot::B.index()), (moves[1].to_char, moves[1].to_bit));
    }

    #[test]
    fn test_diff_without_changes_or_with_mismatch() {
        assert!(diff_boards(&bits("1+1=2"), &bits("1+1=2")).is_empty());
        // '1' -> '7' adds a stick without removing one
        assert!(diff_boards(&bits("1"), &bits("7")).is_empty());
        assert!(diff_boards(&bits("1"), &bits("11")).is_empty());
    }

    #[test]
    fn test_move_display() {
        let m = MatchstickMove { from_char: 1, from_bit: Slot::AddV.index(), to_char: 0, to_bit: Slot::E.index() };
        assert_eq!("1:addv → 0:e", m.to_string());
        let bogus = MatchstickMove { from_char: 0, from_bit: 99, to_char: 0, to_bit: 0 };
        assert_eq!("0:? → 0:a", bogus.to_string());
    }

    #[test]
    fn test_move_serializes_camel_case() {
        let m = MatchstickMove { from_char: 4, from_bit: 2, to_char: 4, to_bit: 4 };
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(r#"{"fromChar":4,"fromBit":2,"toChar":4,"toBit":4}"#, json);
    }
}
