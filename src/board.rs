//! Equation strings, slot boards and their packed bit form.
//!
//! A [`Board`] is the typed view (one [`Slots`] per character, reading order). A [`BitBoard`]
//! is the same data as a boxed `u16` slice; it is what the search engine hashes, compares
//! and mutates. Converting between the two is lossless.

use std::fmt;

use crate::errors::BoardError;
use crate::slots::{char_to_slots, recognize_character, Slot, Slots, SLOTS_PER_CHAR};

/// Normalize an equation string: drop all whitespace and spell multiplication as `x`.
pub fn normalize_equation(equation: &str) -> String {
    equation
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '*' | '×' => 'x',
            other => other,
        })
        .collect()
}

/// Rotate one cell by 180°.
///
/// Segments swap in pairs (a↔d, b↔e, c↔f); the middle bars, the `+` stroke and the `x`
/// diagonals map onto themselves. Returns `None` when a division stroke is lit.
/// A `1` is drawn right-aligned, so it keeps its pattern instead of moving to e/f.
pub fn flip_slots(slots: Slots) -> Option<Slots> {
    if slots.intersects(Slots::DIVISION) {
        return None;
    }
    if recognize_character(slots) == Some('1') {
        return Some(slots);
    }

    let keep = slots & (Slots::MIDDLE | Slots::ADDV | Slots::MUL_TL_BR | Slots::MUL_TR_BL);
    let mut flipped = keep;
    for (x, y) in [(Slot::A, Slot::D), (Slot::B, Slot::E), (Slot::C, Slot::F)] {
        if slots.is_lit(x) {
            flipped = flipped.with(y);
        }
        if slots.is_lit(y) {
            flipped = flipped.with(x);
        }
    }
    Some(flipped)
}

/// An equation as an ordered sequence of slot patterns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: Vec<Slots>,
}

impl Board {
    pub fn new(cells: Vec<Slots>) -> Board {
        Board { cells }
    }

    /// One cell per character. Characters outside the alphabet become empty cells; no
    /// normalization happens here (see [`normalize_equation`]).
    pub fn from_equation(equation: &str) -> Board {
        Board { cells: equation.chars().map(char_to_slots).collect() }
    }

    /// Read the board back as text.
    ///
    /// # Errors
    /// [`BoardError::Unrecognizable`] for the first cell that draws no known character.
    pub fn to_equation(&self) -> Result<String, BoardError> {
        self.cells
            .iter()
            .enumerate()
            .map(|(position, &slots)| {
                recognize_character(slots)
                    .ok_or(BoardError::Unrecognizable { position, bits: slots.bits() })
            })
            .collect()
    }

    /// Rotate the whole board by 180°: reverse the cell order and flip every cell.
    ///
    /// # Errors
    /// [`BoardError::Unflippable`] if any cell has a lit division stroke.
    pub fn flip(&self) -> Result<Board, BoardError> {
        let mut cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(position, &slots)| flip_slots(slots).ok_or(BoardError::Unflippable { position }))
            .collect::<Result<Vec<_>, _>>()?;
        cells.reverse();
        Ok(Board { cells })
    }

    pub fn cells(&self) -> &[Slots] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total number of matchsticks on the board.
    pub fn matchstick_count(&self) -> u32 {
        self.cells.iter().map(|s| s.count()).sum()
    }
}

/// Position of one matchstick slot on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotRef {
    pub cell: usize,
    pub slot: Slot,
}

/// Packed board: one 13-bit integer per cell, bit `i` of entry `j` is slot `i` of cell `j`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitBoard(Box<[u16]>);

impl BitBoard {
    pub fn new(cells: impl Into<Box<[u16]>>) -> BitBoard {
        BitBoard(cells.into())
    }

    pub fn cells(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn is_lit(&self, at: SlotRef) -> bool {
        self.0[at.cell] & (1 << at.slot.index()) != 0
    }

    /// A copy of this board with one slot toggled.
    #[inline]
    pub fn toggled(&self, at: SlotRef) -> BitBoard {
        let mut cells = self.0.clone();
        cells[at.cell] ^= 1 << at.slot.index();
        BitBoard(cells)
    }

    /// Every lit slot, in (cell, bit) order.
    pub fn lit_slots(&self) -> impl Iterator<Item = SlotRef> + '_ {
        self.all_slots().filter(move |&at| self.is_lit(at))
    }

    /// Every dark slot, in (cell, bit) order.
    pub fn unlit_slots(&self) -> impl Iterator<Item = SlotRef> + '_ {
        self.all_slots().filter(move |&at| !self.is_lit(at))
    }

    fn all_slots(&self) -> impl Iterator<Item = SlotRef> {
        (0..self.0.len()).flat_map(|cell| Slot::ALL.into_iter().map(move |slot| SlotRef { cell, slot }))
    }

    /// Rotate by 180° without leaving the packed form. `None` if any cell is unflippable.
    pub fn flipped(&self) -> Option<BitBoard> {
        let cells = self
            .0
            .iter()
            .rev()
            .map(|&bits| flip_slots(Slots::from_bits_truncate(bits)).map(Slots::bits))
            .collect::<Option<Box<[u16]>>>()?;
        Some(BitBoard(cells))
    }

    /// Pad with an empty cell at the front and/or back.
    pub fn padded(&self, front: bool, back: bool) -> BitBoard {
        let mut cells = Vec::with_capacity(self.0.len() + 2);
        if front {
            cells.push(0);
        }
        cells.extend_from_slice(&self.0);
        if back {
            cells.push(0);
        }
        BitBoard(cells.into_boxed_slice())
    }

    pub fn matchstick_count(&self) -> u32 {
        self.0.iter().map(|c| c.count_ones()).sum()
    }

    /// Decode and read as text in one step.
    ///
    /// # Errors
    /// Same as [`Board::to_equation`].
    pub fn to_equation(&self) -> Result<String, BoardError> {
        Board::from(self).to_equation()
    }
}

impl From<&Board> for BitBoard {
    fn from(board: &Board) -> BitBoard {
        BitBoard(board.cells.iter().map(|s| s.bits()).collect())
    }
}

impl From<&BitBoard> for Board {
    fn from(bits: &BitBoard) -> Board {
        Board { cells: bits.0.iter().map(|&b| Slots::from_bits_truncate(b)).collect() }
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.0.iter().map(|c| format!("{c:0width$b}", width = SLOTS_PER_CHAR)).collect();
        write!(f, "BitBoard[{}]", cells.join(","))
    }
}
