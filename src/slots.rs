//! Matchstick slot model: which of the 13 stick positions of a character cell are lit.
//!
//! Each cell is a 13-bit mask. The bit assignment is fixed and shared by every other module:
//!
//! | bit | slot        | role                                  |
//! |-----|-------------|---------------------------------------|
//! | 0   | `a`         | top bar                               |
//! | 1   | `b`         | top-right vertical                    |
//! | 2   | `c`         | bottom-right vertical                 |
//! | 3   | `d`         | bottom bar                            |
//! | 4   | `e`         | bottom-left vertical                  |
//! | 5   | `f`         | top-left vertical                     |
//! | 6   | `g`         | middle bar                            |
//! | 7   | `altg`      | second middle bar (`=`)               |
//! | 8   | `addv`      | vertical stroke of `+`                |
//! | 9   | `mul_tl_br` | `x` diagonal, top-left to bottom-right |
//! | 10  | `mul_tr_bl` | `x` diagonal, top-right to bottom-left |
//! | 11  | `divb`      | bottom stroke of `/`                  |
//! | 12  | `divt`      | top stroke of `/`                     |

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::LazyLock;

pub const SLOTS_PER_CHAR: usize = 13;

/// Number of distinct slot patterns (2^13).
pub(crate) const PATTERN_SPACE: usize = 1 << SLOTS_PER_CHAR;

/// Every character the slot model can draw, in recognition order.
pub const ALPHABET: &str = "0123456789+-=x/ ";

/// A single named matchstick position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    AltG,
    AddV,
    MulTlBr,
    MulTrBl,
    DivB,
    DivT,
}

impl Slot {
    pub const ALL: [Slot; SLOTS_PER_CHAR] = [
        Slot::A,
        Slot::B,
        Slot::C,
        Slot::D,
        Slot::E,
        Slot::F,
        Slot::G,
        Slot::AltG,
        Slot::AddV,
        Slot::MulTlBr,
        Slot::MulTrBl,
        Slot::DivB,
        Slot::DivT,
    ];

    /// Bit index of this slot inside a cell.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot for a bit index, or `None` if the index is out of range.
    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Slot::A => "a",
            Slot::B => "b",
            Slot::C => "c",
            Slot::D => "d",
            Slot::E => "e",
            Slot::F => "f",
            Slot::G => "g",
            Slot::AltG => "altg",
            Slot::AddV => "addv",
            Slot::MulTlBr => "mul_tl_br",
            Slot::MulTrBl => "mul_tr_bl",
            Slot::DivB => "divb",
            Slot::DivT => "divt",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The lit slots of one character cell, packed into the low 13 bits of a `u16`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Slots(u16);

impl Slots {
    pub const EMPTY: Slots = Slots(0);
    pub const A: Slots = Slots(1 << 0);
    pub const B: Slots = Slots(1 << 1);
    pub const C: Slots = Slots(1 << 2);
    pub const D: Slots = Slots(1 << 3);
    pub const E: Slots = Slots(1 << 4);
    pub const F: Slots = Slots(1 << 5);
    pub const G: Slots = Slots(1 << 6);
    pub const ALTG: Slots = Slots(1 << 7);
    pub const ADDV: Slots = Slots(1 << 8);
    pub const MUL_TL_BR: Slots = Slots(1 << 9);
    pub const MUL_TR_BL: Slots = Slots(1 << 10);
    pub const DIVB: Slots = Slots(1 << 11);
    pub const DIVT: Slots = Slots(1 << 12);
    pub const ALL: Slots = Slots((1 << SLOTS_PER_CHAR) - 1);

    /// Both middle bars; recognition treats them separately from the other eleven slots.
    pub const MIDDLE: Slots = Slots(Self::G.0 | Self::ALTG.0);
    pub const DIVISION: Slots = Slots(Self::DIVB.0 | Self::DIVT.0);

    /// Builds a pattern from raw bits, dropping anything above bit 12.
    #[inline]
    pub const fn from_bits_truncate(bits: u16) -> Slots {
        Slots(bits & Self::ALL.0)
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn union(self, other: Slots) -> Slots {
        Slots(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: Slots) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Slots) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_lit(self, slot: Slot) -> bool {
        self.0 & (1 << slot.index()) != 0
    }

    #[inline]
    pub const fn with(self, slot: Slot) -> Slots {
        Slots(self.0 | (1 << slot.index()))
    }

    #[inline]
    pub const fn without(self, slot: Slot) -> Slots {
        Slots(self.0 & !(1 << slot.index()))
    }

    /// Number of matchsticks in this cell.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Lit slots in bit order.
    pub fn lit(self) -> impl Iterator<Item = Slot> {
        Slot::ALL.into_iter().filter(move |&s| self.is_lit(s))
    }
}

impl BitOr for Slots {
    type Output = Slots;
    fn bitor(self, rhs: Slots) -> Slots {
        self.union(rhs)
    }
}

impl BitAnd for Slots {
    type Output = Slots;
    fn bitand(self, rhs: Slots) -> Slots {
        Slots(self.0 & rhs.0)
    }
}

impl Not for Slots {
    type Output = Slots;
    fn not(self) -> Slots {
        Slots(!self.0 & Self::ALL.0)
    }
}

impl From<Slot> for Slots {
    fn from(slot: Slot) -> Slots {
        Slots::EMPTY.with(slot)
    }
}

impl fmt::Debug for Slots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.lit().map(Slot::name).collect();
        write!(f, "Slots[{}]", names.join("|"))
    }
}

/// How a glyph uses the two middle bars `g` and `altg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MiddleBar {
    /// Neither bar lit.
    Off,
    /// Exactly one of the two bars lit; the canonical pattern uses `g`.
    Single,
    /// Both bars lit (`=`).
    Double,
}

impl MiddleBar {
    const fn matches(self, slots: Slots) -> bool {
        let g = slots.is_lit(Slot::G);
        let altg = slots.is_lit(Slot::AltG);
        match self {
            MiddleBar::Off => !g && !altg,
            MiddleBar::Single => g != altg,
            MiddleBar::Double => g && altg,
        }
    }

    const fn canonical(self) -> Slots {
        match self {
            MiddleBar::Off => Slots::EMPTY,
            MiddleBar::Single => Slots::G,
            MiddleBar::Double => Slots::MIDDLE,
        }
    }
}

/// One drawable character: the exact set of non-middle slots it needs lit (all others
/// must be dark) plus its middle-bar rule.
struct Glyph {
    ch: char,
    lit: Slots,
    middle: MiddleBar,
}

impl Glyph {
    const fn new(ch: char, lit: Slots, middle: MiddleBar) -> Glyph {
        Glyph { ch, lit, middle }
    }

    fn matches(&self, slots: Slots) -> bool {
        (slots & !Slots::MIDDLE) == self.lit && self.middle.matches(slots)
    }

    const fn canonical(&self) -> Slots {
        self.lit.union(self.middle.canonical())
    }
}

const fn seg(bits: u16) -> Slots {
    Slots::from_bits_truncate(bits)
}

// bit shorthands for the glyph table
const A: u16 = Slots::A.bits();
const B: u16 = Slots::B.bits();
const C: u16 = Slots::C.bits();
const D: u16 = Slots::D.bits();
const E: u16 = Slots::E.bits();
const F: u16 = Slots::F.bits();

const GLYPHS: [Glyph; 16] = [
    Glyph::new('0', seg(A | B | C | D | E | F), MiddleBar::Off),
    Glyph::new('1', seg(B | C), MiddleBar::Off),
    Glyph::new('2', seg(A | B | D | E), MiddleBar::Single),
    Glyph::new('3', seg(A | B | C | D), MiddleBar::Single),
    Glyph::new('4', seg(B | C | F), MiddleBar::Single),
    Glyph::new('5', seg(A | C | D | F), MiddleBar::Single),
    Glyph::new('6', seg(A | C | D | E | F), MiddleBar::Single),
    Glyph::new('7', seg(A | B | C), MiddleBar::Off),
    Glyph::new('8', seg(A | B | C | D | E | F), MiddleBar::Single),
    Glyph::new('9', seg(A | B | C | D | F), MiddleBar::Single),
    Glyph::new('+', Slots::ADDV, MiddleBar::Single),
    Glyph::new('-', Slots::EMPTY, MiddleBar::Single),
    Glyph::new('=', Slots::EMPTY, MiddleBar::Double),
    Glyph::new('x', Slots::MUL_TL_BR.union(Slots::MUL_TR_BL), MiddleBar::Off),
    Glyph::new('/', Slots::DIVISION, MiddleBar::Off),
    Glyph::new(' ', Slots::EMPTY, MiddleBar::Off),
];

/// Recognition result for every one of the 8192 patterns, built once.
static RECOGNITION: LazyLock<Vec<Option<char>>> = LazyLock::new(|| {
    (0..PATTERN_SPACE)
        .map(|bits| {
            let slots = Slots(bits as u16);
            GLYPHS.iter().find(|g| g.matches(slots)).map(|g| g.ch)
        })
        .collect()
});

/// Canonical slot pattern for a character. Unknown characters map to the empty pattern.
pub fn char_to_slots(ch: char) -> Slots {
    let ch = match ch {
        '*' | '×' => 'x',
        other => other,
    };
    GLYPHS
        .iter()
        .find(|g| g.ch == ch)
        .map_or(Slots::EMPTY, Glyph::canonical)
}

/// The character a slot pattern draws, or `None` if it draws nothing in the alphabet.
#[inline]
pub fn recognize_character(slots: Slots) -> Option<char> {
    RECOGNITION[slots.bits() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alphabet_char_round_trips() {
        for ch in ALPHABET.chars() {
            assert_eq!(Some(ch), recognize_character(char_to_slots(ch)), "char '{ch}'");
        }
    }

    #[test]
    fn test_multiplication_aliases() {
        let x = char_to_slots('x');
        assert_eq!(x, char_to_slots('*'));
        assert_eq!(x, char_to_slots('×'));
        assert_eq!(Some('x'), recognize_character(x));
    }

    #[test]
    fn test_unknown_char_is_empty() {
        assert_eq!(Slots::EMPTY, char_to_slots('a'));
        assert_eq!(Slots::EMPTY, char_to_slots('('));
        // the empty pattern itself reads as a blank
        assert_eq!(Some(' '), recognize_character(Slots::EMPTY));
    }

    #[test]
    fn test_canonical_patterns() {
        assert_eq!(Slots::B | Slots::C, char_to_slots('1'));
        assert_eq!(Slots::G | Slots::ADDV, char_to_slots('+'));
        assert_eq!(Slots::G | Slots::ALTG, char_to_slots('='));
        assert_eq!(Slots::DIVB | Slots::DIVT, char_to_slots('/'));
        assert_eq!(7, char_to_slots('8').count());
        assert_eq!(2, char_to_slots('1').count());
    }

    #[test]
    fn test_altg_can_stand_in_for_g() {
        // digits and operators with one middle bar accept either bar
        let three_alt = char_to_slots('3').without(Slot::G).with(Slot::AltG);
        assert_eq!(Some('3'), recognize_character(three_alt));
        let minus_alt = Slots::ALTG;
        assert_eq!(Some('-'), recognize_character(minus_alt));
        let plus_alt = Slots::ALTG | Slots::ADDV;
        assert_eq!(Some('+'), recognize_character(plus_alt));
    }

    #[test]
    fn test_double_middle_is_only_equals() {
        assert_eq!(None, recognize_character(char_to_slots('8').with(Slot::AltG)));
        assert_eq!(None, recognize_character(char_to_slots('+').with(Slot::AltG)));
    }

    #[test]
    fn test_stray_sticks_are_unrecognized() {
        assert_eq!(None, recognize_character(Slots::A));
        assert_eq!(None, recognize_character(Slots::E | Slots::F));
        assert_eq!(None, recognize_character(Slots::DIVB));
        assert_eq!(None, recognize_character(Slots::MUL_TL_BR));
        assert_eq!(None, recognize_character(char_to_slots('0').with(Slot::AddV)));
    }

    #[test]
    fn test_recognition_is_total_and_exclusive() {
        let mut recognized = 0;
        for bits in 0..PATTERN_SPACE {
            let slots = Slots::from_bits_truncate(bits as u16);
            let matching = GLYPHS.iter().filter(|g| g.matches(slots)).count();
            assert!(matching <= 1, "pattern {slots:?} matches {matching} glyphs");
            if recognize_character(slots).is_some() {
                recognized += 1;
            }
        }
        // one pattern per glyph, plus an altg twin for each single-middle glyph
        let singles = GLYPHS.iter().filter(|g| g.middle == MiddleBar::Single).count();
        assert_eq!(GLYPHS.len() + singles, recognized);
    }

    #[test]
    fn test_slot_indices_match_bits() {
        for slot in Slot::ALL {
            assert_eq!(1u16 << slot.index(), Slots::from(slot).bits());
            assert_eq!(Some(slot), Slot::from_index(slot.index()));
        }
        assert_eq!(None, Slot::from_index(SLOTS_PER_CHAR));
    }

    #[test]
    fn test_debug_lists_lit_slots() {
        assert_eq!("Slots[b|c]", format!("{:?}", char_to_slots('1')));
        assert_eq!("Slots[]", format!("{:?}", Slots::EMPTY));
    }
}
