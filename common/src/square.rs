//! Board coordinates shared by the engine crates.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static ALGEBRAIC_SQUARE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([a-hA-H])([1-8])$").expect("square pattern is valid"));

/// A coordinate on the 8x8 board. `file` 0 is the a-file and `rank` 0 is the
/// first rank (white's back rank).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub const fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square coordinates must be in 0..8");
        Self { file, rank }
    }

    /// Builds a square from signed coordinates, returning `None` when they
    /// fall off the board.
    pub fn try_new(file: i8, rank: i8) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Index into a rank-major 64 entry table, a1 = 0, h8 = 63.
    #[inline(always)]
    pub const fn index(self) -> usize {
        (self.rank * 8 + self.file) as usize
    }

    #[inline(always)]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        Self::try_new(self.file as i8 + file_delta, self.rank as i8 + rank_delta)
    }

    pub fn from_algebraic(algebraic_coord: &str) -> Option<Self> {
        let caps = ALGEBRAIC_SQUARE.captures(algebraic_coord)?;
        let file_char = caps[1].chars().next()?.to_ascii_lowercase();
        let rank_char = caps[2].chars().next()?;

        let file = file_char as u8 - b'a';
        let rank = rank_char.to_digit(10)? as u8 - 1;
        Some(Self::new(file, rank))
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

pub const A1: Square = Square::new(0, 0);
pub const B1: Square = Square::new(1, 0);
pub const C1: Square = Square::new(2, 0);
pub const D1: Square = Square::new(3, 0);
pub const E1: Square = Square::new(4, 0);
pub const F1: Square = Square::new(5, 0);
pub const G1: Square = Square::new(6, 0);
pub const H1: Square = Square::new(7, 0);
pub const A2: Square = Square::new(0, 1);
pub const B2: Square = Square::new(1, 1);
pub const C2: Square = Square::new(2, 1);
pub const D2: Square = Square::new(3, 1);
pub const E2: Square = Square::new(4, 1);
pub const F2: Square = Square::new(5, 1);
pub const G2: Square = Square::new(6, 1);
pub const H2: Square = Square::new(7, 1);
pub const A3: Square = Square::new(0, 2);
pub const B3: Square = Square::new(1, 2);
pub const C3: Square = Square::new(2, 2);
pub const D3: Square = Square::new(3, 2);
pub const E3: Square = Square::new(4, 2);
pub const F3: Square = Square::new(5, 2);
pub const G3: Square = Square::new(6, 2);
pub const H3: Square = Square::new(7, 2);
pub const A4: Square = Square::new(0, 3);
pub const B4: Square = Square::new(1, 3);
pub const C4: Square = Square::new(2, 3);
pub const D4: Square = Square::new(3, 3);
pub const E4: Square = Square::new(4, 3);
pub const F4: Square = Square::new(5, 3);
pub const G4: Square = Square::new(6, 3);
pub const H4: Square = Square::new(7, 3);
pub const A5: Square = Square::new(0, 4);
pub const B5: Square = Square::new(1, 4);
pub const C5: Square = Square::new(2, 4);
pub const D5: Square = Square::new(3, 4);
pub const E5: Square = Square::new(4, 4);
pub const F5: Square = Square::new(5, 4);
pub const G5: Square = Square::new(6, 4);
pub const H5: Square = Square::new(7, 4);
pub const A6: Square = Square::new(0, 5);
pub const B6: Square = Square::new(1, 5);
pub const C6: Square = Square::new(2, 5);
pub const D6: Square = Square::new(3, 5);
pub const E6: Square = Square::new(4, 5);
pub const F6: Square = Square::new(5, 5);
pub const G6: Square = Square::new(6, 5);
pub const H6: Square = Square::new(7, 5);
pub const A7: Square = Square::new(0, 6);
pub const B7: Square = Square::new(1, 6);
pub const C7: Square = Square::new(2, 6);
pub const D7: Square = Square::new(3, 6);
pub const E7: Square = Square::new(4, 6);
pub const F7: Square = Square::new(5, 6);
pub const G7: Square = Square::new(6, 6);
pub const H7: Square = Square::new(7, 6);
pub const A8: Square = Square::new(0, 7);
pub const B8: Square = Square::new(1, 7);
pub const C8: Square = Square::new(2, 7);
pub const D8: Square = Square::new(3, 7);
pub const E8: Square = Square::new(4, 7);
pub const F8: Square = Square::new(5, 7);
pub const G8: Square = Square::new(6, 7);
pub const H8: Square = Square::new(7, 7);

/// Every square in file-major order (a1, a2, .. a8, b1, ..).
pub const ORDERED: [Square; 64] = tables::ORDERED;

#[rustfmt::skip]
mod tables {
    use super::*;

    pub const ORDERED: [Square; 64] = [
        A1, A2, A3, A4, A5, A6, A7, A8,
        B1, B2, B3, B4, B5, B6, B7, B8,
        C1, C2, C3, C4, C5, C6, C7, C8,
        D1, D2, D3, D4, D5, D6, D7, D8,
        E1, E2, E3, E4, E5, E6, E7, E8,
        F1, F2, F3, F4, F5, F6, F7, F8,
        G1, G2, G3, G4, G5, G6, G7, G8,
        H1, H2, H3, H4, H5, H6, H7, H8,
    ];
}
