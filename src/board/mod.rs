//! Board representation for N-in-a-row

pub mod bitboard;
pub mod board;


// Re-exports
pub use bitboard::{Bitboard, BitboardIter};
pub use board::Board;

/// Smallest supported side length
pub const MIN_SIDE: usize = 3;
/// Largest supported side length (8x8 = 64 cells fills one u64)
pub const MAX_SIDE: usize = 8;
/// Upper bound on the number of cells of any supported board
pub const MAX_CELLS: usize = MAX_SIDE * MAX_SIDE;

/// The two players. `X` moves first in a fresh game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    X,
    O,
}

impl Side {
    /// Get opponent side
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// Index used by per-side tables (X = 0, O = 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::X => 0,
            Side::O => 1,
        }
    }

    /// Display symbol
    pub fn symbol(self) -> char {
        match self {
            Side::X => 'x',
            Side::O => 'o',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Position on the board (zero-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < MAX_SIDE && (col as usize) < MAX_SIDE);
        Self { row, col }
    }

    /// Bit index of this cell on a board of the given side length
    #[inline]
    pub fn to_index(self, side: usize) -> usize {
        self.row as usize * side + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, side: usize) -> Self {
        Self {
            row: (idx / side) as u8,
            col: (idx % side) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32, side: usize) -> bool {
        row >= 0 && row < side as i32 && col >= 0 && col < side as i32
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
