//! Board structure: one bitboard per side plus the configured side length

use super::bitboard::{Bitboard, BitboardIter};
use super::{Pos, Side, MAX_SIDE, MIN_SIDE};
use crate::error::{EngineError, Result};

/// Game board.
///
/// The two bitboards must never share a set bit. `place` does not check this
/// (it runs in the search hot path); use `validate` at trust boundaries and
/// `try_place` for moves coming from a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// X pieces
    pub x: Bitboard,
    /// O pieces
    pub o: Bitboard,
    side: u8,
}

impl Board {
    /// Create an empty board with the given side length (3..=8).
    pub fn new(side: usize) -> Result<Self> {
        if !(MIN_SIDE..=MAX_SIDE).contains(&side) {
            return Err(EngineError::InvalidBoardSize(side));
        }
        Ok(Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
            side: side as u8,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.side as usize
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size() * self.size()
    }

    /// Mask of every cell that exists on this board
    #[inline]
    pub fn full_mask(&self) -> u64 {
        Bitboard::low_mask(self.cell_count())
    }

    #[inline]
    pub fn index(&self, pos: Pos) -> usize {
        pos.to_index(self.size())
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size() && (pos.col as usize) < self.size()
    }

    /// Get side occupying a position
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Side> {
        let idx = self.index(pos);
        if self.x.get(idx) {
            Some(Side::X)
        } else if self.o.get(idx) {
            Some(Side::O)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        let idx = self.index(pos);
        !self.x.get(idx) && !self.o.get(idx)
    }

    /// Set the bit for `side` at `pos`. The cell must be empty for both sides.
    #[inline]
    pub fn place(&mut self, pos: Pos, side: Side) {
        debug_assert!(self.is_empty(pos), "place on occupied cell {pos}");
        let idx = self.index(pos);
        self.pieces_mut(side).set(idx);
    }

    /// Clear the bit for `side` at `pos`; undoes `place`.
    #[inline]
    pub fn remove(&mut self, pos: Pos, side: Side) {
        let idx = self.index(pos);
        self.pieces_mut(side).clear(idx);
    }

    /// Checked placement for moves coming from outside the search.
    pub fn try_place(&mut self, pos: Pos, side: Side) -> Result<()> {
        if !self.contains(pos) {
            return Err(EngineError::OutOfBounds {
                row: pos.row as usize,
                col: pos.col as usize,
                side: self.size(),
            });
        }
        if !self.is_empty(pos) {
            return Err(EngineError::CellOccupied {
                row: pos.row as usize,
                col: pos.col as usize,
            });
        }
        self.place(pos, side);
        Ok(())
    }

    #[inline]
    pub fn pieces(&self, side: Side) -> Bitboard {
        match side {
            Side::X => self.x,
            Side::O => self.o,
        }
    }

    #[inline]
    fn pieces_mut(&mut self, side: Side) -> &mut Bitboard {
        match side {
            Side::X => &mut self.x,
            Side::O => &mut self.o,
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.x | self.o
    }

    /// Unoccupied cells in increasing bit-index (row-major) order.
    ///
    /// This order is the only move ordering the search uses.
    #[inline]
    pub fn empty_cells(&self) -> BitboardIter {
        let empty = !self.occupied().bits() & self.full_mask();
        Bitboard::from_bits(empty).iter_ones(self.size())
    }

    /// False when the two sides overlap or a piece sits outside the board.
    pub fn validate(&self) -> bool {
        let outside = !self.full_mask();
        !self.x.intersects(self.o) && self.occupied().bits() & outside == 0
    }

    /// Total pieces on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.x.count() + self.o.count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.x.is_empty() && self.o.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied().bits() == self.full_mask()
    }

    /// Side to move assuming X started: X when piece counts are equal.
    pub fn side_to_move(&self) -> Side {
        if self.x.count() <= self.o.count() {
            Side::X
        } else {
            Side::O
        }
    }
}

impl Default for Board {
    /// Empty 3x3 board
    fn default() -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
            side: MIN_SIDE as u8,
        }
    }
}

impl std::fmt::Display for Board {
    /// Renders the board with 1-based indices on both axes.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.size();
        write!(f, " ")?;
        for c in 1..=n {
            write!(f, " {c} ")?;
        }
        writeln!(f)?;
        for r in 0..n {
            write!(f, "{}", r + 1)?;
            for c in 0..n {
                let sym = self
                    .get(Pos::new(r as u8, c as u8))
                    .map_or(' ', Side::symbol);
                write!(f, "[{sym}]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
