//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing pieces.
//! This is essential for efficient transposition table lookups during search.
//!
//! A hash covers three things: the pieces of each side, the perspective (the side
//! the search maximizes for), and whose turn it is. The turn component is toggled
//! by the search on every ply change.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Pos, Side};
//! use tictactoe::search::ZobristTable;
//!
//! let zt = ZobristTable::new(3, 42);
//! let mut board = Board::default();
//!
//! let hash1 = zt.hash(&board, Side::X);
//!
//! let pos = Pos::new(1, 1);
//! board.place(pos, Side::X);
//! let hash2 = zt.hash(&board, Side::X);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zt.toggle(hash1, pos, Side::X), hash2);
//! ```

use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::SplitMix64;

use crate::board::{Board, Pos, Side, MAX_CELLS};

/// Default key seed (64-bit golden ratio)
pub const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Zobrist key table for one board side length.
///
/// Keys are drawn from a SplitMix64 stream in a fixed order, so the same
/// `(side, seed)` pair always produces the same table. Hashes from tables with
/// a different seed or side length are not comparable.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    /// Keys per cell: `[bit index][Side::index()]`
    pieces: [[u64; 2]; MAX_CELLS],
    /// Perspective keys: `[Side::index()]`
    perspective: [u64; 2],
    /// Key XORed whenever the side to move flips
    turn: u64,
    side: usize,
    seed: u64,
}

impl ZobristTable {
    /// Derive all keys for a board of side length `side` from `seed`.
    ///
    /// Cell keys come first in row-major order (X then O for each cell),
    /// followed by the two perspective keys and the turn key.
    #[must_use]
    pub fn new(side: usize, seed: u64) -> Self {
        let mut rng = SplitMix64::seed_from_u64(seed);
        let mut pieces = [[0u64; 2]; MAX_CELLS];
        for cell in pieces.iter_mut().take(side * side) {
            cell[0] = rng.next_u64();
            cell[1] = rng.next_u64();
        }
        let perspective = [rng.next_u64(), rng.next_u64()];
        let turn = rng.next_u64();

        Self {
            pieces,
            perspective,
            turn,
            side,
            seed,
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Compute the full hash for a board from `perspective`'s point of view,
    /// with `perspective` to move.
    ///
    /// The board must have the side length this table was built for.
    #[must_use]
    pub fn hash(&self, board: &Board, perspective: Side) -> u64 {
        debug_assert_eq!(board.size(), self.side, "board/hasher side length mismatch");
        let mut h = self.perspective[perspective.index()];

        let mut bits = board.x.bits();
        while bits != 0 {
            h ^= self.pieces[bits.trailing_zeros() as usize][0];
            bits &= bits - 1;
        }

        let mut bits = board.o.bits();
        while bits != 0 {
            h ^= self.pieces[bits.trailing_zeros() as usize][1];
            bits &= bits - 1;
        }

        h
    }

    /// XOR the key for `side` at `pos` in or out of `hash`.
    ///
    /// Applying the same toggle twice restores the original hash.
    #[inline]
    #[must_use]
    pub fn toggle(&self, hash: u64, pos: Pos, side: Side) -> u64 {
        hash ^ self.pieces[pos.to_index(self.side)][side.index()]
    }

    /// Toggle the side-to-move component of the hash.
    #[inline]
    #[must_use]
    pub fn toggle_turn(&self, hash: u64) -> u64 {
        hash ^ self.turn
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new(3, DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zobrist_empty_board() {
        let zt = ZobristTable::default();
        let board = Board::default();

        let hash_x = zt.hash(&board, Side::X);
        let hash_o = zt.hash(&board, Side::O);

        // Different perspective = different hash
        assert_ne!(hash_x, hash_o);
        assert_eq!(hash_x, zt.perspective[0]);
        assert_ne!(hash_x, 0);
    }

    #[test]
    fn test_zobrist_deterministic() {
        let zt1 = ZobristTable::new(4, 7);
        let zt2 = ZobristTable::new(4, 7);
        let mut board = Board::new(4).unwrap();
        board.place(Pos::new(2, 3), Side::O);

        assert_eq!(zt1.hash(&board, Side::X), zt2.hash(&board, Side::X));
    }

    #[test]
    fn test_zobrist_different_seeds() {
        let zt1 = ZobristTable::new(3, 1);
        let zt2 = ZobristTable::new(3, 2);
        let board = Board::default();
        assert_ne!(zt1.hash(&board, Side::X), zt2.hash(&board, Side::X));
    }

    #[test]
    fn test_splitmix_stream_order() {
        // First output of SplitMix64 seeded with 0
        let zt = ZobristTable::new(3, 0);
        assert_eq!(zt.pieces[0][0], 0xE220_A839_7B1D_CDAF);
    }

    #[test]
    fn test_zobrist_incremental() {
        let zt = ZobristTable::default();
        let mut board = Board::default();
        let pos = Pos::new(0, 2);

        let hash1 = zt.hash(&board, Side::O);
        board.place(pos, Side::X);
        let hash2 = zt.hash(&board, Side::O);

        assert_eq!(zt.toggle(hash1, pos, Side::X), hash2);
    }

    #[test]
    fn test_zobrist_toggle_involution() {
        let zt = ZobristTable::new(5, 99);
        let hash = 0xDEAD_BEEF_u64;
        let pos = Pos::new(4, 3);

        let once = zt.toggle(hash, pos, Side::O);
        assert_ne!(once, hash);
        assert_eq!(zt.toggle(once, pos, Side::O), hash);
        assert_eq!(zt.toggle_turn(zt.toggle_turn(hash)), hash);
    }

    #[test]
    fn test_zobrist_side_keys_differ() {
        let zt = ZobristTable::default();
        let pos = Pos::new(1, 1);
        assert_ne!(zt.toggle(0, pos, Side::X), zt.toggle(0, pos, Side::O));
    }

    #[test]
    fn test_zobrist_same_position_different_path() {
        let zt = ZobristTable::default();
        let mut board1 = Board::default();
        let mut board2 = Board::default();

        board1.place(Pos::new(0, 0), Side::X);
        board1.place(Pos::new(2, 2), Side::O);

        board2.place(Pos::new(2, 2), Side::O);
        board2.place(Pos::new(0, 0), Side::X);

        assert_eq!(zt.hash(&board1, Side::X), zt.hash(&board2, Side::X));
    }

    #[test]
    fn test_zobrist_turn_key_distinguishes() {
        let zt = ZobristTable::default();
        let board = Board::default();
        let h = zt.hash(&board, Side::X);
        assert_ne!(zt.toggle_turn(h), h);
    }
}
