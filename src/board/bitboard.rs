//! Single-word bitboard: bit `row * side + col` marks an occupied cell

use super::Pos;

/// Bitboard over at most 64 cells (boards up to 8x8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard(u64);

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Mask of the low `cells` bits. Handles the full 64-cell board, where
    /// `1 << 64` would overflow.
    #[inline]
    pub const fn low_mask(cells: usize) -> u64 {
        if cells >= 64 {
            u64::MAX
        } else {
            (1u64 << cells) - 1
        }
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        self.0 |= 1u64 << idx;
    }

    #[inline]
    pub fn clear(&mut self, idx: usize) {
        self.0 &= !(1u64 << idx);
    }

    #[inline]
    pub fn get(self, idx: usize) -> bool {
        (self.0 >> idx) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `mask` is set
    #[inline]
    pub fn contains_all(self, mask: u64) -> bool {
        self.0 & mask == mask
    }

    #[inline]
    pub fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterate over set bits as positions, lowest bit index first
    pub fn iter_ones(self, side: usize) -> BitboardIter {
        BitboardIter { bits: self.0, side }
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

/// Iterator over set bits in a Bitboard.
///
/// Owns a copy of the bits, so it does not borrow the board it came from.
#[derive(Debug, Clone)]
pub struct BitboardIter {
    bits: u64,
    side: usize,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear the lowest set bit
        self.bits &= self.bits - 1;
        Some(Pos::from_index(idx, self.side))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear_get() {
        let mut bb = Bitboard::new();
        bb.set(4);
        assert!(bb.get(4));
        assert!(!bb.get(3));
        bb.clear(4);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_low_mask_full_word() {
        assert_eq!(Bitboard::low_mask(9), 0x1FF);
        assert_eq!(Bitboard::low_mask(64), u64::MAX);
    }

    #[test]
    fn test_iter_ones_row_major() {
        let bb = Bitboard::from_bits(0b1_0010_0001);
        let cells: Vec<Pos> = bb.iter_ones(3).collect();
        assert_eq!(cells, vec![Pos::new(0, 0), Pos::new(1, 2), Pos::new(2, 2)]);
    }

    #[test]
    fn test_iter_ones_high_bit() {
        let bb = Bitboard::from_bits(1u64 << 63);
        let cells: Vec<Pos> = bb.iter_ones(8).collect();
        assert_eq!(cells, vec![Pos::new(7, 7)]);
    }
}
