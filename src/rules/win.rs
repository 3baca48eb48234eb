//! Win condition checking
//!
//! A side wins by filling a complete row, a complete column, or one of the
//! two full diagonals. A full board with no completed line is a draw.
//!
//! Line masks for every supported side length are built at compile time, so
//! a win check is at most `2 * side + 2` mask comparisons.

use crate::board::{Bitboard, Board, Pos, Side, MAX_SIDE};

/// Maximum number of winning lines (8 rows + 8 cols + 2 diagonals)
pub const MAX_LINES: usize = 2 * MAX_SIDE + 2;

/// Line masks indexed by side length. Layout for a side length `n`:
/// `[0..n)` rows, `[n..2n)` columns, `2n` main diagonal, `2n + 1` anti-diagonal.
static LINE_MASKS: [[u64; MAX_LINES]; MAX_SIDE + 1] = build_all_masks();

const fn build_masks(n: usize) -> [u64; MAX_LINES] {
    let mut masks = [0u64; MAX_LINES];
    if n == 0 {
        return masks;
    }
    let mut r = 0;
    while r < n {
        let mut c = 0;
        while c < n {
            let bit = 1u64 << (r * n + c);
            masks[r] |= bit;
            masks[n + c] |= bit;
            if r == c {
                masks[2 * n] |= bit;
            }
            if r + c == n - 1 {
                masks[2 * n + 1] |= bit;
            }
            c += 1;
        }
        r += 1;
    }
    masks
}

const fn build_all_masks() -> [[u64; MAX_LINES]; MAX_SIDE + 1] {
    let mut all = [[0u64; MAX_LINES]; MAX_SIDE + 1];
    let mut n = 0;
    while n <= MAX_SIDE {
        all[n] = build_masks(n);
        n += 1;
    }
    all
}

/// All winning-line masks for a board of side length `n`
#[inline]
pub fn line_masks(n: usize) -> &'static [u64] {
    &LINE_MASKS[n][..2 * n + 2]
}

/// Terminal classification from one side's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PerspectiveWins,
    OpponentWins,
    Draw,
    Ongoing,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

/// Check if `pieces` completes any line on a board of side length `n`
#[inline]
pub fn has_won(pieces: Bitboard, n: usize) -> bool {
    line_masks(n).iter().any(|&m| pieces.contains_all(m))
}

/// Win check restricted to the lines through the last move.
///
/// Only the row, the column, and the diagonals that actually pass through
/// `pos` are tested.
pub fn did_last_move_win(pieces: Bitboard, pos: Pos, n: usize) -> bool {
    let masks = &LINE_MASKS[n];
    let (row, col) = (pos.row as usize, pos.col as usize);

    if pieces.contains_all(masks[row]) || pieces.contains_all(masks[n + col]) {
        return true;
    }
    if row == col && pieces.contains_all(masks[2 * n]) {
        return true;
    }
    row + col == n - 1 && pieces.contains_all(masks[2 * n + 1])
}

/// Terminal state of `board` as seen by `perspective`.
///
/// A perspective win is checked before an opponent win; a full board with no
/// line is a draw.
pub fn outcome(board: &Board, perspective: Side) -> Outcome {
    let n = board.size();
    if has_won(board.pieces(perspective), n) {
        return Outcome::PerspectiveWins;
    }
    if has_won(board.pieces(perspective.opponent()), n) {
        return Outcome::OpponentWins;
    }
    if board.is_full() {
        return Outcome::Draw;
    }
    Outcome::Ongoing
}

/// Winner of a position, if any
pub fn check_winner(board: &Board) -> Option<Side> {
    match outcome(board, Side::X) {
        Outcome::PerspectiveWins => Some(Side::X),
        Outcome::OpponentWins => Some(Side::O),
        _ => None,
    }
}

/// The completed line of `side` as a mask, for highlighting
pub fn winning_line(board: &Board, side: Side) -> Option<Bitboard> {
    let pieces = board.pieces(side);
    line_masks(board.size())
        .iter()
        .find(|&&m| pieces.contains_all(m))
        .map(|&m| Bitboard::from_bits(m))
}
