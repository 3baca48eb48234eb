//! Full-depth alpha-beta search with a transposition table
//!
//! Every line is searched to a terminal position, so scores are exact game
//! values from the perspective side's point of view:
//! [`WIN_SCORE`] for a win, `-WIN_SCORE` for a loss, [`DRAW_SCORE`] for a draw.
//!
//! Maximizing plies place the perspective side's piece, minimizing plies the
//! opponent's. The two plies share one function parameterized by [`Ply`].
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Pos, Side};
//! use tictactoe::search::{Searcher, WIN_SCORE};
//!
//! let mut searcher = Searcher::new(3, 1 << 12, 42);
//! let mut board = Board::default();
//! board.place(Pos::new(0, 0), Side::X);
//! board.place(Pos::new(0, 1), Side::X);
//! board.place(Pos::new(1, 0), Side::O);
//! board.place(Pos::new(2, 0), Side::O);
//!
//! let result = searcher.search(&board, Side::X);
//! assert_eq!(result.best_move, Some(Pos::new(0, 2)));
//! assert_eq!(result.score, WIN_SCORE);
//! ```

use crate::board::{Board, Pos, Side};
use crate::rules::{outcome, Outcome};

use super::{Bound, TTStats, TranspositionTable, ZobristTable};

/// Score of a completed line for the perspective side
pub const WIN_SCORE: i32 = 100;
/// Score of a full board without a completed line
pub const DRAW_SCORE: i32 = 0;

/// Infinity score for alpha-beta bounds (never stored)
const INF: i32 = i32::MAX;

/// Which side a node is choosing for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ply {
    /// Perspective side to move, picks the highest score
    Max,
    /// Opponent to move, picks the lowest score
    Min,
}

impl Ply {
    #[inline]
    pub fn flip(self) -> Ply {
        match self {
            Ply::Max => Ply::Min,
            Ply::Min => Ply::Max,
        }
    }

    #[inline]
    fn mover(self, perspective: Side) -> Side {
        match self {
            Ply::Max => perspective,
            Ply::Min => perspective.opponent(),
        }
    }
}

/// Terminal score of `board` for `perspective`, or `None` if play continues.
#[inline]
pub fn terminal_score(board: &Board, perspective: Side) -> Option<i32> {
    match outcome(board, perspective) {
        Outcome::PerspectiveWins => Some(WIN_SCORE),
        Outcome::OpponentWins => Some(-WIN_SCORE),
        Outcome::Draw => Some(DRAW_SCORE),
        Outcome::Ongoing => None,
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Game value of the best move for the perspective side
    pub score: i32,
    /// Total nodes visited below the root
    pub nodes: u64,
}

/// Search context: the hash keys and the transposition table.
///
/// One searcher runs one search at a time. Separate searchers share nothing,
/// so independent games can each own one.
#[derive(Debug, Clone)]
pub struct Searcher {
    zobrist: ZobristTable,
    tt: TranspositionTable,
    nodes: u64,
}

impl Searcher {
    /// Create a searcher for boards of side length `side` with a table of
    /// `tt_entries` slots (0 disables it) and hash keys derived from `seed`.
    #[must_use]
    pub fn new(side: usize, tt_entries: usize, seed: u64) -> Self {
        Self {
            zobrist: ZobristTable::new(side, seed),
            tt: TranspositionTable::new(tt_entries),
            nodes: 0,
        }
    }

    /// Board side length this searcher was built for
    #[inline]
    pub fn side(&self) -> usize {
        self.zobrist.side()
    }

    /// Re-derive hash keys. Cached entries would be unreachable, so the table
    /// is cleared too.
    pub fn reseed(&mut self, seed: u64) {
        self.zobrist = ZobristTable::new(self.zobrist.side(), seed);
        self.tt.clear();
    }

    /// Reinitialize the table with a new capacity (0 disables it).
    pub fn resize_tt(&mut self, tt_entries: usize) {
        self.tt.resize(tt_entries);
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Search every empty cell of a non-terminal `board` and return the best
    /// one for `perspective`.
    ///
    /// Ties go to the first cell in row-major order. The scan stops early once
    /// a winning move is found. The caller's board is left untouched.
    pub fn search(&mut self, board: &Board, perspective: Side) -> SearchResult {
        debug_assert_eq!(board.size(), self.side(), "board/searcher side length mismatch");
        self.nodes = 0;

        let mut work_board = *board;
        let hash = self.zobrist.hash(&work_board, perspective);

        let mut alpha = -INF;
        let beta = INF;
        let mut best_move = None;
        let mut best_score = -INF;

        for mov in board.empty_cells() {
            work_board.place(mov, perspective);
            let child_hash = self
                .zobrist
                .toggle_turn(self.zobrist.toggle(hash, mov, perspective));
            let score = self.alpha_beta(
                &mut work_board,
                perspective,
                Ply::Min,
                alpha,
                beta,
                child_hash,
            );
            work_board.remove(mov, perspective);

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
                alpha = alpha.max(score);
            }

            if best_score == WIN_SCORE {
                break;
            }
        }

        SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { DRAW_SCORE },
            nodes: self.nodes,
        }
    }

    /// Alpha-beta over one node.
    ///
    /// `hash` identifies `(board, perspective, ply)`. Every piece placed here is
    /// removed again before returning, so `board` comes back unchanged.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        perspective: Side,
        ply: Ply,
        mut alpha: i32,
        mut beta: i32,
        hash: u64,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = self.tt.probe(hash, alpha, beta) {
            return score;
        }

        if let Some(score) = terminal_score(board, perspective) {
            self.tt.store(hash, score, Bound::Exact);
            return score;
        }

        let (orig_alpha, orig_beta) = (alpha, beta);
        let mover = ply.mover(perspective);
        let mut best = match ply {
            Ply::Max => -INF,
            Ply::Min => INF,
        };

        for mov in board.empty_cells() {
            board.place(mov, mover);
            let child_hash = self.zobrist.toggle_turn(self.zobrist.toggle(hash, mov, mover));
            let score = self.alpha_beta(board, perspective, ply.flip(), alpha, beta, child_hash);
            board.remove(mov, mover);

            match ply {
                Ply::Max => {
                    best = best.max(score);
                    alpha = alpha.max(score);
                    if alpha >= beta || best == WIN_SCORE {
                        break;
                    }
                }
                Ply::Min => {
                    best = best.min(score);
                    beta = beta.min(score);
                    if beta <= alpha || best == -WIN_SCORE {
                        break;
                    }
                }
            }
        }

        self.tt.store(hash, best, Bound::classify(best, orig_alpha, orig_beta));
        best
    }
}
