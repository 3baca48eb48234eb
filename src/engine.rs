//! Main AI engine
//!
//! The engine owns the search context (hash keys plus transposition table)
//! and decides how each move is produced:
//!
//! 1. **No move**: an invalid board (overlapping pieces) or a finished game
//! 2. **Opening**: an empty board gets the center cell without searching
//! 3. **Single reply**: with one empty cell left, that cell is returned
//! 4. **Alpha-Beta**: full-depth search over every remaining line
//!
//! # Example
//!
//! ```
//! use tictactoe::{AIEngine, Board, Pos, Side};
//!
//! let mut engine = AIEngine::new();
//! let mut board = Board::default();
//! board.place(Pos::new(1, 1), Side::X);
//!
//! let result = engine.get_move_with_stats(&board, Side::O);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use crate::board::{Board, Pos, Side};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::search::{SearchResult, Searcher, TTStats, DRAW_SCORE};

/// Which shortcut or search produced a [`MoveResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Center cell of an empty board
    Opening,
    /// The only empty cell
    SingleReply,
    /// Full alpha-beta search
    AlphaBeta,
    /// Invalid or finished position
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Root score for `AlphaBeta` results, 0 otherwise
    pub score: i32,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: DRAW_SCORE,
            search_type: SearchType::NoMove,
            time_ms,
            nodes: 0,
        }
    }

    /// A move chosen without searching
    #[inline]
    fn shortcut(pos: Pos, search_type: SearchType, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: DRAW_SCORE,
            search_type,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            time_ms,
            nodes: result.nodes,
        }
    }
}

/// Main AI engine.
///
/// One engine serves one board side length, fixed at construction. The
/// transposition table persists across calls, so consecutive moves of a game
/// (and consecutive games) reuse earlier work.
///
/// Passing a board of a different side length than the engine was built for
/// is a caller error; it trips a debug assertion and otherwise produces
/// meaningless moves.
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Searcher,
    config: EngineConfig,
}

impl AIEngine {
    /// Engine for 3x3 boards with default settings.
    ///
    /// ```
    /// use tictactoe::AIEngine;
    ///
    /// let engine = AIEngine::new();
    /// assert_eq!(engine.board_size(), 3);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }

    /// Create an engine from a configuration.
    ///
    /// ```
    /// use tictactoe::{AIEngine, EngineConfig};
    ///
    /// let config = EngineConfig { board_size: 4, tt_entries: 1 << 16, seed: 1 };
    /// let engine = AIEngine::with_config(config).unwrap();
    /// assert_eq!(engine.tt_stats().size, 1 << 16);
    /// ```
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::new(config.board_size, config.tt_entries, config.seed),
            config,
        }
    }

    /// Get the best move for `perspective` in the given position.
    ///
    /// Returns `None` for an invalid board or a finished game.
    ///
    /// ```
    /// use tictactoe::{AIEngine, Board, Pos};
    ///
    /// let mut engine = AIEngine::new();
    /// assert_eq!(
    ///     engine.select_move(&Board::default(), tictactoe::Side::X),
    ///     Some(Pos::new(1, 1))
    /// );
    /// ```
    #[must_use]
    pub fn select_move(&mut self, board: &Board, perspective: Side) -> Option<Pos> {
        self.get_move_with_stats(board, perspective).best_move
    }

    /// Get the best move with detailed search statistics.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, perspective: Side) -> MoveResult {
        let start = Instant::now();
        let elapsed_ms = || start.elapsed().as_millis() as u64;

        if !board.validate() {
            log::debug!("rejecting board with overlapping or out-of-range pieces");
            return MoveResult::no_move(elapsed_ms());
        }

        if crate::search::terminal_score(board, perspective).is_some() {
            return MoveResult::no_move(elapsed_ms());
        }

        if let Some(pos) = Self::opening_move(board) {
            return MoveResult::shortcut(pos, SearchType::Opening, elapsed_ms());
        }

        let mut empty = board.empty_cells();
        if empty.len() == 1 {
            if let Some(pos) = empty.next() {
                return MoveResult::shortcut(pos, SearchType::SingleReply, elapsed_ms());
            }
        }

        let result = self.searcher.search(board, perspective);
        let time_ms = elapsed_ms();
        log::debug!(
            "{perspective} search: move={:?} score={} nodes={} time={time_ms}ms",
            result.best_move,
            result.score,
            result.nodes
        );
        MoveResult::from_alphabeta(result, time_ms)
    }

    /// Center cell of an empty board.
    ///
    /// Even side lengths have four central cells; the lower-right one is used.
    fn opening_move(board: &Board) -> Option<Pos> {
        if !board.is_board_empty() {
            return None;
        }
        let center = (board.size() / 2) as u8;
        Some(Pos::new(center, center))
    }

    /// Board side length this engine serves
    #[inline]
    pub fn board_size(&self) -> usize {
        self.config.board_size
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Re-derive hash keys from `seed`; clears the cache.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.searcher.reseed(seed);
    }

    /// Reallocate the cache with room for `tt_entries` (0 disables it).
    pub fn resize_cache(&mut self, tt_entries: usize) {
        self.config.tt_entries = tt_entries;
        self.searcher.resize_tt(tt_entries);
    }

    /// Clear the transposition table cache.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    /// Get transposition table statistics.
    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::WIN_SCORE;

    fn engine(n: usize) -> AIEngine {
        AIEngine::with_config(EngineConfig {
            board_size: n,
            tt_entries: 1 << 16,
            seed: 11,
        })
        .unwrap()
    }

    fn board_with(n: usize, x: &[(u8, u8)], o: &[(u8, u8)]) -> Board {
        let mut board = Board::new(n).unwrap();
        for &(r, c) in x {
            board.place(Pos::new(r, c), Side::X);
        }
        for &(r, c) in o {
            board.place(Pos::new(r, c), Side::O);
        }
        board
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.board_size(), 3);
        assert_eq!(engine.tt_stats().size, 131_072);
        assert_eq!(engine.tt_stats().hits, 0);
    }

    #[test]
    fn test_with_config_rejects_bad_size() {
        let config = EngineConfig {
            board_size: 2,
            ..EngineConfig::default()
        };
        assert!(AIEngine::with_config(config).is_err());
    }

    #[test]
    fn test_opening_is_center() {
        for n in 3..=8 {
            let mut engine = AIEngine::with_config(EngineConfig {
                board_size: n,
                tt_entries: 0,
                seed: 1,
            })
            .unwrap();
            let result = engine.get_move_with_stats(&Board::new(n).unwrap(), Side::X);
            let c = (n / 2) as u8;
            assert_eq!(result.best_move, Some(Pos::new(c, c)), "side {n}");
            assert_eq!(result.search_type, SearchType::Opening);
            assert_eq!(result.nodes, 0);
        }
    }

    #[test]
    fn test_single_reply_even_if_losing() {
        // x o x
        // x o o
        // o x .   X to move; (2,2) is the only cell
        let board = board_with(
            3,
            &[(0, 0), (0, 2), (1, 0), (2, 1)],
            &[(0, 1), (1, 1), (1, 2), (2, 0)],
        );
        let mut engine = engine(3);
        let result = engine.get_move_with_stats(&board, Side::X);
        assert_eq!(result.best_move, Some(Pos::new(2, 2)));
        assert_eq!(result.search_type, SearchType::SingleReply);
    }

    #[test]
    fn test_no_move_on_terminal_and_invalid() {
        let mut engine = engine(3);

        let won = board_with(3, &[(0, 0), (1, 1), (2, 2)], &[(0, 1), (0, 2)]);
        let result = engine.get_move_with_stats(&won, Side::O);
        assert_eq!(result.best_move, None);
        assert_eq!(result.search_type, SearchType::NoMove);

        let mut overlap = Board::default();
        overlap.x.set(4);
        overlap.o.set(4);
        assert_eq!(engine.select_move(&overlap, Side::X), None);
    }

    #[test]
    fn test_alphabeta_reports_nodes_and_score() {
        let mut engine = engine(3);
        let board = board_with(3, &[(0, 0), (0, 1)], &[(1, 0), (2, 0)]);
        let result = engine.get_move_with_stats(&board, Side::X);
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert_eq!(result.best_move, Some(Pos::new(0, 2)));
        assert_eq!(result.score, WIN_SCORE);
        assert!(result.nodes >= 1);
    }

    #[test]
    fn test_reseed_and_resize() {
        let mut engine = engine(3);
        engine.reseed(5);
        assert_eq!(engine.config().seed, 5);

        engine.resize_cache(0);
        assert_eq!(engine.tt_stats().size, 0);
        let board = board_with(3, &[(1, 1)], &[]);
        assert!(engine.select_move(&board, Side::O).is_some());

        engine.resize_cache(100);
        assert_eq!(engine.tt_stats().size, 128);
    }

    #[test]
    fn test_failed_cache_allocation_still_plays() {
        let mut engine = engine(3);
        engine.resize_cache(usize::MAX);
        assert_eq!(engine.tt_stats().size, 0);

        let board = board_with(3, &[(0, 0), (0, 1)], &[(1, 0), (2, 0)]);
        let result = engine.get_move_with_stats(&board, Side::X);
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert_eq!(result.best_move, Some(Pos::new(0, 2)));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_clear_cache() {
        let mut engine = engine(3);
        let board = board_with(3, &[(1, 1)], &[]);
        let _ = engine.select_move(&board, Side::O);
        assert!(engine.tt_stats().used > 0);
        engine.clear_cache();
        assert_eq!(engine.tt_stats().used, 0);
    }
}
