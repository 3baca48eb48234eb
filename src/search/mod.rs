//! Search module for the N-in-a-row solver
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Full-depth alpha-beta search over max/min plies

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{terminal_score, Ply, SearchResult, Searcher, DRAW_SCORE, WIN_SCORE};
pub use tt::{Bound, TTStats, TranspositionTable};
pub use zobrist::{ZobristTable, DEFAULT_SEED};
