//! N-in-a-row solver for square boards
//!
//! Plays tic-tac-toe generalized to N x N boards (N from 3 to 8), where a
//! player wins by filling a whole row, column, or main diagonal. Every move is
//! chosen by searching the game tree to the end, so play is perfect.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Win and draw detection with precomputed line masks
//! - [`search`]: Zobrist hashing, transposition table, alpha-beta search
//! - [`engine`]: Move selection driver owning the search context
//! - [`selfplay`] and [`terminal`]: engine-vs-engine runs and a console game
//! - [`ui`]: egui front-end
//!
//! # Quick Start
//!
//! ```
//! use tictactoe::{AIEngine, Board, Pos, Side};
//!
//! let mut board = Board::default();
//! let mut engine = AIEngine::new();
//!
//! board.place(Pos::new(0, 0), Side::X);
//!
//! // AI responds as O
//! if let Some(pos) = engine.select_move(&board, Side::O) {
//!     board.place(pos, Side::O);
//!     println!("AI plays at {pos}");
//! }
//! ```
//!
//! # Move Selection
//!
//! 1. Invalid or finished positions get no move
//! 2. Empty board: center cell, no search
//! 3. One empty cell: that cell, no search
//! 4. Otherwise full-depth alpha-beta with a transposition table

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod search;
pub mod selfplay;
pub mod terminal;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Bitboard, Board, Pos, Side, MAX_SIDE, MIN_SIDE};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{EngineError, Result};
