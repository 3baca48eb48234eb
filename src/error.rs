//! Error types for engine construction, configuration and move input.
//!
//! The search itself never fails: invalid or finished positions yield
//! "no move" instead of an error.

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("board size {0} is not supported (expected 3..=8)")]
    InvalidBoardSize(usize),

    #[error("cell ({row}, {col}) is outside a {side}x{side} board")]
    OutOfBounds { row: usize, col: usize, side: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("engine returned no move: {0}")]
    NoMove(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
