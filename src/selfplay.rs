//! Engine-vs-engine games from the empty board
//!
//! Both sides are played by the same [`AIEngine`], so the transposition table
//! is shared by both players and carried from one game to the next.

use std::fmt;
use std::time::{Duration, Instant};

use crate::board::{Board, Side};
use crate::engine::AIEngine;
use crate::error::{EngineError, Result};
use crate::rules::did_last_move_win;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win(Side),
    Tie,
}

/// Totals over a batch of self-play games
#[derive(Debug, Clone, Default)]
pub struct SelfPlayReport {
    pub games: u64,
    pub x_wins: u64,
    pub o_wins: u64,
    pub ties: u64,
    pub elapsed: Duration,
}

impl SelfPlayReport {
    /// Games per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.games as f64 / secs
        } else {
            0.0
        }
    }

    fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::Win(Side::X) => self.x_wins += 1,
            GameOutcome::Win(Side::O) => self.o_wins += 1,
            GameOutcome::Tie => self.ties += 1,
        }
    }
}

impl fmt::Display for SelfPlayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: X wins = {} O wins = {} ties = {}",
            self.games, self.x_wins, self.o_wins, self.ties
        )
    }
}

/// Play one game with `first` moving first, engine against itself.
///
/// Fails if the engine returns no move while the game is still running,
/// which means the search and the game loop disagree about the position.
pub fn play_game(engine: &mut AIEngine, first: Side) -> Result<GameOutcome> {
    let n = engine.board_size();
    let mut board = Board::new(n)?;
    let mut to_move = first;

    loop {
        let pos = engine.select_move(&board, to_move).ok_or_else(|| {
            EngineError::NoMove(format!(
                "{to_move} to move with {} pieces on the board",
                board.stone_count()
            ))
        })?;
        board.try_place(pos, to_move)?;

        if did_last_move_win(board.pieces(to_move), pos, n) {
            return Ok(GameOutcome::Win(to_move));
        }
        if board.is_full() {
            return Ok(GameOutcome::Tie);
        }
        to_move = to_move.opponent();
    }
}

/// Play `games` games with X moving first and tally the results.
pub fn run(engine: &mut AIEngine, games: u64) -> Result<SelfPlayReport> {
    let mut report = SelfPlayReport::default();
    let start = Instant::now();

    for game in 1..=games {
        let outcome = play_game(engine, Side::X).map_err(|e| {
            log::error!("self-play game {game} failed: {e}");
            e
        })?;
        log::trace!("game {game}: {outcome:?}");
        report.record(outcome);
    }

    report.elapsed = start.elapsed();
    log::info!("self-play finished: {report}");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_3x3_self_play_is_draw() {
        let mut engine = AIEngine::new();
        assert_eq!(play_game(&mut engine, Side::X).unwrap(), GameOutcome::Tie);
        assert_eq!(play_game(&mut engine, Side::O).unwrap(), GameOutcome::Tie);
    }

    #[test]
    fn test_run_counts_games() {
        let mut engine = AIEngine::new();
        let report = run(&mut engine, 5).unwrap();
        assert_eq!(report.games, 5);
        assert_eq!(report.ties, 5);
        assert_eq!(report.x_wins + report.o_wins, 0);
        assert!(engine.tt_stats().hits > 0);
    }

    #[test]
    fn test_without_table() {
        let mut engine = AIEngine::with_config(EngineConfig {
            tt_entries: 0,
            ..EngineConfig::default()
        })
        .unwrap();
        assert_eq!(play_game(&mut engine, Side::X).unwrap(), GameOutcome::Tie);
    }

    #[test]
    fn test_report_display() {
        let report = SelfPlayReport {
            games: 3,
            x_wins: 1,
            o_wins: 0,
            ties: 2,
            elapsed: Duration::ZERO,
        };
        assert_eq!(report.to_string(), "3 games: X wins = 1 O wins = 0 ties = 2");
        assert_eq!(report.throughput(), 0.0);
    }
}
