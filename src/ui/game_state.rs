//! Game state management for the GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{default_tt_entries, EngineConfig};
use crate::rules::{did_last_move_win, winning_line};
use crate::{AIEngine, Bitboard, Board, MoveResult, Pos, Side};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human_side: Side },
    /// Player vs Player (hotseat)
    PvP { show_suggestions: bool },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_side: Side::X,
        }
    }
}

/// What the worker thread was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTask {
    /// The AI's own move, played when it arrives
    Move,
    /// A hint for the human, only displayed
    Hint,
}

/// AI computation state.
///
/// While thinking, the engine lives on the worker thread and comes back
/// through the channel together with the result.
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<(AIEngine, MoveResult)>,
        start_time: Instant,
        task: AiTask,
    },
}

/// Game result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// `None` for a tie
    pub winner: Option<Side>,
    pub winning_line: Option<Bitboard>,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Side,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Side)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,

    /// `None` while the engine is out on the worker thread
    engine: Option<AIEngine>,
    config: EngineConfig,
}

impl GameState {
    /// New game on a board sized by `config`. `config` must be valid.
    pub fn new(mode: GameMode, config: EngineConfig) -> crate::Result<Self> {
        let engine = AIEngine::with_config(config.clone())?;
        Ok(Self {
            board: Board::new(config.board_size)?,
            mode,
            current_turn: Side::X,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            engine: Some(engine),
            config,
        })
    }

    pub fn board_size(&self) -> usize {
        self.config.board_size
    }

    /// Start over on an empty board of the same size.
    ///
    /// Refused while the AI is thinking: a search cannot be cancelled and the
    /// worker owns the engine until it answers.
    pub fn reset(&mut self) -> Result<(), String> {
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        self.board = Board::new(self.config.board_size).unwrap_or_default();
        self.current_turn = Side::X;
        self.game_over = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
        if self.engine.is_none() {
            self.rebuild_engine();
        }
        Ok(())
    }

    /// Switch to another board side length and start a new game.
    ///
    /// The table gets the default size for the new board; the seed is kept.
    /// Refused while the AI is thinking, like [`GameState::reset`].
    pub fn set_board_size(&mut self, size: usize) -> Result<(), String> {
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if size == self.config.board_size {
            return Ok(());
        }
        let config = EngineConfig {
            board_size: size,
            tt_entries: default_tt_entries(size),
            ..self.config.clone()
        };
        config.validate().map_err(|e| e.to_string())?;
        self.config = config;
        // Free the old table before the new one is allocated
        self.engine = None;
        self.reset()
    }

    fn rebuild_engine(&mut self) {
        match AIEngine::with_config(self.config.clone()) {
            Ok(engine) => self.engine = Some(engine),
            Err(e) => {
                log::error!("failed to rebuild engine: {e}");
                self.message = Some(e.to_string());
            }
        }
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_side } => self.current_turn == human_side,
            GameMode::PvP { .. } => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_side } => self.current_turn != human_side,
            GameMode::PvP { .. } => false,
        }
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a piece at the given position
    pub fn try_place(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        if !self.board.contains(pos) || !self.board.is_empty(pos) {
            return Err("Cell is occupied".to_string());
        }

        self.execute_move(pos);
        Ok(())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) {
        let side = self.current_turn;
        self.board.place(pos, side);

        self.move_history.push((pos, side));
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.move_timer.stop();

        if let Some(result) = self.check_game_over(pos, side) {
            self.game_over = Some(result);
            return;
        }

        self.current_turn = side.opponent();
        self.move_timer.start();
        self.message = None;
    }

    fn check_game_over(&self, pos: Pos, side: Side) -> Option<GameResult> {
        let n = self.board.size();
        if did_last_move_win(self.board.pieces(side), pos, n) {
            return Some(GameResult {
                winner: Some(side),
                winning_line: winning_line(&self.board, side),
            });
        }
        if self.board.is_full() {
            return Some(GameResult {
                winner: None,
                winning_line: None,
            });
        }
        None
    }

    /// Hand the engine to a worker thread.
    fn spawn_worker(&mut self, task: AiTask) {
        let Some(mut engine) = self.engine.take() else {
            return;
        };
        let board = self.board;
        let side = self.current_turn;
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(&board, side);
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            task,
        };
    }

    /// Start AI thinking
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }
        self.spawn_worker(AiTask::Move);
    }

    /// Request move suggestion for PvP mode
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() {
            return;
        }
        self.spawn_worker(AiTask::Hint);
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
                task,
            } => match receiver.try_recv() {
                Ok((engine, result)) => Some((engine, result, start_time.elapsed(), *task)),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    self.rebuild_engine();
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((engine, move_result, elapsed, task)) = result else {
            return;
        };
        self.engine = Some(engine);
        self.ai_state = AiState::Idle;
        self.last_ai_result = Some(move_result.clone());

        match task {
            AiTask::Move => {
                self.move_timer.set_ai_time(elapsed);
                match move_result.best_move {
                    Some(pos) => self.execute_move(pos),
                    None => self.message = Some("AI could not find a move".to_string()),
                }
            }
            AiTask::Hint => self.suggested_move = move_result.best_move,
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Transposition table statistics, when the engine is at home
    pub fn tt_stats(&self) -> Option<crate::search::TTStats> {
        self.engine.as_ref().map(AIEngine::tt_stats)
    }

    /// Undo last move
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        // For PvE, undo two moves (human + AI)
        let undo_count = match self.mode {
            GameMode::PvE { .. } if self.move_history.len() >= 2 => 2,
            _ => 1,
        };

        for _ in 0..undo_count {
            if let Some((pos, side)) = self.move_history.pop() {
                self.board.remove(pos, side);
                self.current_turn = side;
            }
        }
        self.last_move = self.move_history.last().map(|&(pos, _)| pos);
        self.game_over = None;
        self.suggested_move = None;
        self.message = None;
        self.move_timer.start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(mode: GameMode) -> GameState {
        GameState::new(
            mode,
            EngineConfig {
                board_size: 3,
                tt_entries: 1 << 12,
                seed: 1,
            },
        )
        .unwrap()
    }

    fn wait_for_ai(gs: &mut GameState) {
        while gs.is_ai_thinking() {
            thread::sleep(Duration::from_millis(1));
            gs.check_ai_result();
        }
    }

    #[test]
    fn test_pvp_win_detected() {
        let mut gs = state(GameMode::PvP {
            show_suggestions: false,
        });
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            gs.try_place(Pos::new(r, c)).unwrap();
        }
        let result = gs.game_over.unwrap();
        assert_eq!(result.winner, Some(Side::X));
        assert_eq!(result.winning_line, Some(Bitboard::from_bits(0b111)));
        assert!(gs.try_place(Pos::new(2, 2)).is_err());
    }

    #[test]
    fn test_occupied_rejected() {
        let mut gs = state(GameMode::PvP {
            show_suggestions: false,
        });
        gs.try_place(Pos::new(1, 1)).unwrap();
        assert!(gs.try_place(Pos::new(1, 1)).is_err());
        assert_eq!(gs.current_turn, Side::O);
    }

    #[test]
    fn test_ai_moves_and_engine_returns() {
        let mut gs = state(GameMode::PvE {
            human_side: Side::O,
        });
        gs.start_ai_thinking();
        assert!(gs.is_ai_thinking());
        assert!(gs.tt_stats().is_none());
        wait_for_ai(&mut gs);

        assert_eq!(gs.last_move, Some(Pos::new(1, 1)));
        assert_eq!(gs.current_turn, Side::O);
        assert!(gs.tt_stats().is_some());
    }

    #[test]
    fn test_hint_does_not_move() {
        let mut gs = state(GameMode::PvP {
            show_suggestions: true,
        });
        gs.try_place(Pos::new(0, 0)).unwrap();
        gs.request_suggestion();
        wait_for_ai(&mut gs);
        assert_eq!(gs.move_history.len(), 1);
        assert!(gs.suggested_move.is_some());
    }

    #[test]
    fn test_undo_pve_removes_two() {
        let mut gs = state(GameMode::default());
        gs.try_place(Pos::new(0, 0)).unwrap();
        gs.start_ai_thinking();
        wait_for_ai(&mut gs);
        assert_eq!(gs.move_history.len(), 2);

        gs.undo();
        assert!(gs.move_history.is_empty());
        assert!(gs.board.is_board_empty());
        assert_eq!(gs.current_turn, Side::X);
    }

    #[test]
    fn test_set_board_size() {
        let mut gs = state(GameMode::default());
        gs.try_place(Pos::new(0, 0)).unwrap();
        gs.set_board_size(4).unwrap();
        assert_eq!(gs.board.size(), 4);
        assert!(gs.move_history.is_empty());
        assert_eq!(gs.tt_stats().map(|s| s.size), Some(1 << 21));

        assert!(gs.set_board_size(9).is_err());
        assert_eq!(gs.board.size(), 4);
    }

    #[test]
    fn test_restart_refused_while_thinking() {
        let mut gs = state(GameMode::default());
        gs.try_place(Pos::new(0, 0)).unwrap();
        gs.start_ai_thinking();
        assert!(gs.is_ai_thinking());

        assert!(gs.reset().is_err());
        assert!(gs.set_board_size(4).is_err());
        gs.undo();
        assert!(gs.is_ai_thinking());
        assert_eq!(gs.board_size(), 3);

        // The engine that comes back is the one that went out
        wait_for_ai(&mut gs);
        assert_eq!(gs.move_history.len(), 2);
        assert!(gs.tt_stats().is_some_and(|s| s.used > 0));

        gs.reset().unwrap();
        assert!(gs.move_history.is_empty());
        assert!(gs.tt_stats().is_some_and(|s| s.used > 0));
    }
}
