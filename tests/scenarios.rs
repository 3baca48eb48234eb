//! Move selection scenarios and optimal-play checks through the public API

use tictactoe::search::WIN_SCORE;
use tictactoe::selfplay::{self, GameOutcome};
use tictactoe::{AIEngine, Board, EngineConfig, Pos, SearchType, Side};

fn engine(n: usize, tt_entries: usize) -> AIEngine {
    AIEngine::with_config(EngineConfig {
        board_size: n,
        tt_entries,
        seed: 0x5EED,
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
fn empty_board_gets_center() {
    let mut engine = engine(3, 1 << 14);
    assert_eq!(engine.select_move(&Board::default(), Side::X), Some(Pos::new(1, 1)));
    assert_eq!(engine.tt_stats().used, 0);
}

#[test]
fn even_board_center_is_lower_right_of_middle() {
    let mut engine = engine(4, 0);
    assert_eq!(engine.select_move(&Board::new(4).unwrap(), Side::O), Some(Pos::new(2, 2)));
    let mut engine = self::engine(8, 0);
    assert_eq!(engine.select_move(&Board::new(8).unwrap(), Side::X), Some(Pos::new(4, 4)));
}

#[test]
fn takes_immediate_win() {
    let mut engine = engine(3, 1 << 14);
    let board = board_with(3, &[(0, 0), (0, 1)], &[(1, 0), (2, 0)]);
    assert_eq!(engine.select_move(&board, Side::X), Some(Pos::new(0, 2)));
}

#[test]
fn blocks_opponent_row() {
    let mut engine = engine(3, 1 << 14);
    // O holds (1,0) and (1,1); X must take (1,2)
    let board = board_with(3, &[(0, 0), (2, 2)], &[(1, 0), (1, 1)]);
    assert_eq!(engine.select_move(&board, Side::X), Some(Pos::new(1, 2)));
}

#[test]
fn single_empty_cell_is_returned_unscored() {
    let mut engine = engine(3, 1 << 14);
    // x x o
    // o o x
    // x . o    only (2,1) is free
    let board = board_with(
        3,
        &[(0, 0), (0, 1), (1, 2), (2, 0)],
        &[(0, 2), (1, 0), (1, 1), (2, 2)],
    );
    for side in [Side::X, Side::O] {
        let result = engine.get_move_with_stats(&board, side);
        assert_eq!(result.best_move, Some(Pos::new(2, 1)));
        assert_eq!(result.search_type, SearchType::SingleReply);
    }
}

#[test]
fn finished_and_invalid_boards_get_no_move() {
    let mut engine = engine(3, 1 << 14);

    let won = board_with(3, &[(0, 0), (0, 1), (0, 2)], &[(1, 0), (1, 1)]);
    assert_eq!(engine.select_move(&won, Side::O), None);
    assert_eq!(engine.select_move(&won, Side::X), None);

    let drawn = board_with(
        3,
        &[(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)],
        &[(0, 1), (1, 1), (1, 2), (2, 0)],
    );
    assert_eq!(engine.select_move(&drawn, Side::O), None);

    let mut overlap = Board::default();
    overlap.x.set(0);
    overlap.o.set(0);
    assert_eq!(engine.select_move(&overlap, Side::X), None);
}

#[test]
fn optimal_play_draws_3x3_from_either_side() {
    let mut engine = engine(3, 100_000);
    assert_eq!(selfplay::play_game(&mut engine, Side::X).unwrap(), GameOutcome::Tie);
    assert_eq!(selfplay::play_game(&mut engine, Side::O).unwrap(), GameOutcome::Tie);
}

#[test]
fn shared_table_across_many_games_still_draws() {
    let mut engine = engine(3, 100_000);
    let report = selfplay::run(&mut engine, 50).unwrap();
    assert_eq!(report.games, 50);
    assert_eq!(report.ties, 50);
    assert_eq!(report.x_wins + report.o_wins, 0);
}

#[test]
fn tiny_table_still_draws() {
    // Constant slot sharing forces collisions on every other probe
    let mut engine = engine(3, 4);
    let report = selfplay::run(&mut engine, 3).unwrap();
    assert_eq!(report.ties, 3);
    assert!(engine.tt_stats().collisions > 0);
}

#[test]
fn repeated_search_is_deterministic() {
    let board = board_with(3, &[(0, 0)], &[(1, 1)]);

    let mut shared = engine(3, 1 << 14);
    let first = shared.select_move(&board, Side::X);
    let second = shared.select_move(&board, Side::X);
    assert_eq!(first, second);

    let mut fresh = engine(3, 1 << 14);
    assert_eq!(fresh.select_move(&board, Side::X), first);

    let mut uncached = engine(3, 0);
    assert_eq!(uncached.select_move(&board, Side::X), first);
}

#[test]
fn lost_position_scores_as_loss() {
    // X holds the center and a corner with O on an edge. Blocking the
    // diagonal at (2,2) still loses to the fork at (2,0), so every reply
    // scores the same and the first cell in scan order is played.
    let mut engine = engine(3, 1 << 14);
    let board = board_with(3, &[(1, 1), (0, 0)], &[(0, 1)]);
    let result = engine.get_move_with_stats(&board, Side::O);
    assert_eq!(result.search_type, SearchType::AlphaBeta);
    assert_eq!(result.score, -WIN_SCORE);
    assert_eq!(result.best_move, Some(Pos::new(0, 2)));

    let result = engine.get_move_with_stats(&board, Side::X);
    assert_eq!(result.score, WIN_SCORE);
}

#[test]
fn small_4x4_endgame_is_solved() {
    // X threatens the top row; O must block at (0,3)
    let mut engine = engine(4, 1 << 16);
    let board = board_with(
        4,
        &[(0, 0), (0, 1), (0, 2), (2, 1), (3, 3)],
        &[(1, 1), (1, 2), (2, 2), (3, 0)],
    );
    assert_eq!(board.side_to_move(), Side::O);
    assert_eq!(engine.select_move(&board, Side::O), Some(Pos::new(0, 3)));
}
