//! Game rules for N-in-a-row on an N x N board

pub mod win;

pub use win::{
    check_winner, did_last_move_win, has_won, line_masks, outcome, winning_line, Outcome,
};
