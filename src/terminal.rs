//! Console game: human against the engine
//!
//! Moves are entered as a column and then a row, both 1-based. End of input
//! at any prompt ends the session.

use std::io::{BufRead, Write};

use crate::board::{Board, Pos, Side};
use crate::engine::AIEngine;
use crate::error::Result;
use crate::rules::did_last_move_win;

/// Result of reading one answer from the player
enum Input<T> {
    Value(T),
    Eof,
}

/// Line-oriented console session over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Play games until the player declines a rematch or input runs out.
    pub fn run(&mut self, engine: &mut AIEngine) -> Result<()> {
        loop {
            if !self.play_one(engine)? {
                return Ok(());
            }
            match self.ask_restart()? {
                Input::Value(true) => continue,
                _ => return Ok(()),
            }
        }
    }

    /// One game. Returns `false` if input ended mid-game.
    fn play_one(&mut self, engine: &mut AIEngine) -> Result<bool> {
        let n = engine.board_size();
        let mut board = Board::new(n)?;
        let human = match self.choose_side()? {
            Input::Value(side) => side,
            Input::Eof => {
                writeln!(self.output, "\nEOF received. Defaulting to x.")?;
                Side::X
            }
        };
        let mut to_move = Side::X;

        if human != Side::X {
            log::debug!("engine opens as {}", human.opponent());
        } else {
            write!(self.output, "{board}")?;
        }

        loop {
            let pos = if to_move == human {
                match self.read_move(&board)? {
                    Input::Value(pos) => pos,
                    Input::Eof => return Ok(false),
                }
            } else {
                let Some(pos) = engine.select_move(&board, to_move) else {
                    writeln!(self.output, "Error: engine returned no move")?;
                    return Ok(true);
                };
                writeln!(self.output, "AI plays ({}, {})", pos.col + 1, pos.row + 1)?;
                pos
            };
            board.try_place(pos, to_move)?;

            if did_last_move_win(board.pieces(to_move), pos, n) {
                write!(self.output, "{board}")?;
                let msg = if to_move == human {
                    "Player wins!"
                } else {
                    "AI wins!"
                };
                writeln!(self.output, "{msg}\n")?;
                return Ok(true);
            }
            if board.is_full() {
                write!(self.output, "{board}")?;
                writeln!(self.output, "It's a tie!\n")?;
                return Ok(true);
            }
            if to_move != human {
                write!(self.output, "{board}")?;
            }
            to_move = to_move.opponent();
        }
    }

    /// Read one trimmed line, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn choose_side(&mut self) -> Result<Input<Side>> {
        loop {
            write!(self.output, "Choose your symbol (x/o): ")?;
            let Some(line) = self.read_line()? else {
                return Ok(Input::Eof);
            };
            match line.chars().next().map(|c| c.to_ascii_lowercase()) {
                None => continue,
                Some('x') => return Ok(Input::Value(Side::X)),
                Some('o') => return Ok(Input::Value(Side::O)),
                Some(_) => writeln!(self.output, "Please enter x or o.")?,
            }
        }
    }

    fn ask_restart(&mut self) -> Result<Input<bool>> {
        loop {
            write!(self.output, "Play again? (y/n): ")?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(Input::Eof);
            };
            match line.chars().next().map(|c| c.to_ascii_lowercase()) {
                None => continue,
                Some('y') => return Ok(Input::Value(true)),
                Some('n') => return Ok(Input::Value(false)),
                Some(_) => writeln!(self.output, "Please enter y or n.")?,
            }
        }
    }

    /// Prompt until a 1-based coordinate in range is entered; returns it 0-based.
    fn read_coord(&mut self, prompt: &str, n: usize) -> Result<Input<u8>> {
        loop {
            write!(self.output, "{prompt}")?;
            let Some(line) = self.read_line()? else {
                return Ok(Input::Eof);
            };
            match line.parse::<usize>() {
                Ok(v) if (1..=n).contains(&v) => return Ok(Input::Value((v - 1) as u8)),
                Ok(_) => writeln!(self.output, "Out of range (1-{n}).")?,
                Err(_) => writeln!(self.output, "Invalid input. Enter a number 1-{n}.")?,
            }
        }
    }

    fn read_move(&mut self, board: &Board) -> Result<Input<Pos>> {
        let n = board.size();
        loop {
            let col = match self.read_coord("Input column: ", n)? {
                Input::Value(c) => c,
                Input::Eof => return Ok(Input::Eof),
            };
            let row = match self.read_coord("Input row: ", n)? {
                Input::Value(r) => r,
                Input::Eof => return Ok(Input::Eof),
            };
            let pos = Pos::new(row, col);
            if board.is_empty(pos) {
                return Ok(Input::Value(pos));
            }
            writeln!(self.output, "Cell already occupied. Choose another.\n")?;
        }
    }
}

/// Play on stdin/stdout.
pub fn run(engine: &mut AIEngine) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Console::new(stdin.lock(), stdout.lock()).run(engine)
}
