//! Board rendering for the GUI

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{Bitboard, Board, Pos, Side};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    /// Side length of the board last drawn
    side: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            board_rect: Rect::NOTHING,
            side: 3,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any
    #[allow(clippy::too_many_arguments)]
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        current_turn: Side,
        last_move: Option<Pos>,
        suggested_move: Option<Pos>,
        winning_line: Option<Bitboard>,
        accept_input: bool,
    ) -> Option<Pos> {
        let available_size = ui.available_size();
        self.side = board.size();

        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / self.side as f32;

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);

        if let Some(pos) = last_move {
            self.fill_cell(&painter, pos, LAST_MOVE_BG);
        }
        if let Some(line) = winning_line {
            for pos in line.iter_ones(self.side) {
                self.fill_cell(&painter, pos, WIN_HIGHLIGHT);
            }
        }
        if let Some(pos) = suggested_move {
            self.fill_cell(&painter, pos, suggestion());
        }

        self.draw_grid(&painter);
        self.draw_coordinates(&painter);

        for side in [Side::X, Side::O] {
            for pos in board.pieces(side).iter_ones(self.side) {
                self.draw_piece(&painter, pos, side, piece_color(side));
            }
        }

        let mut clicked_pos = None;
        if accept_input {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(board_pos) = self.screen_to_board(pointer_pos) {
                    if board.is_empty(board_pos) {
                        self.draw_piece(&painter, board_pos, current_turn, hover_valid());
                        if response.clicked() {
                            clicked_pos = Some(board_pos);
                        }
                    }
                }
            }
        }

        clicked_pos
    }

    /// Inner grid lines between cells
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let extent = self.side as f32 * self.cell_size;

        for i in 1..self.side {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + extent);
            painter.line_segment([start, end], stroke);

            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + extent, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    /// 1-based labels, matching the console prompts
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for i in 0..self.side {
            let center = BOARD_MARGIN + (i as f32 + 0.5) * self.cell_size;
            let label = format!("{}", i + 1);

            let origin = self.board_rect.min;

            let pos = Pos2::new(origin.x + center, origin.y + BOARD_MARGIN / 2.0);
            painter.text(pos, egui::Align2::CENTER_CENTER, &label, font.clone(), LABEL);

            let pos = Pos2::new(origin.x + BOARD_MARGIN / 2.0, origin.y + center);
            painter.text(pos, egui::Align2::CENTER_CENTER, &label, font.clone(), LABEL);
        }
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        let min = self.board_rect.min
            + Vec2::new(
                BOARD_MARGIN + pos.col as f32 * self.cell_size,
                BOARD_MARGIN + pos.row as f32 * self.cell_size,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    fn fill_cell(&self, painter: &Painter, pos: Pos, color: egui::Color32) {
        painter.rect_filled(self.cell_rect(pos).shrink(GRID_LINE_WIDTH), CornerRadius::ZERO, color);
    }

    /// X as two crossed strokes, O as a ring
    fn draw_piece(&self, painter: &Painter, pos: Pos, side: Side, color: egui::Color32) {
        let center = self.board_to_screen(pos);
        let r = self.cell_size * PIECE_RATIO;
        let stroke = Stroke::new(self.cell_size * PIECE_STROKE_RATIO, color);

        match side {
            Side::X => {
                let (down, up) = (Vec2::new(r, r), Vec2::new(r, -r));
                painter.line_segment([center - down, center + down], stroke);
                painter.line_segment([center - up, center + up], stroke);
            }
            Side::O => {
                painter.circle_stroke(center, r, stroke);
            }
        }
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN) / self.cell_size;

        let col = x.floor() as i32;
        let row = y.floor() as i32;

        if Pos::is_valid(row, col, self.side) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Center of a cell in screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        self.cell_rect(pos).center()
    }
}
