//! Theme constants for the GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(236, 228, 210);
pub const GRID_LINE: Color32 = Color32::from_rgb(70, 60, 50);
pub const LABEL: Color32 = Color32::from_rgb(120, 105, 90);

// Pieces
pub const X_PIECE: Color32 = Color32::from_rgb(40, 90, 200);
pub const O_PIECE: Color32 = Color32::from_rgb(210, 60, 50);

// Markers
pub const LAST_MOVE_BG: Color32 = Color32::from_rgb(250, 240, 170);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(120, 215, 120);

// Functions for colors that can't be const
pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

pub fn suggestion() -> Color32 {
    Color32::from_rgba_unmultiplied(60, 160, 90, 90)
}

/// Piece color for a side
pub fn piece_color(side: crate::Side) -> Color32 {
    match side {
        crate::Side::X => X_PIECE,
        crate::Side::O => O_PIECE,
    }
}

// Panel text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 28.0;
pub const PIECE_RATIO: f32 = 0.32;
pub const PIECE_STROKE_RATIO: f32 = 0.08;
pub const GRID_LINE_WIDTH: f32 = 2.0;
