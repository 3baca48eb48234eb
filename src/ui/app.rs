//! Main application for the GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::{GameMode, GameResult, GameState};
use super::theme::*;
use crate::board::{MAX_SIDE, MIN_SIDE};
use crate::{EngineConfig, Side};

/// Main application
pub struct TicTacToeApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl TicTacToeApp {
    /// Create the app for a validated engine configuration
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EngineConfig) -> crate::Result<Self> {
        Ok(Self {
            state: GameState::new(GameMode::default(), config)?,
            board_view: BoardView::default(),
            show_debug: true,
        })
    }

    /// Start a new game in `mode`, keeping the board size and engine
    fn new_game(&mut self, mode: GameMode) {
        match self.state.reset() {
            Ok(()) => self.state.mode = mode,
            Err(msg) => self.state.message = Some(msg),
        }
    }

    fn restart(&mut self) {
        if let Err(msg) = self.state.reset() {
            self.state.message = Some(msg);
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                // The worker owns the engine while thinking
                let idle = !self.state.is_ai_thinking();

                ui.menu_button("Game", |ui| {
                    let modes = [
                        ("New Game (PvE - X)", GameMode::PvE { human_side: Side::X }),
                        ("New Game (PvE - O)", GameMode::PvE { human_side: Side::O }),
                        ("New Game (PvP)", GameMode::PvP { show_suggestions: false }),
                    ];
                    for (text, mode) in modes {
                        if ui.add_enabled(idle, egui::Button::new(text)).clicked() {
                            self.new_game(mode);
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    if ui.add_enabled(idle, egui::Button::new("Undo")).clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Board", |ui| {
                    for size in MIN_SIDE..=MAX_SIDE {
                        let selected = self.state.board_size() == size;
                        let radio = egui::RadioButton::new(selected, format!("{size} x {size}"));
                        if ui.add_enabled(idle, radio).clicked() {
                            if let Err(msg) = self.state.set_board_size(size) {
                                self.state.message = Some(msg);
                            }
                            ui.close_menu();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                    if let GameMode::PvP { show_suggestions } = &mut self.state.mode {
                        ui.checkbox(show_suggestions, "Auto Hints");
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human_side } => format!("PvE - You: {human_side}"),
                        GameMode::PvP { .. } => "PvP - Hotseat".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);

                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_cache_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.game_over {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &result);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        let n = self.state.board_size();
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("X O").size(20.0).strong().color(X_PIECE));
            ui.add_space(4.0);
            ui.label(RichText::new("TIC-TAC-TOE").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("{n} x {n}, {n} in a row"))
                    .size(11.0)
                    .color(TEXT_MUTED),
            );
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn;

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter()
                    .circle_filled(rect.center(), 22.0, egui::Color32::from_rgb(50, 53, 58));
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    turn.symbol(),
                    egui::FontId::proportional(28.0),
                    piece_color(turn),
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("{turn} to move"))
                            .size(18.0)
                            .strong()
                            .color(TEXT_PRIMARY),
                    );

                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.game_over.is_some() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 1.0 {
                    TIMER_NORMAL
                } else if secs < 10.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(24.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Transposition table counters
    fn render_cache_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("CACHE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(stats) = self.state.tt_stats() else {
                ui.label(RichText::new("busy").size(11.0).color(TEXT_MUTED));
                return;
            };
            if stats.size == 0 {
                ui.label(RichText::new("disabled").size(11.0).color(TEXT_MUTED));
                return;
            }
            let rows = [
                ("Slots", format!("{} / {}", stats.used, stats.size)),
                ("Hits", stats.hits.to_string()),
                ("Misses", stats.misses.to_string()),
                ("Collisions", stats.collisions.to_string()),
                ("Hit rate", format!("{:.1}%", stats.hit_rate())),
            ];
            for (name, value) in rows {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(name).size(11.0).color(TEXT_SECONDARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(value).size(11.0).color(TEXT_PRIMARY));
                    });
                });
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn_frame = Frame::new()
                    .fill(egui::Color32::from_rgb(50, 53, 58))
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0);

                let idle = !self.state.is_ai_thinking();
                btn_frame.show(ui, |ui| {
                    let text = RichText::new("Undo").size(12.0).color(TEXT_PRIMARY);
                    let label = egui::Label::new(text).sense(egui::Sense::click());
                    if ui.add_enabled(idle, label).clicked() {
                        self.state.undo();
                    }
                });

                ui.add_space(4.0);

                if let GameMode::PvP { .. } = self.state.mode {
                    btn_frame.show(ui, |ui| {
                        let text = RichText::new("Hint").size(12.0).color(TEXT_PRIMARY);
                        let label = egui::Label::new(text).sense(egui::Sense::click());
                        if ui.add_enabled(idle, label).clicked() {
                            self.state.request_suggestion();
                        }
                    });
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = &self.state.last_ai_result else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                return;
            };

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!("{:?}", result.search_type))
                            .size(11.0)
                            .strong()
                            .color(TIMER_NORMAL),
                    );
                    ui.label(
                        RichText::new(format!("Score: {}", result.score))
                            .size(10.0)
                            .color(TEXT_SECONDARY),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("{}ms", result.time_ms))
                                .size(10.0)
                                .color(TEXT_SECONDARY),
                        );
                        ui.label(
                            RichText::new(format!("{} nodes", result.nodes))
                                .size(10.0)
                                .color(TEXT_MUTED),
                        );
                    });
                });
            });

            if let Some(pos) = result.best_move {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("-> column {}, row {}", pos.col + 1, pos.row + 1))
                        .size(12.0)
                        .strong()
                        .color(WIN_HIGHLIGHT),
                );
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let (headline, accent) = match result.winner {
            Some(side) => (format!("{side} WINS!"), piece_color(side)),
            None => ("TIE".to_string(), TEXT_SECONDARY),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    let accent_light = egui::Color32::from_rgb(180, 255, 180);
                    ui.label(RichText::new("GAME OVER").size(12.0).color(accent_light));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(20.0).strong().color(accent));
                    ui.add_space(12.0);

                    Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            let label = egui::Label::new(
                                RichText::new("New Game").size(14.0).strong().color(TEXT_PRIMARY),
                            );
                            if ui.add(label.sense(egui::Sense::click())).clicked() {
                                self.restart();
                            }
                        });
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let winning_line = self.state.game_over.and_then(|r| r.winning_line);
            let accept_input = self.state.game_over.is_none()
                && self.state.is_human_turn()
                && !self.state.is_ai_thinking();

            let clicked = self.board_view.show(
                ui,
                &self.state.board,
                self.state.current_turn,
                self.state.last_move,
                self.state.suggested_move,
                winning_line,
                accept_input,
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            // D - Toggle debug panel
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // H - Get hint (PvP mode)
            if i.key_pressed(egui::Key::H) {
                if let GameMode::PvP { .. } = self.state.mode {
                    self.state.request_suggestion();
                }
            }

            // U - Undo
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }

            // N - New game
            if i.key_pressed(egui::Key::N) {
                self.restart();
            }
        });
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();

        if !self.state.is_ai_thinking() && self.state.game_over.is_none() {
            if self.state.is_ai_turn() {
                self.state.start_ai_thinking();
            } else if let GameMode::PvP { show_suggestions: true } = self.state.mode {
                if self.state.suggested_move.is_none() {
                    self.state.request_suggestion();
                }
            }
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
