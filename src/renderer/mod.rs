//! Terminal rendering module
//!
//! Draws the session onto a half-block pixel canvas and flushes it with
//! crossterm. Everything is flat-colour rectangles; text goes on top as labels.

pub mod canvas;
pub mod shapes;

use std::io::{self, Write};

use glam::Vec2;

pub use canvas::{Canvas, Rgb};
use shapes::{Viewport, colors};

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};
use crate::ui::{Menu, MenuAction};

/// Owns the canvas and knows how to lay out each screen
pub struct Renderer {
    canvas: Canvas,
}

impl Renderer {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            canvas: Canvas::new(cols, rows, colors::BACKGROUND),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.canvas.resize(cols, rows);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Compose the frame for the current phase
    pub fn draw(&mut self, state: &GameState, menu: &Menu, settings: &Settings) {
        self.canvas.clear(colors::BACKGROUND);
        match state.phase {
            GamePhase::Menu => self.draw_menu(state, menu, settings),
            GamePhase::Playing => {
                self.draw_world(state, settings);
                self.draw_hud(state);
            }
            GamePhase::GameOver => {
                self.draw_world(state, settings);
                self.draw_game_over(state);
            }
            GamePhase::Terminated => {}
        }
    }

    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        self.canvas.render(out)
    }

    fn draw_world(&mut self, state: &GameState, settings: &Settings) {
        let view = Viewport::new(settings.screen_width, settings.screen_height, &self.canvas);
        let camera = &state.camera;

        for platform in &state.platforms {
            shapes::draw_platform(&mut self.canvas, &view, camera, platform);
        }
        for enemy in &state.enemies {
            shapes::draw_enemy(&mut self.canvas, &view, camera, enemy);
        }
        shapes::draw_player(&mut self.canvas, &view, camera, &state.player);
    }

    fn draw_hud(&mut self, state: &GameState) {
        self.canvas
            .label(1, 0, format!("Score: {}", state.player.score), colors::TEXT);
        self.canvas
            .label(1, 1, format!("Best: {}", state.best_score()), colors::GOLD);
    }

    fn draw_game_over(&mut self, state: &GameState) {
        // Translucent black overlay
        self.canvas.dim(128);

        let mut lines = vec![
            ("Game Over!".to_string(), colors::OVERLAY_TEXT),
            (format!("Score: {}", state.player.score), colors::OVERLAY_TEXT),
            (format!("Best Score: {}", state.best_score()), colors::GOLD),
            ("Press SPACE to play again".to_string(), colors::OVERLAY_TEXT),
            ("Press M to return to menu".to_string(), colors::OVERLAY_TEXT),
            ("Press ESC to quit".to_string(), colors::OVERLAY_TEXT),
        ];
        if state.new_high_score {
            lines.push(("New High Score!".to_string(), colors::GOLD));
        }

        let rows = self.canvas.rows();
        let top = (rows / 2).saturating_sub(lines.len() as u16);
        for (i, (text, color)) in lines.into_iter().enumerate() {
            self.canvas.label_centered(top + i as u16 * 2, text, color);
        }
    }

    fn draw_menu(&mut self, state: &GameState, menu: &Menu, settings: &Settings) {
        let rows = self.canvas.rows();
        self.canvas.label_centered(rows / 4, menu.title, colors::TEXT);
        if state.best_score() > 0 {
            self.canvas.label_centered(
                rows / 4 + 2,
                format!("Best Score: {}", state.best_score()),
                colors::GOLD,
            );
        }

        // Buttons sized like 200x50 boxes on the 800x600 screen
        let view = Viewport::new(settings.screen_width, settings.screen_height, &self.canvas);
        let size = Vec2::new(200.0, 50.0);
        for (i, button) in menu.buttons.iter().enumerate() {
            let pos = Vec2::new(
                settings.screen_width / 2.0 - size.x / 2.0,
                settings.screen_height / 2.0 + i as f32 * 70.0,
            );
            let hovered = menu.is_hovered(i);
            let fill = match (button.action, hovered) {
                (MenuAction::Start, false) => colors::BUTTON_START,
                (MenuAction::Start, true) => colors::BUTTON_START_HOVER,
                (MenuAction::Quit, false) => colors::BUTTON_QUIT,
                (MenuAction::Quit, true) => colors::BUTTON_QUIT_HOVER,
            };
            let (x, y, w, h) = view.rect(pos, size);
            self.canvas.fill_rect(x, y, w, h, fill);

            let text = if hovered {
                format!("> {} <", button.label)
            } else {
                button.label.to_string()
            };
            let text_row = ((y + h / 2) / 2).max(0) as u16;
            self.canvas.label_centered(text_row, text, colors::TEXT);
        }

        self.canvas.label_centered(
            rows.saturating_sub(2),
            "Up/Down + Enter to choose   Left/Right or A/D move   Space shoots",
            colors::TEXT,
        );
    }
}
