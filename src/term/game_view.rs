//! GameView: maps a `core::Game` into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-testable. The grid-to-screen
//! mapping is a deterministic function of grid coordinate, cell size
//! and the computed origin.

use crate::core::Game;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::term::theme::LetterTheme;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders one game session into a framebuffer.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Screen position of a grid cell relative to the play-area origin.
    /// Pure: same inputs, same output.
    pub fn grid_to_screen(&self, origin: (u16, u16), x: i8, y: i8) -> (u16, u16) {
        (
            origin.0 + 1 + x as u16 * self.cell_w,
            origin.1 + 1 + y as u16 * self.cell_h,
        )
    }

    /// Render the current session state into a framebuffer.
    pub fn render(&self, game: &Game, theme: &LetterTheme, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let grid = game.grid();
        let grid_px_w = grid.width() as u16 * self.cell_w;
        let grid_px_h = grid.height() as u16 * self.cell_h;
        let frame_w = grid_px_w + 2;
        let frame_h = grid_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        let origin = (start_x, start_y);

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(24, 24, 32),
            bold: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, grid_px_w, grid_px_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Grid cells: every occupied cell shows its letter.
        for y in 0..grid.height() as i8 {
            for x in 0..grid.width() as i8 {
                match grid.cell(x, y) {
                    Some(Some(letter)) => {
                        let style = theme.style_for(letter).unwrap_or_default();
                        let (px, py) = self.grid_to_screen(origin, x, y);
                        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
                        fb.put_char(px, py, letter.as_char(), style);
                    }
                    Some(None) => {
                        let (px, py) = self.grid_to_screen(origin, x, y);
                        fb.put_char(px, py, '·', bg);
                    }
                    None => {}
                }
            }
        }

        self.draw_side_panel(&mut fb, game, viewport, start_x, start_y, frame_w);

        if game.paused() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if game.game_over() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        game: &Game,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        if viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "TARGET", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &game.config().target.as_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", game.score()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "WORDS", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", game.words_cleared()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "←/→ move  ↓ drop", value);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "p pause  r restart", value);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "q quit", value);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(120, 30, 30),
            bold: true,
        };
        let tx = start_x + frame_w.saturating_sub(text.len() as u16) / 2;
        let ty = start_y + frame_h / 2;
        fb.put_str(tx, ty, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnPolicy, GameConfig};

    fn game() -> (Game, LetterTheme) {
        let mut config = GameConfig::new("ALICE").unwrap();
        config.column_policy = ColumnPolicy::Fixed(3);
        let theme = LetterTheme::for_word(&config.target).unwrap();
        let mut game = Game::new(config);
        game.start();
        (game, theme)
    }

    fn find_char(fb: &FrameBuffer, target: char) -> Option<(u16, u16)> {
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get(x, y).unwrap().ch == target {
                    return Some((x, y));
                }
            }
        }
        None
    }

    fn contains_text(fb: &FrameBuffer, text: &str) -> bool {
        for y in 0..fb.height() {
            let row: String = (0..fb.width()).map(|x| fb.get(x, y).unwrap().ch).collect();
            if row.contains(text) {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_grid_to_screen_deterministic() {
        let view = GameView::default();
        assert_eq!(view.grid_to_screen((0, 0), 0, 0), (1, 1));
        assert_eq!(view.grid_to_screen((0, 0), 3, 7), (7, 8));
        assert_eq!(view.grid_to_screen((10, 5), 3, 7), (17, 13));
        // Same input, same output.
        assert_eq!(
            view.grid_to_screen((10, 5), 3, 7),
            view.grid_to_screen((10, 5), 3, 7)
        );
    }

    #[test]
    fn test_render_shows_border_and_falling_letter() {
        let (game, theme) = game();
        let view = GameView::default();
        let fb = view.render(&game, &theme, Viewport::new(80, 24));

        assert!(find_char(&fb, '┌').is_some());
        assert!(find_char(&fb, '┘').is_some());

        let letter = game.falling_block().unwrap().letter.as_char();
        assert!(find_char(&fb, letter).is_some());
    }

    #[test]
    fn test_render_side_panel_labels() {
        let (game, theme) = game();
        let view = GameView::default();
        let fb = view.render(&game, &theme, Viewport::new(80, 24));

        assert!(contains_text(&fb, "TARGET"));
        assert!(contains_text(&fb, "ALICE"));
        assert!(contains_text(&fb, "SCORE"));
    }

    #[test]
    fn test_render_game_over_overlay() {
        let (mut game, theme) = game();
        let view = GameView::default();
        // Force a top-out.
        for x in 0..8 {
            let _ = game
                .grid_mut()
                .place(x, 1, crate::types::Letter::from_char('X').unwrap());
        }
        while !game.game_over() {
            game.apply_action(crate::types::GameAction::SoftDrop);
        }
        let fb = view.render(&game, &theme, Viewport::new(80, 24));
        assert!(contains_text(&fb, "GAME OVER"));
    }

    #[test]
    fn test_render_tiny_viewport_does_not_panic() {
        let (game, theme) = game();
        let view = GameView::default();
        let fb = view.render(&game, &theme, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
