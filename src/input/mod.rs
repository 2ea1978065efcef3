//! Keyboard input mapping for terminal environments.
//!
//! Every action fires once per physical key press. Terminals repeat key
//! events while a key is held and most do not emit release events, so a
//! short timeout stands in for the missing release.

use crossterm::event::KeyCode;

use crate::types::GameAction;

// Terminal auto-repeat kicks in well after this, so a single tap never
// registers twice, while deliberate re-presses still get through.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks which action key is currently considered held.
#[derive(Debug, Clone)]
pub struct InputMapper {
    held: Option<GameAction>,
    last_key_time: std::time::Instant,
    key_release_timeout_ms: u32,
}

impl InputMapper {
    pub fn new() -> Self {
        Self {
            held: None,
            last_key_time: std::time::Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Maps a key press to at most one action. Repeat events for a key
    /// that is still held are swallowed.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let action = map_key(code)?;
        self.auto_release();
        self.last_key_time = std::time::Instant::now();
        if self.held == Some(action) {
            return None;
        }
        self.held = Some(action);
        Some(action)
    }

    /// For terminals that do emit release events.
    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(action) = map_key(code) {
            if self.held == Some(action) {
                self.held = None;
            }
        }
    }

    /// Call once per tick so a stuck key does not suppress the next press.
    pub fn update(&mut self) {
        self.auto_release();
    }

    pub fn reset(&mut self) {
        self.held = None;
        self.last_key_time = std::time::Instant::now();
    }

    fn auto_release(&mut self) {
        let since_last = self.last_key_time.elapsed().as_millis() as u32;
        if since_last > self.key_release_timeout_ms {
            self.held = None;
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn map_key(code: KeyCode) -> Option<GameAction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SoftDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Quit is handled outside the action stream so it works even when the
/// game is paused or over.
pub fn is_quit(code: KeyCode) -> bool {
    matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
}
