//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Default grid dimensions
pub const DEFAULT_GRID_WIDTH: u8 = 8;
pub const DEFAULT_GRID_HEIGHT: u8 = 15;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const DEFAULT_FALL_INTERVAL_MS: u32 = 1000;

/// Score awarded per completed target word
pub const MATCH_SCORE: u32 = 100;

/// Longest target word the engine accepts
pub const MAX_WORD_LEN: usize = 16;

/// One letter of the alphabet, guaranteed uppercase ASCII.
///
/// The set of letters actually in play is closed per session: only
/// letters of the configured target word are ever spawned. Emptiness is
/// modeled separately as `Option<Letter>` (see [`Cell`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    /// Parse a letter, accepting upper- or lowercase ASCII.
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Self(upper as u8))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    /// Alphabet index in `0..26`.
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Cell on the grid (None = empty, Some = filled with a letter)
pub type Cell = Option<Letter>;

/// Which way blocks fall through the grid.
///
/// The entry row sits at the opposite end of the fall direction, and
/// the game-over probe checks that row. Both orientations share all
/// grid/elimination logic; only the step and entry row differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallDirection {
    /// Blocks enter at row 0 and fall toward row `height - 1`.
    Down,
    /// Blocks enter at row `height - 1` and fall toward row 0.
    Up,
}

impl FallDirection {
    /// Row where new blocks enter for a grid of the given height.
    pub fn entry_row(self, height: u8) -> i8 {
        match self {
            FallDirection::Down => 0,
            FallDirection::Up => height as i8 - 1,
        }
    }

    /// One step in the fall direction.
    pub fn step(self, y: i8) -> i8 {
        match self {
            FallDirection::Down => y + 1,
            FallDirection::Up => y - 1,
        }
    }

    /// One step against the fall direction (toward the entry row).
    pub fn step_back(self, y: i8) -> i8 {
        match self {
            FallDirection::Down => y - 1,
            FallDirection::Up => y + 1,
        }
    }
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Pause,
    Restart,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
