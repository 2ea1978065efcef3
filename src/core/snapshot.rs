//! Serializable observation snapshot of a game session.
//!
//! Rows are rendered as strings, one character per cell with `.` for
//! empty, which keeps the JSON form compact and diff-friendly.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallingSnapshot {
    pub id: u32,
    pub x: i8,
    pub y: i8,
    pub letter: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameSnapshot {
    /// Grid rows top to bottom, one char per cell, `.` = empty.
    pub rows: Vec<String>,
    pub falling: Option<FallingSnapshot>,
    pub target: String,
    pub score: u32,
    pub words_cleared: u32,
    pub episode_id: u32,
    pub seed: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Count occupied cells across all rows.
    pub fn occupied(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.chars().filter(|&c| c != '.').count())
            .sum()
    }
}
