//! Game configuration: grid geometry, timing, target word, spawn policy.
//!
//! All configuration is supplied at construction and immutable for the
//! session. Validation happens once, up front; a bad configuration is a
//! startup fault, never a runtime one.

use arrayvec::ArrayVec;

use crate::types::{
    FallDirection, Letter, DEFAULT_FALL_INTERVAL_MS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    MAX_WORD_LEN,
};

/// Configuration faults, all fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyWord,
    WordTooLong(usize),
    NonLetter(char),
    /// The word cannot fit in a single row of the configured grid.
    WordWiderThanGrid { word_len: usize, grid_width: u8 },
    GridTooSmall { width: u8, height: u8 },
    /// Dimensions outside the `i8` coordinate range.
    GridTooLarge { width: u8, height: u8 },
    /// Fixed spawn column outside the grid.
    ColumnOutOfRange { column: u8, grid_width: u8 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyWord => write!(f, "target word is empty"),
            ConfigError::WordTooLong(len) => {
                write!(f, "target word has {len} letters, maximum is {MAX_WORD_LEN}")
            }
            ConfigError::NonLetter(c) => {
                write!(f, "target word contains non-letter character {c:?}")
            }
            ConfigError::WordWiderThanGrid {
                word_len,
                grid_width,
            } => write!(
                f,
                "target word of {word_len} letters cannot fit in a {grid_width}-wide grid"
            ),
            ConfigError::GridTooSmall { width, height } => {
                write!(f, "grid {width}x{height} is too small to play")
            }
            ConfigError::GridTooLarge { width, height } => {
                write!(f, "grid {width}x{height} exceeds the maximum dimension of {}", i8::MAX)
            }
            ConfigError::ColumnOutOfRange { column, grid_width } => {
                write!(f, "spawn column {column} outside grid width {grid_width}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The letter sequence players must assemble in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetWord {
    letters: ArrayVec<Letter, MAX_WORD_LEN>,
    /// Distinct letters, the spawnable alphabet for this session.
    distinct: ArrayVec<Letter, MAX_WORD_LEN>,
}

impl TargetWord {
    pub fn parse(word: &str) -> Result<Self, ConfigError> {
        if word.is_empty() {
            return Err(ConfigError::EmptyWord);
        }
        if word.chars().count() > MAX_WORD_LEN {
            return Err(ConfigError::WordTooLong(word.chars().count()));
        }

        let mut letters = ArrayVec::new();
        let mut distinct: ArrayVec<Letter, MAX_WORD_LEN> = ArrayVec::new();
        for c in word.chars() {
            let letter = Letter::from_char(c).ok_or(ConfigError::NonLetter(c))?;
            letters.push(letter);
            if !distinct.contains(&letter) {
                distinct.push(letter);
            }
        }

        Ok(Self { letters, distinct })
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Distinct letters in first-occurrence order.
    pub fn alphabet(&self) -> &[Letter] {
        &self.distinct
    }

    pub fn as_string(&self) -> String {
        self.letters.iter().map(|l| l.as_char()).collect()
    }
}

/// Where new blocks enter horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Always the same column.
    Fixed(u8),
    /// Uniformly random column per spawn.
    Random,
}

/// Immutable per-session configuration.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub grid_width: u8,
    pub grid_height: u8,
    pub fall_interval_ms: u32,
    pub fall_direction: FallDirection,
    pub column_policy: ColumnPolicy,
    pub target: TargetWord,
    pub seed: u32,
}

impl GameConfig {
    /// Build a validated configuration for the given target word,
    /// defaults elsewhere.
    pub fn new(word: &str) -> Result<Self, ConfigError> {
        let config = Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            fall_interval_ms: DEFAULT_FALL_INTERVAL_MS,
            fall_direction: FallDirection::Down,
            column_policy: ColumnPolicy::Random,
            target: TargetWord::parse(word)?,
            seed: 1,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints. Call after any manual field edits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 1 || self.grid_height < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        // Coordinates are i8; a dimension past i8::MAX would make every
        // cell unreachable and top the game out on the first spawn.
        if self.grid_width > i8::MAX as u8 || self.grid_height > i8::MAX as u8 {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.target.len() > self.grid_width as usize {
            return Err(ConfigError::WordWiderThanGrid {
                word_len: self.target.len(),
                grid_width: self.grid_width,
            });
        }
        if let ColumnPolicy::Fixed(col) = self.column_policy {
            if col >= self.grid_width {
                return Err(ConfigError::ColumnOutOfRange {
                    column: col,
                    grid_width: self.grid_width,
                });
            }
        }
        Ok(())
    }

    pub fn entry_row(&self) -> i8 {
        self.fall_direction.entry_row(self.grid_height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        // "ALICE" is the stock five-letter target.
        Self::new("ALICE").expect("default config is valid")
    }
}
