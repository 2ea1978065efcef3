//! Letter theme: the visual resource for each spawnable letter.
//!
//! The mapping is built and checked completely at startup. A letter the
//! session can spawn but cannot draw is a configuration fault, reported
//! before the game runs instead of failing lazily at spawn time.

use std::collections::HashMap;

use crate::config::TargetWord;
use crate::term::fb::{CellStyle, Rgb};
use crate::types::Letter;

/// Distinct block colors, assigned to letters in first-occurrence order.
const PALETTE: [Rgb; 8] = [
    Rgb::new(224, 96, 96),
    Rgb::new(96, 186, 96),
    Rgb::new(96, 128, 224),
    Rgb::new(212, 196, 80),
    Rgb::new(186, 96, 196),
    Rgb::new(80, 196, 196),
    Rgb::new(232, 150, 70),
    Rgb::new(150, 150, 232),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// More distinct letters than the palette can distinguish.
    PaletteExhausted { letters: usize, palette: usize },
    /// A spawnable letter has no registered style.
    MissingStyle(Letter),
}

impl std::fmt::Display for ThemeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeError::PaletteExhausted { letters, palette } => write!(
                f,
                "target word has {letters} distinct letters but the palette only has {palette} colors"
            ),
            ThemeError::MissingStyle(letter) => {
                write!(f, "no visual style registered for letter {letter}")
            }
        }
    }
}

impl std::error::Error for ThemeError {}

/// Total letter -> style map for one session.
#[derive(Debug, Clone)]
pub struct LetterTheme {
    styles: HashMap<Letter, CellStyle>,
}

impl LetterTheme {
    /// Build the theme for a target word. Fails when the word's
    /// alphabet cannot be fully covered.
    pub fn for_word(target: &TargetWord) -> Result<Self, ThemeError> {
        let alphabet = target.alphabet();
        if alphabet.len() > PALETTE.len() {
            return Err(ThemeError::PaletteExhausted {
                letters: alphabet.len(),
                palette: PALETTE.len(),
            });
        }

        let styles = alphabet
            .iter()
            .zip(PALETTE.iter())
            .map(|(&letter, &bg)| {
                let style = CellStyle {
                    fg: Rgb::new(10, 10, 10),
                    bg,
                    bold: true,
                };
                (letter, style)
            })
            .collect();

        let theme = Self { styles };
        theme.validate(target)?;
        Ok(theme)
    }

    /// Check that every spawnable letter has a style.
    pub fn validate(&self, target: &TargetWord) -> Result<(), ThemeError> {
        for &letter in target.alphabet() {
            if !self.styles.contains_key(&letter) {
                return Err(ThemeError::MissingStyle(letter));
            }
        }
        Ok(())
    }

    pub fn style_for(&self, letter: Letter) -> Option<CellStyle> {
        self.styles.get(&letter).copied()
    }
}
