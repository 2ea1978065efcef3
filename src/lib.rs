//! Wordfall: a falling-letter word puzzle for the terminal.
//!
//! Letters drop into a grid one at a time; spelling the target word in
//! a horizontal run clears it, scores it, and lets everything above
//! settle. `core` is deterministic and terminal-free; `term` renders it.

pub mod config;
pub mod core;
pub mod input;
pub mod term;
pub mod types;
