//! Terminal rendering layer.
//!
//! Rendering goes through a simple framebuffer that is flushed to the
//! terminal each frame, which keeps `core` free of any terminal types
//! and makes the view testable without a tty.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod theme;

pub use fb::{CellStyle, FrameBuffer, Rgb, TermCell};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
pub use theme::{LetterTheme, ThemeError};
