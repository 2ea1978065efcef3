//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Draws are full-frame with style batching: consecutive cells sharing
//! a style are printed under one color change. Plenty fast for a grid
//! this size, and it keeps the drawing API small.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::term::fb::{CellStyle, FrameBuffer, Rgb};

/// Generic over the sink so draw output can be inspected in tests;
/// the binary uses stdout.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_output(out: W) -> Self {
        Self { out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;

        let mut current_style: Option<CellStyle> = None;
        for y in 0..fb.height() {
            self.out.queue(cursor::MoveTo(0, y))?;
            for x in 0..fb.width() {
                let cell = fb.get(x, y).unwrap_or_default();
                if current_style != Some(cell.style) {
                    self.apply_style(cell.style)?;
                    current_style = Some(cell.style);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }

        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        Ok(())
    }

    fn apply_style(&mut self, style: CellStyle) -> Result<()> {
        // Attribute reset is SGR 0, which wipes colors too, so it must
        // be queued before the colors rather than after.
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        self.out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
