//! Terminal word-puzzle runner.
//!
//! Uses crossterm for input and a framebuffer-based renderer.
//! Configuration problems are reported before the terminal is put into
//! raw mode, so error output stays readable.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use wordfall::config::GameConfig;
use wordfall::core::Game;
use wordfall::input::{is_quit, InputMapper};
use wordfall::term::{GameView, LetterTheme, TerminalRenderer, Viewport};
use wordfall::types::TICK_MS;

fn main() -> Result<()> {
    let word = std::env::args().nth(1).unwrap_or_else(|| "ALICE".to_string());

    let config = GameConfig::new(&word).context("invalid game configuration")?;
    let theme =
        LetterTheme::for_word(&config.target).context("no color palette for target word")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, &theme);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig, theme: &LetterTheme) -> Result<()> {
    let mut game = Game::new(config);
    game.start();

    let view = GameView::default();
    let mut input = InputMapper::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game, theme, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press => {
                        if is_quit(key.code) {
                            return Ok(());
                        }
                        if let Some(action) = input.handle_key_press(key.code) {
                            game.apply_action(action);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat never moves the piece again.
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            input.update();
            game.tick(TICK_MS);
        }
    }
}
