//! Game module - one session tying grid, spawn gate and score together.
//!
//! The session owns every collaborator explicitly (no globals): the
//! grid, the spawn gate and the score live here, and references flow
//! outward to the presentation layer. Exactly one block is falling at
//! any time; the next one is only created after the previous unit lands
//! and elimination/collapse settle.

use crate::config::GameConfig;
use crate::core::eliminate::run_to_fixed_point;
use crate::core::grid::{Block, BlockId, Grid};
use crate::core::snapshot::{FallingSnapshot, GameSnapshot};
use crate::core::spawn::{SpawnGate, SpawnOutcome};
use crate::types::GameAction;

/// Outcome of the most recent landing, consumed by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastEvent {
    /// Word matches eliminated by this landing (chains included).
    pub matches: u32,
    /// Score awarded for those matches.
    pub score_awarded: u32,
    /// Whether this landing topped the game out.
    pub game_over: bool,
}

/// Complete game session state.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    gate: SpawnGate,
    /// The single unit currently falling, if any.
    falling: Option<BlockId>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    score: u32,
    words_cleared: u32,
    fall_timer_ms: u32,
    paused: bool,
    game_over: bool,
    started: bool,
    last_event: Option<LastEvent>,
}

impl Game {
    /// Create a session from a validated configuration.
    pub fn new(config: GameConfig) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let gate = SpawnGate::new(config.column_policy, config.seed);
        Self {
            config,
            grid,
            gate,
            falling: None,
            episode_id: 0,
            score: 0,
            words_cleared: 0,
            fall_timer_ms: 0,
            paused: false,
            game_over: false,
            started: false,
            last_event: None,
        }
    }

    /// Start the session and spawn the first unit.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn words_cleared(&self) -> u32 {
        self.words_cleared
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn falling_block(&self) -> Option<&Block> {
        self.falling.and_then(|id| self.grid.block(id))
    }

    /// Take and clear the last landing event.
    pub fn take_last_event(&mut self) -> Option<LastEvent> {
        self.last_event.take()
    }

    fn spawn_next(&mut self) {
        match self
            .gate
            .spawn(&mut self.grid, &self.config.target, self.config.entry_row())
        {
            SpawnOutcome::Spawned(id) => {
                self.falling = Some(id);
                self.fall_timer_ms = 0;
            }
            SpawnOutcome::Blocked => {
                self.falling = None;
                self.game_over = true;
            }
        }
    }

    /// Move the falling unit one column sideways. Rejection (wall or
    /// occupied neighbor) is silently ignored.
    fn try_shift(&mut self, dx: i8) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        let Some(block) = self.falling_block().copied() else {
            return false;
        };
        self.grid
            .move_block(block.x, block.y, block.x + dx, block.y)
    }

    /// Advance the falling unit one step in the fall direction; a
    /// failed step means it landed.
    fn fall_step(&mut self) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        let Some(block) = self.falling_block().copied() else {
            return false;
        };

        let next_y = self.config.fall_direction.step(block.y);
        if self.grid.move_block(block.x, block.y, block.x, next_y) {
            return true;
        }

        self.land(block.id);
        false
    }

    /// Landing sequence: mark the unit landed, run elimination to its
    /// fixed point, then either raise game over or spawn the next unit.
    fn land(&mut self, id: BlockId) {
        self.grid.set_landed(id);
        self.falling = None;

        let report = run_to_fixed_point(
            &mut self.grid,
            &self.config.target,
            self.config.fall_direction,
        );
        self.score += report.score;
        self.words_cleared += report.matches;

        let topped_out = self.grid.is_row_occupied(self.config.entry_row());
        self.last_event = Some(LastEvent {
            matches: report.matches,
            score_awarded: report.score,
            game_over: topped_out,
        });

        if topped_out {
            self.game_over = true;
        } else {
            self.spawn_next();
        }
    }

    /// Main game tick: accumulate time and apply gravity on the fall
    /// interval. Returns true when the falling unit advanced or landed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused || self.game_over || !self.started {
            return false;
        }
        if self.falling.is_none() {
            return false;
        }

        self.fall_timer_ms += elapsed_ms;
        if self.fall_timer_ms >= self.config.fall_interval_ms {
            self.fall_timer_ms = 0;
            self.fall_step();
            return true;
        }
        false
    }

    /// Apply a discrete player action.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_shift(-1),
            GameAction::MoveRight => self.try_shift(1),
            GameAction::SoftDrop => {
                // Immediate fall step; also restarts the gravity timer
                // so the unit does not double-step this tick.
                self.fall_timer_ms = 0;
                self.fall_step();
                true
            }
            GameAction::Pause => {
                if !self.game_over {
                    self.paused = !self.paused;
                }
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Tear down and reinitialize: destroy all blocks, reset the grid,
    /// zero the score, keep the RNG sequence rolling.
    pub fn restart(&mut self) {
        let seed = self.gate.seed();
        self.grid.reset();
        self.gate = SpawnGate::new(self.config.column_policy, seed);
        self.falling = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.score = 0;
        self.words_cleared = 0;
        self.fall_timer_ms = 0;
        self.paused = false;
        self.game_over = false;
        self.started = true;
        self.spawn_next();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let width = self.grid.width() as i8;
        let height = self.grid.height() as i8;

        out.rows.clear();
        for y in 0..height {
            let row: String = (0..width)
                .map(|x| match self.grid.cell(x, y) {
                    Some(Some(letter)) => letter.as_char(),
                    _ => '.',
                })
                .collect();
            out.rows.push(row);
        }

        out.falling = self.falling_block().map(|b| FallingSnapshot {
            id: b.id.raw(),
            x: b.x,
            y: b.y,
            letter: b.letter.as_char(),
        });
        out.target = self.config.target.as_string();
        out.score = self.score;
        out.words_cleared = self.words_cleared;
        out.episode_id = self.episode_id;
        out.seed = self.gate.seed();
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
