//! Spawn gate - where new units enter the grid, and top-out detection.
//!
//! The gate probes the entry cell before creating anything: a blocked
//! entry cell is the game-over signal, and in that case no identity is
//! created at all.

use crate::config::{ColumnPolicy, TargetWord};
use crate::core::grid::{BlockId, Grid};
use crate::core::rng::SimpleRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(BlockId),
    /// Entry cell occupied: top-out.
    Blocked,
}

/// Decides the entry cell and letter for each new unit.
#[derive(Debug, Clone)]
pub struct SpawnGate {
    policy: ColumnPolicy,
    rng: SimpleRng,
}

impl SpawnGate {
    pub fn new(policy: ColumnPolicy, seed: u32) -> Self {
        Self {
            policy,
            rng: SimpleRng::new(seed),
        }
    }

    /// Current RNG state, so a restart can replay or continue the
    /// sequence.
    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    fn pick_column(&mut self, grid_width: u8) -> i8 {
        match self.policy {
            ColumnPolicy::Fixed(col) => col as i8,
            ColumnPolicy::Random => self.rng.next_range(grid_width as u32) as i8,
        }
    }

    /// Try to enter a new unit at the entry row. The letter is drawn
    /// uniformly from the target word's distinct letters.
    pub fn spawn(&mut self, grid: &mut Grid, target: &TargetWord, entry_row: i8) -> SpawnOutcome {
        let column = self.pick_column(grid.width());
        let letter = match self.rng.choose(target.alphabet()) {
            Some(&l) => l,
            // Unreachable for a validated TargetWord (never empty).
            None => return SpawnOutcome::Blocked,
        };

        if !grid.is_empty(column, entry_row) {
            return SpawnOutcome::Blocked;
        }

        match grid.place(column, entry_row, letter) {
            Some(id) => SpawnOutcome::Spawned(id),
            None => SpawnOutcome::Blocked,
        }
    }
}
