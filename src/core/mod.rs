//! Core module - pure game logic with no I/O dependencies
//!
//! Grid state, the placement protocol, elimination, gravity collapse,
//! spawning and the session state machine all live here. Nothing in
//! this module touches the terminal.

pub mod eliminate;
pub mod game;
pub mod gravity;
pub mod grid;
pub mod rng;
pub mod snapshot;
pub mod spawn;

// Re-export commonly used types
pub use eliminate::{run_to_fixed_point, EliminationReport};
pub use game::{Game, LastEvent};
pub use gravity::settle_above;
pub use grid::{Block, BlockId, Grid, GridEvent};
pub use rng::SimpleRng;
pub use snapshot::{FallingSnapshot, GameSnapshot};
pub use spawn::{SpawnGate, SpawnOutcome};
