//! Elimination engine - row scanning for the target word.
//!
//! Scan order is row-major, top row first, left column first, so the
//! leftmost-then-topmost match wins when several exist. After every
//! processed match the scan restarts from the top: the collapse that
//! follows an elimination can create new matches anywhere, including in
//! rows already scanned, so a single pass cannot reach a fixed point.

use crate::config::TargetWord;
use crate::core::gravity::settle_above;
use crate::core::grid::Grid;
use crate::types::{FallDirection, MATCH_SCORE};

/// Outcome of running the engine to its fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EliminationReport {
    /// Number of word matches eliminated (chain reactions included).
    pub matches: u32,
    /// Total cells cleared.
    pub cells_cleared: u32,
    /// Score awarded: one fixed increment per match.
    pub score: u32,
}

/// Find the first occurrence of the target word, in scan order.
/// Returns the starting cell of the match.
fn find_match(grid: &Grid, target: &TargetWord) -> Option<(i8, i8)> {
    let letters = target.letters();
    let n = letters.len() as i8;
    if n == 0 || n > grid.width() as i8 {
        return None;
    }

    for y in 0..grid.height() as i8 {
        for x in 0..=(grid.width() as i8 - n) {
            let hit = letters
                .iter()
                .enumerate()
                .all(|(i, &l)| grid.cell(x + i as i8, y) == Some(Some(l)));
            if hit {
                return Some((x, y));
            }
        }
    }
    None
}

/// Eliminate every occurrence of the target word, collapsing after each
/// match and rescanning until a full pass finds nothing.
pub fn run_to_fixed_point(
    grid: &mut Grid,
    target: &TargetWord,
    dir: FallDirection,
) -> EliminationReport {
    let mut report = EliminationReport::default();

    while let Some((x, y)) = find_match(grid, target) {
        for i in 0..target.len() as i8 {
            // `remove` clears the cell content even when the identity
            // is missing, so an inconsistent cell cannot stay stuck.
            let _ = grid.remove(x + i, y);
            report.cells_cleared += 1;
        }
        report.matches += 1;
        report.score += MATCH_SCORE;

        settle_above(grid, y, dir);
    }

    report
}
