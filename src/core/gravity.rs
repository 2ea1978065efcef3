//! Gravity collapse - after a row elimination, drop everything above.
//!
//! Rows are processed nearest the eliminated row first, then outward to
//! the entry row. That order matters: a block must not be dropped past a
//! neighbor that has not yet been relocated in the same pass.

use crate::core::grid::Grid;
use crate::types::FallDirection;

/// Drop every occupied cell strictly above `eliminated_row` to its
/// lowest empty support in the fall direction. Returns the number of
/// blocks relocated.
pub fn settle_above(grid: &mut Grid, eliminated_row: i8, dir: FallDirection) -> usize {
    let mut moved = 0;
    let mut y = dir.step_back(eliminated_row);

    while y >= 0 && y < grid.height() as i8 {
        for x in 0..grid.width() as i8 {
            if grid.is_empty(x, y) {
                continue;
            }

            // Walk down while the next cell in the fall direction is
            // free; stops at the first occupied cell or the boundary.
            let mut target = y;
            while grid.is_empty(x, dir.step(target)) {
                target = dir.step(target);
            }

            if target != y {
                if grid.move_block(x, y, x, target) {
                    moved += 1;
                } else {
                    // Consistency fault: preconditions held but the move
                    // failed. Clear the source rather than leave a
                    // dangling cell.
                    let _ = grid.remove(x, y);
                }
            }
        }
        y = dir.step_back(y);
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Letter;

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn test_single_block_falls_to_floor() {
        let mut grid = Grid::new(8, 15);
        grid.place(3, 5, letter('A')).unwrap();

        let moved = settle_above(&mut grid, 10, FallDirection::Down);

        assert_eq!(moved, 1);
        assert!(grid.is_empty(3, 5));
        assert_eq!(grid.cell(3, 14), Some(Some(letter('A'))));
        grid.check_consistency();
    }

    #[test]
    fn test_stack_preserves_order() {
        let mut grid = Grid::new(8, 15);
        // Vertical stack with a gap underneath after an elimination at
        // row 12.
        grid.place(2, 10, letter('A')).unwrap();
        grid.place(2, 11, letter('L')).unwrap();

        settle_above(&mut grid, 12, FallDirection::Down);

        // Lower block lands on the floor, upper block lands on it;
        // nobody is double-dropped past a neighbor.
        assert_eq!(grid.cell(2, 14), Some(Some(letter('L'))));
        assert_eq!(grid.cell(2, 13), Some(Some(letter('A'))));
        grid.check_consistency();
    }

    #[test]
    fn test_settled_blocks_do_not_move() {
        let mut grid = Grid::new(8, 15);
        grid.place(4, 14, letter('E')).unwrap();
        grid.place(4, 13, letter('C')).unwrap();

        let moved = settle_above(&mut grid, 14, FallDirection::Down);

        assert_eq!(moved, 0);
        assert_eq!(grid.cell(4, 14), Some(Some(letter('E'))));
        assert_eq!(grid.cell(4, 13), Some(Some(letter('C'))));
    }

    #[test]
    fn test_rows_at_or_below_elimination_untouched() {
        let mut grid = Grid::new(8, 15);
        // Floating block below the eliminated row stays floating: only
        // rows strictly above are settled.
        grid.place(1, 12, letter('A')).unwrap();
        grid.place(1, 8, letter('L')).unwrap();

        settle_above(&mut grid, 10, FallDirection::Down);

        assert_eq!(grid.cell(1, 12), Some(Some(letter('A'))));
        // The row-8 block falls until it rests on the row-12 block.
        assert_eq!(grid.cell(1, 11), Some(Some(letter('L'))));
    }

    #[test]
    fn test_upward_fall_direction_mirrors() {
        let mut grid = Grid::new(8, 15);
        // Blocks fall toward row 0; "above" an elimination at row 4 are
        // rows 5.. toward the entry row at the bottom.
        grid.place(3, 9, letter('A')).unwrap();

        settle_above(&mut grid, 4, FallDirection::Up);

        assert!(grid.is_empty(3, 9));
        assert_eq!(grid.cell(3, 0), Some(Some(letter('A'))));
        grid.check_consistency();
    }

    #[test]
    fn test_full_column_stays_packed() {
        let mut grid = Grid::new(8, 15);
        for y in 10..15 {
            grid.place(6, y, letter('I')).unwrap();
        }

        let moved = settle_above(&mut grid, 9, FallDirection::Down);
        assert_eq!(moved, 0);
        for y in 10..15 {
            assert!(!grid.is_empty(6, y));
        }
    }
}
