//! Grid module - the authoritative cell store and block side-table.
//!
//! `cells` is the single source of truth for occupancy and content; the
//! side-table maps each occupied coordinate to the block identity living
//! there. The invariant protected by every operation here:
//!
//!   cell(x, y) is occupied  <=>  the side-table has an id at (x, y)
//!   and the registered block's own (x, y) mirrors that slot.
//!
//! All mutation goes through `place` / `remove` / `move_block`; nothing
//! else writes cells. Coordinates are `i8` so out-of-range probes are
//! representable and answer "not empty" rather than panicking.

use std::collections::HashMap;

use crate::types::{Cell, Letter};

/// Opaque handle for one falling/landed unit. Monotonic per session,
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u32);

impl BlockId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// One unit on the grid. The letter is fixed at creation; the
/// coordinate mirrors the side-table entry for this block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub x: i8,
    pub y: i8,
    pub letter: Letter,
    pub landed: bool,
}

/// Notifications for the presentation layer (create/destroy/relocate
/// visuals). Drained with [`Grid::take_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    Placed {
        id: BlockId,
        x: i8,
        y: i8,
        letter: Letter,
    },
    Removed {
        id: BlockId,
        x: i8,
        y: i8,
    },
    Moved {
        id: BlockId,
        from: (i8, i8),
        to: (i8, i8),
    },
}

/// Fixed-size letter grid plus block registry.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x).
    cells: Vec<Cell>,
    /// Side-table: block identity per occupied cell, same indexing.
    owners: Vec<Option<BlockId>>,
    /// Registry of live blocks, keyed by identity.
    blocks: HashMap<BlockId, Block>,
    next_id: u32,
    events: Vec<GridEvent>,
}

impl Grid {
    pub fn new(width: u8, height: u8) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![None; size],
            owners: vec![None; size],
            blocks: HashMap::new(),
            next_id: 0,
            events: Vec::new(),
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Calculate flat index from (x, y); None when out of bounds.
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell content at (x, y); None when out of bounds.
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// True only for an in-bounds empty cell. Out of range is never
    /// empty, which makes walls behave like occupied cells for movers.
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(self.cell(x, y), Some(None))
    }

    /// Create a new block at (x, y). Fails without mutation when the
    /// cell is occupied or out of bounds.
    pub fn place(&mut self, x: i8, y: i8, letter: Letter) -> Option<BlockId> {
        let idx = self.index(x, y)?;
        if self.cells[idx].is_some() {
            return None;
        }

        let id = BlockId(self.next_id);
        self.next_id += 1;

        self.cells[idx] = Some(letter);
        self.owners[idx] = Some(id);
        self.blocks.insert(
            id,
            Block {
                id,
                x,
                y,
                letter,
                landed: false,
            },
        );
        self.events.push(GridEvent::Placed { id, x, y, letter });
        Some(id)
    }

    /// Clear (x, y) and destroy the identity registered there. No-op
    /// returning None when out of bounds or already empty.
    ///
    /// If the cell is occupied but no identity is registered (a
    /// consistency fault), the cell content is still cleared so the
    /// grid cannot get stuck holding a phantom letter.
    pub fn remove(&mut self, x: i8, y: i8) -> Option<BlockId> {
        let idx = self.index(x, y)?;
        if self.cells[idx].is_none() {
            return None;
        }

        self.cells[idx] = None;
        let owner = self.owners[idx].take();
        if let Some(id) = owner {
            self.blocks.remove(&id);
            self.events.push(GridEvent::Removed { id, x, y });
        }
        owner
    }

    /// Relocate the block at `from` to `to` as one atomic step: cell
    /// content, side-table entry and the block's own coordinate all
    /// change together or not at all.
    ///
    /// Fails without mutation when the source is empty, the destination
    /// is occupied, or either coordinate is out of bounds. A self-move
    /// is rejected by the destination check (the destination is
    /// occupied, by the mover itself).
    pub fn move_block(&mut self, from_x: i8, from_y: i8, to_x: i8, to_y: i8) -> bool {
        let (Some(src), Some(dst)) = (self.index(from_x, from_y), self.index(to_x, to_y)) else {
            return false;
        };
        let Some(letter) = self.cells[src] else {
            return false;
        };
        if self.cells[dst].is_some() {
            return false;
        }

        let Some(id) = self.owners[src] else {
            // Occupied cell with no registered identity: clear it to
            // restore the invariant and report failure to the caller.
            self.cells[src] = None;
            return false;
        };

        self.cells[src] = None;
        self.owners[src] = None;
        self.cells[dst] = Some(letter);
        self.owners[dst] = Some(id);
        if let Some(block) = self.blocks.get_mut(&id) {
            block.x = to_x;
            block.y = to_y;
        }
        self.events.push(GridEvent::Moved {
            id,
            from: (from_x, from_y),
            to: (to_x, to_y),
        });
        true
    }

    pub fn block_at(&self, x: i8, y: i8) -> Option<&Block> {
        let idx = self.index(x, y)?;
        let id = self.owners[idx]?;
        self.blocks.get(&id)
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// Mark a block as landed (terminal state for that instance).
    pub fn set_landed(&mut self, id: BlockId) {
        if let Some(block) = self.blocks.get_mut(&id) {
            block.landed = true;
        }
    }

    /// Number of live blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Game-over predicate: any occupied cell in the given row.
    pub fn is_row_occupied(&self, row: i8) -> bool {
        (0..self.width as i8).any(|x| matches!(self.cell(x, row), Some(Some(_))))
    }

    /// Clear every cell, the side-table and the registry. Identity
    /// allocation keeps counting up so ids from before a reset are
    /// never reissued.
    pub fn reset(&mut self) {
        self.cells.fill(None);
        self.owners.fill(None);
        self.blocks.clear();
        self.events.clear();
    }

    /// Drain accumulated presentation events.
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    /// Verify the cell/side-table/block-coordinate invariant. Panics
    /// with a description of the first violation found.
    pub fn check_consistency(&self) {
        let mut seen = 0usize;
        for y in 0..self.height as i8 {
            for x in 0..self.width as i8 {
                let idx = y as usize * self.width as usize + x as usize;
                match (self.cells[idx], self.owners[idx]) {
                    (Some(letter), Some(id)) => {
                        seen += 1;
                        let block = self
                            .blocks
                            .get(&id)
                            .unwrap_or_else(|| panic!("({x},{y}): id {id:?} not in registry"));
                        assert_eq!(
                            (block.x, block.y),
                            (x, y),
                            "block {id:?} coordinate disagrees with side-table slot"
                        );
                        assert_eq!(block.letter, letter, "block {id:?} letter drifted");
                    }
                    (None, None) => {}
                    (cell, owner) => {
                        panic!("({x},{y}): cell {cell:?} vs side-table {owner:?}")
                    }
                }
            }
        }
        // No dangling registry entries, and therefore no two slots can
        // share one id.
        assert_eq!(seen, self.blocks.len(), "registry size mismatch");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Letter;

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn test_new_grid_empty() {
        let grid = Grid::new(8, 15);
        for y in 0..15 {
            for x in 0..8 {
                assert!(grid.is_empty(x, y));
            }
        }
        assert_eq!(grid.block_count(), 0);
        grid.check_consistency();
    }

    #[test]
    fn test_out_of_bounds_never_empty() {
        let grid = Grid::new(8, 15);
        assert!(!grid.is_empty(-1, 0));
        assert!(!grid.is_empty(8, 0));
        assert!(!grid.is_empty(0, -1));
        assert!(!grid.is_empty(0, 15));
        assert_eq!(grid.cell(-1, 0), None);
    }

    #[test]
    fn test_place_and_lookup() {
        let mut grid = Grid::new(8, 15);
        let id = grid.place(3, 7, letter('A')).unwrap();

        assert!(!grid.is_empty(3, 7));
        assert_eq!(grid.cell(3, 7), Some(Some(letter('A'))));
        let block = grid.block_at(3, 7).unwrap();
        assert_eq!(block.id, id);
        assert_eq!((block.x, block.y), (3, 7));
        assert_eq!(block.letter, letter('A'));
        assert!(!block.landed);
        grid.check_consistency();
    }

    #[test]
    fn test_place_occupied_fails_without_mutation() {
        let mut grid = Grid::new(8, 15);
        let id = grid.place(3, 7, letter('A')).unwrap();
        assert!(grid.place(3, 7, letter('B')).is_none());

        assert_eq!(grid.cell(3, 7), Some(Some(letter('A'))));
        assert_eq!(grid.block_at(3, 7).unwrap().id, id);
        assert_eq!(grid.block_count(), 1);
        grid.check_consistency();
    }

    #[test]
    fn test_place_out_of_bounds_fails() {
        let mut grid = Grid::new(8, 15);
        assert!(grid.place(-1, 0, letter('A')).is_none());
        assert!(grid.place(0, 15, letter('A')).is_none());
        assert_eq!(grid.block_count(), 0);
    }

    #[test]
    fn test_remove() {
        let mut grid = Grid::new(8, 15);
        let id = grid.place(2, 2, letter('C')).unwrap();

        assert_eq!(grid.remove(2, 2), Some(id));
        assert!(grid.is_empty(2, 2));
        assert!(grid.block(id).is_none());
        grid.check_consistency();
    }

    #[test]
    fn test_remove_empty_or_oob_is_noop() {
        let mut grid = Grid::new(8, 15);
        assert_eq!(grid.remove(4, 4), None);
        assert_eq!(grid.remove(-3, 99), None);
        grid.check_consistency();
    }

    #[test]
    fn test_move_block_atomic() {
        let mut grid = Grid::new(8, 15);
        let id = grid.place(2, 5, letter('L')).unwrap();

        assert!(grid.move_block(2, 5, 2, 6));
        assert!(grid.is_empty(2, 5));
        assert_eq!(grid.cell(2, 6), Some(Some(letter('L'))));
        let block = grid.block(id).unwrap();
        assert_eq!((block.x, block.y), (2, 6));
        grid.check_consistency();
    }

    #[test]
    fn test_move_block_rejections_leave_state_unchanged() {
        let mut grid = Grid::new(8, 15);
        grid.place(2, 5, letter('L')).unwrap();
        grid.place(2, 6, letter('I')).unwrap();

        // Source empty.
        assert!(!grid.move_block(0, 0, 1, 0));
        // Destination occupied.
        assert!(!grid.move_block(2, 5, 2, 6));
        // Out of bounds either end.
        assert!(!grid.move_block(2, 5, -1, 5));
        assert!(!grid.move_block(8, 5, 2, 4));

        assert_eq!(grid.cell(2, 5), Some(Some(letter('L'))));
        assert_eq!(grid.cell(2, 6), Some(Some(letter('I'))));
        assert_eq!(grid.block_count(), 2);
        grid.check_consistency();
    }

    #[test]
    fn test_self_move_rejected() {
        let mut grid = Grid::new(8, 15);
        let id = grid.place(2, 5, letter('E')).unwrap();

        // Destination is occupied by the mover itself: explicit rejection.
        assert!(!grid.move_block(2, 5, 2, 5));
        assert_eq!(grid.cell(2, 5), Some(Some(letter('E'))));
        assert_eq!(grid.block_at(2, 5).unwrap().id, id);
        grid.check_consistency();
    }

    #[test]
    fn test_ids_monotonic_and_never_reused() {
        let mut grid = Grid::new(8, 15);
        let a = grid.place(0, 0, letter('A')).unwrap();
        let _ = grid.remove(0, 0);
        let b = grid.place(0, 0, letter('A')).unwrap();
        assert!(b > a);

        grid.reset();
        let c = grid.place(0, 0, letter('A')).unwrap();
        assert!(c > b);
    }

    #[test]
    fn test_row_occupied_predicate() {
        let mut grid = Grid::new(8, 15);
        assert!(!grid.is_row_occupied(0));
        grid.place(5, 0, letter('A')).unwrap();
        assert!(grid.is_row_occupied(0));
        assert!(!grid.is_row_occupied(1));
    }

    #[test]
    fn test_reset_idempotent() {
        let mut grid = Grid::new(8, 15);
        grid.place(1, 1, letter('A')).unwrap();
        grid.place(2, 1, letter('L')).unwrap();

        grid.reset();
        let snapshot: Vec<Cell> = (0..15)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .map(|(x, y)| grid.cell(x, y).unwrap())
            .collect();
        grid.reset();
        let again: Vec<Cell> = (0..15)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .map(|(x, y)| grid.cell(x, y).unwrap())
            .collect();

        assert_eq!(snapshot, again);
        assert!(snapshot.iter().all(|c| c.is_none()));
        assert_eq!(grid.block_count(), 0);
        grid.check_consistency();
    }

    #[test]
    fn test_events_recorded_in_order() {
        let mut grid = Grid::new(8, 15);
        let id = grid.place(1, 0, letter('A')).unwrap();
        grid.move_block(1, 0, 1, 1);
        let _ = grid.remove(1, 1);

        let events = grid.take_events();
        assert_eq!(
            events,
            vec![
                GridEvent::Placed {
                    id,
                    x: 1,
                    y: 0,
                    letter: letter('A')
                },
                GridEvent::Moved {
                    id,
                    from: (1, 0),
                    to: (1, 1)
                },
                GridEvent::Removed { id, x: 1, y: 1 },
            ]
        );
        assert!(grid.take_events().is_empty());
    }

    #[test]
    fn test_random_operation_sequence_keeps_invariant() {
        // Cheap property test: a scripted mix of placements, moves and
        // removals, with the invariant checked after every step.
        let mut grid = Grid::new(8, 15);
        let word = "ALICE";
        for step in 0u32..200 {
            let x = (step % 8) as i8;
            let y = ((step / 8) % 15) as i8;
            let c = word.as_bytes()[(step % 5) as usize] as char;
            match step % 4 {
                0 => {
                    let _ = grid.place(x, y, letter(c));
                }
                1 => {
                    grid.move_block(x, y, (x + 1) % 8, y);
                }
                2 => {
                    let _ = grid.remove(x, y);
                }
                _ => {
                    grid.move_block(x, y, x, (y + 1) % 15);
                }
            }
            grid.check_consistency();
        }
    }
}
