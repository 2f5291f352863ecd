//! Board state with move history and locality indices

use std::collections::HashSet;

use super::grid::Grid;
use super::{Mark, Pos, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, REGION_SIZE};

/// Size/resource failures when constructing or resizing a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size {0} outside supported range {MIN_SIZE}..={MAX_SIZE}")]
    InvalidSize(i32),
}

/// One applied move, as recorded in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedMove {
    pub pos: Pos,
    pub mark: Mark,
}

/// Game board: the grid plus the derived state that keeps move
/// application, undo and candidate generation cheap.
///
/// Invariants (checked by [`Board::validate_state`]):
/// - `move_count` equals the number of non-empty cells and `history.len()`
/// - `occupied` mirrors the non-empty cells exactly
/// - every occupied cell's region and its 8 neighbors are in
///   `active_regions`
///
/// The grid is never written except through `make_move`/`undo_last_move`
/// (and the wholesale `resize`/`reset`), which is what lets the rules
/// layer check for wins only at the last-played cell.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    move_count: usize,
    history: Vec<PlacedMove>,
    occupied: HashSet<Pos>,
    active_regions: HashSet<u64>,
    last_move: Option<PlacedMove>,
}

impl Board {
    /// Create a board, falling back to [`DEFAULT_SIZE`] if the requested
    /// size is out of range.
    #[must_use]
    pub fn new(size: i32) -> Self {
        let size = if is_valid_size(size) {
            size as usize
        } else {
            DEFAULT_SIZE
        };
        Self {
            grid: Grid::new(size),
            move_count: 0,
            history: Vec::with_capacity(size * size / 4),
            occupied: HashSet::new(),
            active_regions: HashSet::new(),
            last_move: None,
        }
    }

    /// Create a board of exactly the requested size.
    pub fn try_new(size: i32) -> Result<Self, BoardError> {
        if !is_valid_size(size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self::new(size))
    }

    /// Build a board mirroring an existing grid snapshot.
    ///
    /// The indices are rebuilt from the grid contents; the history is
    /// seeded row-major so that undo stays balanced for moves made on
    /// top of the snapshot. Used by the search to get a scratch board
    /// it can mutate and restore without touching the caller's grid.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Self {
            grid: grid.clone(),
            move_count: 0,
            history: Vec::new(),
            occupied: HashSet::new(),
            active_regions: HashSet::new(),
            last_move: None,
        };
        for pos in grid.occupied_cells() {
            let mark = grid.get(pos);
            board.history.push(PlacedMove { pos, mark });
            board.occupied.insert(pos);
            board.add_active_region(pos);
        }
        board.move_count = board.occupied.len();
        board.last_move = board.history.last().copied();
        board
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Read-only view of the grid
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mark at a coordinate; `None` is the out-of-bounds sentinel
    #[inline]
    pub fn cell(&self, row: i32, col: i32) -> Option<Mark> {
        self.grid.at(row, col)
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.move_count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count >= self.size() * self.size()
    }

    /// Apply a move. Returns `false` (and changes nothing) if the
    /// coordinate is out of bounds, the cell is occupied, or `mark` is
    /// not a player mark.
    pub fn make_move(&mut self, row: i32, col: i32, mark: Mark) -> bool {
        if !mark.is_player() || !self.grid.in_bounds(row, col) {
            return false;
        }
        let pos = Pos::new(row as u8, col as u8);
        if self.grid.get(pos) != Mark::Empty {
            return false;
        }

        self.grid.set(pos, mark);
        self.move_count += 1;

        let placed = PlacedMove { pos, mark };
        self.history.push(placed);
        self.last_move = Some(placed);

        self.occupied.insert(pos);
        self.add_active_region(pos);

        true
    }

    /// Revert the most recent move. Returns `false` if there is none.
    ///
    /// Active regions are recomputed from the remaining occupied cells:
    /// a region must go inactive once nothing maps it as a neighbor.
    pub fn undo_last_move(&mut self) -> bool {
        let Some(placed) = self.history.pop() else {
            return false;
        };

        self.grid.set(placed.pos, Mark::Empty);
        self.move_count -= 1;
        self.occupied.remove(&placed.pos);
        self.last_move = self.history.last().copied();
        self.rebuild_active_regions();

        true
    }

    /// Revert the last `count` moves; stops and reports failure if the
    /// history runs out first.
    pub fn undo_moves(&mut self, count: usize) -> bool {
        for _ in 0..count {
            if !self.undo_last_move() {
                return false;
            }
        }
        true
    }

    /// Change the board side, preserving the overlapping top-left
    /// sub-rectangle. Stones outside the new bounds are dropped from the
    /// grid, history and occupied set alike. The new grid is fully built
    /// before being swapped in, so a failed resize leaves the board
    /// untouched.
    pub fn resize(&mut self, new_size: i32) -> Result<(), BoardError> {
        if !is_valid_size(new_size) {
            return Err(BoardError::InvalidSize(new_size));
        }
        let new_size = new_size as usize;

        let mut new_grid = Grid::new(new_size);
        let copy = self.size().min(new_size);
        for row in 0..copy {
            for col in 0..copy {
                let pos = Pos::new(row as u8, col as u8);
                new_grid.set(pos, self.grid.get(pos));
            }
        }
        self.grid = new_grid;

        let fits = |pos: &Pos| (pos.row as usize) < new_size && (pos.col as usize) < new_size;
        self.history.retain(|m| fits(&m.pos));
        self.occupied.retain(fits);
        self.move_count = self.occupied.len();
        self.last_move = self.history.last().copied();
        self.rebuild_active_regions();

        Ok(())
    }

    /// Clear all moves, keeping the current size.
    pub fn reset(&mut self) {
        let size = self.size();
        self.grid = Grid::new(size);
        self.move_count = 0;
        self.history.clear();
        self.occupied.clear();
        self.active_regions.clear();
        self.last_move = None;
    }

    /// Resize and clear in one step.
    pub fn reset_with(&mut self, new_size: i32) -> Result<(), BoardError> {
        self.resize(new_size)?;
        self.reset();
        Ok(())
    }

    #[inline]
    pub fn last_move(&self) -> Option<PlacedMove> {
        self.last_move
    }

    #[inline]
    pub fn move_history(&self) -> &[PlacedMove] {
        &self.history
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.occupied.iter().copied()
    }

    /// Keys of the 10×10 tiles that contain a stone or neighbor one.
    /// A pure locality index for bounding search work on large boards,
    /// never gameplay state.
    #[inline]
    pub fn active_regions(&self) -> &HashSet<u64> {
        &self.active_regions
    }

    /// Row and column ranges covered by a region key, clamped to the
    /// board.
    pub fn region_span(&self, key: u64) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let region_row = (key >> 32) as usize;
        let region_col = (key & 0xFFFF_FFFF) as usize;
        let row_start = (region_row * REGION_SIZE).min(self.size());
        let col_start = (region_col * REGION_SIZE).min(self.size());
        let row_end = (row_start + REGION_SIZE).min(self.size());
        let col_end = (col_start + REGION_SIZE).min(self.size());
        (row_start..row_end, col_start..col_end)
    }

    /// Empty cells within Chebyshev distance `radius` of the given
    /// coordinate, excluding the coordinate itself.
    pub fn neighbor_cells(&self, row: i32, col: i32, radius: i32) -> Vec<Pos> {
        let size = self.size() as i32;
        let mut neighbors = Vec::new();

        let start_row = (row - radius).max(0);
        let end_row = (row + radius + 1).min(size);
        let start_col = (col - radius).max(0);
        let end_col = (col + radius + 1).min(size);

        for r in start_row..end_row {
            for c in start_col..end_col {
                if r == row && c == col {
                    continue;
                }
                let pos = Pos::new(r as u8, c as u8);
                if self.grid.get(pos) == Mark::Empty {
                    neighbors.push(pos);
                }
            }
        }

        neighbors
    }

    /// Bounding box of the occupied cells, `(top_left, bottom_right)`.
    /// Collapses to the center cell on an empty board.
    pub fn active_bounds(&self) -> (Pos, Pos) {
        if self.occupied.is_empty() {
            let center = self.center();
            return (center, center);
        }

        let mut min_row = u8::MAX;
        let mut max_row = 0;
        let mut min_col = u8::MAX;
        let mut max_col = 0;

        for pos in &self.occupied {
            min_row = min_row.min(pos.row);
            max_row = max_row.max(pos.row);
            min_col = min_col.min(pos.col);
            max_col = max_col.max(pos.col);
        }

        (Pos::new(min_row, min_col), Pos::new(max_row, max_col))
    }

    #[inline]
    pub fn center(&self) -> Pos {
        self.grid.center()
    }

    /// Fraction of cells occupied, in `0.0..=1.0`
    pub fn occupancy_rate(&self) -> f64 {
        self.move_count as f64 / (self.size() * self.size()) as f64
    }

    /// Check the internal invariants; `true` when consistent.
    pub fn validate_state(&self) -> bool {
        let actual = self.grid.occupied_cells().len();
        actual == self.move_count
            && self.occupied.len() == self.move_count
            && self.history.len() == self.move_count
            && self
                .occupied
                .iter()
                .all(|pos| self.grid.get(*pos) != Mark::Empty)
    }

    fn region_key(row: usize, col: usize) -> u64 {
        ((row / REGION_SIZE) as u64) << 32 | (col / REGION_SIZE) as u64
    }

    /// Mark the cell's region and every in-bounds neighbor region active.
    fn add_active_region(&mut self, pos: Pos) {
        let size = self.size() as i32;
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                let r = pos.row as i32 + dr * REGION_SIZE as i32;
                let c = pos.col as i32 + dc * REGION_SIZE as i32;
                if r >= 0 && r < size && c >= 0 && c < size {
                    self.active_regions
                        .insert(Self::region_key(r as usize, c as usize));
                }
            }
        }
    }

    fn rebuild_active_regions(&mut self) {
        self.active_regions.clear();
        let cells: Vec<Pos> = self.occupied.iter().copied().collect();
        for pos in cells {
            self.add_active_region(pos);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE as i32)
    }
}

#[inline]
fn is_valid_size(size: i32) -> bool {
    size >= MIN_SIZE as i32 && size <= MAX_SIZE as i32
}
