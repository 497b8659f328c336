use std::fmt;
use std::slice::ChunksExact;

use thiserror::Error;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::cell::Cell;
use crate::rule_set::RuleSet;
use crate::viewport::Viewport;

/// Moore neighborhood offsets, as `(row, col)` deltas.
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid grid dimensions {rows}x{cols}, both must be positive")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("Viewport {viewport} does not fit in a {rows}x{cols} grid")]
    InvalidViewport {
        viewport: Viewport,
        rows: usize,
        cols: usize,
    },
}

/// A finite Life board.
///
/// Cells live in a flat row-major buffer owned by the grid, so every mutation goes through
/// `Grid` methods. Edges are hard: anything past them counts as dead, there is no wraparound.
///
/// Rows and columns only ever grow at the high-index end. Shrinking happens by moving the
/// [`Viewport`] and calling [`Grid::crop_to_viewport`], which drops everything outside it.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,

    /// `rows * cols` cells, row-major
    cells: Vec<Cell>,

    viewport: Viewport,

    rules: RuleSet,

    /// Number of generations committed so far
    generation: u64,
}

impl Grid {
    /// Create an all-dead `rows x cols` grid running Conway's rule, with the viewport covering
    /// all of it.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::with_rules(rows, cols, RuleSet::default())
    }

    pub fn with_rules(rows: usize, cols: usize, rules: RuleSet) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }

        debug!(rows, cols, %rules, "new grid");

        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::dead(); rows * cols],
            viewport: Viewport::full(rows, cols),
            rules,
            generation: 0,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells in the whole backing grid.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// The cell at 0-based `(row, col)` of the backing grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }

        Some(&self.cells[self.index(row, col)])
    }

    /// Out-of-bounds positions are dead.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(Cell::is_alive)
    }

    /// Set the state of the cell at 0-based `(row, col)`. Returns `false` and leaves the grid
    /// alone if the position is out of bounds.
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }

        let i = self.index(row, col);
        self.cells[i].set_alive(alive);

        true
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::dead());
    }

    /// Count the live cells in the Moore neighborhood of 0-based `(row, col)`. Neighbors past
    /// the edges contribute nothing.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut n = 0;

        for (dr, dc) in NEIGHBORHOOD {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };

            if self.is_alive(r, c) {
                n += 1;
            }
        }

        n
    }

    /// Advance the whole backing grid (not only the viewport) by one generation.
    ///
    /// Every cell is staged from the current states first, then every cell is committed.
    pub fn advance_generation(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let n = self.count_live_neighbors(row, col);
                let i = self.index(row, col);

                self.cells[i].stage_next_state_with(n, &self.rules);
            }
        }

        for cell in &mut self.cells {
            cell.commit();
        }

        self.generation += 1;

        trace!(generation = self.generation, "advanced");
    }

    /// Invert the cell at 1-based `(row, col)` of the backing grid.
    ///
    /// Coordinates outside `[1, rows] x [1, cols]` are ignored. Returns whether a cell was
    /// inverted.
    pub fn toggle_cell_at(&mut self, row: usize, col: usize) -> bool {
        if !(1..=self.rows).contains(&row) || !(1..=self.cols).contains(&col) {
            debug!(row, col, "toggle outside the grid ignored");
            return false;
        }

        let i = self.index(row - 1, col - 1);
        self.cells[i].invert();

        true
    }

    /// Like [`Grid::toggle_cell_at`], but `(row, col)` counts from the viewport's top-left
    /// corner and positions outside the viewport are ignored.
    pub fn toggle_visible_cell_at(&mut self, row: usize, col: usize) -> bool {
        let (Some(r), Some(c)) = (row.checked_sub(1), col.checked_sub(1)) else {
            return false;
        };

        let (r, c) = (self.viewport.row_start + r, self.viewport.col_start + c);

        if !self.viewport.contains(r, c) {
            debug!(row, col, viewport = %self.viewport, "toggle outside the viewport ignored");
            return false;
        }

        self.toggle_cell_at(r + 1, c + 1)
    }

    /// Append `count` dead rows below the last one. The viewport is not moved.
    pub fn append_rows(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        self.cells
            .resize(self.cells.len() + count * self.cols, Cell::dead());
        self.rows += count;

        debug!(count, rows = self.rows, "appended rows");
    }

    /// Append `count` dead columns to the right of every row. The viewport is not moved.
    pub fn append_columns(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        let cols = self.cols + count;
        let mut cells = Vec::with_capacity(self.rows * cols);

        for row in self.cells.chunks_exact(self.cols) {
            cells.extend_from_slice(row);
            cells.extend(std::iter::repeat_n(Cell::dead(), count));
        }

        self.cells = cells;
        self.cols = cols;

        debug!(count, cols = self.cols, "appended columns");
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), GridError> {
        if !viewport.fits_within(self.rows, self.cols) {
            warn!(%viewport, rows = self.rows, cols = self.cols, "rejected viewport");

            return Err(GridError::InvalidViewport {
                viewport,
                rows: self.rows,
                cols: self.cols,
            });
        }

        self.viewport = viewport;

        Ok(())
    }

    /// Rebuild the grid from the cells inside the viewport and discard the rest.
    ///
    /// Afterwards the grid is exactly the old viewport's size and the viewport covers all of
    /// it, so the old `(row_start, col_start)` is the new `(0, 0)`.
    pub fn crop_to_viewport(&mut self) {
        let vp = self.viewport;
        let (rows, cols) = (vp.row_count(), vp.column_count());

        if (rows, cols) == (self.rows, self.cols) {
            return;
        }

        let mut cells = Vec::with_capacity(rows * cols);

        for row in vp.row_start..=vp.row_end {
            let start = self.index(row, vp.col_start);
            cells.extend_from_slice(&self.cells[start..start + cols]);
        }

        debug!(
            from_rows = self.rows,
            from_cols = self.cols,
            rows,
            cols,
            "cropped to viewport"
        );

        self.cells = cells;
        self.rows = rows;
        self.cols = cols;
        self.viewport = Viewport::full(rows, cols);
    }

    /// Make the visible area exactly `rows x cols`, keeping the viewport's top-left corner.
    ///
    /// Grows the backing grid where the new area reaches past it, then crops, so cells that end
    /// up outside the new area are gone for good.
    pub fn fit_to(&mut self, rows: usize, cols: usize) -> Result<(), GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }

        let vp = self.viewport;
        let row_end = vp.row_start + rows - 1;
        let col_end = vp.col_start + cols - 1;

        if row_end >= self.rows {
            self.append_rows(row_end + 1 - self.rows);
        }

        if col_end >= self.cols {
            self.append_columns(col_end + 1 - self.cols);
        }

        self.set_viewport(Viewport::new(vp.row_start, row_end, vp.col_start, col_end))?;
        self.crop_to_viewport();

        debug!(rows, cols, "fit grid");

        Ok(())
    }

    /// Read-only view of the backing cells, for rendering.
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            cells: &self.cells,
            cols: self.cols,
        }
    }

    /// The visible part of the `offset`th viewport row.
    pub fn visible_row(&self, offset: usize) -> Option<&[Cell]> {
        let vp = self.viewport;
        let row = vp.row_start.checked_add(offset).filter(|r| *r <= vp.row_end)?;

        let start = self.index(row, vp.col_start);

        Some(&self.cells[start..start + vp.column_count()])
    }
}

/// Plain text picture of the backing grid: `O` for alive, `.` for dead, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells().rows() {
            for cell in row {
                let c = if cell.is_alive() { 'O' } else { '.' };
                write!(f, "{c}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid {}x{} viewport {} generation {} rule {}",
            self.rows, self.cols, self.viewport, self.generation, self.rules
        )?;
        write!(f, "{self}")
    }
}

/// Borrowed snapshot of a grid's cells.
#[derive(Clone, Copy)]
pub struct Cells<'a> {
    cells: &'a [Cell],
    cols: usize,
}

impl<'a> Cells<'a> {
    pub fn row_count(&self) -> usize {
        self.cells.len() / self.cols
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&'a Cell> {
        self.row(row)?.get(col)
    }

    pub fn row(&self, row: usize) -> Option<&'a [Cell]> {
        let start = row.checked_mul(self.cols)?;
        let end = start.checked_add(self.cols)?;

        self.cells.get(start..end)
    }

    pub fn rows(self) -> ChunksExact<'a, Cell> {
        self.cells.chunks_exact(self.cols)
    }
}
