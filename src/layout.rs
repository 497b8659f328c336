/// Geometry of a drawn board: how big a cell is on screen and how much of it is padding.
///
/// Units are whatever the renderer draws in, pixels on a canvas or character cells in a
/// terminal. Positions are measured from the board's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cell_width: u16,
    pub cell_height: u16,

    /// Blank border inside each cell, on every side
    pub pad: u16,
}

/// A filled rectangle, top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u16,
    pub height: u16,
}

impl Default for Layout {
    /// Two terminal columns by one row makes roughly square cells.
    fn default() -> Self {
        Self::new(2, 1, 0)
    }
}

impl Layout {
    /// Zero-sized cells are bumped up to 1.
    pub fn new(cell_width: u16, cell_height: u16, pad: u16) -> Self {
        Self {
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
            pad,
        }
    }

    /// How many whole `(rows, cols)` fit in a `width x height` area.
    pub fn fit(&self, width: u32, height: u32) -> (usize, usize) {
        let rows = height / self.cell_height as u32;
        let cols = width / self.cell_width as u32;

        (rows as usize, cols as usize)
    }

    /// Map a position to the 1-based `(row, col)` of the cell under it.
    pub fn cell_at(&self, x: u32, y: u32) -> (usize, usize) {
        let row = (y / self.cell_height as u32) as usize;
        let col = (x / self.cell_width as u32) as usize;

        (row.saturating_add(1), col.saturating_add(1))
    }

    /// The rectangle to fill for the cell at 0-based visible `(row, col)`.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let origin = |i: usize, size: u16| {
            u32::try_from(i)
                .unwrap_or(u32::MAX)
                .saturating_mul(size.into())
                .saturating_add(self.pad.into())
        };
        let inset = self.pad.saturating_mul(2);

        Rect {
            x: origin(col, self.cell_width),
            y: origin(row, self.cell_height),
            width: self.cell_width.saturating_sub(inset),
            height: self.cell_height.saturating_sub(inset),
        }
    }

    /// Whether a position falls on the filled part of a cell rather than its padding.
    pub fn is_filled(&self, x: u32, y: u32) -> bool {
        let (row, col) = self.cell_at(x, y);
        let rect = self.cell_rect(row - 1, col - 1);

        (rect.x..rect.x.saturating_add(rect.width.into())).contains(&x)
            && (rect.y..rect.y.saturating_add(rect.height.into())).contains(&y)
    }
}
