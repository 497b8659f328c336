use std::fmt;

/// The visible rectangle of a grid, in 0-based backing-array indices. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Viewport {
    pub const fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// The viewport covering every cell of a `rows x cols` grid. Both must be non-zero.
    pub const fn full(rows: usize, cols: usize) -> Self {
        Self::new(0, rows - 1, 0, cols - 1)
    }

    pub fn row_count(&self) -> usize {
        self.row_end - self.row_start + 1
    }

    pub fn column_count(&self) -> usize {
        self.col_end - self.col_start + 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_start..=self.row_end).contains(&row)
            && (self.col_start..=self.col_end).contains(&col)
    }

    /// Whether the bounds are ordered and lie inside a `rows x cols` grid.
    pub fn fits_within(&self, rows: usize, cols: usize) -> bool {
        self.row_start <= self.row_end
            && self.col_start <= self.col_end
            && self.row_end < rows
            && self.col_end < cols
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..={}] x [{}..={}]",
            self.row_start, self.row_end, self.col_start, self.col_end
        )
    }
}

#[cfg(test)]
mod test {
    use super::Viewport;

    #[test]
    fn full_covers_everything() {
        let vp = Viewport::full(3, 4);

        assert_eq!(vp, Viewport::new(0, 2, 0, 3));
        assert_eq!((vp.row_count(), vp.column_count()), (3, 4));
        assert!(vp.fits_within(3, 4));
        assert!(!vp.fits_within(2, 4));
    }

    #[test]
    fn fits_within() {
        let cases = [
            (Viewport::new(1, 2, 1, 2), true),
            (Viewport::new(0, 0, 0, 0), true),
            (Viewport::new(2, 1, 0, 0), false),
            (Viewport::new(0, 0, 3, 2), false),
            (Viewport::new(0, 4, 0, 0), false),
            (Viewport::new(0, 0, 0, 4), false),
        ];

        for (vp, want) in cases {
            assert_eq!(vp.fits_within(4, 4), want, "{vp}");
        }
    }

    #[test]
    fn contains_is_inclusive() {
        let vp = Viewport::new(1, 2, 1, 2);

        assert!(vp.contains(1, 1));
        assert!(vp.contains(2, 2));
        assert!(!vp.contains(0, 1));
        assert!(!vp.contains(1, 3));
    }
}
