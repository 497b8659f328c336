use crate::grid::Grid;
use crate::layout::Layout;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

const ALIVE: char = '█';
const DEAD: char = '·';
const PAD: char = ' ';

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Each cell is a `cell_width x cell_height` block of glyphs.
    #[default]
    Glyphs,

    /// Each character packs 2x4 cells as braille dots. Dense, but cells can't be clicked.
    Braille,
}

impl RenderMode {
    /// How many whole `(rows, cols)` this mode draws in a `width x height` character area.
    pub fn fit(self, layout: &Layout, width: u32, height: u32) -> (usize, usize) {
        match self {
            RenderMode::Glyphs => layout.fit(width, height),
            RenderMode::Braille => (
                (height as usize).saturating_mul(4),
                (width as usize).saturating_mul(2),
            ),
        }
    }
}

/// Text framebuffer for the visible part of a grid.
pub struct Frame {
    /// The frame buffer.
    fb: String,

    /// Braille codepoints, reused between frames
    cp: Vec<u32>,

    mode: RenderMode,
    layout: Layout,
}

impl Frame {
    pub fn new(mode: RenderMode, layout: Layout) -> Self {
        Self {
            fb: String::new(),
            cp: Vec::new(),
            mode,
            layout,
        }
    }

    /// Draw the grid's viewport, one line per text row, each line ending in `\n`.
    pub fn render(&mut self, grid: &Grid) -> &str {
        self.fb.clear();

        match self.mode {
            RenderMode::Glyphs => self.render_glyphs(grid),
            RenderMode::Braille => self.render_braille(grid),
        }

        &self.fb
    }

    fn render_glyphs(&mut self, grid: &Grid) {
        let Layout {
            cell_width,
            cell_height,
            ..
        } = self.layout;

        // Position of the character being drawn, measured from the board's corner
        let mut y: u32 = 0;

        let mut offset = 0;
        while let Some(row) = grid.visible_row(offset) {
            for _ in 0..cell_height {
                let mut x: u32 = 0;

                for cell in row {
                    for _ in 0..cell_width {
                        let c = if !self.layout.is_filled(x, y) {
                            PAD
                        } else if cell.is_alive() {
                            ALIVE
                        } else {
                            DEAD
                        };

                        self.fb.push(c);
                        x = x.saturating_add(1);
                    }
                }

                self.fb.push('\n');
                y = y.saturating_add(1);
            }

            offset += 1;
        }
    }

    fn render_braille(&mut self, grid: &Grid) {
        let vp = grid.viewport();
        let (w, h) = (vp.column_count(), vp.row_count());

        // Each braille character covers 2 columns and 4 rows of cells
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        self.cp.clear();
        self.cp.resize(bw * bh, BRAILLE_EMPTY);

        for y in 0..h {
            let Some(row) = grid.visible_row(y) else {
                break;
            };

            for (x, cell) in row.iter().enumerate() {
                if cell.is_alive() {
                    self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
                }
            }
        }

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // Every sum of dots stays inside the braille block
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod test {
    use insta::assert_snapshot;

    use super::Frame;
    use super::RenderMode;
    use crate::grid::Grid;
    use crate::layout::Layout;
    use crate::viewport::Viewport;

    fn blinker() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();

        for col in 0..3 {
            grid.set_alive(1, col, true);
        }

        grid
    }

    #[test]
    fn glyphs_one_per_cell() {
        let mut frame = Frame::new(RenderMode::Glyphs, Layout::new(1, 1, 0));

        assert_snapshot!(frame.render(&blinker()), @r"
        ···
        ███
        ···
        ");
    }

    #[test]
    fn glyphs_follow_cell_size() {
        let mut frame = Frame::new(RenderMode::Glyphs, Layout::new(2, 1, 0));
        let mut grid = blinker();
        grid.advance_generation();

        assert_snapshot!(frame.render(&grid), @r"
        ··██··
        ··██··
        ··██··
        ");
    }

    #[test]
    fn glyphs_only_draw_the_viewport() {
        let mut frame = Frame::new(RenderMode::Glyphs, Layout::new(1, 1, 0));
        let mut grid = blinker();
        grid.set_viewport(Viewport::new(1, 2, 1, 2)).unwrap();

        assert_eq!(frame.render(&grid), "██\n··\n");
    }

    #[test]
    fn glyphs_leave_padding_blank() {
        let mut frame = Frame::new(RenderMode::Glyphs, Layout::new(3, 3, 1));
        let mut grid = Grid::new(1, 2).unwrap();
        grid.set_alive(0, 0, true);

        assert_eq!(frame.render(&grid), "      \n █  · \n      \n");
    }

    #[test]
    fn braille_fits_more_cells_per_character() {
        let layout = Layout::default();

        assert_eq!(RenderMode::Glyphs.fit(&layout, 80, 23), (23, 40));
        assert_eq!(RenderMode::Braille.fit(&layout, 80, 23), (92, 160));
    }

    #[test]
    fn braille_packs_cells() {
        let mut frame = Frame::new(RenderMode::Braille, Layout::default());
        let mut grid = Grid::new(4, 2).unwrap();

        assert_eq!(frame.render(&grid), "\u{2800}\n");

        for row in 0..3 {
            grid.set_alive(row, 0, true);
        }
        assert_eq!(frame.render(&grid), "\u{2807}\n");

        for row in 0..4 {
            for col in 0..2 {
                grid.set_alive(row, col, true);
            }
        }
        assert_eq!(frame.render(&grid), "\u{28FF}\n");
    }

    #[test]
    fn braille_wraps_rows() {
        let mut frame = Frame::new(RenderMode::Braille, Layout::default());
        let mut grid = Grid::new(5, 3).unwrap();
        grid.set_alive(4, 2, true);

        assert_eq!(frame.render(&grid), "\u{2800}\u{2800}\n\u{2800}\u{2801}\n");
    }
}
