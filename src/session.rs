use std::time::Duration;

use tracing::debug;
use tracing::info;

use crate::config::Config;
use crate::grid::Grid;
use crate::grid::GridError;
use crate::layout::Layout;
use crate::render::RenderMode;
use crate::ticker::Ticker;

/// Requests a front end sends to a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Invert the visible cell at 1-based `(row, col)`
    Toggle { row: usize, col: usize },

    /// A click at a position measured from the board's top-left corner
    Click { x: u32, y: u32 },

    /// Advance exactly one generation
    Step,

    Run,
    Pause,
    TogglePause,

    /// The area available to the board changed
    Resize { width: u32, height: u32 },

    /// Kill every cell
    Clear,

    Quit,
}

/// Everything a front end drives: the grid, the step timer and the board geometry.
pub struct Session {
    grid: Grid,
    ticker: Ticker,
    layout: Layout,
    mode: RenderMode,
    quit: bool,
}

impl Session {
    pub fn new(grid: Grid, ticker: Ticker, layout: Layout, mode: RenderMode) -> Self {
        Self {
            grid,
            ticker,
            layout,
            mode,
            quit: false,
        }
    }

    /// Start a paused session with a grid filling a `width x height` area. The grid is at least
    /// one cell in each direction.
    pub fn from_config(config: &Config, width: u32, height: u32) -> Result<Self, GridError> {
        let (rows, cols) = config.render.fit(&config.layout, width, height);
        let grid = Grid::with_rules(rows.max(1), cols.max(1), config.rules)?;

        info!(rows, cols, rule = %config.rules, mode = ?config.render, "session started");

        Ok(Self::new(
            grid,
            Ticker::new(config.tick),
            config.layout,
            config.render,
        ))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn apply(&mut self, command: Command) -> Result<(), GridError> {
        debug!(?command, "apply");

        match command {
            Command::Toggle { row, col } => {
                self.grid.toggle_visible_cell_at(row, col);
            }
            // Braille packs several cells into a character, there is nothing to click
            Command::Click { .. } if self.mode == RenderMode::Braille => {}
            Command::Click { x, y } => {
                let (row, col) = self.layout.cell_at(x, y);
                self.grid.toggle_visible_cell_at(row, col);
            }
            Command::Step => self.grid.advance_generation(),
            Command::Run => self.ticker.run(),
            Command::Pause => self.ticker.pause(),
            Command::TogglePause => self.ticker.toggle(),
            Command::Resize { width, height } => self.resize(width, height)?,
            Command::Clear => self.grid.clear(),
            Command::Quit => self.quit = true,
        }

        Ok(())
    }

    /// Let `dt` of wall time pass, stepping the grid as often as the ticker says. Returns the
    /// number of generations advanced.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        let steps = self.ticker.advance(dt);

        for _ in 0..steps {
            self.grid.advance_generation();
        }

        steps
    }

    /// Refit the grid to a new area. Cells that no longer fit are dropped. An area too small
    /// for a single cell leaves the grid alone.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), GridError> {
        let (rows, cols) = self.mode.fit(&self.layout, width, height);

        if rows == 0 || cols == 0 {
            debug!(width, height, "area too small, keeping grid");
            return Ok(());
        }

        self.grid.fit_to(rows, cols)
    }
}
