pub mod cell;
pub mod config;
pub mod grid;
pub mod io;
pub mod layout;
pub mod render;
pub mod rule_set;
pub mod session;
pub mod ticker;
pub mod viewport;

pub use cell::Cell;
pub use grid::Grid;
pub use grid::GridError;
pub use viewport::Viewport;
