//! **nd_mazes** generates perfect mazes on grids of any number of dimensions and cuts them into
//! 2D planes for display.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod projection;
pub mod renderers;
pub mod units;
mod utils;
