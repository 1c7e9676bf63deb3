//! Shared vocabulary of the simulation: cell states, coordinates and grids.
mod cell;
mod grid;
mod position;

pub use cell::CellState;
pub use grid::Grid;
pub use position::{MapDimensions, Position};
