//! Deterministic exploration rules shared by the runtime and offline tools.
//!
//! `explorer-core` defines the vocabulary of the simulation (cell states,
//! positions, grids) and the pure algorithms that operate on it:
//!
//! - [`fov`] casts rays from an observer and returns a [`Window`] of what it saw
//! - [`mental_map`] accumulates those windows into persistent knowledge
//! - [`pathfinding`] runs A* over the known world
//! - [`weights`] holds the fixed weight vector consumed by interest scoring
//!
//! Nothing here logs or touches the filesystem; orchestration lives in the
//! runtime crate.
pub mod config;
pub mod env;
pub mod error;
pub mod fov;
pub mod mental_map;
pub mod pathfinding;
pub mod state;
pub mod weights;

pub use config::ExplorerConfig;
pub use env::{GridMap, MapOracle, PcgRng, RngOracle, compute_seed};
pub use error::GridError;
pub use fov::{FieldOfView, Window};
pub use mental_map::MentalMap;
pub use pathfinding::{Node, Path, Pathfinder};
pub use state::{CellState, Grid, MapDimensions, Position};
pub use weights::{Features, WEIGHT_COUNT, WeightIndex, Weights};
