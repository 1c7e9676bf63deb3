//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! planner, scenario, and episode code can share one error vocabulary.

pub mod errors;

pub use errors::{Result, RuntimeError};
