//! Decision making on top of the agent's mental map.
//!
//! - [`visibility`] cuts scoring windows and tests coarse line of sight
//! - [`scoring`] turns a window into a weighted interest score
//! - [`interest`] scores the whole map and hands out candidates best-first
//! - [`navigator`] ties A* and the interest fallback into one decision
pub mod interest;
pub mod navigator;
pub mod scoring;
pub mod visibility;

pub use interest::InterestField;
pub use navigator::{Navigator, Plan};
pub use scoring::{AveragePolicy, InterestScorer};
pub use visibility::{extract_window, is_visible_from};
