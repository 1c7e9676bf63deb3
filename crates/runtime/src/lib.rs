//! Runtime orchestration for grid exploration episodes.
//!
//! This crate turns the pure rules of `explorer-core` into runnable episodes:
//! it generates caves, owns the agent's control loop, makes planning
//! decisions, and persists the scoring weights.
//!
//! Modules are organized by responsibility:
//! - [`planner`] scores candidate cells and decides where to walk next
//! - [`episode`] hosts the observe/plan/move loop and its statistics
//! - [`scenario`] builds maps and snaps start and goal onto them
//! - [`repository`] stores the weight vector on disk
//! - [`config`] and [`api`] expose configuration and error types
pub mod api;
pub mod config;
pub mod episode;
pub mod planner;
pub mod repository;
pub mod scenario;

pub use api::{Result, RuntimeError};
pub use config::RuntimeConfig;
pub use episode::{
    Agent, Episode, EpisodeMode, EpisodeOutcome, EpisodeReport, EpisodeStats, TickOutcome,
};
pub use planner::{
    AveragePolicy, InterestField, InterestScorer, Navigator, Plan, extract_window, is_visible_from,
};
pub use repository::WeightsRepository;
pub use scenario::{CaveGenerator, Scenario};
