//! Persistence for data that outlives a single episode.
//!
//! The only persisted artifact is the scoring weight vector; maps, mental maps
//! and statistics are rebuilt or reported per run.

mod weights;

pub use weights::WeightsRepository;
