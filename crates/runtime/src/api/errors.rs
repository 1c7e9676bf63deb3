//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from scenario construction, configuration, and the weight
//! repository so clients can bubble them up with consistent context. Planning
//! failures (no path, exhausted candidates) are values, not errors.
use std::path::PathBuf;

use thiserror::Error;

use explorer_core::GridError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("map contains no empty cell")]
    NoEmptyCell,

    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("weights file {path} is malformed: {reason}")]
    WeightsDecode { path: PathBuf, reason: String },

    #[error("weights serialization failed: {0}")]
    WeightsEncode(String),
}

impl RuntimeError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
