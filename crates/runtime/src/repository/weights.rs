//! File-backed weight vector storage.

use std::fs;
use std::path::{Path, PathBuf};

use explorer_core::{PcgRng, WEIGHT_COUNT, Weights};

use crate::api::{Result, RuntimeError};

/// Stores one weight vector in a flat binary file.
///
/// # File Format
///
/// Ten consecutive little-endian `f64` values (80 bytes) in
/// [`explorer_core::WeightIndex`] order, with no header. Files of any other
/// size are rejected as malformed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightsRepository {
    path: PathBuf,
}

impl WeightsRepository {
    pub const FILE_LEN: usize = WEIGHT_COUNT * std::mem::size_of::<f64>();

    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Weights> {
        let bytes = fs::read(&self.path).map_err(|e| RuntimeError::io(&self.path, e))?;

        if bytes.len() != Self::FILE_LEN {
            return Err(RuntimeError::WeightsDecode {
                path: self.path.clone(),
                reason: format!("expected {} bytes, found {}", Self::FILE_LEN, bytes.len()),
            });
        }

        let values: [f64; WEIGHT_COUNT] =
            bincode::deserialize(&bytes).map_err(|e| RuntimeError::WeightsDecode {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        if let Some(position) = values.iter().position(|value| !value.is_finite()) {
            return Err(RuntimeError::WeightsDecode {
                path: self.path.clone(),
                reason: format!("weight {position} is not finite"),
            });
        }

        tracing::debug!("Loaded weights from {}", self.path.display());
        Ok(Weights::new(values))
    }

    /// Writes `weights` through a temp file and an atomic rename.
    pub fn save(&self, weights: &Weights) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| RuntimeError::io(parent, e))?;
        }

        let bytes = bincode::serialize(weights.values())
            .map_err(|e| RuntimeError::WeightsEncode(e.to_string()))?;

        let temp_path = self.path.with_extension("bin.tmp");
        fs::write(&temp_path, bytes).map_err(|e| RuntimeError::io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| RuntimeError::io(&self.path, e))?;

        tracing::debug!("Saved weights to {}", self.path.display());
        Ok(())
    }

    /// Weights from `repository`, or seeded weights when there is no file or
    /// it cannot be read.
    pub fn load_or_seed(repository: Option<&Self>, seed: u64) -> Weights {
        let Some(repository) = repository else {
            tracing::debug!("No weights file configured, seeding weights from {seed}");
            return Weights::seeded(&PcgRng, seed);
        };

        match repository.load() {
            Ok(weights) => weights,
            Err(e) => {
                tracing::warn!("{e}; falling back to seeded weights");
                Weights::seeded(&PcgRng, seed)
            }
        }
    }
}
