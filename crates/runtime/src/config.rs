//! Episode configuration and environment loading.
use std::env;
use std::path::PathBuf;

use explorer_core::ExplorerConfig;

use crate::api::{Result, RuntimeError};
use crate::episode::EpisodeMode;
use crate::planner::AveragePolicy;
use crate::scenario::CaveGenerator;

/// Parameters shared by every episode of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub map_width: u32,
    pub map_height: u32,
    pub vision_range: u32,
    pub wall_probability: f64,
    /// Base seed; `None` lets the caller pick one.
    pub seed: Option<u64>,
    /// Weight file; seeded weights are used when unset or unreadable.
    pub weights_path: Option<PathBuf>,
    /// Planning decisions allowed per episode.
    pub max_decisions: u32,
    pub mode: EpisodeMode,
    pub averaging: AveragePolicy,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_DECISIONS: u32 = 5_000;
    pub const DEFAULT_REVEAL_RATIO: f64 = 0.8;

    /// Construct configuration from process environment variables.
    ///
    /// - `EXPLORER_MAP_WIDTH` / `EXPLORER_MAP_HEIGHT`
    /// - `EXPLORER_VISION_RANGE`
    /// - `EXPLORER_WALL_PROBABILITY`
    /// - `EXPLORER_SEED`
    /// - `EXPLORER_WEIGHTS_PATH`
    /// - `EXPLORER_MAX_DECISIONS`
    /// - `EXPLORER_MODE` (`goal` or `explore`) with `EXPLORER_REVEAL_RATIO`
    /// - `EXPLORER_GUARD_AVERAGES` (`true` keeps scores finite)
    ///
    /// Unparseable values are ignored; call [`RuntimeConfig::validate`] before
    /// use.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(width) = read_env::<u32>("EXPLORER_MAP_WIDTH") {
            config.map_width = width;
        }
        if let Some(height) = read_env::<u32>("EXPLORER_MAP_HEIGHT") {
            config.map_height = height;
        }
        if let Some(range) = read_env::<u32>("EXPLORER_VISION_RANGE") {
            config.vision_range = range;
        }
        if let Some(probability) = read_env::<f64>("EXPLORER_WALL_PROBABILITY") {
            config.wall_probability = probability;
        }

        config.seed = read_env::<u64>("EXPLORER_SEED");
        config.weights_path = env::var_os("EXPLORER_WEIGHTS_PATH").map(PathBuf::from);

        if let Some(limit) = read_env::<u32>("EXPLORER_MAX_DECISIONS") {
            config.max_decisions = limit;
        }

        let reveal_ratio =
            read_env::<f64>("EXPLORER_REVEAL_RATIO").unwrap_or(Self::DEFAULT_REVEAL_RATIO);
        if let Ok(mode) = env::var("EXPLORER_MODE") {
            match mode.trim().to_ascii_lowercase().as_str() {
                "goal" => config.mode = EpisodeMode::ReachGoal,
                "explore" => config.mode = EpisodeMode::Explore { reveal_ratio },
                other => tracing::warn!("ignoring unknown EXPLORER_MODE {other:?}"),
            }
        }

        if let Some(guard) = read_env::<bool>("EXPLORER_GUARD_AVERAGES") {
            config.averaging = if guard {
                AveragePolicy::ZeroWhenEmpty
            } else {
                AveragePolicy::Propagate
            };
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.map_width < 3 || self.map_height < 3 {
            return Err(RuntimeError::invalid_config(
                "map size",
                format!(
                    "{}x{} leaves no interior inside the wall border",
                    self.map_width, self.map_height
                ),
            ));
        }
        if self.vision_range == 0 {
            return Err(RuntimeError::invalid_config("vision_range", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(RuntimeError::invalid_config(
                "wall_probability",
                format!("{} is outside [0, 1]", self.wall_probability),
            ));
        }
        if self.max_decisions == 0 {
            return Err(RuntimeError::invalid_config("max_decisions", "must be positive"));
        }
        if let EpisodeMode::Explore { reveal_ratio } = self.mode
            && !(reveal_ratio > 0.0 && reveal_ratio <= 1.0)
        {
            return Err(RuntimeError::invalid_config(
                "reveal_ratio",
                format!("{reveal_ratio} is outside (0, 1]"),
            ));
        }
        Ok(())
    }

    pub fn explorer_config(&self) -> ExplorerConfig {
        ExplorerConfig::with_vision_range(self.vision_range)
    }

    /// Cave generator for the episode drawn from `seed`.
    pub fn generator(&self, seed: u64) -> CaveGenerator {
        CaveGenerator::new(self.map_width, self.map_height, seed)
            .with_wall_probability(self.wall_probability)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            map_width: ExplorerConfig::DEFAULT_MAP_WIDTH,
            map_height: ExplorerConfig::DEFAULT_MAP_HEIGHT,
            vision_range: ExplorerConfig::DEFAULT_VISION_RANGE,
            wall_probability: CaveGenerator::DEFAULT_WALL_PROBABILITY,
            seed: None,
            weights_path: None,
            max_decisions: Self::DEFAULT_MAX_DECISIONS,
            mode: EpisodeMode::default(),
            averaging: AveragePolicy::default(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = RuntimeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.map_width, 52);
        assert_eq!(config.vision_range, 5);
        assert_eq!(config.mode, EpisodeMode::ReachGoal);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cases = [
            RuntimeConfig {
                map_width: 2,
                ..RuntimeConfig::default()
            },
            RuntimeConfig {
                vision_range: 0,
                ..RuntimeConfig::default()
            },
            RuntimeConfig {
                wall_probability: -0.1,
                ..RuntimeConfig::default()
            },
            RuntimeConfig {
                max_decisions: 0,
                ..RuntimeConfig::default()
            },
            RuntimeConfig {
                mode: EpisodeMode::Explore { reveal_ratio: 0.0 },
                ..RuntimeConfig::default()
            },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(RuntimeError::InvalidConfig { .. })),
                "{config:?}"
            );
        }
    }

    #[test]
    fn explorer_config_carries_vision_range() {
        let config = RuntimeConfig {
            vision_range: 7,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.explorer_config().vision_range, 7);
    }
}
