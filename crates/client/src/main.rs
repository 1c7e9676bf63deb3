//! Headless exploration client.
//!
//! Composition root that assembles:
//! 1. Configuration from the environment (and an optional `.env` file)
//! 2. Logging to stderr, optionally mirrored to a log directory
//! 3. The weight vector, loaded from disk or seeded
//! 4. One or more episodes on freshly generated caves
//!
//! # Examples
//!
//! ```bash
//! # Three episodes with a fixed seed, JSON reports on stdout
//! EXPLORER_SEED=7 EXPLORER_EPISODES=3 EXPLORER_OUTPUT=json cargo run -p explorer-client
//!
//! # Uncover 90% of the map instead of walking to the goal
//! EXPLORER_MODE=explore EXPLORER_REVEAL_RATIO=0.9 cargo run -p explorer-client
//! ```
mod config;
mod logging;
mod presentation;

use anyhow::{Context, Result};
use explorer_core::compute_seed;
use explorer_runtime::{Episode, EpisodeMode, EpisodeOutcome, RuntimeConfig, WeightsRepository};

use config::{ClientConfig, OutputFormat};

/// Stream separator for [`compute_seed`] when deriving per-episode seeds.
const EPISODE_SEED_CONTEXT: u32 = 0x4550_4953;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let client_config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(client_config.log_dir.as_deref())?;

    let runtime_config = RuntimeConfig::from_env();
    runtime_config
        .validate()
        .context("invalid runtime configuration")?;

    let base_seed = runtime_config.seed.unwrap_or_else(rand::random);
    tracing::info!("Base seed: {base_seed}");

    let repository = runtime_config
        .weights_path
        .clone()
        .or_else(|| config::default_weights_path().filter(|path| path.is_file()))
        .map(WeightsRepository::new);
    let weights = WeightsRepository::load_or_seed(repository.as_ref(), base_seed);
    tracing::debug!("Weights: {:?}", weights.values());

    if let Some(path) = &client_config.export_weights {
        WeightsRepository::new(path)
            .save(&weights)
            .with_context(|| format!("failed to export weights to {}", path.display()))?;
        tracing::info!("Exported weights to {}", path.display());
    }

    let mut reports = Vec::with_capacity(client_config.episodes as usize);
    for index in 0..client_config.episodes {
        let seed = compute_seed(base_seed, u64::from(index), EPISODE_SEED_CONTEXT);
        let mut episode = Episode::from_config(&runtime_config, seed, weights)
            .with_context(|| format!("failed to set up episode {index}"))?;
        let report = episode.run();

        if client_config.output == OutputFormat::Text {
            let goal = match runtime_config.mode {
                EpisodeMode::ReachGoal => Some(report.goal),
                EpisodeMode::Explore { .. } => None,
            };
            print!(
                "{}",
                presentation::render_mental_map(
                    episode.agent().mental_map(),
                    report.final_position,
                    goal,
                )
            );
            println!("{}", presentation::render_report(index, &report));
        }
        reports.push(report);
    }

    if client_config.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    let reached = reports
        .iter()
        .filter(|report| report.outcome == EpisodeOutcome::ReachedGoal)
        .count();
    tracing::info!(
        "Finished {} episode(s), {} reached the goal",
        reports.len(),
        reached
    );

    Ok(())
}
