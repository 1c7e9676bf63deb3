//! Observe, plan, and move: the per-agent control loop.
//!
//! Each [`Episode::tick`] performs at most one planning decision and at most
//! one move. Planning happens only when the agent has no route left to
//! follow; after every move the agent looks around again and merges the new
//! window into its mental map.

mod agent;
mod stats;

pub use agent::Agent;
pub use stats::{EpisodeOutcome, EpisodeReport, EpisodeStats};

use std::time::Instant;

use explorer_core::{FieldOfView, MapOracle, Position, Weights};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::Result;
use crate::config::RuntimeConfig;
use crate::planner::{InterestScorer, Navigator};
use crate::scenario::Scenario;

/// What the agent is trying to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EpisodeMode {
    /// Walk to the scenario goal.
    #[default]
    ReachGoal,
    /// Ignore the goal and uncover the map until `reveal_ratio` of it is no
    /// longer Fog.
    Explore { reveal_ratio: f64 },
}

/// Result of a single [`Episode::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    Moved {
        from: Position,
        to: Position,
        /// Fog cells resolved by the observation after the move.
        revealed: usize,
    },
    Finished(EpisodeOutcome),
}

pub struct Episode {
    seed: u64,
    scenario: Scenario,
    agent: Agent,
    navigator: Navigator,
    fov: FieldOfView,
    mode: EpisodeMode,
    max_decisions: u32,
    stats: EpisodeStats,
    outcome: Option<EpisodeOutcome>,
}

impl Episode {
    /// Places the agent on the scenario start and takes the first look.
    pub fn new(
        scenario: Scenario,
        navigator: Navigator,
        mode: EpisodeMode,
        max_decisions: u32,
        seed: u64,
    ) -> Result<Self> {
        let fov = FieldOfView::new(navigator.vision_range());
        let mut agent = Agent::new(scenario.start, scenario.map.dimensions())?;
        let revealed = agent.observe(&scenario.map, &fov);

        info!(
            seed,
            start = %scenario.start,
            goal = %scenario.goal,
            ?mode,
            "episode started"
        );

        Ok(Self {
            seed,
            scenario,
            agent,
            navigator,
            fov,
            mode,
            max_decisions,
            stats: EpisodeStats {
                fog_revealed: revealed as u64,
                ..EpisodeStats::default()
            },
            outcome: None,
        })
    }

    /// Generates a cave for `seed` and sets up an episode on it.
    pub fn from_config(config: &RuntimeConfig, seed: u64, weights: Weights) -> Result<Self> {
        config.validate()?;
        let scenario = Scenario::generate(&config.generator(seed))?;
        let scorer = InterestScorer::new(weights).with_averaging(config.averaging);
        let navigator = Navigator::new(scorer, config.vision_range);
        Self::new(scenario, navigator, config.mode, config.max_decisions, seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn mode(&self) -> EpisodeMode {
        self.mode
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn outcome(&self) -> Option<EpisodeOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn goal(&self) -> Option<Position> {
        match self.mode {
            EpisodeMode::ReachGoal => Some(self.scenario.goal),
            EpisodeMode::Explore { .. } => None,
        }
    }

    fn reached_objective(&self) -> Option<EpisodeOutcome> {
        match self.mode {
            EpisodeMode::ReachGoal if self.agent.position() == self.scenario.goal => {
                Some(EpisodeOutcome::ReachedGoal)
            }
            EpisodeMode::Explore { reveal_ratio }
                if self.agent.mental_map().revealed_ratio() >= reveal_ratio =>
            {
                Some(EpisodeOutcome::Explored)
            }
            _ => None,
        }
    }

    fn finish(&mut self, outcome: EpisodeOutcome) -> TickOutcome {
        self.outcome = Some(outcome);
        info!(
            seed = self.seed,
            %outcome,
            moves = self.stats.moves,
            decisions = self.stats.decisions,
            fallback = self.stats.fallback_decisions,
            "episode finished"
        );
        TickOutcome::Finished(outcome)
    }

    /// Plans if needed, then moves one waypoint and observes.
    pub fn tick(&mut self) -> TickOutcome {
        if let Some(outcome) = self.outcome {
            return TickOutcome::Finished(outcome);
        }
        if let Some(outcome) = self.reached_objective() {
            return self.finish(outcome);
        }

        if !self.agent.has_route() {
            if self.stats.decisions >= self.max_decisions {
                return self.finish(EpisodeOutcome::DecisionLimit);
            }

            let started = Instant::now();
            let plan = self
                .navigator
                .plan(self.agent.mental_map(), self.agent.position(), self.goal());
            self.stats
                .record_decision(plan.is_fallback(), plan.attempts(), started.elapsed());

            match plan.into_path() {
                Some(path) => self.agent.follow(path),
                None => return self.finish(EpisodeOutcome::Stuck),
            }
        }

        let from = self.agent.position();
        let Some(to) = self.agent.advance() else {
            return self.finish(EpisodeOutcome::Stuck);
        };
        let revealed = self.agent.observe(&self.scenario.map, &self.fov);
        self.stats.moves += 1;
        self.stats.fog_revealed += revealed as u64;

        debug!(%from, %to, revealed, "agent moved");
        TickOutcome::Moved { from, to, revealed }
    }

    /// Ticks until the episode finishes.
    pub fn run(&mut self) -> EpisodeReport {
        loop {
            if let TickOutcome::Finished(outcome) = self.tick() {
                return self.report(outcome);
            }
        }
    }

    fn report(&self, outcome: EpisodeOutcome) -> EpisodeReport {
        EpisodeReport {
            seed: self.seed,
            mode: self.mode,
            start: self.scenario.start,
            goal: self.scenario.goal,
            final_position: self.agent.position(),
            outcome,
            revealed_ratio: self.agent.mental_map().revealed_ratio(),
            stats: self.stats.clone(),
        }
    }
}
