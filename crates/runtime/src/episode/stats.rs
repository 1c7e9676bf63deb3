//! Per-episode counters and the final report.

use std::time::Duration;

use explorer_core::Position;
use serde::{Deserialize, Serialize};

use super::EpisodeMode;

/// Why an episode ended.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EpisodeOutcome {
    /// The agent stands on the goal.
    ReachedGoal,
    /// The requested fraction of the map is no longer Fog.
    Explored,
    /// No reachable candidate was left to plan toward.
    Stuck,
    /// The planning decision budget ran out.
    DecisionLimit,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub moves: u64,
    pub decisions: u32,
    /// Decisions that went through the interest field.
    pub fallback_decisions: u32,
    /// Interest-field candidates tried across all fallback decisions.
    pub candidate_attempts: u64,
    pub fog_revealed: u64,
    /// Wall-clock time spent planning, in microseconds.
    pub planning_micros: u64,
}

impl EpisodeStats {
    pub(crate) fn record_decision(&mut self, fallback: bool, attempts: usize, elapsed: Duration) {
        self.decisions += 1;
        if fallback {
            self.fallback_decisions += 1;
        }
        self.candidate_attempts += attempts as u64;
        self.planning_micros += u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
    }

    pub fn average_decision_micros(&self) -> f64 {
        if self.decisions == 0 {
            return 0.0;
        }
        self.planning_micros as f64 / f64::from(self.decisions)
    }
}

/// Summary of a finished episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub seed: u64,
    pub mode: EpisodeMode,
    pub start: Position,
    pub goal: Position,
    pub final_position: Position,
    pub outcome: EpisodeOutcome,
    pub revealed_ratio: f64,
    pub stats: EpisodeStats,
}

impl EpisodeReport {
    pub fn average_decision_micros(&self) -> f64 {
        self.stats.average_decision_micros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisions_accumulate() {
        let mut stats = EpisodeStats::default();
        stats.record_decision(false, 0, Duration::from_micros(10));
        stats.record_decision(true, 3, Duration::from_micros(30));

        assert_eq!(stats.decisions, 2);
        assert_eq!(stats.fallback_decisions, 1);
        assert_eq!(stats.candidate_attempts, 3);
        assert_eq!(stats.average_decision_micros(), 20.0);
    }

    #[test]
    fn outcome_names_are_snake_case() {
        assert_eq!(EpisodeOutcome::ReachedGoal.to_string(), "reached_goal");
        assert_eq!(
            serde_json::to_string(&EpisodeOutcome::DecisionLimit).unwrap(),
            "\"decision_limit\""
        );
    }
}
