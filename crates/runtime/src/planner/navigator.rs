//! Direct pathfinding with an interest-driven fallback.
//!
//! A decision first tries A* from the agent to the goal over the mental map.
//! When that fails (or there is no goal), every cell is scored and the best
//! candidates are tried in order; each failed candidate is excluded, so the
//! loop ends after at most one attempt per map cell.

use explorer_core::{MentalMap, Path, Pathfinder, Position};
use tracing::debug;

use super::interest::InterestField;
use super::scoring::InterestScorer;

/// Outcome of one planning decision.
#[derive(Clone, Debug, PartialEq)]
pub enum Plan {
    /// Route straight to the goal.
    Direct(Path),
    /// Route to an intermediate exploration target.
    Interim {
        target: Position,
        path: Path,
        /// Candidates tried, including the successful one.
        attempts: usize,
    },
    /// Every selectable candidate was tried without finding a route.
    Exhausted { attempts: usize },
}

impl Plan {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Plan::Direct(path) | Plan::Interim { path, .. } => Some(path),
            Plan::Exhausted { .. } => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Plan::Direct(path) | Plan::Interim { path, .. } => Some(path),
            Plan::Exhausted { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self, Plan::Direct(_))
    }

    pub fn attempts(&self) -> usize {
        match self {
            Plan::Direct(_) => 0,
            Plan::Interim { attempts, .. } | Plan::Exhausted { attempts } => *attempts,
        }
    }
}

/// Decision maker for a single agent.
#[derive(Debug)]
pub struct Navigator {
    pathfinder: Pathfinder,
    scorer: InterestScorer,
    vision_range: u32,
}

impl Navigator {
    pub fn new(scorer: InterestScorer, vision_range: u32) -> Self {
        Self {
            pathfinder: Pathfinder::new(),
            scorer,
            vision_range,
        }
    }

    pub fn scorer(&self) -> &InterestScorer {
        &self.scorer
    }

    pub fn vision_range(&self) -> u32 {
        self.vision_range
    }

    /// Plans the next route for an agent standing on `agent`.
    pub fn plan(&mut self, map: &MentalMap, agent: Position, goal: Option<Position>) -> Plan {
        if let Some(goal) = goal {
            let path = self.pathfinder.find_path(agent, goal, map);
            if path.is_found(goal) {
                debug!(%agent, %goal, steps = path.steps(), "direct path found");
                return Plan::Direct(path);
            }
            debug!(%agent, %goal, "no direct path, scoring interest field");
        }

        let mut field = InterestField::compute(map, &self.scorer, self.vision_range, goal, agent);
        let mut attempts = 0;

        while let Some(target) = field.take_best() {
            attempts += 1;
            let path = self.pathfinder.find_path(agent, target, map);
            if path.is_found(target) {
                debug!(%agent, %target, attempts, steps = path.steps(), "interim target selected");
                return Plan::Interim {
                    target,
                    path,
                    attempts,
                };
            }
            debug!(%target, attempts, "candidate unreachable, excluded");
        }

        debug!(%agent, attempts, "interest field exhausted");
        Plan::Exhausted { attempts }
    }
}
