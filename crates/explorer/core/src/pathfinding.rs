//! Step-wise A* over a grid of known cells.
//!
//! Search runs over any [`MapOracle`] and only enters traversable cells
//! (Empty or Visited). The heuristic is `cost + squared distance to goal`;
//! the squared distance is not admissible, which trades strict optimality for
//! a strong pull toward the goal.
//!
//! Open and closed sets are keyed by position, so set membership compares
//! coordinates only and never the cost or heuristic payload.

use std::collections::BTreeMap;

use crate::env::MapOracle;
use crate::state::Position;

/// Search vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub position: Position,
    /// Steps from the start.
    pub cost: u32,
    /// `cost + squared distance to goal`.
    pub heuristic: f64,
}

impl Node {
    pub fn new(position: Position, cost: u32, goal: Position) -> Self {
        Self {
            position,
            cost,
            heuristic: f64::from(cost) + position.distance_squared(goal),
        }
    }
}

/// Planned route stored as a stack.
///
/// The top of the stack is the next waypoint, so popping yields the route from
/// start to destination. A search that cannot reach its goal yields a
/// single-waypoint path holding only the start; use [`Path::is_found`] to
/// tell that apart from a real route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Bottom (destination) first, top (next waypoint) last.
    stack: Vec<Position>,
}

impl Path {
    pub fn single(position: Position) -> Self {
        Self {
            stack: vec![position],
        }
    }

    /// Builds a path from waypoints in travel order.
    pub fn from_route(route: impl IntoIterator<Item = Position>) -> Self {
        let mut stack: Vec<Position> = route.into_iter().collect();
        stack.reverse();
        Self { stack }
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of moves needed to walk the remaining waypoints.
    pub fn steps(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    pub fn push(&mut self, position: Position) {
        self.stack.push(position);
    }

    /// Removes and returns the next waypoint.
    pub fn pop(&mut self) -> Option<Position> {
        self.stack.pop()
    }

    pub fn peek(&self) -> Option<Position> {
        self.stack.last().copied()
    }

    /// Final waypoint of the route.
    pub fn destination(&self) -> Option<Position> {
        self.stack.first().copied()
    }

    /// True when the route ends at `goal`. A failed search ends at its start,
    /// so this is false for it unless start and goal coincide.
    pub fn is_found(&self, goal: Position) -> bool {
        self.destination() == Some(goal)
    }

    /// Waypoints in travel order (next waypoint first).
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.stack.iter().rev().copied()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    node: Node,
    /// Insertion sequence; ties on heuristic go to the earliest entry.
    order: u64,
}

enum SearchStep {
    Continue,
    Done(Path),
}

/// Reusable A* state.
///
/// Each call to [`Pathfinder::find_path`] starts from a clean slate; the sets
/// are kept between calls only to reuse their allocations.
#[derive(Debug, Default)]
pub struct Pathfinder {
    open: BTreeMap<Position, OpenEntry>,
    closed: BTreeMap<Position, Node>,
    sequence: u64,
    expanded: usize,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the search to completion.
    ///
    /// Returns the route from `start` to `goal` as a stack, or a path holding
    /// only `start` when the open set drains without reaching `goal`.
    pub fn find_path<M>(&mut self, start: Position, goal: Position, map: &M) -> Path
    where
        M: MapOracle + ?Sized,
    {
        self.reset();
        self.push_open(Node::new(start, 0, goal));

        loop {
            if let SearchStep::Done(path) = self.step(start, goal, map) {
                return path;
            }
        }
    }

    /// Nodes settled by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn reset(&mut self) {
        self.open.clear();
        self.closed.clear();
        self.sequence = 0;
        self.expanded = 0;
    }

    fn push_open(&mut self, node: Node) {
        let order = self.sequence;
        self.sequence += 1;
        self.open.insert(node.position, OpenEntry { node, order });
    }

    fn step<M>(&mut self, start: Position, goal: Position, map: &M) -> SearchStep
    where
        M: MapOracle + ?Sized,
    {
        let Some(lowest) = self.lowest_open() else {
            return SearchStep::Done(Path::single(start));
        };

        self.open.remove(&lowest.position);
        self.closed.insert(lowest.position, lowest);
        self.expanded += 1;

        if lowest.position == goal {
            return SearchStep::Done(self.reconstruct(lowest));
        }

        self.expand(lowest, goal, map);
        SearchStep::Continue
    }

    fn lowest_open(&self) -> Option<Node> {
        self.open
            .values()
            .min_by(|a, b| {
                a.node
                    .heuristic
                    .total_cmp(&b.node.heuristic)
                    .then(a.order.cmp(&b.order))
            })
            .map(|entry| entry.node)
    }

    fn expand<M>(&mut self, current: Node, goal: Position, map: &M)
    where
        M: MapOracle + ?Sized,
    {
        for neighbor in current.position.neighbors4() {
            if self.closed.contains_key(&neighbor) || self.open.contains_key(&neighbor) {
                continue;
            }
            let traversable = map.cell(neighbor).is_some_and(|state| state.is_traversable());
            if traversable {
                self.push_open(Node::new(neighbor, current.cost + 1, goal));
            }
        }
    }

    /// Walks back from the goal through closed nodes whose cost drops by one
    /// at each orthogonal step until cost zero (the start).
    fn reconstruct(&self, goal: Node) -> Path {
        let mut path = Path::single(goal.position);
        let mut current = goal;

        while current.cost > 0 {
            let previous = self.closed.values().find(|node| {
                node.cost + 1 == current.cost && node.position.is_adjacent(current.position)
            });
            let Some(previous) = previous else {
                break;
            };
            path.push(previous.position);
            current = *previous;
        }

        path
    }
}
