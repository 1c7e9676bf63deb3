//! Whole-map interest field with destructive best-candidate selection.

use explorer_core::{MapDimensions, MapOracle, Position};

use super::scoring::InterestScorer;
use super::visibility::extract_window;

/// One interest score per map cell.
#[derive(Clone, Debug)]
pub struct InterestField {
    dimensions: MapDimensions,
    /// Column-major (`x * height + y`), matching the selection order.
    scores: Vec<f64>,
}

impl InterestField {
    /// Scores every cell of `map` through a window of radius `range`.
    pub fn compute<M>(
        map: &M,
        scorer: &InterestScorer,
        range: u32,
        target: Option<Position>,
        agent: Position,
    ) -> Self
    where
        M: MapOracle + ?Sized,
    {
        let dimensions = map.dimensions();
        let mut scores = Vec::with_capacity(dimensions.area());

        for x in 0..dimensions.width as i32 {
            for y in 0..dimensions.height as i32 {
                let candidate = Position::new(x, y);
                let window = extract_window(map, candidate, range);
                scores.push(scorer.score(&window, candidate, target, agent));
            }
        }

        Self { dimensions, scores }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.x as usize * self.dimensions.height as usize + position.y as usize)
    }

    pub fn score(&self, position: Position) -> Option<f64> {
        self.index_of(position).map(|index| self.scores[index])
    }

    /// Number of cells that [`InterestField::take_best`] can still return.
    pub fn selectable(&self) -> usize {
        self.scores.iter().filter(|score| is_selectable(**score)).count()
    }

    /// Removes `position` from selection.
    pub fn exclude(&mut self, position: Position) {
        if let Some(index) = self.index_of(position) {
            self.scores[index] = f64::NEG_INFINITY;
        }
    }

    /// Highest-scoring remaining cell, then excludes it.
    ///
    /// Scan order is x-major; ties keep the first cell seen. NaN and `-inf`
    /// scores are never returned, so `None` means the field is exhausted.
    pub fn take_best(&mut self) -> Option<Position> {
        let mut best: Option<(usize, f64)> = None;
        for (index, score) in self.scores.iter().copied().enumerate() {
            if !is_selectable(score) {
                continue;
            }
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        let (index, _) = best?;
        self.scores[index] = f64::NEG_INFINITY;
        let height = self.dimensions.height as usize;
        Some(Position::new((index / height) as i32, (index % height) as i32))
    }
}

fn is_selectable(score: f64) -> bool {
    !score.is_nan() && score != f64::NEG_INFINITY
}
