//! Plain-text rendering of episodes.
//!
//! Glyphs: `#` wall, `.` empty, `~` fog, `o` visited, `@` agent, `G` goal.
use std::fmt::Write;

use explorer_core::{MentalMap, Position};
use explorer_runtime::{EpisodeMode, EpisodeReport};

pub const AGENT_GLYPH: char = '@';
pub const GOAL_GLYPH: char = 'G';

/// One line per map row, top row first.
pub fn render_mental_map(map: &MentalMap, agent: Position, goal: Option<Position>) -> String {
    let grid = map.grid();
    let dimensions = grid.dimensions();
    let mut out = String::with_capacity((dimensions.width as usize + 1) * dimensions.height as usize);

    for y in 0..dimensions.height {
        let Some(row) = grid.row(y) else {
            continue;
        };
        for (x, state) in row.iter().enumerate() {
            let position = Position::new(x as i32, y as i32);
            let glyph = if position == agent {
                AGENT_GLYPH
            } else if Some(position) == goal {
                GOAL_GLYPH
            } else {
                state.glyph()
            };
            out.push(glyph);
        }
        out.push('\n');
    }

    out
}

pub fn render_report(index: u32, report: &EpisodeReport) -> String {
    let mut out = String::new();
    let stats = &report.stats;
    let mode = match report.mode {
        EpisodeMode::ReachGoal => "reach goal".to_string(),
        EpisodeMode::Explore { reveal_ratio } => format!("explore to {:.0}%", reveal_ratio * 100.0),
    };

    let _ = writeln!(out, "episode {index} (seed {}, {mode})", report.seed);
    let _ = writeln!(out, "  outcome           {}", report.outcome);
    let _ = writeln!(
        out,
        "  route             {} -> {} (ended at {})",
        report.start, report.goal, report.final_position
    );
    let _ = writeln!(out, "  moves             {}", stats.moves);
    let _ = writeln!(
        out,
        "  decisions         {} ({} fallback, {} candidates tried)",
        stats.decisions, stats.fallback_decisions, stats.candidate_attempts
    );
    let _ = writeln!(
        out,
        "  fog revealed      {} cells ({:.1}% of map known)",
        stats.fog_revealed,
        report.revealed_ratio * 100.0
    );
    let _ = writeln!(
        out,
        "  avg decision time {:.1} µs",
        report.average_decision_micros()
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_core::{CellState, MapDimensions, Window};

    #[test]
    fn renders_fog_walls_agent_and_goal() {
        let mut map = MentalMap::new(MapDimensions::new(5, 3)).unwrap();
        let mut window = Window::new(Position::new(2, 1), 1, CellState::Fog);
        window.set(Position::new(2, 1), CellState::Empty);
        map.merge(&window, Position::new(1, 1));

        let text = render_mental_map(&map, Position::new(1, 1), Some(Position::new(3, 1)));

        assert_eq!(text, "#####\n#@.G#\n#####\n");
    }

    #[test]
    fn visited_cells_use_their_glyph() {
        let mut map = MentalMap::new(MapDimensions::new(4, 3)).unwrap();
        let window = Window::new(Position::new(1, 1), 0, CellState::Fog);
        map.merge(&window, Position::new(1, 1));
        map.merge(&window, Position::new(2, 1));

        let text = render_mental_map(&map, Position::new(2, 1), None);

        assert_eq!(text.lines().nth(1), Some("#o@#"));
    }
}
