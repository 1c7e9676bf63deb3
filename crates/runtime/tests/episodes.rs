use explorer_core::{GridMap, MapOracle, PcgRng, Position, WEIGHT_COUNT, Weights};
use explorer_runtime::{
    AveragePolicy, Episode, EpisodeMode, EpisodeOutcome, InterestScorer, Navigator,
    RuntimeConfig, Scenario, TickOutcome, WeightsRepository,
};

fn guarded_navigator(vision_range: u32) -> Navigator {
    let scorer = InterestScorer::new(Weights::new([0.1; WEIGHT_COUNT]))
        .with_averaging(AveragePolicy::ZeroWhenEmpty);
    Navigator::new(scorer, vision_range)
}

#[test]
fn exploration_stops_at_reveal_ratio() {
    let scenario = Scenario::from_map(GridMap::bordered(20, 20).unwrap()).unwrap();
    let mode = EpisodeMode::Explore { reveal_ratio: 0.6 };
    let mut episode = Episode::new(scenario, guarded_navigator(4), mode, 1_000, 0).unwrap();

    let report = episode.run();

    assert_eq!(report.outcome, EpisodeOutcome::Explored);
    assert!(report.revealed_ratio >= 0.6);
    assert!(report.stats.decisions > 0);
    // no goal to aim for, so every decision goes through the interest field
    assert_eq!(report.stats.fallback_decisions, report.stats.decisions);
}

#[test]
fn exploration_ends_stuck_when_nothing_is_left() {
    let map = GridMap::from_rows(&["#######", "#.....#", "#######"]).unwrap();
    let scenario = Scenario::from_map(map).unwrap();
    let mode = EpisodeMode::Explore { reveal_ratio: 1.0 };
    let mut episode = Episode::new(scenario, guarded_navigator(3), mode, 100, 0).unwrap();

    let report = episode.run();

    // either the last Fog cell is seen or the agent runs out of targets first
    assert!(matches!(
        report.outcome,
        EpisodeOutcome::Explored | EpisodeOutcome::Stuck
    ));
    assert!(report.stats.moves > 0);
}

#[test]
fn fog_revealed_matches_mental_map() {
    let scenario = Scenario::from_map(GridMap::bordered(12, 9).unwrap()).unwrap();
    let mut episode =
        Episode::new(scenario, guarded_navigator(3), EpisodeMode::ReachGoal, 100, 0).unwrap();
    let initial_fog = (12 - 2) * (9 - 2);

    let mut revealed_by_moves = 0;
    while let TickOutcome::Moved { revealed, .. } = episode.tick() {
        revealed_by_moves += revealed as u64;
    }

    let stats = episode.stats();
    let fog_left = episode.agent().mental_map().fog_count() as u64;
    assert_eq!(stats.fog_revealed, initial_fog - fog_left);
    assert!(stats.fog_revealed >= revealed_by_moves);
    assert_eq!(episode.outcome(), Some(EpisodeOutcome::ReachedGoal));
}

#[test]
fn generated_episodes_are_reproducible() {
    let config = RuntimeConfig {
        map_width: 24,
        map_height: 24,
        averaging: AveragePolicy::ZeroWhenEmpty,
        max_decisions: 400,
        ..RuntimeConfig::default()
    };
    let weights = Weights::seeded(&PcgRng, 5);

    let first = Episode::from_config(&config, 17, weights).unwrap().run();
    let second = Episode::from_config(&config, 17, weights).unwrap().run();

    assert_eq!(first.start, second.start);
    assert_eq!(first.goal, second.goal);
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.final_position, second.final_position);
    assert_eq!(first.stats.moves, second.stats.moves);
    assert_eq!(first.stats.decisions, second.stats.decisions);
    assert!(first.stats.decisions <= config.max_decisions);
}

#[test]
fn report_serializes_to_json() {
    let scenario = Scenario::from_map(GridMap::bordered(6, 6).unwrap()).unwrap();
    let mut episode =
        Episode::new(scenario, guarded_navigator(5), EpisodeMode::ReachGoal, 10, 3).unwrap();
    let report = episode.run();

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["outcome"], "reached_goal");
    assert_eq!(json["mode"]["kind"], "reach_goal");
    assert_eq!(json["seed"], 3);
    assert_eq!(json["goal"]["x"], 4);
}

#[test]
fn saved_weights_drive_the_same_episode() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let repo = WeightsRepository::new(temp_dir.path().join("weights.bin"));
    let weights = Weights::seeded(&PcgRng, 99);
    repo.save(&weights).unwrap();

    let loaded = WeightsRepository::load_or_seed(Some(&repo), 0);
    assert_eq!(loaded, weights);

    let config = RuntimeConfig {
        map_width: 16,
        map_height: 16,
        averaging: AveragePolicy::ZeroWhenEmpty,
        ..RuntimeConfig::default()
    };
    let a = Episode::from_config(&config, 2, weights).unwrap().run();
    let b = Episode::from_config(&config, 2, loaded).unwrap().run();
    assert_eq!(a.final_position, b.final_position);
    assert_eq!(a.stats.moves, b.stats.moves);
}

#[test]
fn start_cell_is_visited_before_the_first_tick() {
    let scenario = Scenario::from_map(GridMap::bordered(8, 8).unwrap()).unwrap();
    let start = scenario.start;
    let episode =
        Episode::new(scenario, guarded_navigator(3), EpisodeMode::ReachGoal, 10, 0).unwrap();

    assert_eq!(episode.agent().position(), start);
    assert_eq!(
        episode.agent().mental_map().cell(start),
        Some(explorer_core::CellState::Visited)
    );
    assert_eq!(start, Position::new(1, 1));
}
