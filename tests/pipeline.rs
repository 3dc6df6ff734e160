use chrono::NaiveDate;

use courtline::{EventTime, FeatureAssembler, FeatureError, PipelineConfig, RawMatch, Surface};

fn raw_on(p1: &str, p2: &str, winner: &str, surface: &str, day: u32) -> RawMatch {
    RawMatch {
        player_1: p1.to_string(),
        player_2: p2.to_string(),
        winner: Some(winner.to_string()),
        surface: Some(surface.to_string()),
        rank_1: Some(5.0),
        rank_2: Some(9.0),
        event_time: EventTime::Date(NaiveDate::from_ymd_opt(2024, 3, day).unwrap()),
    }
}

/// The three-match reference scenario: Alice beats Bob on hard, Bob gets
/// revenge, then Alice beats Carol on hard.
#[test]
fn reference_scenario() {
    let log = vec![
        raw_on("Alice", "Bob", "Alice", "Hard", 1),
        raw_on("Alice", "Bob", "Bob", "Hard", 2),
        raw_on("Alice", "Carol", "Alice", "Hard", 3),
    ];
    let output = FeatureAssembler::run(PipelineConfig::default(), &log).unwrap();
    let rows = &output.rows;
    assert_eq!(rows.len(), 3);

    // Entering match 2, Alice (player_1) leads the pair 1-0 and has won her
    // only hard-court match; Bob has lost his.
    assert_eq!(rows[1].h2h_wins_player_1, 1);
    assert_eq!(rows[1].h2h_wins_player_2, 0);
    assert_eq!(rows[1].surface_winrate_player_1, 1.0 / (1.0 + 1e-5));
    assert_eq!(rows[1].surface_winrate_player_2, 0.0);
    assert_eq!(rows[1].target, 0);

    // Entering match 3, Alice has 1 win from 2 hard-court matches; Carol is
    // a cold start. The Alice/Carol pair has never met.
    assert_eq!(rows[2].h2h_wins_player_1, 0);
    assert_eq!(rows[2].h2h_wins_player_2, 0);
    assert_eq!(rows[2].surface_winrate_player_1, 1.0 / (2.0 + 1e-5));
    assert!((rows[2].surface_winrate_player_1 - 0.5).abs() < 1e-4);
    assert_eq!(rows[2].surface_winrate_player_2, 0.0);
    assert_eq!(rows[2].target, 1);
}

#[test]
fn first_row_is_fully_cold() {
    let log = vec![raw_on("Alice", "Bob", "Alice", "Hard", 1)];
    let output = FeatureAssembler::run(PipelineConfig::default(), &log).unwrap();
    let row = &output.rows[0];
    assert_eq!((row.h2h_wins_player_1, row.h2h_wins_player_2), (0, 0));
    assert_eq!(row.surface_winrate_player_1, 0.0);
    assert_eq!(row.surface_winrate_player_2, 0.0);
    assert_eq!(row.rank_diff, 5.0 - 9.0);
}

#[test]
fn output_preserves_input_fields_and_encodes_surface() {
    let log = vec![raw_on("Alice", "Bob", "Bob", "clay", 1)];
    let output = FeatureAssembler::run(PipelineConfig::default(), &log).unwrap();
    let row = &output.rows[0];
    assert_eq!(row.player_1, "Alice");
    assert_eq!(row.player_2, "Bob");
    assert_eq!(row.winner, "Bob");
    assert_eq!(row.surface, Surface::Clay);
    assert_eq!(row.surface.code(), 1);
    assert_eq!(row.target, 0);
}

#[test]
fn unsorted_input_is_resorted_by_default() {
    // Bob's revenge listed first; re-sorting must put the day-1 match back
    // in front so the h2h counts come out right.
    let log = vec![
        raw_on("Alice", "Bob", "Bob", "Hard", 2),
        raw_on("Alice", "Bob", "Alice", "Hard", 1),
    ];
    let output = FeatureAssembler::run(PipelineConfig::default(), &log).unwrap();
    assert_eq!(output.rows[0].target, 1);
    assert_eq!(output.rows[1].h2h_wins_player_1, 1);
}

#[test]
fn incomplete_rows_fail_or_drop_per_config() {
    let mut incomplete = raw_on("Alice", "Bob", "Alice", "Hard", 1);
    incomplete.rank_1 = None;
    let complete = raw_on("Carol", "Dave", "Dave", "Grass", 2);
    let log = vec![incomplete, complete];

    let err = FeatureAssembler::run(PipelineConfig::default(), &log).unwrap_err();
    assert!(matches!(err, FeatureError::MissingField { field: "rank_1", .. }));

    let config = PipelineConfig {
        drop_incomplete_rows: true,
        ..PipelineConfig::default()
    };
    let output = FeatureAssembler::run(config, &log).unwrap();
    assert_eq!(output.report.rows_dropped, 1);
    assert_eq!(output.report.rows_emitted, 1);
    assert_eq!(output.rows[0].player_1, "Carol");
}

#[test]
fn report_reflects_the_emitted_table() {
    let log = vec![
        raw_on("Alice", "Bob", "Alice", "Hard", 1),
        raw_on("Alice", "Bob", "Bob", "Clay", 2),
        raw_on("Carol", "Dave", "Carol", "Hard", 3),
    ];
    let output = FeatureAssembler::run(PipelineConfig::default(), &log).unwrap();
    assert_eq!(output.report.rows_emitted, 3);
    assert_eq!(output.report.player_1_wins, 2);
    assert_eq!(output.report.rows_per_surface.get(&Surface::Hard), Some(&2));
    assert_eq!(output.report.rows_per_surface.get(&Surface::Clay), Some(&1));
}
