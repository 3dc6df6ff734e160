use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::record::{EventTime, RawMatch};

const PLAYERS: &[&str] = &[
    "Alcaraz", "Sinner", "Djokovic", "Medvedev", "Zverev", "Rune", "Rublev", "Ruud", "Fritz",
    "Hurkacz", "Tsitsipas", "Dimitrov", "Paul", "Shelton", "Tiafoe", "Korda",
];

const SURFACES: &[&str] = &["Hard", "Clay", "Grass", "Carpet"];

/// Deterministic synthetic match log for tests, demos and benches. The
/// same seed always yields the same log. Every row is complete; tests that
/// need defective rows build them by hand.
pub fn synthetic_log(seed: u64, matches: usize) -> Vec<RawMatch> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).expect("valid date");

    let mut out = Vec::with_capacity(matches);
    for i in 0..matches {
        let p1 = PLAYERS[rng.gen_range(0..PLAYERS.len())];
        let mut p2 = PLAYERS[rng.gen_range(0..PLAYERS.len())];
        while p2 == p1 {
            p2 = PLAYERS[rng.gen_range(0..PLAYERS.len())];
        }
        // Better-ranked (lower number) player wins more often.
        let rank_1 = rng.gen_range(1..=120) as f64;
        let rank_2 = rng.gen_range(1..=120) as f64;
        let p1_win_prob = 0.5 + (rank_2 - rank_1) / 400.0;
        let winner = if rng.gen_bool(p1_win_prob.clamp(0.05, 0.95)) {
            p1
        } else {
            p2
        };

        out.push(RawMatch {
            player_1: p1.to_string(),
            player_2: p2.to_string(),
            winner: Some(winner.to_string()),
            surface: Some(SURFACES[rng.gen_range(0..SURFACES.len())].to_string()),
            rank_1: Some(rank_1),
            rank_2: Some(rank_2),
            event_time: EventTime::Date(start + Duration::days(i as i64 / 8)),
        });
    }
    out
}
