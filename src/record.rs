use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Playing surface category with the fixed integer encoding used by the
/// downstream table consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Hard,
    Clay,
    Grass,
    Carpet,
    Unknown,
}

static SURFACE_NAMES: Lazy<HashMap<&'static str, Surface>> = Lazy::new(|| {
    HashMap::from([
        ("hard", Surface::Hard),
        ("clay", Surface::Clay),
        ("grass", Surface::Grass),
        ("carpet", Surface::Carpet),
    ])
});

impl Surface {
    /// Maps free-text surface labels onto the known categories. Anything
    /// unrecognized becomes [`Surface::Unknown`]; this is never an error.
    pub fn parse(raw: &str) -> Surface {
        SURFACE_NAMES
            .get(raw.trim().to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(Surface::Unknown)
    }

    /// Fixed encoding: Hard 0, Clay 1, Grass 2, Carpet 3, Unknown -1.
    pub fn code(self) -> i8 {
        match self {
            Surface::Hard => 0,
            Surface::Clay => 1,
            Surface::Grass => 2,
            Surface::Carpet => 3,
            Surface::Unknown => -1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Surface::Hard => "Hard",
            Surface::Clay => "Clay",
            Surface::Grass => "Grass",
            Surface::Carpet => "Carpet",
            Surface::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sortable event key. Logs keyed by calendar date and logs keyed by
/// season/matchday both occur in the wild; the derived ordering compares
/// dates among themselves and (season, matchday) pairs among themselves,
/// with every dated record ordering before every round-keyed one. Ties are
/// broken by input position downstream, so the order is total and stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    Date(NaiveDate),
    Round { season: i32, matchday: u32 },
}

/// One match as it arrives from the acquisition layer, before validation.
/// Fields the upstream feed may leave empty are optional here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMatch {
    pub player_1: String,
    pub player_2: String,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    #[serde(default)]
    pub rank_1: Option<f64>,
    #[serde(default)]
    pub rank_2: Option<f64>,
    pub event_time: EventTime,
}

/// Which slot of the record won. Validation guarantees the winner names one
/// of the two players, so the slot is all that needs carrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player1,
    Player2,
}

/// A validated, immutable match record. Required fields are present, the
/// surface is categorized and the winner is known to be one of the players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player_1: String,
    pub player_2: String,
    pub winner: Winner,
    pub surface: Surface,
    pub rank_1: f64,
    pub rank_2: f64,
    pub event_time: EventTime,
}

impl MatchRecord {
    pub fn winner_name(&self) -> &str {
        match self.winner {
            Winner::Player1 => &self.player_1,
            Winner::Player2 => &self.player_2,
        }
    }

    pub fn loser_name(&self) -> &str {
        match self.winner {
            Winner::Player1 => &self.player_2,
            Winner::Player2 => &self.player_1,
        }
    }
}

/// Output row: the validated record plus the derived predictive columns and
/// the binary label. Every derived value is computed strictly from matches
/// that precede this one in event order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub player_1: String,
    pub player_2: String,
    pub winner: String,
    pub surface: Surface,
    pub rank_1: f64,
    pub rank_2: f64,
    pub event_time: EventTime,
    pub rank_diff: f64,
    pub h2h_wins_player_1: u32,
    pub h2h_wins_player_2: u32,
    pub surface_winrate_player_1: f64,
    pub surface_winrate_player_2: f64,
    pub target: u8,
}
