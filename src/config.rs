use serde::{Deserialize, Serialize};

/// How `rank_diff` is computed for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankDiffMode {
    /// `rank_1 - rank_2`. Negative means player_1 is better ranked.
    Slots,
    /// `loser_rank - winner_rank`.
    WinnerLoser,
}

/// What to do when input records are not already in event-time order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingMode {
    /// Stable re-sort by event time, input position as tiebreak.
    Resort,
    /// Fail with an out-of-order error instead of re-sorting.
    Strict,
}

/// Pipeline tuning knobs. Every field has a serde default so a partial JSON
/// config file works.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Guard added to the match count in win-rate quotients. Makes the
    /// division total and pins the cold-start value.
    pub epsilon: f64,
    /// Drop and count records with missing required fields instead of
    /// failing the whole run.
    pub drop_incomplete_rows: bool,
    /// Win rate reported for a player's first-ever match on a surface.
    /// The default 0.0 equals `0 / (0 + epsilon)` exactly.
    pub cold_start_surface_prior: f64,
    pub rank_diff_mode: RankDiffMode,
    pub ordering: OrderingMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-5,
            drop_incomplete_rows: false,
            cold_start_surface_prior: 0.0,
            rank_diff_mode: RankDiffMode::Slots,
            ordering: OrderingMode::Resort,
        }
    }
}
