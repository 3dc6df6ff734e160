use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;
use crate::record::Surface;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SurfaceKey {
    player: String,
    surface: Surface,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SurfaceTally {
    wins: u32,
    matches: u32,
}

/// Snapshot form of one (player, surface) tally. Integer counters, exact
/// round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceEntry {
    pub player: String,
    pub surface: Surface,
    pub wins: u32,
    pub matches: u32,
}

/// Prior win rate per (player, surface).
///
/// `query` divides by `matches + epsilon`, so the quotient is total and a
/// player's first match on a surface reports exactly the configured
/// cold-start prior (0.0 by default, which equals `0 / (0 + epsilon)`).
/// Same read-before-write discipline as the head-to-head tracker.
#[derive(Debug, Clone)]
pub struct SurfaceWinRateTracker {
    tallies: HashMap<SurfaceKey, SurfaceTally>,
    epsilon: f64,
    cold_start_prior: f64,
}

impl SurfaceWinRateTracker {
    pub fn new(epsilon: f64, cold_start_prior: f64) -> Self {
        Self {
            tallies: HashMap::new(),
            epsilon,
            cold_start_prior,
        }
    }

    /// Prior win rate for `player` on `surface`, from matches already
    /// applied only.
    pub fn query(&self, player: &str, surface: Surface) -> f64 {
        let key = SurfaceKey {
            player: player.to_string(),
            surface,
        };
        match self.tallies.get(&key) {
            Some(tally) => f64::from(tally.wins) / (f64::from(tally.matches) + self.epsilon),
            None => self.cold_start_prior,
        }
    }

    /// Records one finished match for `player` on `surface`.
    pub fn apply(&mut self, player: &str, surface: Surface, did_win: bool) {
        let key = SurfaceKey {
            player: player.to_string(),
            surface,
        };
        let tally = self.tallies.entry(key).or_default();
        tally.matches += 1;
        if did_win {
            tally.wins += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Snapshot entries, sorted by (player, surface code) for deterministic
    /// output.
    pub fn snapshot(&self) -> Vec<SurfaceEntry> {
        let mut entries: Vec<SurfaceEntry> = self
            .tallies
            .iter()
            .map(|(key, tally)| SurfaceEntry {
                player: key.player.clone(),
                surface: key.surface,
                wins: tally.wins,
                matches: tally.matches,
            })
            .collect();
        entries.sort_by(|x, y| {
            x.player
                .cmp(&y.player)
                .then(x.surface.code().cmp(&y.surface.code()))
        });
        entries
    }

    pub fn from_snapshot(
        entries: &[SurfaceEntry],
        epsilon: f64,
        cold_start_prior: f64,
    ) -> Result<Self, FeatureError> {
        let mut tallies = HashMap::with_capacity(entries.len());
        for entry in entries {
            if entry.wins > entry.matches {
                return Err(FeatureError::state_load(format!(
                    "surface tally for {} on {} has {} wins out of {} matches",
                    entry.player, entry.surface, entry.wins, entry.matches
                )));
            }
            let key = SurfaceKey {
                player: entry.player.clone(),
                surface: entry.surface,
            };
            let tally = SurfaceTally {
                wins: entry.wins,
                matches: entry.matches,
            };
            if tallies.insert(key, tally).is_some() {
                return Err(FeatureError::state_load(format!(
                    "duplicate surface tally for {} on {}",
                    entry.player, entry.surface
                )));
            }
        }
        Ok(Self {
            tallies,
            epsilon,
            cold_start_prior,
        })
    }
}
