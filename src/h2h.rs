use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// Unordered competitor pair. `a <= b` lexicographically, so the same two
/// players always land on the same key regardless of which record slot each
/// occupies. The canonical order is internal bookkeeping only: win counts
/// attach to the named players, never to the "first" slot of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PairKey {
    a: String,
    b: String,
}

impl PairKey {
    fn new(p: &str, q: &str) -> PairKey {
        if p <= q {
            PairKey {
                a: p.to_string(),
                b: q.to_string(),
            }
        } else {
            PairKey {
                a: q.to_string(),
                b: p.to_string(),
            }
        }
    }
}

/// Win counts for the canonical-first (`a`) and canonical-second (`b`)
/// player of a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PairWins {
    a: u32,
    b: u32,
}

/// Snapshot form of one head-to-head pair. `players` is in canonical order
/// and `wins[i]` belongs to `players[i]`; all counters are integers so the
/// round trip is exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairEntry {
    pub players: [String; 2],
    pub wins: [u32; 2],
}

/// Prior win counts per unordered competitor pair.
///
/// For every match, `query` must be called (and its result captured) before
/// `apply` for that same match. That ordering is the no-leakage guarantee,
/// and it holds across snapshot/resume because a snapshot is only ever
/// taken between records.
#[derive(Debug, Clone, Default)]
pub struct HeadToHeadTracker {
    pairs: HashMap<PairKey, PairWins>,
}

impl HeadToHeadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prior wins of `player_1` and `player_2` against each other, in that
    /// slot order. `(0, 0)` for a pair never seen.
    pub fn query(&self, player_1: &str, player_2: &str) -> (u32, u32) {
        let key = PairKey::new(player_1, player_2);
        let Some(wins) = self.pairs.get(&key) else {
            return (0, 0);
        };
        if key.a == player_1 {
            (wins.a, wins.b)
        } else {
            (wins.b, wins.a)
        }
    }

    /// Credits this match's win to `winner`, which must be one of the two
    /// players.
    pub fn apply(&mut self, player_1: &str, player_2: &str, winner: &str) {
        debug_assert!(winner == player_1 || winner == player_2);
        let key = PairKey::new(player_1, player_2);
        let entry = self.pairs.entry(key).or_default();
        // Compare against the canonical slot, not the record slot.
        let canonical_first = if player_1 <= player_2 {
            player_1
        } else {
            player_2
        };
        if winner == canonical_first {
            entry.a += 1;
        } else {
            entry.b += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Snapshot entries, sorted by pair so output is deterministic.
    pub fn snapshot(&self) -> Vec<PairEntry> {
        let mut entries: Vec<PairEntry> = self
            .pairs
            .iter()
            .map(|(key, wins)| PairEntry {
                players: [key.a.clone(), key.b.clone()],
                wins: [wins.a, wins.b],
            })
            .collect();
        entries.sort_by(|x, y| x.players.cmp(&y.players));
        entries
    }

    pub fn from_snapshot(entries: &[PairEntry]) -> Result<Self, FeatureError> {
        let mut pairs = HashMap::with_capacity(entries.len());
        for entry in entries {
            let [p, q] = &entry.players;
            if p >= q {
                return Err(FeatureError::state_load(format!(
                    "head-to-head pair [{p}, {q}] is not in canonical order"
                )));
            }
            let key = PairKey::new(p, q);
            let wins = PairWins {
                a: entry.wins[0],
                b: entry.wins[1],
            };
            if pairs.insert(key, wins).is_some() {
                return Err(FeatureError::state_load(format!(
                    "duplicate head-to-head pair [{p}, {q}]"
                )));
            }
        }
        Ok(Self { pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_pair_queries_to_zero() {
        let tracker = HeadToHeadTracker::new();
        assert_eq!(tracker.query("Alice", "Bob"), (0, 0));
    }

    #[test]
    fn wins_follow_the_named_player_across_slot_swaps() {
        let mut tracker = HeadToHeadTracker::new();
        tracker.apply("Alice", "Bob", "Alice");
        tracker.apply("Bob", "Alice", "Alice"); // same pair, slots swapped

        assert_eq!(tracker.query("Alice", "Bob"), (2, 0));
        assert_eq!(tracker.query("Bob", "Alice"), (0, 2));
    }

    #[test]
    fn canonical_second_player_wins_are_not_misattributed() {
        // "Zoe" > "Bob" lexicographically, so Zoe is the canonical-second
        // player even when listed first in the record.
        let mut tracker = HeadToHeadTracker::new();
        tracker.apply("Zoe", "Bob", "Zoe");
        assert_eq!(tracker.query("Zoe", "Bob"), (1, 0));
        assert_eq!(tracker.query("Bob", "Zoe"), (0, 1));
    }

    #[test]
    fn pair_counts_sum_to_match_count() {
        let mut tracker = HeadToHeadTracker::new();
        for i in 0..7 {
            let winner = if i % 3 == 0 { "Bob" } else { "Alice" };
            tracker.apply("Alice", "Bob", winner);
        }
        let (a, b) = tracker.query("Alice", "Bob");
        assert_eq!(a + b, 7);
    }

    #[test]
    fn snapshot_round_trips_and_rejects_duplicates() {
        let mut tracker = HeadToHeadTracker::new();
        tracker.apply("Alice", "Bob", "Bob");
        tracker.apply("Carol", "Alice", "Carol");

        let entries = tracker.snapshot();
        let restored = HeadToHeadTracker::from_snapshot(&entries).unwrap();
        assert_eq!(restored.query("Alice", "Bob"), (0, 1));
        assert_eq!(restored.query("Alice", "Carol"), (0, 1));

        let mut doubled = entries.clone();
        doubled.extend(entries);
        assert!(HeadToHeadTracker::from_snapshot(&doubled).is_err());
    }
}
