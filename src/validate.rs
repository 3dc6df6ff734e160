use rayon::prelude::*;

use crate::config::{OrderingMode, PipelineConfig};
use crate::error::{FeatureError, Result};
use crate::record::{MatchRecord, RawMatch, Surface, Winner};

/// Validation output: records in event-time order plus the count of rows
/// excluded under drop-and-count mode.
#[derive(Debug, Clone)]
pub struct ValidatedLog {
    pub records: Vec<MatchRecord>,
    pub dropped: usize,
}

/// Checks one raw record's required fields and categorizes its surface.
/// Record-level only; ordering is the caller's concern.
pub fn validate_record(index: usize, raw: &RawMatch) -> Result<MatchRecord> {
    let winner_name = raw
        .winner
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(FeatureError::MissingField {
            index,
            field: "winner",
        })?;
    let surface_raw = raw
        .surface
        .as_deref()
        .ok_or(FeatureError::MissingField {
            index,
            field: "surface",
        })?;
    let rank_1 = raw.rank_1.ok_or(FeatureError::MissingField {
        index,
        field: "rank_1",
    })?;
    let rank_2 = raw.rank_2.ok_or(FeatureError::MissingField {
        index,
        field: "rank_2",
    })?;

    let winner = if winner_name == raw.player_1 {
        Winner::Player1
    } else if winner_name == raw.player_2 {
        Winner::Player2
    } else {
        return Err(FeatureError::UnknownWinner {
            index,
            winner: winner_name.to_string(),
        });
    };

    Ok(MatchRecord {
        player_1: raw.player_1.clone(),
        player_2: raw.player_2.clone(),
        winner,
        surface: Surface::parse(surface_raw),
        rank_1,
        rank_2,
        event_time: raw.event_time,
    })
}

/// Validates every record and produces the event-time-ordered sequence the
/// fold consumes. Per-record validation is independent and runs in
/// parallel; ordering is a single sequential pass afterwards.
///
/// In [`OrderingMode::Resort`] the sort is stable, so records with equal
/// event times keep their input order and reruns are reproducible. In
/// [`OrderingMode::Strict`] any regression in event time fails the run.
pub fn validate_and_order(raw: &[RawMatch], config: &PipelineConfig) -> Result<ValidatedLog> {
    let validated: Vec<(usize, Result<MatchRecord>)> = raw
        .par_iter()
        .enumerate()
        .map(|(index, record)| (index, validate_record(index, record)))
        .collect();

    let mut records: Vec<(usize, MatchRecord)> = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;
    for (index, result) in validated {
        match result {
            Ok(record) => records.push((index, record)),
            Err(err) if config.drop_incomplete_rows && err.is_row_defect() => {
                log::debug!("dropping record {index}: {err}");
                dropped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    match config.ordering {
        OrderingMode::Strict => {
            for pair in records.windows(2) {
                let (prev_index, prev) = &pair[0];
                let (index, next) = &pair[1];
                if next.event_time < prev.event_time {
                    return Err(FeatureError::OutOfOrder {
                        index: *index,
                        prev: *prev_index,
                    });
                }
            }
        }
        OrderingMode::Resort => {
            // Stable, and records are still in input order here, so equal
            // event times keep their relative input positions.
            records.sort_by_key(|(_, record)| record.event_time);
        }
    }

    if dropped > 0 {
        log::info!(
            "validated {} records, dropped {} incomplete",
            records.len(),
            dropped
        );
    }

    Ok(ValidatedLog {
        records: records.into_iter().map(|(_, record)| record).collect(),
        dropped,
    })
}
