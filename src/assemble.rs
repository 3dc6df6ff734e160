use std::collections::HashMap;

use serde::Serialize;

use crate::config::{PipelineConfig, RankDiffMode};
use crate::error::Result;
use crate::h2h::HeadToHeadTracker;
use crate::record::{FeatureRow, MatchRecord, RawMatch, Surface, Winner};
use crate::snapshot::{SNAPSHOT_VERSION, TrackerSnapshot};
use crate::surface::SurfaceWinRateTracker;
use crate::validate::validate_and_order;

/// Aggregate statistics for one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub rows_emitted: usize,
    pub rows_dropped: usize,
    /// Rows with `target == 1`, for a quick read on label balance.
    pub player_1_wins: usize,
    pub rows_per_surface: HashMap<Surface, usize>,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rows: Vec<FeatureRow>,
    pub report: RunReport,
}

/// Owns both trackers and drives the single forward pass.
///
/// Per record the order is fixed: query both trackers, capture the answers,
/// compute the label, then apply the outcome. Nothing a row carries depends
/// on its own apply or on any later record. Each record's queries depend on
/// all prior applies, so the fold itself is never parallelized.
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    config: PipelineConfig,
    h2h: HeadToHeadTracker,
    surfaces: SurfaceWinRateTracker,
}

impl FeatureAssembler {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            h2h: HeadToHeadTracker::new(),
            surfaces: SurfaceWinRateTracker::new(config.epsilon, config.cold_start_surface_prior),
        }
    }

    /// Rebuilds an assembler from externalized tracker state so ingestion
    /// can continue with only the new suffix of the log. Folding that
    /// suffix here yields the same rows a full replay would.
    pub fn resume(config: PipelineConfig, snapshot: &TrackerSnapshot) -> Result<Self> {
        Ok(Self {
            config,
            h2h: HeadToHeadTracker::from_snapshot(&snapshot.pairs)?,
            surfaces: SurfaceWinRateTracker::from_snapshot(
                &snapshot.surfaces,
                config.epsilon,
                config.cold_start_surface_prior,
            )?,
        })
    }

    /// Externalizes current tracker state. Only meaningful between records,
    /// which is the only time callers can observe the assembler anyway.
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            version: SNAPSHOT_VERSION,
            pairs: self.h2h.snapshot(),
            surfaces: self.surfaces.snapshot(),
        }
    }

    /// Derives one row. Reads strictly precede the writes for this record.
    pub fn process(&mut self, record: &MatchRecord) -> FeatureRow {
        let rank_diff = match self.config.rank_diff_mode {
            RankDiffMode::Slots => record.rank_1 - record.rank_2,
            RankDiffMode::WinnerLoser => match record.winner {
                Winner::Player1 => record.rank_2 - record.rank_1,
                Winner::Player2 => record.rank_1 - record.rank_2,
            },
        };

        let (h2h_wins_player_1, h2h_wins_player_2) =
            self.h2h.query(&record.player_1, &record.player_2);
        let surface_winrate_player_1 = self.surfaces.query(&record.player_1, record.surface);
        let surface_winrate_player_2 = self.surfaces.query(&record.player_2, record.surface);
        let target = u8::from(record.winner == Winner::Player1);

        // Every read for this row is captured; only now does its outcome
        // enter tracker state.
        self.h2h
            .apply(&record.player_1, &record.player_2, record.winner_name());
        self.surfaces.apply(
            &record.player_1,
            record.surface,
            record.winner == Winner::Player1,
        );
        self.surfaces.apply(
            &record.player_2,
            record.surface,
            record.winner == Winner::Player2,
        );

        FeatureRow {
            player_1: record.player_1.clone(),
            player_2: record.player_2.clone(),
            winner: record.winner_name().to_string(),
            surface: record.surface,
            rank_1: record.rank_1,
            rank_2: record.rank_2,
            event_time: record.event_time,
            rank_diff,
            h2h_wins_player_1,
            h2h_wins_player_2,
            surface_winrate_player_1,
            surface_winrate_player_2,
            target,
        }
    }

    /// Folds an already-validated, already-ordered sequence.
    pub fn fold(&mut self, records: &[MatchRecord]) -> Vec<FeatureRow> {
        records.iter().map(|record| self.process(record)).collect()
    }

    /// Full pipeline: validate, order, fold from empty state.
    pub fn run(config: PipelineConfig, raw: &[RawMatch]) -> Result<RunOutput> {
        let log = validate_and_order(raw, &config)?;
        let mut assembler = FeatureAssembler::new(config);
        let rows = assembler.fold(&log.records);
        let report = RunReport::summarize(&rows, log.dropped);
        log::info!(
            "assembled {} feature rows ({} dropped, {} player_1 wins)",
            report.rows_emitted,
            report.rows_dropped,
            report.player_1_wins
        );
        Ok(RunOutput { rows, report })
    }
}

impl RunReport {
    pub fn summarize(rows: &[FeatureRow], rows_dropped: usize) -> Self {
        let mut rows_per_surface: HashMap<Surface, usize> = HashMap::new();
        let mut player_1_wins = 0usize;
        for row in rows {
            *rows_per_surface.entry(row.surface).or_default() += 1;
            if row.target == 1 {
                player_1_wins += 1;
            }
        }
        Self {
            rows_emitted: rows.len(),
            rows_dropped,
            player_1_wins,
            rows_per_surface,
        }
    }
}
