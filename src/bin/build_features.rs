use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use courtline::{FeatureAssembler, PipelineConfig, RawMatch, TrackerSnapshot, validate_and_order};

/// Usage: build_features <matches.json> [features-out.json] [snapshot.json]
///
/// Reads a JSON array of raw match records, runs the pipeline and writes
/// the feature table. If a snapshot path is given and the file exists, the
/// fold resumes from it (the input is then expected to be only the new
/// suffix of the log); the updated snapshot is written back either way.
/// A config file path can be supplied via COURTLINE_CONFIG.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .context("usage: build_features <matches.json> [features-out.json] [snapshot.json]")?;
    let out_path = args.next().map(PathBuf::from);
    let snapshot_path = args.next().map(PathBuf::from);

    let config = match std::env::var_os("COURTLINE_CONFIG") {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("read config {}", PathBuf::from(&path).display()))?;
            serde_json::from_str::<PipelineConfig>(&raw).context("parse config")?
        }
        None => PipelineConfig::default(),
    };

    let raw = fs::read_to_string(&input).with_context(|| format!("read {}", input.display()))?;
    let matches: Vec<RawMatch> = serde_json::from_str(&raw).context("parse match log")?;

    let log = validate_and_order(&matches, &config)?;
    let mut assembler = match snapshot_path.as_deref().filter(|p| p.exists()) {
        Some(path) => FeatureAssembler::resume(config, &TrackerSnapshot::load(path)?)?,
        None => FeatureAssembler::new(config),
    };
    let rows = assembler.fold(&log.records);
    let report = courtline::RunReport::summarize(&rows, log.dropped);

    if let Some(path) = &snapshot_path {
        assembler
            .snapshot()
            .save(path)
            .with_context(|| format!("write snapshot {}", path.display()))?;
    }

    match &out_path {
        Some(path) => {
            let json = serde_json::to_string_pretty(&rows).context("encode feature rows")?;
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    eprintln!(
        "rows: {}  dropped: {}  player_1 wins: {}",
        report.rows_emitted, report.rows_dropped, report.player_1_wins
    );
    for (surface, count) in &report.rows_per_surface {
        eprintln!("  {surface}: {count}");
    }

    Ok(())
}
