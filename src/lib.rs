//! Leakage-free predictive features for two-player match logs.
//!
//! Given a chronological log of historical results, this crate derives a
//! per-match feature table — head-to-head win counts, per-surface win
//! rates, rank difference and a binary outcome label — where every feature
//! for a match is computed strictly from earlier matches. Tracker state can
//! be snapshotted to disk so new results are folded in without replaying
//! history.
//!
//! Data acquisition, table persistence and model training live outside
//! this crate; [`RawMatch`] and [`FeatureRow`] (both serde shapes) are the
//! boundaries they plug into.

pub mod assemble;
pub mod config;
pub mod error;
pub mod h2h;
pub mod record;
pub mod snapshot;
pub mod surface;
pub mod synthetic;
pub mod validate;

pub use assemble::{FeatureAssembler, RunOutput, RunReport};
pub use config::{OrderingMode, PipelineConfig, RankDiffMode};
pub use error::FeatureError;
pub use h2h::HeadToHeadTracker;
pub use record::{EventTime, FeatureRow, MatchRecord, RawMatch, Surface, Winner};
pub use snapshot::TrackerSnapshot;
pub use surface::SurfaceWinRateTracker;
pub use validate::{ValidatedLog, validate_and_order};
