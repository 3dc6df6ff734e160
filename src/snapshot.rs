use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;
use crate::h2h::PairEntry;
use crate::surface::SurfaceEntry;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Externalized tracker state, taken between records. All counters are
/// integers, so serializing and reloading reproduces tracker state exactly
/// and resuming a fold from a snapshot matches a full replay bit for bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub version: u32,
    pub pairs: Vec<PairEntry>,
    pub surfaces: Vec<SurfaceEntry>,
}

impl TrackerSnapshot {
    /// Loads and version-checks a snapshot file. Any defect (unreadable
    /// file, malformed JSON, wrong version) is a hard error; the caller
    /// must fall back to a full replay or abort, never fold on top of
    /// partial state.
    pub fn load(path: &Path) -> Result<Self, FeatureError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            FeatureError::state_load(format!("read {}: {err}", path.display()))
        })?;
        let snapshot: TrackerSnapshot = serde_json::from_str(&raw).map_err(|err| {
            FeatureError::state_load(format!("parse {}: {err}", path.display()))
        })?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(FeatureError::state_load(format!(
                "version {} in {}, expected {}",
                snapshot.version,
                path.display(),
                SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot)
    }

    /// Writes the snapshot via a temp file and rename; a partially written
    /// file is never visible at `path`.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)
    }
}
