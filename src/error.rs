use thiserror::Error;

/// Errors surfaced by validation, ordering and snapshot loading.
///
/// Win-rate computation has no error kind: the epsilon guard in
/// [`crate::surface::SurfaceWinRateTracker`] makes the division total.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("record {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index}: winner `{winner}` is neither player_1 nor player_2")]
    UnknownWinner { index: usize, winner: String },

    #[error("record {index} predates record {prev}; input is not in event-time order")]
    OutOfOrder { index: usize, prev: usize },

    #[error("tracker snapshot rejected: {reason}")]
    StateLoad { reason: String },
}

impl FeatureError {
    pub(crate) fn state_load(reason: impl Into<String>) -> Self {
        FeatureError::StateLoad {
            reason: reason.into(),
        }
    }

    /// Defects scoped to a single row, eligible for drop-and-count mode.
    pub(crate) fn is_row_defect(&self) -> bool {
        matches!(
            self,
            FeatureError::MissingField { .. } | FeatureError::UnknownWinner { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FeatureError>;
