use thiserror::Error;

use crate::api::types::StageId;

/// Everything that can go wrong while driving the workshop.
///
/// None of these are fatal: a rejected transition leaves the state untouched
/// and the user can always recover by further input.
#[derive(Debug, Error)]
pub enum WorkshopError {
    /// A stage was started or completed while a different stage was current.
    #[error("invalid transition: current stage is {current}, requested {requested}")]
    InvalidTransition { current: StageId, requested: StageId },

    /// A stage metric has not reached its completion threshold yet.
    #[error("{stage} cannot complete yet: {reason}")]
    GuardViolation { stage: StageId, reason: String },

    /// The payload handed to `complete_stage` belongs to another stage.
    #[error("payload does not belong to stage {stage}")]
    PayloadMismatch { stage: StageId },

    /// Malformed configuration or catalog JSON.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl WorkshopError {
    pub(crate) fn guard(stage: StageId, reason: impl Into<String>) -> Self {
        Self::GuardViolation {
            stage,
            reason: reason.into(),
        }
    }
}
