//! Errors surfaced by the orchestrator API.
//!
//! Wraps engine failures and adds the match-lifetime conditions the engine
//! itself never sees.

use thiserror::Error;

use super::MatchId;
use crate::core::error::{ConstructionError, ErrorCategory, GameError};
use crate::core::player::ParticipantId;

pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("no such match: {0}")]
    NoSuchMatch(MatchId),

    #[error("{participant} is not seated in {match_id}")]
    UnknownParticipant {
        match_id: MatchId,
        participant: ParticipantId,
    },

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("match worker stopped")]
    WorkerClosed,
}

impl OrchestratorError {
    /// Engine error category, if this wraps an engine rejection.
    #[must_use]
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            OrchestratorError::Game(err) => Some(err.category()),
            OrchestratorError::Construction(_) => Some(ErrorCategory::Construction),
            _ => None,
        }
    }
}
