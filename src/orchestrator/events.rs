//! Events broadcast to observers.
//!
//! Rejected intents are not events: they go back to the submitter only.

use crate::core::action::Intent;
use crate::core::player::ParticipantId;
use crate::core::state::Phase;
use crate::rules::MatchOutcome;

use super::MatchId;

/// Why a match was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeardownReason {
    /// A participant reached zero life.
    Finished,
    Disconnected(ParticipantId),
    /// Removed by the host.
    Requested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// An intent passed validation and changed the match.
    IntentApplied {
        match_id: MatchId,
        participant: ParticipantId,
        intent: Intent,
        phase: Phase,
        turn: u32,
    },
    Ended {
        match_id: MatchId,
        outcome: MatchOutcome,
    },
    TornDown {
        match_id: MatchId,
        reason: TeardownReason,
    },
}

impl MatchEvent {
    #[must_use]
    pub fn match_id(&self) -> MatchId {
        match self {
            MatchEvent::IntentApplied { match_id, .. }
            | MatchEvent::Ended { match_id, .. }
            | MatchEvent::TornDown { match_id, .. } => *match_id,
        }
    }
}
