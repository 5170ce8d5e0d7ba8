//! Engine error taxonomy.
//!
//! All engine errors are local and recoverable: an operation that returns
//! `Err` leaves the match untouched, and the caller relays the error to the
//! offending participant only.

use thiserror::Error;

use super::action::IntentKind;
use super::entity::CardInstanceId;
use super::player::ParticipantId;
use super::state::Phase;
use crate::zones::ZoneKind;

pub type Result<T> = std::result::Result<T, GameError>;

/// Coarse error classes, used by orchestrators to decide how to relay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    TurnOwnership,
    PhaseViolation,
    ZoneReference,
    Resource,
    Construction,
}

/// Failures while building a match or validating a defense assignment.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("{participant} submitted {actual} cards, a deck needs exactly {expected}")]
    DeckSize {
        participant: ParticipantId,
        expected: usize,
        actual: usize,
    },

    #[error("no deck supplied for {participant}")]
    MissingDeck { participant: ParticipantId },

    #[error("deck supplied for {participant}, who is not seated in this match")]
    UnknownParticipant { participant: ParticipantId },

    #[error("{participant} cannot occupy both seats")]
    DuplicateParticipant { participant: ParticipantId },

    #[error("card instance {card} appears more than once")]
    DuplicateCardInstance { card: CardInstanceId },

    #[error("unit {defender} is already assigned to block another attacker")]
    DuplicateBlocker { defender: CardInstanceId },

    #[error("card {name:?} is not in the catalog")]
    UnknownCard { name: String },
}

/// Errors surfaced while applying an intent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{participant} cannot act now, waiting on {expected}")]
    TurnOwnership {
        participant: ParticipantId,
        expected: ParticipantId,
    },

    #[error("{intent} is not allowed during the {phase} phase")]
    PhaseViolation { intent: IntentKind, phase: Phase },

    #[error("card {card} is not in {participant}'s {zone}")]
    ZoneReference {
        participant: ParticipantId,
        card: CardInstanceId,
        zone: ZoneKind,
    },

    #[error("card {card} is not part of the pending attack")]
    NotAttacking { card: CardInstanceId },

    #[error("unit {card} is tapped")]
    UnitTapped { card: CardInstanceId },

    #[error("unit {card} was declared as an attacker twice")]
    DuplicateAttacker { card: CardInstanceId },

    #[error("card {card} cannot be deployed to the battlefield")]
    NotDeployable { card: CardInstanceId },

    #[error("card costs {cost} mana, only {available} available")]
    InsufficientMana { cost: i64, available: i64 },

    #[error("a card was already committed as mana this turn")]
    ManaAlreadyPlayed,

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl GameError {
    /// Category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            GameError::TurnOwnership { .. } => ErrorCategory::TurnOwnership,
            GameError::PhaseViolation { .. } => ErrorCategory::PhaseViolation,
            GameError::ZoneReference { .. }
            | GameError::NotAttacking { .. }
            | GameError::UnitTapped { .. }
            | GameError::DuplicateAttacker { .. }
            | GameError::NotDeployable { .. } => ErrorCategory::ZoneReference,
            GameError::InsufficientMana { .. } | GameError::ManaAlreadyPlayed => {
                ErrorCategory::Resource
            }
            GameError::Construction(_) => ErrorCategory::Construction,
        }
    }
}
