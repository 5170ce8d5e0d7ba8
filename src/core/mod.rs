//! Core engine types: entities, participants, state, intents, RNG, configuration.
//!
//! This module contains the building blocks every rule and collaborator
//! shares. Rules are tuned through `MatchConfig` rather than by editing the
//! phase machine.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;
pub mod view;

pub use entity::{CardInstanceId, InstanceIdAllocator};
pub use player::{ParticipantId, ParticipantMap};
pub use rng::GameRng;
pub use config::MatchConfig;
pub use action::{BlockAssignment, DefenseAssignments, Intent, IntentKind, IntentRecord};
pub use error::{ConstructionError, ErrorCategory, GameError, Result};
pub use state::{MatchState, ParticipantState, PendingAttack, Phase};
pub use view::{OpponentSideView, OwnSideView, PersonalizedView};
