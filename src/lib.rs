//! # duel-ccg
//!
//! Authoritative engine for a two-participant, turn-based card battle,
//! with a scripted opponent and an async match orchestrator.
//!
//! ## Design Principles
//!
//! 1. **Identity, not position**: participants are addressed by
//!    `ParticipantId`; turn parity picks the active seat.
//!
//! 2. **Validate, then mutate**: every rule checks ownership, phase and card
//!    references first. A rejected intent leaves the match untouched.
//!
//! 3. **Pure engine**: no clocks, sockets or storage below `orchestrator`.
//!    The same intents on the same seed always produce the same match.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im-rs`, so
//!   bots and observers read their own copy.
//!
//! - **One worker per match**: the orchestrator serializes human and bot
//!   intents through a single channel per match.
//!
//! ## Modules
//!
//! - `core`: Card ids, participants, state, intents, views, RNG, configuration
//! - `cards`: Catalog, card instances, deck building
//! - `zones`: Hand, deck, battlefield and mana zone per participant
//! - `rules`: Phase state machine, combat resolution, intent dispatch
//! - `bot`: Scripted decision engine
//! - `orchestrator`: Match hosting, bot pacing, teardown

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod bot;
pub mod orchestrator;

// Re-export commonly used types
pub use crate::core::{
    CardInstanceId, InstanceIdAllocator,
    ParticipantId, ParticipantMap,
    GameRng, MatchConfig,
    BlockAssignment, DefenseAssignments, Intent, IntentKind, IntentRecord,
    ConstructionError, ErrorCategory, GameError,
    MatchState, ParticipantState, PendingAttack, Phase,
    OpponentSideView, OwnSideView, PersonalizedView,
};

pub use crate::zones::{ZoneKind, Zones};

pub use crate::cards::{
    CardCatalog, CardCategory, CardDefinition, CardInstance, CatalogError, DeckBuilder, ManaTable,
};

pub use crate::rules::{apply_intent, is_terminal, legal_intent_kinds, CombatReport, MatchOutcome};

pub use crate::bot::{BotConfig, ScriptedBot, TurnPolicy};

pub use crate::orchestrator::{
    MatchEvent, MatchId, Orchestrator, OrchestratorConfig, OrchestratorError, Seat, TeardownReason,
};
