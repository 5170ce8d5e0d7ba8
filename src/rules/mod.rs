//! Match rules: the phase state machine, combat and intent dispatch.
//!
//! Every operation here is a deterministic function of the state and the
//! intent. Pacing, transport and match lifetime belong to the orchestrator.

pub mod combat;
pub mod engine;
pub mod phase;

pub use combat::CombatReport;
pub use engine::{apply_intent, is_terminal, legal_intent_kinds, MatchOutcome};
