//! Decision engine for non-human participants.
//!
//! ## Key Types
//!
//! - `TurnPolicy`: snapshot + identity → ordered intents
//! - `ScriptedBot`: the heuristic opponent
//! - `BotConfig`: evaluation weights and blocking behaviour
//!
//! Policies read a `MatchState` snapshot and never mutate it.

pub mod config;
pub mod defense;
pub mod evaluate;
pub mod policy;

pub use config::BotConfig;
pub use defense::plan_defense;
pub use evaluate::score;
pub use policy::{ScriptedBot, TurnPolicy};
