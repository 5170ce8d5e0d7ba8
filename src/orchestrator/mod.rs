//! Turn orchestrator: match lifetime, intent routing and bot pacing.
//!
//! Each match runs in its own worker task that owns the `MatchState`.
//! Commands reach it over one channel, which is the only way a match is
//! ever mutated. The engine stays a pure state-transition function; delays,
//! cancellation and teardown all live here.

pub mod config;
pub mod error;
pub mod events;
mod handle;
mod registry;
mod worker;

use serde::{Deserialize, Serialize};

pub use config::OrchestratorConfig;
pub use error::{OrchestratorError, Result};
pub use events::{MatchEvent, TeardownReason};
pub use registry::{Orchestrator, Seat};

/// Identity of a hosted match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "match-{}", self.0)
    }
}
