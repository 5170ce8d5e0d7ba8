//! Per-match worker: the single serialization point for a match.
//!
//! The worker owns the `MatchState` and processes commands one at a time,
//! so no two intents for the same match ever interleave. Human and bot
//! intents arrive over the same channel.

use rustc_hash::FxHashMap;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{info, warn};

use super::error::{OrchestratorError, Result};
use super::events::MatchEvent;
use super::MatchId;
use crate::core::action::Intent;
use crate::core::player::ParticipantId;
use crate::core::state::MatchState;
use crate::core::view::PersonalizedView;
use crate::rules::{apply_intent, MatchOutcome};

/// Commands accepted by a match worker.
pub(crate) enum Command {
    Apply {
        participant: ParticipantId,
        intent: Intent,
        reply: oneshot::Sender<Result<Applied>>,
    },
    Snapshot {
        reply: oneshot::Sender<MatchState>,
    },
    View {
        participant: ParticipantId,
        reply: oneshot::Sender<Option<PersonalizedView>>,
    },
}

/// Result of an applied intent.
#[derive(Debug, Clone)]
pub(crate) struct Applied {
    /// The submitter's view after the intent.
    pub view: PersonalizedView,
    /// Set once a participant has fallen.
    pub outcome: Option<MatchOutcome>,
}

pub(crate) struct MatchWorker {
    id: MatchId,
    state: MatchState,
    command_rx: mpsc::Receiver<Command>,
    shutdown: watch::Receiver<bool>,
    views: FxHashMap<ParticipantId, watch::Sender<PersonalizedView>>,
    event_tx: broadcast::Sender<MatchEvent>,
}

impl MatchWorker {
    pub(crate) fn new(
        id: MatchId,
        state: MatchState,
        command_rx: mpsc::Receiver<Command>,
        shutdown: watch::Receiver<bool>,
        views: FxHashMap<ParticipantId, watch::Sender<PersonalizedView>>,
        event_tx: broadcast::Sender<MatchEvent>,
    ) -> Self {
        Self {
            id,
            state,
            command_rx,
            shutdown,
            views,
            event_tx,
        }
    }

    /// Process commands until shutdown or until every handle is dropped.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
            }
        }
        info!(match_id = %self.id, turn = self.state.turn(), "match worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Apply {
                participant,
                intent,
                reply,
            } => {
                let result = self.apply(participant, intent);
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::View { participant, reply } => {
                let _ = reply.send(self.state.view_for(&participant));
            }
        }
    }

    fn apply(&mut self, participant: ParticipantId, intent: Intent) -> Result<Applied> {
        // A finished match accepts nothing more, even before teardown lands.
        if self.state.is_over() {
            return Err(OrchestratorError::NoSuchMatch(self.id));
        }

        if let Err(err) = apply_intent(&mut self.state, &participant, &intent) {
            warn!(
                match_id = %self.id,
                participant = %participant,
                intent = %intent.kind(),
                phase = %self.state.phase(),
                error = %err,
                "intent rejected"
            );
            return Err(err.into());
        }

        self.publish_views();
        let _ = self.event_tx.send(MatchEvent::IntentApplied {
            match_id: self.id,
            participant: participant.clone(),
            intent,
            phase: self.state.phase(),
            turn: self.state.turn(),
        });

        let outcome = self.state.outcome();
        if let Some(outcome) = &outcome {
            info!(match_id = %self.id, outcome = ?outcome, "match ended");
            let _ = self.event_tx.send(MatchEvent::Ended {
                match_id: self.id,
                outcome: outcome.clone(),
            });
        }

        let view = self
            .state
            .view_for(&participant)
            .ok_or(OrchestratorError::UnknownParticipant {
                match_id: self.id,
                participant,
            })?;
        Ok(Applied { view, outcome })
    }

    fn publish_views(&self) {
        for (participant, tx) in &self.views {
            if let Some(view) = self.state.view_for(participant) {
                tx.send_replace(view);
            }
        }
    }
}
