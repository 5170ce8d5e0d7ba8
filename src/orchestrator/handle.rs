//! Cloneable façade for issuing commands to one match worker.
//!
//! [`MatchHandle`] hides the channel plumbing: every call sends a command
//! with a `oneshot` reply and awaits it.

use tokio::sync::{mpsc, oneshot};

use super::error::{OrchestratorError, Result};
use super::worker::{Applied, Command};
use super::MatchId;
use crate::core::action::Intent;
use crate::core::player::ParticipantId;
use crate::core::state::MatchState;
use crate::core::view::PersonalizedView;

#[derive(Clone)]
pub(crate) struct MatchHandle {
    id: MatchId,
    command_tx: mpsc::Sender<Command>,
}

impl MatchHandle {
    pub(crate) fn new(id: MatchId, command_tx: mpsc::Sender<Command>) -> Self {
        Self { id, command_tx }
    }

    pub(crate) fn id(&self) -> MatchId {
        self.id
    }

    /// Submit an intent and wait for the verdict.
    pub(crate) async fn apply(&self, participant: ParticipantId, intent: Intent) -> Result<Applied> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Apply {
                participant,
                intent,
                reply: reply_tx,
            })
            .await
            .map_err(|_| OrchestratorError::WorkerClosed)?;

        reply_rx.await.map_err(|_| OrchestratorError::WorkerClosed)?
    }

    /// Read-only copy of the full match state.
    pub(crate) async fn snapshot(&self) -> Result<MatchState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| OrchestratorError::WorkerClosed)?;

        reply_rx.await.map_err(|_| OrchestratorError::WorkerClosed)
    }

    /// Current view for one participant.
    pub(crate) async fn view(&self, participant: ParticipantId) -> Result<Option<PersonalizedView>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::View {
                participant,
                reply: reply_tx,
            })
            .await
            .map_err(|_| OrchestratorError::WorkerClosed)?;

        reply_rx.await.map_err(|_| OrchestratorError::WorkerClosed)
    }
}
