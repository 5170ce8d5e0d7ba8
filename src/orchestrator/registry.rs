//! The orchestrator: hosts matches, routes intents, paces bots.
//!
//! ```text
//! Orchestrator (Clone)
//! └── Shared
//!     ├── matches: MatchId → MatchEntry
//!     │   ├── handle      (command channel into the MatchWorker task)
//!     │   ├── shutdown    (watch; flipping it stops worker and bot driver)
//!     │   ├── views       (watch per participant, latest PersonalizedView)
//!     │   └── bots        (participant → TurnPolicy)
//!     └── event_tx        (broadcast of MatchEvent)
//! ```
//!
//! Bot seats are driven by one task per match. It sleeps the configured
//! delay, re-plans from a fresh snapshot, re-checks that the match is still
//! live, then submits the next intent. Teardown cancels the sleep, so no
//! queued bot intent lands after a match is gone.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tracing::{debug, info, warn};

use super::config::OrchestratorConfig;
use super::error::{OrchestratorError, Result};
use super::events::{MatchEvent, TeardownReason};
use super::handle::MatchHandle;
use super::worker::{Applied, MatchWorker};
use super::MatchId;
use crate::bot::TurnPolicy;
use crate::cards::CardInstance;
use crate::core::action::Intent;
use crate::core::error::ConstructionError;
use crate::core::player::ParticipantId;
use crate::core::rng::GameRng;
use crate::core::state::MatchState;
use crate::core::view::PersonalizedView;
use crate::rules::MatchOutcome;

/// One seat at a new match.
#[derive(Clone)]
pub struct Seat {
    pub participant: ParticipantId,
    pub deck: Vec<CardInstance>,
    /// Drives this seat automatically when set.
    pub policy: Option<Arc<dyn TurnPolicy>>,
}

impl Seat {
    /// A seat whose intents arrive through `apply_intent`.
    pub fn human(participant: impl Into<ParticipantId>, deck: Vec<CardInstance>) -> Self {
        Self {
            participant: participant.into(),
            deck,
            policy: None,
        }
    }

    /// A seat driven by `policy`.
    pub fn bot(
        participant: impl Into<ParticipantId>,
        deck: Vec<CardInstance>,
        policy: impl TurnPolicy + 'static,
    ) -> Self {
        Self {
            participant: participant.into(),
            deck,
            policy: Some(Arc::new(policy)),
        }
    }
}

struct MatchEntry {
    handle: MatchHandle,
    shutdown: watch::Sender<bool>,
    views: FxHashMap<ParticipantId, watch::Receiver<PersonalizedView>>,
    bots: Arc<FxHashMap<ParticipantId, Arc<dyn TurnPolicy>>>,
    bot_driving: Arc<AtomicBool>,
}

struct Shared {
    config: OrchestratorConfig,
    matches: Mutex<FxHashMap<MatchId, MatchEntry>>,
    next_id: AtomicU64,
    seeds: Mutex<GameRng>,
    event_tx: broadcast::Sender<MatchEvent>,
}

/// Host for any number of independent matches.
///
/// Cheap to clone; all clones share the same matches.
#[derive(Clone)]
pub struct Orchestrator {
    shared: Arc<Shared>,
}

impl Orchestrator {
    /// Create an orchestrator. Must be used from within a tokio runtime.
    #[must_use]
    pub fn new(config: OrchestratorConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                seeds: Mutex::new(GameRng::new(config.seed)),
                config,
                matches: Mutex::new(FxHashMap::default()),
                next_id: AtomicU64::new(1),
                event_tx,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.shared.config
    }

    /// Start a match. The first seat acts first.
    pub async fn create_match(&self, seats: [Seat; 2]) -> Result<MatchId> {
        let seed = self.shared.seeds.lock().await.next_u64();
        let config = self.shared.config.match_config.clone().with_seed(seed);

        let [first, second] = seats;
        let seating = [first.participant.clone(), second.participant.clone()];
        let mut bots: FxHashMap<ParticipantId, Arc<dyn TurnPolicy>> = FxHashMap::default();
        let mut decks = Vec::with_capacity(2);
        for seat in [first, second] {
            if let Some(policy) = seat.policy {
                bots.insert(seat.participant.clone(), policy);
            }
            decks.push((seat.participant, seat.deck));
        }

        let state = MatchState::new(config, seating.clone(), decks)?;
        let id = MatchId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));

        let mut view_txs = FxHashMap::default();
        let mut view_rxs = FxHashMap::default();
        for participant in &seating {
            let view = state
                .view_for(participant)
                .ok_or_else(|| ConstructionError::UnknownParticipant {
                    participant: participant.clone(),
                })?;
            let (tx, rx) = watch::channel(view);
            view_txs.insert(participant.clone(), tx);
            view_rxs.insert(participant.clone(), rx);
        }

        let (command_tx, command_rx) = mpsc::channel(self.shared.config.command_buffer_size.max(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = MatchWorker::new(
            id,
            state,
            command_rx,
            shutdown_rx,
            view_txs,
            self.shared.event_tx.clone(),
        );
        tokio::spawn(worker.run());

        let bot_count = bots.len();
        self.shared.matches.lock().await.insert(
            id,
            MatchEntry {
                handle: MatchHandle::new(id, command_tx),
                shutdown: shutdown_tx,
                views: view_rxs,
                bots: Arc::new(bots),
                bot_driving: Arc::new(AtomicBool::new(false)),
            },
        );

        info!(
            match_id = %id,
            first = %seating[0],
            second = %seating[1],
            bots = bot_count,
            "match created"
        );
        self.wake_bots(id).await;
        Ok(id)
    }

    /// Submit one intent for `participant`.
    ///
    /// Returns the submitter's updated view. Rejections are returned to the
    /// caller only; the match carries on unaffected.
    pub async fn apply_intent(
        &self,
        id: MatchId,
        participant: &ParticipantId,
        intent: Intent,
    ) -> Result<PersonalizedView> {
        self.ensure_seated(id, participant).await?;
        let applied = self.submit(id, participant, intent).await?;
        if applied.outcome.is_none() {
            self.wake_bots(id).await;
        }
        Ok(applied.view)
    }

    /// Read-only copy of the full match state.
    pub async fn snapshot(&self, id: MatchId) -> Result<MatchState> {
        let handle = self.handle(id).await?;
        handle.snapshot().await.map_err(|err| closed_as_missing(err, id))
    }

    /// Current view for one participant.
    pub async fn view(&self, id: MatchId, participant: &ParticipantId) -> Result<PersonalizedView> {
        let handle = self.handle(id).await?;
        handle
            .view(participant.clone())
            .await
            .map_err(|err| closed_as_missing(err, id))?
            .ok_or_else(|| OrchestratorError::UnknownParticipant {
                match_id: id,
                participant: participant.clone(),
            })
    }

    /// Follow one participant's view. The receiver sees every update and
    /// closes when the match is torn down.
    pub async fn subscribe(
        &self,
        id: MatchId,
        participant: &ParticipantId,
    ) -> Result<watch::Receiver<PersonalizedView>> {
        let matches = self.shared.matches.lock().await;
        let entry = matches.get(&id).ok_or(OrchestratorError::NoSuchMatch(id))?;
        entry
            .views
            .get(participant)
            .cloned()
            .ok_or_else(|| OrchestratorError::UnknownParticipant {
                match_id: id,
                participant: participant.clone(),
            })
    }

    /// Match events for every hosted match.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<MatchEvent> {
        self.shared.event_tx.subscribe()
    }

    /// Whether a match is still hosted.
    pub async fn is_live(&self, id: MatchId) -> bool {
        self.shared.matches.lock().await.contains_key(&id)
    }

    /// Number of hosted matches.
    pub async fn match_count(&self) -> usize {
        self.shared.matches.lock().await.len()
    }

    /// A participant left. Tears the match down; repeated calls are no-ops.
    ///
    /// Returns `true` if this call removed the match. Identities without a
    /// seat in the match cannot tear it down.
    pub async fn disconnect(&self, id: MatchId, participant: &ParticipantId) -> bool {
        if let Err(err) = self.ensure_seated(id, participant).await {
            debug!(match_id = %id, participant = %participant, error = %err, "disconnect ignored");
            return false;
        }
        self.teardown(id, TeardownReason::Disconnected(participant.clone()))
            .await
    }

    /// Remove a match. Idempotent; returns `true` if this call removed it.
    pub async fn teardown(&self, id: MatchId, reason: TeardownReason) -> bool {
        let Some(entry) = self.shared.matches.lock().await.remove(&id) else {
            return false;
        };

        let _ = entry.shutdown.send(true);
        info!(match_id = %id, reason = ?reason, "match torn down");
        let _ = self.shared.event_tx.send(MatchEvent::TornDown { match_id: id, reason });
        true
    }

    // === Internals ===

    async fn handle(&self, id: MatchId) -> Result<MatchHandle> {
        self.shared
            .matches
            .lock()
            .await
            .get(&id)
            .map(|entry| entry.handle.clone())
            .ok_or(OrchestratorError::NoSuchMatch(id))
    }

    async fn ensure_seated(&self, id: MatchId, participant: &ParticipantId) -> Result<()> {
        let matches = self.shared.matches.lock().await;
        let entry = matches.get(&id).ok_or(OrchestratorError::NoSuchMatch(id))?;
        if entry.views.contains_key(participant) {
            Ok(())
        } else {
            Err(OrchestratorError::UnknownParticipant {
                match_id: id,
                participant: participant.clone(),
            })
        }
    }

    /// Apply through the worker and tear down if the intent ended the match.
    async fn submit(&self, id: MatchId, participant: &ParticipantId, intent: Intent) -> Result<Applied> {
        let handle = self.handle(id).await?;
        let applied = handle
            .apply(participant.clone(), intent)
            .await
            .map_err(|err| closed_as_missing(err, id))?;

        if let Some(outcome) = &applied.outcome {
            self.finish(id, outcome).await;
        }
        Ok(applied)
    }

    async fn finish(&self, id: MatchId, outcome: &MatchOutcome) {
        debug!(match_id = %id, outcome = ?outcome, "tearing down finished match");
        self.teardown(id, TeardownReason::Finished).await;
    }

    /// Start the bot driver for a match unless one is already running.
    async fn wake_bots(&self, id: MatchId) {
        let (handle, bots, driving, cancel) = {
            let matches = self.shared.matches.lock().await;
            let Some(entry) = matches.get(&id) else {
                return;
            };
            if entry.bots.is_empty() {
                return;
            }
            (
                entry.handle.clone(),
                Arc::clone(&entry.bots),
                Arc::clone(&entry.bot_driving),
                entry.shutdown.subscribe(),
            )
        };

        if driving.swap(true, Ordering::AcqRel) {
            return;
        }

        let orchestrator = self.clone();
        tokio::spawn(async move {
            orchestrator.drive_bots(handle, bots, driving, cancel).await;
        });
    }

    /// Feed bot intents one at a time until no bot has anything to do.
    async fn drive_bots(
        self,
        handle: MatchHandle,
        bots: Arc<FxHashMap<ParticipantId, Arc<dyn TurnPolicy>>>,
        driving: Arc<AtomicBool>,
        mut cancel: watch::Receiver<bool>,
    ) {
        let id = handle.id();
        let delay = self.shared.config.bot_action_delay;

        loop {
            let Ok(snapshot) = handle.snapshot().await else {
                break;
            };
            let Some((bot, intent)) = next_bot_intent(&snapshot, &bots) else {
                driving.store(false, Ordering::Release);
                // A human intent may have landed after the snapshot while
                // the flag was still set; look once more before leaving.
                let Ok(snapshot) = handle.snapshot().await else {
                    return;
                };
                if next_bot_intent(&snapshot, &bots).is_some()
                    && !driving.swap(true, Ordering::AcqRel)
                {
                    continue;
                }
                return;
            };

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancel.changed() => break,
            }
            let cancelled = *cancel.borrow();
            if cancelled || !self.is_live(id).await {
                break;
            }

            debug!(
                match_id = %id,
                participant = %bot,
                intent = %intent.kind(),
                phase = %snapshot.phase(),
                "bot intent"
            );
            match self.submit(id, &bot, intent).await {
                Ok(applied) if applied.outcome.is_some() => break,
                Ok(_) => {}
                Err(err) => {
                    warn!(match_id = %id, participant = %bot, error = %err, "bot stopped");
                    break;
                }
            }
        }
        driving.store(false, Ordering::Release);
    }
}

/// First intent any bot wants to submit from `state`.
fn next_bot_intent(
    state: &MatchState,
    bots: &FxHashMap<ParticipantId, Arc<dyn TurnPolicy>>,
) -> Option<(ParticipantId, Intent)> {
    if state.is_over() {
        return None;
    }
    bots.iter().find_map(|(participant, policy)| {
        policy
            .plan_turn(state, participant)
            .into_iter()
            .next()
            .map(|intent| (participant.clone(), intent))
    })
}

/// A worker that went away mid-call was torn down.
fn closed_as_missing(err: OrchestratorError, id: MatchId) -> OrchestratorError {
    match err {
        OrchestratorError::WorkerClosed => OrchestratorError::NoSuchMatch(id),
        other => other,
    }
}
