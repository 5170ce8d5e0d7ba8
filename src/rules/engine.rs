//! Intent dispatch and match-end detection.
//!
//! `apply_intent` is the single entry point through which humans, bots and
//! the orchestrator change a match. It routes the intent to the matching
//! phase operation, records it in the history on success, and never
//! mutates on failure.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::phase;
use crate::core::action::{Intent, IntentKind};
use crate::core::error::Result;
use crate::core::player::ParticipantId;
use crate::core::state::{MatchState, Phase};

/// Result of a finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(ParticipantId),
    /// Both participants fell to zero or below in the same step.
    Draw,
}

impl MatchOutcome {
    /// Check if a participant won.
    #[must_use]
    pub fn is_winner(&self, participant: &ParticipantId) -> bool {
        match self {
            MatchOutcome::Winner(p) => p == participant,
            MatchOutcome::Draw => false,
        }
    }
}

/// Validate and apply one intent.
///
/// On `Err` the state is unchanged.
pub fn apply_intent(state: &mut MatchState, actor: &ParticipantId, intent: &Intent) -> Result<()> {
    let phase_before = state.phase();
    let turn_before = state.turn();

    let applied = match intent {
        Intent::DrawCard => phase::draw_card(state, actor),
        Intent::PlayCardAsMana { card } => phase::play_card_as_mana(state, actor, *card),
        Intent::PlayUnitCard { card } => phase::play_unit_card(state, actor, *card),
        Intent::PassPhase => phase::pass_phase(state, actor),
        Intent::EnterAttackPhase => phase::enter_attack_phase(state, actor),
        Intent::DeclareAttack { attackers } => phase::declare_attack(state, actor, attackers),
        Intent::DeclareDefense { assignments } => {
            phase::declare_defense(state, actor, assignments)
        }
        Intent::EndTurn => phase::end_turn(state, actor),
    };
    applied?;

    debug!(
        participant = %actor,
        intent = %intent.kind(),
        from = %phase_before,
        to = %state.phase(),
        turn = state.turn(),
        "intent applied"
    );
    state.record(actor.clone(), intent.clone(), turn_before);
    Ok(())
}

/// Check if the match is over.
///
/// Returns `Some(outcome)` once any participant is at zero life or below.
#[must_use]
pub fn is_terminal(state: &MatchState) -> Option<MatchOutcome> {
    let [first, second] = state.seating();
    let defeated = |id: &ParticipantId| state.participant(id).is_some_and(|p| p.is_defeated());

    match (defeated(first), defeated(second)) {
        (false, false) => None,
        (true, true) => Some(MatchOutcome::Draw),
        (true, false) => Some(MatchOutcome::Winner(second.clone())),
        (false, true) => Some(MatchOutcome::Winner(first.clone())),
    }
}

/// Intent kinds `actor` may submit right now, ignoring card arguments.
///
/// Empty if `actor` cannot act.
#[must_use]
pub fn legal_intent_kinds(state: &MatchState, actor: &ParticipantId) -> Vec<IntentKind> {
    if state.phase() == Phase::Defend {
        return if state.defender() == actor {
            vec![IntentKind::DeclareDefense]
        } else {
            Vec::new()
        };
    }
    if state.active() != actor {
        return Vec::new();
    }

    let mut kinds = match state.phase() {
        Phase::Draw => vec![IntentKind::DrawCard],
        Phase::Mana => vec![IntentKind::PlayCardAsMana, IntentKind::PassPhase],
        Phase::Main => vec![IntentKind::PlayUnitCard, IntentKind::EnterAttackPhase],
        Phase::Attack => vec![IntentKind::DeclareAttack, IntentKind::PassPhase],
        Phase::Defend => Vec::new(),
    };
    if state.mana_played_this_turn() {
        kinds.retain(|kind| *kind != IntentKind::PlayCardAsMana);
    }
    kinds.push(IntentKind::EndTurn);
    kinds
}

impl MatchState {
    /// Outcome if the match is over.
    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        is_terminal(self)
    }
}
