//! Personalized views: what one participant is allowed to see.
//!
//! A view carries everything public about the match plus the viewer's own
//! hand. The opponent's hand is reduced to a count, and neither deck's
//! order is ever exposed.

use serde::{Deserialize, Serialize};

use super::player::ParticipantId;
use super::state::{MatchState, ParticipantState, PendingAttack, Phase};
use crate::cards::CardInstance;

/// The viewer's own side of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnSideView {
    pub id: ParticipantId,
    pub life: i64,
    pub mana: i64,
    pub hand: Vec<CardInstance>,
    pub deck_size: usize,
    pub battlefield: Vec<CardInstance>,
    pub mana_zone: Vec<CardInstance>,
}

/// The opponent's side, with the hand hidden.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentSideView {
    pub id: ParticipantId,
    pub life: i64,
    pub mana: i64,
    pub hand_count: usize,
    pub deck_size: usize,
    pub battlefield: Vec<CardInstance>,
    pub mana_zone: Vec<CardInstance>,
}

/// Projection of a match for one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedView {
    pub turn: u32,
    pub phase: Phase,
    pub active: ParticipantId,
    pub mana_played_this_turn: bool,
    pub pending_attack: Option<PendingAttack>,
    pub you: OwnSideView,
    pub opponent: OpponentSideView,
}

impl PersonalizedView {
    /// Build the view for `viewer`, or `None` if they hold no seat.
    #[must_use]
    pub fn new(state: &MatchState, viewer: &ParticipantId) -> Option<Self> {
        let opponent_id = state.opponent_of(viewer)?;
        let own = state.participant(viewer)?;
        let other = state.participant(opponent_id)?;

        Some(Self {
            turn: state.turn(),
            phase: state.phase(),
            active: state.active().clone(),
            mana_played_this_turn: state.mana_played_this_turn(),
            pending_attack: state.pending_attack().cloned(),
            you: OwnSideView {
                id: viewer.clone(),
                life: own.life,
                mana: own.mana,
                hand: own.hand().iter().cloned().collect(),
                deck_size: own.deck().len(),
                battlefield: own.battlefield().iter().cloned().collect(),
                mana_zone: own.mana_zone().iter().cloned().collect(),
            },
            opponent: opponent_side(opponent_id, other),
        })
    }

    /// Whether the viewer is the participant expected to act next.
    #[must_use]
    pub fn is_your_turn(&self) -> bool {
        if self.phase == Phase::Defend {
            self.active != self.you.id
        } else {
            self.active == self.you.id
        }
    }
}

fn opponent_side(id: &ParticipantId, state: &ParticipantState) -> OpponentSideView {
    OpponentSideView {
        id: id.clone(),
        life: state.life,
        mana: state.mana,
        hand_count: state.hand().len(),
        deck_size: state.deck().len(),
        battlefield: state.battlefield().iter().cloned().collect(),
        mana_zone: state.mana_zone().iter().cloned().collect(),
    }
}

impl MatchState {
    /// Personalized view for `viewer`, or `None` if they hold no seat.
    #[must_use]
    pub fn view_for(&self, viewer: &ParticipantId) -> Option<PersonalizedView> {
        PersonalizedView::new(self, viewer)
    }
}
