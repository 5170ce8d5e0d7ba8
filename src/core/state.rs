//! Match state: the authoritative data every rule reads and mutates.
//!
//! ## ParticipantState
//!
//! Life, mana pool and the four zones of one participant, plus a count of
//! units lost in combat so card conservation stays checkable.
//!
//! ## MatchState
//!
//! Both participant states (keyed by identity, never by position), the
//! turn counter whose parity selects the active participant, the current
//! phase, the once-per-turn mana flag, the pending attack and the applied
//! intent history.
//!
//! Uses `im` persistent structures so a snapshot handed to a bot or an
//! observer is an O(1) clone.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::action::{BlockAssignment, BlockerList, IntentRecord};
use super::config::MatchConfig;
use super::entity::CardInstanceId;
use super::error::ConstructionError;
use super::player::{ParticipantId, ParticipantMap};
use super::rng::GameRng;
use crate::cards::CardInstance;
use crate::zones::{ZoneKind, Zones};

/// Per-turn phases, in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Draw,
    Mana,
    Main,
    Attack,
    /// Waiting on the defender's block assignments.
    Defend,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Draw => "draw",
            Phase::Mana => "mana",
            Phase::Main => "main",
            Phase::Attack => "attack",
            Phase::Defend => "defend",
        };
        f.write_str(label)
    }
}

/// Everything one participant owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantState {
    /// May go to zero or below; that is how defeat is signalled.
    pub life: i64,

    /// Accumulated from the mana zone; only spending lowers it.
    pub mana: i64,

    pub zones: Zones,

    /// Units removed from the battlefield by combat.
    pub casualties: usize,
}

impl ParticipantState {
    /// Seat a participant with a shuffled deck and deal the opening hand.
    #[must_use]
    pub fn new(life: i64, deck: Vec<CardInstance>, opening_hand: usize) -> Self {
        let mut zones = Zones::with_deck(deck);
        for _ in 0..opening_hand {
            if zones.draw().is_none() {
                break;
            }
        }

        Self {
            life,
            mana: 0,
            zones,
            casualties: 0,
        }
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        self.zones.hand()
    }

    #[must_use]
    pub fn deck(&self) -> &Vector<CardInstance> {
        self.zones.deck()
    }

    #[must_use]
    pub fn battlefield(&self) -> &Vector<CardInstance> {
        self.zones.battlefield()
    }

    #[must_use]
    pub fn mana_zone(&self) -> &Vector<CardInstance> {
        self.zones.mana_zone()
    }

    /// Cards still in play plus those lost in combat.
    #[must_use]
    pub fn cards_accounted(&self) -> usize {
        self.zones.total_cards() + self.casualties
    }

    /// Whether this participant has lost.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.life <= 0
    }
}

/// Attackers awaiting the defender's response, with blockers assigned so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAttack {
    pub pairs: Vec<BlockAssignment>,
}

impl PendingAttack {
    /// Pending attack with no blockers assigned yet.
    pub fn unblocked(attackers: impl IntoIterator<Item = CardInstanceId>) -> Self {
        Self {
            pairs: attackers
                .into_iter()
                .map(|attacker| BlockAssignment {
                    attacker,
                    blockers: BlockerList::new(),
                })
                .collect(),
        }
    }

    /// Declared attackers, in declaration order.
    pub fn attackers(&self) -> impl Iterator<Item = CardInstanceId> + '_ {
        self.pairs.iter().map(|pair| pair.attacker)
    }

    #[must_use]
    pub fn contains(&self, attacker: CardInstanceId) -> bool {
        self.pairs.iter().any(|pair| pair.attacker == attacker)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Authoritative state of one match.
///
/// Fields are mutated only by the rule operations in `crate::rules`; every
/// operation validates before it mutates, so a rejected intent leaves the
/// state untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) config: MatchConfig,
    pub(crate) participants: ParticipantMap<ParticipantState>,
    pub(crate) turn: u32,
    pub(crate) phase: Phase,
    pub(crate) mana_played_this_turn: bool,
    pub(crate) pending_attack: Option<PendingAttack>,
    pub(crate) history: Vector<IntentRecord>,
}

impl MatchState {
    /// Create a match from two seats and one deck per seat.
    ///
    /// Each deck must hold exactly `config.deck_size` cards and no card
    /// instance may appear twice across both decks. Decks are shuffled
    /// independently (uniform permutation seeded from `config.seed` and the
    /// participant id) and `config.opening_hand_size` cards are dealt.
    /// The participant in the first seat acts first.
    pub fn new(
        config: MatchConfig,
        seating: [ParticipantId; 2],
        decks: impl IntoIterator<Item = (ParticipantId, Vec<CardInstance>)>,
    ) -> Result<Self, ConstructionError> {
        let mut decks: FxHashMap<ParticipantId, Vec<CardInstance>> = decks.into_iter().collect();

        if let Some(stray) = decks.keys().find(|id| !seating.contains(id)) {
            return Err(ConstructionError::UnknownParticipant {
                participant: stray.clone(),
            });
        }

        let rng = GameRng::new(config.seed);
        let mut seen = FxHashSet::default();

        let participants = ParticipantMap::try_new(seating, |id| {
            let mut deck = decks
                .remove(id)
                .ok_or_else(|| ConstructionError::MissingDeck { participant: id.clone() })?;

            if deck.len() != config.deck_size {
                return Err(ConstructionError::DeckSize {
                    participant: id.clone(),
                    expected: config.deck_size,
                    actual: deck.len(),
                });
            }

            if let Some(card) = deck.iter().find(|card| !seen.insert(card.id)) {
                return Err(ConstructionError::DuplicateCardInstance { card: card.id });
            }

            rng.for_context(id.as_str()).shuffle(&mut deck);
            Ok(ParticipantState::new(
                config.starting_life,
                deck,
                config.opening_hand_size,
            ))
        })?;

        Ok(Self {
            config,
            participants,
            turn: 0,
            phase: Phase::Draw,
            mana_played_this_turn: false,
            pending_attack: None,
            history: Vector::new(),
        })
    }

    // === Read access ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Completed turns so far; parity selects the active participant.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn mana_played_this_turn(&self) -> bool {
        self.mana_played_this_turn
    }

    /// Set only while the phase is `Defend`.
    #[must_use]
    pub fn pending_attack(&self) -> Option<&PendingAttack> {
        self.pending_attack.as_ref()
    }

    /// Applied intents, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<IntentRecord> {
        &self.history
    }

    #[must_use]
    pub fn seating(&self) -> &[ParticipantId; 2] {
        self.participants.seating()
    }

    #[must_use]
    pub fn participants(&self) -> &ParticipantMap<ParticipantState> {
        &self.participants
    }

    /// Participant whose turn it is.
    #[must_use]
    pub fn active(&self) -> &ParticipantId {
        self.participants.seat(self.turn)
    }

    /// Participant waiting for their turn (and defending any attack).
    #[must_use]
    pub fn defender(&self) -> &ParticipantId {
        self.participants.seat(self.turn.wrapping_add(1))
    }

    #[must_use]
    pub fn participant(&self, id: &ParticipantId) -> Option<&ParticipantState> {
        self.participants.get(id)
    }

    #[must_use]
    pub fn opponent_of(&self, id: &ParticipantId) -> Option<&ParticipantId> {
        self.participants.opponent_of(id)
    }

    /// Locate a card owned by `owner` in one of their zones.
    #[must_use]
    pub fn find_card(
        &self,
        owner: &ParticipantId,
        zone: ZoneKind,
        card: CardInstanceId,
    ) -> Option<&CardInstance> {
        self.participants.get(owner)?.zones.find(zone, card)
    }

    /// Whether any participant is at or below zero life.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.participants.iter().any(|(_, p)| p.is_defeated())
    }

    /// Cards in zones plus casualties, summed over both participants.
    ///
    /// Constant for the whole match: `2 * deck_size`.
    #[must_use]
    pub fn cards_accounted(&self) -> usize {
        self.participants.iter().map(|(_, p)| p.cards_accounted()).sum()
    }

    // === Mutation helpers for rule operations ===

    pub(crate) fn participant_mut(&mut self, id: &ParticipantId) -> Option<&mut ParticipantState> {
        self.participants.get_mut(id)
    }

    /// Append to history. `turn` is the turn the intent was submitted in,
    /// which differs from `self.turn` after an `EndTurn`.
    pub(crate) fn record(&mut self, participant: ParticipantId, intent: super::action::Intent, turn: u32) {
        let sequence = self.history.len() as u32;
        self.history.push_back(IntentRecord {
            participant,
            intent,
            turn,
            sequence,
        });
    }
}
