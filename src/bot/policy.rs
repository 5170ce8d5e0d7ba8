//! Turn policies: read-only snapshot in, ordered intents out.
//!
//! A policy never mutates the match. The orchestrator feeds each intent
//! through the same `apply_intent` path a human uses.

use tracing::debug;

use super::config::BotConfig;
use super::defense::plan_defense;
use super::evaluate::{by_score, weakest};
use crate::cards::CardInstance;
use crate::core::action::{Intent, IntentKind};
use crate::core::entity::CardInstanceId;
use crate::core::player::ParticipantId;
use crate::core::state::{MatchState, Phase};

/// Something that can decide what a participant does next.
pub trait TurnPolicy: Send + Sync {
    /// Intents `me` should submit from the current state, in order.
    ///
    /// Empty if `me` has nothing to do right now (not their turn, or
    /// waiting on the opponent's blocks).
    fn plan_turn(&self, state: &MatchState, me: &ParticipantId) -> Vec<Intent>;
}

/// The scripted opponent.
///
/// - Mana: commit the weakest hand card, or pass with an empty hand.
/// - Main: deploy the strongest affordable cards, greedily.
/// - Attack: always enter; swing with every untapped unit, or pass.
/// - End the turn.
///
/// Planning starts from the snapshot's phase, so the same bot can pick up
/// a turn midway (after a draw, or after the opponent answered an attack).
#[derive(Clone, Debug, Default)]
pub struct ScriptedBot {
    config: BotConfig,
}

/// The bot's running picture of its own side while it plans ahead.
struct Simulation {
    phase: Phase,
    mana: i64,
    mana_played: bool,
    hand: Vec<CardInstance>,
    /// Battlefield unit ids with their tapped flag.
    units: Vec<(CardInstanceId, bool)>,
    attacked: bool,
}

impl ScriptedBot {
    #[must_use]
    pub fn new(config: BotConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    fn plan_mana(&self, state: &MatchState, sim: &mut Simulation, plan: &mut Vec<Intent>) {
        let choice = if sim.mana_played {
            None
        } else {
            weakest(&sim.hand, &self.config).map(|card| (card.id, card.category))
        };

        match choice {
            Some((card, category)) => {
                sim.hand.retain(|c| c.id != card);
                sim.mana += state.config().mana_table.value_of(category);
                sim.mana_played = true;
                plan.push(Intent::PlayCardAsMana { card });
            }
            None => plan.push(Intent::PassPhase),
        }
        sim.phase = Phase::Main;
    }

    fn plan_main(&self, sim: &mut Simulation, plan: &mut Vec<Intent>) {
        let mut candidates: Vec<CardInstance> = sim
            .hand
            .iter()
            .filter(|c| c.is_deployable())
            .cloned()
            .collect();
        candidates.sort_by(|a, b| by_score(b, a, &self.config));

        for card in candidates {
            if card.cost > sim.mana {
                continue;
            }
            sim.mana -= card.cost;
            sim.hand.retain(|c| c.id != card.id);
            sim.units.push((card.id, true));
            plan.push(Intent::PlayUnitCard { card: card.id });
        }
    }

    fn plan_attack(&self, sim: &mut Simulation, plan: &mut Vec<Intent>) {
        let ready: Vec<CardInstanceId> = sim
            .units
            .iter()
            .filter(|(_, tapped)| !tapped)
            .map(|(id, _)| *id)
            .collect();

        if ready.is_empty() {
            plan.push(Intent::PassPhase);
        } else {
            for unit in &mut sim.units {
                unit.1 = true;
            }
            plan.push(Intent::declare_attack(ready));
        }
        sim.attacked = true;
        sim.phase = Phase::Main;
    }
}

/// Whether `me` already declared an attack (or passed on one) this turn.
fn attacked_this_turn(state: &MatchState, me: &ParticipantId) -> bool {
    state
        .history()
        .iter()
        .rev()
        .take_while(|record| record.turn == state.turn())
        .any(|record| {
            &record.participant == me
                && match record.intent.kind() {
                    IntentKind::DeclareAttack => true,
                    IntentKind::PassPhase => passed_from_attack(state, record.sequence),
                    _ => false,
                }
        })
}

/// Whether the `PassPhase` at `sequence` declined an attack (it directly
/// follows `EnterAttackPhase`).
fn passed_from_attack(state: &MatchState, sequence: u32) -> bool {
    sequence
        .checked_sub(1)
        .and_then(|prev| state.history().get(prev as usize))
        .is_some_and(|prev| prev.intent.kind() == IntentKind::EnterAttackPhase)
}

impl TurnPolicy for ScriptedBot {
    fn plan_turn(&self, state: &MatchState, me: &ParticipantId) -> Vec<Intent> {
        if state.phase() == Phase::Defend {
            if state.defender() != me {
                return Vec::new();
            }
            let assignments = plan_defense(state, me, &self.config);
            debug!(participant = %me, blocks = assignments.len(), "bot planned defense");
            return vec![Intent::DeclareDefense { assignments }];
        }
        if state.active() != me {
            return Vec::new();
        }
        let Some(seat) = state.participant(me) else {
            return Vec::new();
        };

        let mut sim = Simulation {
            phase: state.phase(),
            mana: seat.mana,
            mana_played: state.mana_played_this_turn(),
            hand: seat.hand().iter().cloned().collect(),
            units: seat.battlefield().iter().map(|u| (u.id, u.tapped)).collect(),
            attacked: attacked_this_turn(state, me),
        };
        let mut plan = Vec::new();

        if sim.phase == Phase::Draw {
            plan.push(Intent::DrawCard);
            for unit in &mut sim.units {
                unit.1 = false;
            }
            sim.phase = Phase::Mana;
        }
        if sim.phase == Phase::Mana {
            self.plan_mana(state, &mut sim, &mut plan);
        }
        if sim.phase == Phase::Main {
            self.plan_main(&mut sim, &mut plan);
            if !sim.attacked {
                plan.push(Intent::EnterAttackPhase);
                sim.phase = Phase::Attack;
            }
        }
        if sim.phase == Phase::Attack {
            self.plan_attack(&mut sim, &mut plan);
        }
        plan.push(Intent::EndTurn);

        debug!(
            participant = %me,
            phase = %state.phase(),
            intents = plan.len(),
            "bot planned turn"
        );
        plan
    }
}
