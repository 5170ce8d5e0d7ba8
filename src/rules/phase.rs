//! Phase state machine.
//!
//! One function per intent. Each function checks turn ownership, the
//! phase guard and every card reference before touching the state, so an
//! `Err` always leaves the match exactly as it was.
//!
//! Turn order: `draw → mana → main → attack → [defend] → main → end turn`.

use rustc_hash::FxHashSet;

use super::combat;
use crate::core::action::{BlockAssignment, IntentKind};
use crate::core::entity::CardInstanceId;
use crate::core::error::{ConstructionError, GameError, Result};
use crate::core::player::ParticipantId;
use crate::core::state::{MatchState, ParticipantState, PendingAttack, Phase};
use crate::zones::ZoneKind;

fn require_active(state: &MatchState, actor: &ParticipantId) -> Result<()> {
    if state.active() == actor {
        Ok(())
    } else {
        Err(GameError::TurnOwnership {
            participant: actor.clone(),
            expected: state.active().clone(),
        })
    }
}

fn require_phase(state: &MatchState, intent: IntentKind, allowed: &[Phase]) -> Result<()> {
    if allowed.contains(&state.phase) {
        Ok(())
    } else {
        Err(GameError::PhaseViolation {
            intent,
            phase: state.phase,
        })
    }
}

fn seat_mut<'a>(state: &'a mut MatchState, actor: &ParticipantId) -> Result<&'a mut ParticipantState> {
    let expected = state.active().clone();
    state
        .participant_mut(actor)
        .ok_or_else(|| GameError::TurnOwnership {
            participant: actor.clone(),
            expected,
        })
}

fn in_zone(
    state: &MatchState,
    owner: &ParticipantId,
    zone: ZoneKind,
    card: CardInstanceId,
) -> Result<()> {
    match state.find_card(owner, zone, card) {
        Some(_) => Ok(()),
        None => Err(GameError::ZoneReference {
            participant: owner.clone(),
            card,
            zone,
        }),
    }
}

/// Untap the battlefield, then draw from the deck top (or take fatigue).
pub fn draw_card(state: &mut MatchState, actor: &ParticipantId) -> Result<()> {
    require_active(state, actor)?;
    require_phase(state, IntentKind::DrawCard, &[Phase::Draw])?;

    let fatigue = state.config.fatigue_damage;
    let seat = seat_mut(state, actor)?;
    seat.zones.untap_all();
    if seat.zones.draw().is_none() {
        seat.life -= fatigue;
    }

    state.phase = Phase::Mana;
    Ok(())
}

/// Commit a hand card to the mana zone. Once per turn.
pub fn play_card_as_mana(
    state: &mut MatchState,
    actor: &ParticipantId,
    card: CardInstanceId,
) -> Result<()> {
    require_active(state, actor)?;
    if state.mana_played_this_turn {
        return Err(GameError::ManaAlreadyPlayed);
    }
    require_phase(state, IntentKind::PlayCardAsMana, &[Phase::Mana])?;

    let category = state
        .find_card(actor, ZoneKind::Hand, card)
        .map(|c| c.category)
        .ok_or_else(|| GameError::ZoneReference {
            participant: actor.clone(),
            card,
            zone: ZoneKind::Hand,
        })?;
    let value = state.config.mana_table.value_of(category);

    let seat = seat_mut(state, actor)?;
    seat.zones.move_card(card, ZoneKind::Hand, ZoneKind::ManaZone);
    seat.mana += value;

    state.mana_played_this_turn = true;
    state.phase = Phase::Main;
    Ok(())
}

/// Skip the optional mana play, or decline to attack.
pub fn pass_phase(state: &mut MatchState, actor: &ParticipantId) -> Result<()> {
    require_active(state, actor)?;
    require_phase(state, IntentKind::PassPhase, &[Phase::Mana, Phase::Attack])?;

    state.phase = Phase::Main;
    Ok(())
}

/// Pay for a unit and put it onto the battlefield, tapped.
pub fn play_unit_card(
    state: &mut MatchState,
    actor: &ParticipantId,
    card: CardInstanceId,
) -> Result<()> {
    require_active(state, actor)?;
    require_phase(state, IntentKind::PlayUnitCard, &[Phase::Main])?;

    let unit = state
        .find_card(actor, ZoneKind::Hand, card)
        .ok_or_else(|| GameError::ZoneReference {
            participant: actor.clone(),
            card,
            zone: ZoneKind::Hand,
        })?;
    if !unit.is_deployable() {
        return Err(GameError::NotDeployable { card });
    }
    let cost = unit.cost;

    let seat = seat_mut(state, actor)?;
    if cost > seat.mana {
        return Err(GameError::InsufficientMana {
            cost,
            available: seat.mana,
        });
    }

    seat.mana -= cost;
    if let Some(unit) = seat.zones.move_card(card, ZoneKind::Hand, ZoneKind::Battlefield) {
        // Summoning sickness.
        unit.tapped = true;
    }
    Ok(())
}

pub fn enter_attack_phase(state: &mut MatchState, actor: &ParticipantId) -> Result<()> {
    require_active(state, actor)?;
    require_phase(state, IntentKind::EnterAttackPhase, &[Phase::Main])?;

    state.phase = Phase::Attack;
    Ok(())
}

/// Tap the chosen attackers and either wait for blocks or resolve at once.
///
/// An empty list returns to `main` without combat. If the defender has no
/// battlefield units, every attacker is unblocked and combat resolves
/// immediately.
pub fn declare_attack(
    state: &mut MatchState,
    actor: &ParticipantId,
    attackers: &[CardInstanceId],
) -> Result<()> {
    require_active(state, actor)?;
    require_phase(state, IntentKind::DeclareAttack, &[Phase::Attack])?;

    let mut seen = FxHashSet::default();
    for &id in attackers {
        if !seen.insert(id) {
            return Err(GameError::DuplicateAttacker { card: id });
        }
        let unit = state
            .find_card(actor, ZoneKind::Battlefield, id)
            .ok_or_else(|| GameError::ZoneReference {
                participant: actor.clone(),
                card: id,
                zone: ZoneKind::Battlefield,
            })?;
        if unit.tapped {
            return Err(GameError::UnitTapped { card: id });
        }
    }

    if attackers.is_empty() {
        state.phase = Phase::Main;
        return Ok(());
    }

    let seat = seat_mut(state, actor)?;
    for &id in attackers {
        if let Some(unit) = seat.zones.unit_mut(id) {
            unit.tapped = true;
        }
    }

    let pending = PendingAttack::unblocked(attackers.iter().copied());
    let defender_has_units = state
        .participant(state.defender())
        .is_some_and(|p| !p.battlefield().is_empty());

    if defender_has_units {
        state.pending_attack = Some(pending);
        state.phase = Phase::Defend;
    } else {
        combat::resolve(state, &pending);
        state.phase = Phase::Main;
    }
    Ok(())
}

/// Assign blockers to the pending attackers and resolve combat.
///
/// Attackers left out of `assignments` are unblocked. A defending unit may
/// block at most one attacker; tapped units may block.
pub fn declare_defense(
    state: &mut MatchState,
    actor: &ParticipantId,
    assignments: &[BlockAssignment],
) -> Result<()> {
    require_phase(state, IntentKind::DeclareDefense, &[Phase::Defend])?;
    if state.defender() != actor {
        return Err(GameError::TurnOwnership {
            participant: actor.clone(),
            expected: state.defender().clone(),
        });
    }

    let mut pending = state
        .pending_attack
        .clone()
        .ok_or(GameError::PhaseViolation {
            intent: IntentKind::DeclareDefense,
            phase: state.phase,
        })?;

    let mut assigned_attackers = FxHashSet::default();
    let mut used_blockers = FxHashSet::default();
    for assignment in assignments {
        if !pending.contains(assignment.attacker) {
            return Err(GameError::NotAttacking {
                card: assignment.attacker,
            });
        }
        if !assigned_attackers.insert(assignment.attacker) {
            return Err(GameError::DuplicateAttacker {
                card: assignment.attacker,
            });
        }
        for &blocker in &assignment.blockers {
            if !used_blockers.insert(blocker) {
                return Err(ConstructionError::DuplicateBlocker { defender: blocker }.into());
            }
            in_zone(state, actor, ZoneKind::Battlefield, blocker)?;
        }
    }

    for pair in &mut pending.pairs {
        if let Some(assignment) = assignments.iter().find(|a| a.attacker == pair.attacker) {
            pair.blockers = assignment.blockers.clone();
        }
    }

    combat::resolve(state, &pending);
    state.pending_attack = None;
    state.phase = Phase::Main;
    Ok(())
}

/// Hand the turn to the opponent. Not allowed while blocks are pending.
pub fn end_turn(state: &mut MatchState, actor: &ParticipantId) -> Result<()> {
    require_active(state, actor)?;
    require_phase(
        state,
        IntentKind::EndTurn,
        &[Phase::Draw, Phase::Mana, Phase::Main, Phase::Attack],
    )?;

    state.turn += 1;
    state.mana_played_this_turn = false;
    state.pending_attack = None;
    state.phase = Phase::Draw;
    Ok(())
}
