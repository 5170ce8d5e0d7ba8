//! Combat resolution.
//!
//! Every attacker/blocker pair is evaluated against the pre-combat
//! battlefield, then all deaths and life loss are applied together:
//!
//! - A blocked attacker dies if the blockers' summed attack is at least its
//!   health.
//! - Each blocker takes the attacker's full attack (no splitting) and dies
//!   if that is at least its health.
//! - An unblocked attacker deals its attack to the defending participant.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::entity::CardInstanceId;
use crate::core::state::{MatchState, PendingAttack};
use crate::zones::ZoneKind;

/// What a combat step did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    pub dead_attackers: Vec<CardInstanceId>,
    pub dead_blockers: Vec<CardInstanceId>,
    /// Life lost by the defending participant.
    pub damage_to_defender: i64,
}

/// Compute the result of `attack` without mutating anything.
///
/// The active participant owns the attackers, the defender owns the
/// blockers. Ids that no longer reference a battlefield unit are ignored.
#[must_use]
pub fn evaluate(state: &MatchState, attack: &PendingAttack) -> CombatReport {
    let attacker_side = state.active();
    let defender_side = state.defender();
    let mut report = CombatReport::default();

    for pair in &attack.pairs {
        let Some(attacker) = state.find_card(attacker_side, ZoneKind::Battlefield, pair.attacker)
        else {
            continue;
        };

        let blockers: Vec<_> = pair
            .blockers
            .iter()
            .filter_map(|&id| state.find_card(defender_side, ZoneKind::Battlefield, id))
            .collect();

        if blockers.is_empty() {
            report.damage_to_defender += attacker.attack;
            continue;
        }

        let blocking_attack: i64 = blockers.iter().map(|b| b.attack).sum();
        if blocking_attack >= attacker.health {
            report.dead_attackers.push(attacker.id);
        }
        report.dead_blockers.extend(
            blockers
                .iter()
                .filter(|b| attacker.attack >= b.health)
                .map(|b| b.id),
        );
    }

    report
}

/// Apply a report computed by [`evaluate`].
pub fn apply(state: &mut MatchState, report: &CombatReport) {
    let attacker_side = state.active().clone();
    let defender_side = state.defender().clone();

    let dead_attackers: FxHashSet<_> = report.dead_attackers.iter().copied().collect();
    let dead_blockers: FxHashSet<_> = report.dead_blockers.iter().copied().collect();

    if let Some(seat) = state.participant_mut(&attacker_side) {
        seat.casualties += seat
            .zones
            .remove_from_battlefield(|id| dead_attackers.contains(&id));
    }
    if let Some(seat) = state.participant_mut(&defender_side) {
        seat.casualties += seat
            .zones
            .remove_from_battlefield(|id| dead_blockers.contains(&id));
        seat.life -= report.damage_to_defender;
    }
}

/// Evaluate and apply `attack` in one step.
pub fn resolve(state: &mut MatchState, attack: &PendingAttack) -> CombatReport {
    let report = evaluate(state, attack);
    debug!(
        attackers = attack.len(),
        dead_attackers = report.dead_attackers.len(),
        dead_blockers = report.dead_blockers.len(),
        damage = report.damage_to_defender,
        "combat resolved"
    );
    apply(state, &report);
    report
}
