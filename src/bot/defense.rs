//! Block planning for the defending side.
//!
//! Attackers are taken strongest first. Each gets the cheapest unused unit
//! that survives it. If what is left unblocked would still be lethal (or
//! chump blocks are always on), remaining attackers are thrown the
//! weakest leftover units.

use std::cmp::Reverse;

use super::config::BotConfig;
use super::evaluate::by_score;
use crate::cards::CardInstance;
use crate::core::action::{BlockAssignment, BlockerList, DefenseAssignments};
use crate::core::player::ParticipantId;
use crate::core::state::MatchState;
use crate::zones::ZoneKind;

/// Block assignments for `me` against the pending attack.
///
/// Returns an empty list if there is nothing to block or `me` is not the
/// defender.
#[must_use]
pub fn plan_defense(state: &MatchState, me: &ParticipantId, config: &BotConfig) -> DefenseAssignments {
    let Some(pending) = state.pending_attack() else {
        return Vec::new();
    };
    if state.defender() != me {
        return Vec::new();
    }
    let Some(seat) = state.participant(me) else {
        return Vec::new();
    };

    let mut attackers: Vec<&CardInstance> = pending
        .attackers()
        .filter_map(|id| state.find_card(state.active(), ZoneKind::Battlefield, id))
        .collect();
    attackers.sort_by_key(|a| (Reverse(a.attack), a.id));

    let mut pool: Vec<&CardInstance> = seat.battlefield().iter().collect();
    pool.sort_by(|a, b| by_score(a, b, config));

    let mut blocked = vec![false; attackers.len()];
    let mut assignments = DefenseAssignments::new();

    for (i, attacker) in attackers.iter().enumerate() {
        if let Some(pos) = pool.iter().position(|unit| unit.health > attacker.attack) {
            let unit = pool.remove(pos);
            assignments.push(assign(attacker, unit));
            blocked[i] = true;
        }
    }

    let incoming = |blocked: &[bool]| -> i64 {
        attackers
            .iter()
            .zip(blocked)
            .filter(|(_, done)| !**done)
            .map(|(a, _)| a.attack)
            .sum()
    };

    for (i, attacker) in attackers.iter().enumerate() {
        if blocked[i] || pool.is_empty() {
            continue;
        }
        if config.block_when_lethal_only && incoming(&blocked) < seat.life {
            break;
        }
        let unit = pool.remove(0);
        assignments.push(assign(attacker, unit));
        blocked[i] = true;
    }

    assignments
}

fn assign(attacker: &CardInstance, unit: &CardInstance) -> BlockAssignment {
    let mut blockers = BlockerList::new();
    blockers.push(unit.id);
    BlockAssignment {
        attacker: attacker.id,
        blockers,
    }
}
