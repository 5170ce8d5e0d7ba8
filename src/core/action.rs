//! Intents: the requests participants (human or bot) submit to the engine.
//!
//! An intent names one engine-level action plus the card ids it refers to.
//! The engine validates it against the current phase and ownership rules
//! before anything is mutated. Bots and humans produce the same intents,
//! so the engine cannot tell them apart.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::CardInstanceId;
use super::player::ParticipantId;

/// Attackers declared in one `DeclareAttack`.
pub type AttackerList = SmallVec<[CardInstanceId; 4]>;

/// Blockers assigned to one attacker.
pub type BlockerList = SmallVec<[CardInstanceId; 2]>;

/// Blocking units assigned to one attacker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAssignment {
    #[serde(rename = "attackerId")]
    pub attacker: CardInstanceId,

    #[serde(rename = "blockerIds")]
    pub blockers: BlockerList,
}

/// All block assignments of one `DeclareDefense`, at most one per attacker.
pub type DefenseAssignments = Vec<BlockAssignment>;

/// A single engine-level request.
///
/// Serialized with a `type` tag, e.g. `{"type":"playUnitCard","cardId":12}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    DrawCard,
    PlayCardAsMana {
        #[serde(rename = "cardId")]
        card: CardInstanceId,
    },
    PlayUnitCard {
        #[serde(rename = "cardId")]
        card: CardInstanceId,
    },
    PassPhase,
    EnterAttackPhase,
    DeclareAttack {
        #[serde(rename = "attackerIds")]
        attackers: AttackerList,
    },
    DeclareDefense {
        assignments: DefenseAssignments,
    },
    EndTurn,
}

impl Intent {
    /// Build a `DeclareAttack` from any id iterator.
    pub fn declare_attack(attackers: impl IntoIterator<Item = CardInstanceId>) -> Self {
        Intent::DeclareAttack {
            attackers: attackers.into_iter().collect(),
        }
    }

    /// Build a `DeclareDefense` from `(attacker, blockers)` pairs.
    pub fn declare_defense<B>(pairs: impl IntoIterator<Item = (CardInstanceId, B)>) -> Self
    where
        B: IntoIterator<Item = CardInstanceId>,
    {
        Intent::DeclareDefense {
            assignments: pairs
                .into_iter()
                .map(|(attacker, blockers)| BlockAssignment {
                    attacker,
                    blockers: blockers.into_iter().collect(),
                })
                .collect(),
        }
    }

    /// The kind of this intent, without its payload.
    #[must_use]
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::DrawCard => IntentKind::DrawCard,
            Intent::PlayCardAsMana { .. } => IntentKind::PlayCardAsMana,
            Intent::PlayUnitCard { .. } => IntentKind::PlayUnitCard,
            Intent::PassPhase => IntentKind::PassPhase,
            Intent::EnterAttackPhase => IntentKind::EnterAttackPhase,
            Intent::DeclareAttack { .. } => IntentKind::DeclareAttack,
            Intent::DeclareDefense { .. } => IntentKind::DeclareDefense,
            Intent::EndTurn => IntentKind::EndTurn,
        }
    }
}

/// Payload-free intent discriminant, for errors and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentKind {
    DrawCard,
    PlayCardAsMana,
    PlayUnitCard,
    PassPhase,
    EnterAttackPhase,
    DeclareAttack,
    DeclareDefense,
    EndTurn,
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IntentKind::DrawCard => "draw",
            IntentKind::PlayCardAsMana => "play as mana",
            IntentKind::PlayUnitCard => "play unit",
            IntentKind::PassPhase => "pass phase",
            IntentKind::EnterAttackPhase => "enter attack",
            IntentKind::DeclareAttack => "declare attack",
            IntentKind::DeclareDefense => "declare defense",
            IntentKind::EndTurn => "end turn",
        };
        f.write_str(label)
    }
}

/// A successfully applied intent, kept in the match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// Who submitted it.
    pub participant: ParticipantId,

    /// What was applied.
    pub intent: Intent,

    /// Turn counter at the time it was applied.
    pub turn: u32,

    /// Position in the match-wide history.
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(Intent::DrawCard.kind(), IntentKind::DrawCard);
        assert_eq!(
            Intent::PlayUnitCard { card: CardInstanceId(1) }.kind(),
            IntentKind::PlayUnitCard
        );
        assert_eq!(Intent::declare_attack(std::iter::empty()).kind(), IntentKind::DeclareAttack);
    }

    #[test]
    fn test_declare_defense_builder() {
        let intent = Intent::declare_defense([
            (CardInstanceId(1), vec![CardInstanceId(10), CardInstanceId(11)]),
            (CardInstanceId(2), vec![]),
        ]);

        let Intent::DeclareDefense { assignments } = intent else {
            panic!("expected a defense");
        };
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].attacker, CardInstanceId(1));
        assert_eq!(assignments[0].blockers.as_slice(), &[CardInstanceId(10), CardInstanceId(11)]);
        assert!(assignments[1].blockers.is_empty());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Intent::PlayCardAsMana { card: CardInstanceId(5) }).unwrap();
        assert_eq!(json, r#"{"type":"playCardAsMana","cardId":5}"#);

        let parsed: Intent = serde_json::from_str(r#"{"type":"declareAttack","attackerIds":[3,4]}"#).unwrap();
        assert_eq!(parsed, Intent::declare_attack([CardInstanceId(3), CardInstanceId(4)]));

        let parsed: Intent = serde_json::from_str(r#"{"type":"endTurn"}"#).unwrap();
        assert_eq!(parsed, Intent::EndTurn);
    }

    #[test]
    fn test_defense_wire_format() {
        let parsed: Intent = serde_json::from_str(
            r#"{"type":"declareDefense","assignments":[{"attackerId":1,"blockerIds":[9]}]}"#,
        )
        .unwrap();
        assert_eq!(parsed, Intent::declare_defense([(CardInstanceId(1), vec![CardInstanceId(9)])]));

        let intent = Intent::declare_defense([(CardInstanceId(1), vec![CardInstanceId(9)])]);
        let json = serde_json::to_string(&intent).unwrap();
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, back);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(IntentKind::PlayCardAsMana.to_string(), "play as mana");
        assert_eq!(IntentKind::EndTurn.to_string(), "end turn");
    }
}
