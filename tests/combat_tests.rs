//! Combat tests.
//!
//! These tests run full attack/defend exchanges through the engine:
//! - Every blocker takes the attacker's full attack, all at once
//! - An attacker dies when the combined blocker attack reaches its health
//! - Invalid assignments are rejected without touching the match

use duel_ccg::cards::{CardCatalog, CardCategory, CardDefinition, DeckBuilder};
use duel_ccg::core::{
    ConstructionError, ErrorCategory, GameError, Intent, MatchConfig, MatchState, ParticipantId,
    Phase,
};
use duel_ccg::rules::apply_intent;
use duel_ccg::CardInstanceId;

fn alice() -> ParticipantId {
    ParticipantId::new("alice")
}

fn bob() -> ParticipantId {
    ParticipantId::new("bob")
}

/// Free cards, so every unit can be deployed on the first turn.
fn arena_catalog(striker_health: i64) -> CardCatalog {
    let mut catalog = CardCatalog::new();
    let pool = [
        CardDefinition::new("Striker", CardCategory::Unit)
            .with_cost(0)
            .with_stats(5, striker_health),
        CardDefinition::new("Light Guard", CardCategory::Unit)
            .with_cost(0)
            .with_stats(3, 3),
        CardDefinition::new("Heavy Guard", CardCategory::Unit)
            .with_cost(0)
            .with_stats(4, 4),
    ];
    for def in pool {
        catalog.register(def).unwrap();
    }
    catalog
}

fn hand_card(state: &MatchState, who: &ParticipantId, name: &str) -> CardInstanceId {
    state
        .participant(who)
        .unwrap()
        .hand()
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .unwrap()
}

fn apply(state: &mut MatchState, who: &ParticipantId, intent: Intent) {
    apply_intent(state, who, &intent).unwrap();
}

/// Alice fields one Striker, bob fields one guard of each kind, then alice
/// attacks. Returns the match in the defend phase with the three unit ids.
fn striker_meets_guards(
    striker_health: i64,
) -> (MatchState, CardInstanceId, CardInstanceId, CardInstanceId) {
    let catalog = arena_catalog(striker_health);
    // A 7-card hand from 5 + 5 guards always holds at least two of each.
    let config = MatchConfig::default()
        .with_deck_size(10)
        .with_opening_hand_size(7);
    let mut builder = DeckBuilder::new(&catalog, config.deck_size);

    let strikers = vec!["Striker"; 10];
    let mut guards = vec!["Light Guard"; 5];
    guards.extend(vec!["Heavy Guard"; 5]);
    let decks = vec![
        (alice(), builder.build(&alice(), &strikers).unwrap()),
        (bob(), builder.build(&bob(), &guards).unwrap()),
    ];
    let mut state = MatchState::new(config, [alice(), bob()], decks).unwrap();

    apply(&mut state, &alice(), Intent::DrawCard);
    apply(&mut state, &alice(), Intent::PassPhase);
    let striker = hand_card(&state, &alice(), "Striker");
    apply(&mut state, &alice(), Intent::PlayUnitCard { card: striker });
    apply(&mut state, &alice(), Intent::EndTurn);

    apply(&mut state, &bob(), Intent::DrawCard);
    apply(&mut state, &bob(), Intent::PassPhase);
    let light = hand_card(&state, &bob(), "Light Guard");
    apply(&mut state, &bob(), Intent::PlayUnitCard { card: light });
    let heavy = hand_card(&state, &bob(), "Heavy Guard");
    apply(&mut state, &bob(), Intent::PlayUnitCard { card: heavy });
    apply(&mut state, &bob(), Intent::EndTurn);

    apply(&mut state, &alice(), Intent::DrawCard);
    apply(&mut state, &alice(), Intent::PassPhase);
    apply(&mut state, &alice(), Intent::EnterAttackPhase);
    apply(&mut state, &alice(), Intent::declare_attack([striker]));
    assert_eq!(state.phase(), Phase::Defend);

    (state, striker, light, heavy)
}

fn on_battlefield(state: &MatchState, who: &ParticipantId, card: CardInstanceId) -> bool {
    state
        .participant(who)
        .unwrap()
        .battlefield()
        .iter()
        .any(|c| c.id == card)
}

/// 5 attack into blockers of health 3 and 4: both die, and the striker takes 7.
#[test]
fn test_double_block_kills_both_blockers() {
    let (mut state, striker, light, heavy) = striker_meets_guards(7);

    apply(
        &mut state,
        &bob(),
        Intent::declare_defense([(striker, [light, heavy])]),
    );

    assert!(!on_battlefield(&state, &bob(), light));
    assert!(!on_battlefield(&state, &bob(), heavy));
    assert!(!on_battlefield(&state, &alice(), striker));
    assert_eq!(state.participant(&bob()).unwrap().life, 20);
    assert_eq!(state.participant(&bob()).unwrap().casualties, 2);
    assert_eq!(state.participant(&alice()).unwrap().casualties, 1);
    assert_eq!(state.phase(), Phase::Main);
    assert!(state.pending_attack().is_none());
}

/// The striker survives when its health exceeds the blockers' total attack.
#[test]
fn test_sturdy_attacker_survives_double_block() {
    let (mut state, striker, light, heavy) = striker_meets_guards(8);

    apply(
        &mut state,
        &bob(),
        Intent::declare_defense([(striker, [light, heavy])]),
    );

    assert!(on_battlefield(&state, &alice(), striker));
    assert!(!on_battlefield(&state, &bob(), light));
    assert!(!on_battlefield(&state, &bob(), heavy));
}

/// A single block trades according to health on each side.
#[test]
fn test_single_block() {
    let (mut state, striker, _light, heavy) = striker_meets_guards(7);

    apply(&mut state, &bob(), Intent::declare_defense([(striker, [heavy])]));

    assert!(!on_battlefield(&state, &bob(), heavy));
    assert!(on_battlefield(&state, &alice(), striker));
    assert_eq!(state.participant(&bob()).unwrap().life, 20);
}

/// Declining to block sends the full attack to the defender.
#[test]
fn test_no_block_hits_defender() {
    let (mut state, _striker, light, heavy) = striker_meets_guards(7);

    apply(&mut state, &bob(), Intent::DeclareDefense { assignments: vec![] });

    assert_eq!(state.participant(&bob()).unwrap().life, 15);
    assert!(on_battlefield(&state, &bob(), light));
    assert!(on_battlefield(&state, &bob(), heavy));
}

#[test]
fn test_duplicate_blocker_rejected() {
    let (mut state, striker, light, _heavy) = striker_meets_guards(7);
    let before = state.clone();

    let err = apply_intent(
        &mut state,
        &bob(),
        &Intent::declare_defense([(striker, [light, light])]),
    )
    .unwrap_err();

    assert_eq!(
        err,
        GameError::Construction(ConstructionError::DuplicateBlocker { defender: light })
    );
    assert_eq!(err.category(), ErrorCategory::Construction);
    assert_eq!(state, before);
}

#[test]
fn test_block_for_unknown_attacker_rejected() {
    let (mut state, _striker, light, heavy) = striker_meets_guards(7);
    let before = state.clone();

    let err = apply_intent(
        &mut state,
        &bob(),
        &Intent::declare_defense([(heavy, [light])]),
    )
    .unwrap_err();

    assert_eq!(err, GameError::NotAttacking { card: heavy });
    assert_eq!(state, before);
}

#[test]
fn test_blocker_must_be_own_unit() {
    let (mut state, striker, _light, _heavy) = striker_meets_guards(7);
    let before = state.clone();

    let err = apply_intent(
        &mut state,
        &bob(),
        &Intent::declare_defense([(striker, [striker])]),
    )
    .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::ZoneReference);
    assert_eq!(state, before);
}

/// Only the defender may declare blocks, and only while defending.
#[test]
fn test_defense_ownership() {
    let (mut state, striker, light, _heavy) = striker_meets_guards(7);

    let err = apply_intent(
        &mut state,
        &alice(),
        &Intent::declare_defense([(striker, [light])]),
    )
    .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TurnOwnership);

    apply(&mut state, &bob(), Intent::DeclareDefense { assignments: vec![] });

    let err = apply_intent(&mut state, &bob(), &Intent::DeclareDefense { assignments: vec![] })
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PhaseViolation);
}

/// Guards deployed last turn are still tapped, and may block anyway.
#[test]
fn test_tapped_units_may_block() {
    let (mut state, striker, light, heavy) = striker_meets_guards(20);
    let guard_tapped = |state: &MatchState, id| {
        state
            .participant(&bob())
            .unwrap()
            .battlefield()
            .iter()
            .any(|c| c.id == id && c.tapped)
    };
    assert!(guard_tapped(&state, light));

    apply(&mut state, &bob(), Intent::declare_defense([(striker, [light])]));

    assert!(!on_battlefield(&state, &bob(), light));
    assert!(guard_tapped(&state, heavy));
    assert!(on_battlefield(&state, &alice(), striker));
}
