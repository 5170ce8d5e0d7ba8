//! Match flow tests.
//!
//! These tests drive matches through the public intent API only:
//! - Full turns (draw, mana, main, attack, end)
//! - Summoning sickness and the untap step
//! - Once-per-turn mana and unchanged state on rejection
//! - Wire format of intents and views

use duel_ccg::cards::{CardCatalog, CardCategory, CardDefinition, DeckBuilder, ManaTable};
use duel_ccg::core::{
    ErrorCategory, GameError, GameRng, Intent, MatchConfig, MatchState, ParticipantId, Phase,
};
use duel_ccg::rules::apply_intent;
use duel_ccg::CardInstanceId;

fn alice() -> ParticipantId {
    ParticipantId::new("alice")
}

fn bob() -> ParticipantId {
    ParticipantId::new("bob")
}

/// Catalog with free units so tests do not have to build up mana.
fn free_catalog() -> CardCatalog {
    let mut catalog = CardCatalog::starter();
    catalog
        .register(
            CardDefinition::new("Raider", CardCategory::Unit)
                .with_cost(0)
                .with_stats(4, 2),
        )
        .unwrap();
    catalog
}

/// Both decks made of one card name, so the shuffle cannot matter.
fn mono_match(catalog: &CardCatalog, name: &str, config: MatchConfig) -> MatchState {
    let mut builder = DeckBuilder::new(catalog, config.deck_size);
    let names = vec![name; config.deck_size];
    let decks = vec![
        (alice(), builder.build(&alice(), &names).unwrap()),
        (bob(), builder.build(&bob(), &names).unwrap()),
    ];
    MatchState::new(config, [alice(), bob()], decks).unwrap()
}

fn standard_match(seed: u64) -> MatchState {
    let config = MatchConfig::default().with_seed(seed);
    let catalog = CardCatalog::starter();
    let mut builder = DeckBuilder::new(&catalog, config.deck_size);
    let mut rng = GameRng::new(seed);
    let decks = vec![
        (alice(), builder.random_deck(&alice(), &mut rng).unwrap()),
        (bob(), builder.random_deck(&bob(), &mut rng).unwrap()),
    ];
    MatchState::new(config, [alice(), bob()], decks).unwrap()
}

fn first_in_hand(state: &MatchState, who: &ParticipantId) -> CardInstanceId {
    state.participant(who).unwrap().hand()[0].id
}

fn apply(state: &mut MatchState, who: &ParticipantId, intent: Intent) {
    apply_intent(state, who, &intent).unwrap();
}

/// Walk one complete turn and check every step of the way.
#[test]
fn test_full_turn() {
    let mut state = standard_match(3);
    let me = alice();

    apply(&mut state, &me, Intent::DrawCard);
    assert_eq!(state.participant(&me).unwrap().hand().len(), 8);
    assert_eq!(state.phase(), Phase::Mana);

    let card = first_in_hand(&state, &me);
    let gained = if state.participant(&me).unwrap().hand()[0].category == CardCategory::Ship {
        2
    } else {
        1
    };
    apply(&mut state, &me, Intent::PlayCardAsMana { card });
    let seat = state.participant(&me).unwrap();
    assert_eq!(seat.mana, gained);
    assert_eq!(seat.mana_zone().len(), 1);
    assert_eq!(seat.hand().len(), 7);
    assert_eq!(state.phase(), Phase::Main);

    // Play everything affordable.
    loop {
        let seat = state.participant(&me).unwrap();
        let affordable = seat
            .hand()
            .iter()
            .find(|c| c.is_deployable() && c.cost <= seat.mana)
            .map(|c| c.id);
        match affordable {
            Some(card) => apply(&mut state, &me, Intent::PlayUnitCard { card }),
            None => break,
        }
    }
    assert!(state.participant(&me).unwrap().mana >= 0);

    apply(&mut state, &me, Intent::EnterAttackPhase);
    // Everything on the battlefield entered this turn, so nothing can attack.
    apply(&mut state, &me, Intent::declare_attack(std::iter::empty()));
    assert_eq!(state.phase(), Phase::Main);

    apply(&mut state, &me, Intent::EndTurn);
    assert_eq!(state.turn(), 1);
    assert_eq!(state.phase(), Phase::Draw);
    assert!(!state.mana_played_this_turn());
    assert_eq!(state.active(), &bob());
    assert_eq!(state.cards_accounted(), 80);
}

/// Drawing from an empty deck costs life instead of a card.
#[test]
fn test_fatigue_on_empty_deck() {
    let catalog = free_catalog();
    let config = MatchConfig::default()
        .with_deck_size(7)
        .with_opening_hand_size(7);
    let mut state = mono_match(&catalog, "Raider", config);

    apply(&mut state, &alice(), Intent::DrawCard);

    let seat = state.participant(&alice()).unwrap();
    assert_eq!(seat.life, 19);
    assert_eq!(seat.hand().len(), 7);
    assert_eq!(state.phase(), Phase::Mana);
}

/// A unit played this turn cannot attack until its owner's next draw.
#[test]
fn test_summoning_sickness() {
    let catalog = free_catalog();
    let config = MatchConfig::default()
        .with_deck_size(10)
        .with_opening_hand_size(7);
    let mut state = mono_match(&catalog, "Raider", config);

    apply(&mut state, &alice(), Intent::DrawCard);
    apply(&mut state, &alice(), Intent::PassPhase);
    let raider = first_in_hand(&state, &alice());
    apply(&mut state, &alice(), Intent::PlayUnitCard { card: raider });
    assert!(state.participant(&alice()).unwrap().battlefield()[0].tapped);

    apply(&mut state, &alice(), Intent::EnterAttackPhase);
    let err = apply_intent(&mut state, &alice(), &Intent::declare_attack([raider])).unwrap_err();
    assert_eq!(err, GameError::UnitTapped { card: raider });

    apply(&mut state, &alice(), Intent::PassPhase);
    apply(&mut state, &alice(), Intent::EndTurn);

    // Bob's turn does not untap alice's units.
    apply(&mut state, &bob(), Intent::DrawCard);
    assert!(state.participant(&alice()).unwrap().battlefield()[0].tapped);
    apply(&mut state, &bob(), Intent::EndTurn);

    apply(&mut state, &alice(), Intent::DrawCard);
    assert!(!state.participant(&alice()).unwrap().battlefield()[0].tapped);
}

/// Attacking a participant with an empty battlefield resolves at once.
#[test]
fn test_unblocked_attack_skips_defend() {
    let catalog = free_catalog();
    let config = MatchConfig::default()
        .with_deck_size(10)
        .with_opening_hand_size(7);
    let mut state = mono_match(&catalog, "Raider", config);

    apply(&mut state, &alice(), Intent::DrawCard);
    apply(&mut state, &alice(), Intent::PassPhase);
    let raider = first_in_hand(&state, &alice());
    apply(&mut state, &alice(), Intent::PlayUnitCard { card: raider });
    apply(&mut state, &alice(), Intent::EndTurn);

    apply(&mut state, &bob(), Intent::DrawCard);
    apply(&mut state, &bob(), Intent::EndTurn);

    apply(&mut state, &alice(), Intent::DrawCard);
    apply(&mut state, &alice(), Intent::PassPhase);
    apply(&mut state, &alice(), Intent::EnterAttackPhase);
    apply(&mut state, &alice(), Intent::declare_attack([raider]));

    assert_eq!(state.phase(), Phase::Main);
    assert!(state.pending_attack().is_none());
    assert_eq!(state.participant(&bob()).unwrap().life, 16);
    assert!(state.participant(&alice()).unwrap().battlefield()[0].tapped);
}

/// An empty attack never reaches the defend phase.
#[test]
fn test_empty_attack_never_defends() {
    let catalog = free_catalog();
    let config = MatchConfig::default()
        .with_deck_size(10)
        .with_opening_hand_size(7);
    let mut state = mono_match(&catalog, "Raider", config);

    apply(&mut state, &alice(), Intent::DrawCard);
    apply(&mut state, &alice(), Intent::PassPhase);
    apply(&mut state, &alice(), Intent::EnterAttackPhase);
    apply(&mut state, &alice(), Intent::declare_attack(std::iter::empty()));

    assert_eq!(state.phase(), Phase::Main);
    assert!(state.pending_attack().is_none());
}

/// The second mana play in a turn fails and changes nothing.
#[test]
fn test_mana_twice_in_one_turn() {
    let mut state = standard_match(8);
    apply(&mut state, &alice(), Intent::DrawCard);
    let first = first_in_hand(&state, &alice());
    apply(&mut state, &alice(), Intent::PlayCardAsMana { card: first });

    let after_first = state.clone();
    let second = first_in_hand(&state, &alice());
    let err = apply_intent(&mut state, &alice(), &Intent::PlayCardAsMana { card: second }).unwrap_err();

    assert!(matches!(
        err.category(),
        ErrorCategory::Resource | ErrorCategory::PhaseViolation
    ));
    assert_eq!(state, after_first);
    assert_eq!(
        state.participant(&alice()).unwrap().mana,
        after_first.participant(&alice()).unwrap().mana
    );
}

/// The mana flag resets at end of turn and the mana pool carries over.
#[test]
fn test_mana_flag_resets_each_turn() {
    let mut state = standard_match(21);

    for who in [alice(), bob(), alice()] {
        apply(&mut state, &who, Intent::DrawCard);
        let card = first_in_hand(&state, &who);
        apply(&mut state, &who, Intent::PlayCardAsMana { card });
        assert!(state.mana_played_this_turn());
        apply(&mut state, &who, Intent::EndTurn);
        assert!(!state.mana_played_this_turn());
    }

    let seat = state.participant(&alice()).unwrap();
    assert_eq!(seat.mana_zone().len(), 2);
    assert!(seat.mana >= 2);
}

/// Committing a card pays out what the catalog's mana table says.
#[test]
fn test_mana_value_follows_catalog_table() {
    let catalog = free_catalog().with_mana_table(ManaTable::uniform(5));
    let config = MatchConfig::from_catalog(&catalog).with_deck_size(10);
    let mut state = mono_match(&catalog, "Raider", config);
    let me = alice();

    apply(&mut state, &me, Intent::DrawCard);
    let card = first_in_hand(&state, &me);
    apply(&mut state, &me, Intent::PlayCardAsMana { card });

    assert_eq!(state.participant(&me).unwrap().mana, 5);
}

/// Rejected intents are categorized and leave the state untouched.
#[test]
fn test_rejections_leave_state_unchanged() {
    let mut state = standard_match(4);
    let before = state.clone();

    let cases = [
        (bob(), Intent::DrawCard, ErrorCategory::TurnOwnership),
        (ParticipantId::new("mallory"), Intent::EndTurn, ErrorCategory::TurnOwnership),
        (alice(), Intent::PassPhase, ErrorCategory::PhaseViolation),
        (alice(), Intent::EnterAttackPhase, ErrorCategory::PhaseViolation),
    ];

    for (who, intent, category) in cases {
        let err = apply_intent(&mut state, &who, &intent).unwrap_err();
        assert_eq!(err.category(), category, "{intent:?} by {who}");
    }
    assert_eq!(state, before);

    apply(&mut state, &alice(), Intent::DrawCard);
    let before = state.clone();
    let foreign = first_in_hand(&state, &bob());
    let err = apply_intent(&mut state, &alice(), &Intent::PlayCardAsMana { card: foreign }).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ZoneReference);
    assert_eq!(state, before);
}

/// Ending a turn is refused while an attack waits on blocks.
#[test]
fn test_end_turn_refused_in_defend() {
    let catalog = free_catalog();
    let config = MatchConfig::default()
        .with_deck_size(10)
        .with_opening_hand_size(7);
    let mut state = mono_match(&catalog, "Raider", config);

    apply(&mut state, &alice(), Intent::DrawCard);
    apply(&mut state, &alice(), Intent::PassPhase);
    let raider = first_in_hand(&state, &alice());
    apply(&mut state, &alice(), Intent::PlayUnitCard { card: raider });
    apply(&mut state, &alice(), Intent::EndTurn);

    apply(&mut state, &bob(), Intent::DrawCard);
    apply(&mut state, &bob(), Intent::PassPhase);
    let guard = first_in_hand(&state, &bob());
    apply(&mut state, &bob(), Intent::PlayUnitCard { card: guard });
    apply(&mut state, &bob(), Intent::EndTurn);

    apply(&mut state, &alice(), Intent::DrawCard);
    apply(&mut state, &alice(), Intent::PassPhase);
    apply(&mut state, &alice(), Intent::EnterAttackPhase);
    apply(&mut state, &alice(), Intent::declare_attack([raider]));
    assert_eq!(state.phase(), Phase::Defend);

    let err = apply_intent(&mut state, &alice(), &Intent::EndTurn).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PhaseViolation);

    apply(&mut state, &bob(), Intent::DeclareDefense { assignments: vec![] });
    assert_eq!(state.phase(), Phase::Main);
    assert_eq!(state.participant(&bob()).unwrap().life, 16);
    apply(&mut state, &alice(), Intent::EndTurn);
}

/// Same seed and same intents give the same match.
#[test]
fn test_replay_is_deterministic() {
    let run = || {
        let mut state = standard_match(77);
        for who in [alice(), bob()] {
            apply(&mut state, &who, Intent::DrawCard);
            let card = first_in_hand(&state, &who);
            apply(&mut state, &who, Intent::PlayCardAsMana { card });
            apply(&mut state, &who, Intent::EndTurn);
        }
        state
    };

    let a = run();
    let b = run();
    assert_eq!(a, b);
    assert_eq!(a.history().len(), 6);
}

/// Intents arrive as JSON from clients.
#[test]
fn test_json_intents() {
    let mut state = standard_match(5);

    let draw: Intent = serde_json::from_str(r#"{"type":"drawCard"}"#).unwrap();
    apply(&mut state, &alice(), draw);

    let card = first_in_hand(&state, &alice());
    let json = format!(r#"{{"type":"playCardAsMana","cardId":{}}}"#, card.raw());
    let mana: Intent = serde_json::from_str(&json).unwrap();
    apply(&mut state, &alice(), mana);

    assert_eq!(state.participant(&alice()).unwrap().mana_zone()[0].id, card);
}

/// Views never leak the opponent's hand.
#[test]
fn test_view_json_hides_opponent_hand() {
    let state = standard_match(6);
    let view = state.view_for(&bob()).unwrap();
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["you"]["hand"].as_array().unwrap().len(), 7);
    assert_eq!(json["opponent"]["handCount"], 7);
    assert!(json["opponent"].get("hand").is_none());
    assert_eq!(json["phase"], "draw");
    assert_eq!(json["active"], "alice");
}
