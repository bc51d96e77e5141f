use hwatro_core::{
    builtin_pool, Card, CardKind, Enhancement, EventBus, GameConfig, Phase, RunError, RunState,
    CATALOG_SIZE, DUPLICATE_ID_BASE,
};

fn new_run(seed: u64) -> (RunState, EventBus) {
    let mut events = EventBus::default();
    let mut run = RunState::new(GameConfig::standard(), seed);
    run.start_stage(&mut events).unwrap();
    (run, events)
}

fn add_upgrade(run: &mut RunState, id: &str) {
    let pool = builtin_pool();
    let def = pool.iter().find(|def| def.id == id).unwrap();
    run.upgrades.add(def);
}

fn cards_in_play(run: &RunState) -> usize {
    run.deck.len() + run.deck.discard.len() + run.hand.len() + run.floor.len()
}

fn junk(id: u32, month: u8) -> Card {
    Card::new(id, month, CardKind::Junk)
}

#[test]
fn fresh_stage_defaults() {
    let (run, _) = new_run(7);
    assert_eq!(run.state.stage, 1);
    assert_eq!(run.state.target, 25);
    assert_eq!(run.state.discards_left, 4);
    assert_eq!(run.hand.len(), 5);
    assert_eq!(run.floor.len(), 1);
    assert_eq!(run.deck.len(), CATALOG_SIZE - 6);
    assert_eq!(cards_in_play(&run), CATALOG_SIZE);
}

#[test]
fn conservation_holds_through_a_whole_round() {
    let (mut run, mut events) = new_run(11);
    let mut guard = 0;
    while run.state.phase == Phase::Play {
        guard += 1;
        assert!(guard < 200, "round never ended");
        if run.state.discards_left > 0 && run.state.turn % 3 == 2 {
            run.discard(0, &mut events).unwrap();
        } else {
            run.play(0, &mut events).unwrap();
        }
        assert_eq!(cards_in_play(&run), CATALOG_SIZE);
    }
    assert_eq!(run.state.phase, Phase::RoundOver);
    assert!(run.state.outcome.is_some());
}

#[test]
fn conservation_with_removal_and_duplication() {
    let mut events = EventBus::default();
    let mut run = RunState::new(GameConfig::standard(), 3);
    run.removed.insert(5);
    run.duplicated.push(7);
    run.start_stage(&mut events).unwrap();

    assert_eq!(cards_in_play(&run), CATALOG_SIZE);
    assert_eq!(run.composition_ids().len(), CATALOG_SIZE);

    let all_cards: Vec<&Card> = run
        .deck
        .draw
        .iter()
        .chain(run.hand.iter())
        .chain(run.floor.cards.iter())
        .collect();
    assert!(all_cards.iter().all(|card| card.id != 5));
    let copy = all_cards
        .iter()
        .find(|card| card.id == DUPLICATE_ID_BASE)
        .expect("duplicated copy present");
    let original = run.catalog.card(7).unwrap();
    assert_eq!(copy.month, original.month);
    assert_eq!(copy.kind, original.kind);
}

#[test]
fn first_play_with_no_matches_scores_mult_one() {
    let (mut run, mut events) = new_run(1);
    run.floor.clear();
    run.hand = (1..=5).map(|m| junk(200 + m as u32, m)).collect();
    run.deck.draw = vec![junk(211, 10), junk(212, 9), junk(213, 8)];

    let breakdown = run.play(0, &mut events).unwrap();
    assert_eq!(breakdown.score.mult, 1.0);
    assert!(breakdown.score.base >= 1);
    assert!(breakdown.combos.is_empty());
    assert_eq!(run.state.phase, Phase::Play);
}

#[test]
fn deck_exhaustion_forces_round_end_within_one_play() {
    let (mut run, mut events) = new_run(5);
    run.deck.draw.truncate(1);
    run.play(0, &mut events).unwrap();
    assert_eq!(run.state.phase, Phase::RoundOver);
}

#[test]
fn floor_month_cap_ends_the_round() {
    let (mut run, mut events) = new_run(9);
    run.floor.clear();
    for month in 1..=4u8 {
        run.floor.place(junk(230 + month as u32, month));
    }
    run.hand = vec![junk(240, 5), junk(241, 5)];
    run.deck.draw = (0..10).map(|i| junk(250 + i, 1)).collect();

    run.play(0, &mut events).unwrap();
    assert_eq!(run.floor.distinct_months(), 5);
    assert_eq!(run.state.phase, Phase::RoundOver);
}

#[test]
fn emptying_the_hand_ends_the_round() {
    let (mut run, mut events) = new_run(13);
    run.hand.truncate(1);
    run.play(0, &mut events).unwrap();
    assert_eq!(run.state.phase, Phase::RoundOver);
}

#[test]
fn actions_after_round_end_are_rejected_no_ops() {
    let (mut run, mut events) = new_run(5);
    run.deck.draw.truncate(1);
    run.play(0, &mut events).unwrap();
    assert_eq!(run.state.phase, Phase::RoundOver);

    let hand_before = run.hand.clone();
    let gold_before = run.state.gold;
    assert!(matches!(
        run.play(0, &mut events),
        Err(RunError::InvalidPhase(_))
    ));
    assert!(matches!(
        run.discard(0, &mut events),
        Err(RunError::InvalidPhase(_))
    ));
    assert_eq!(run.hand, hand_before);
    assert_eq!(run.state.gold, gold_before);
}

#[test]
fn discard_requires_budget() {
    let (mut run, mut events) = new_run(17);
    run.state.discards_left = 0;
    let hand_before = run.hand.clone();
    assert!(matches!(
        run.discard(0, &mut events),
        Err(RunError::NoDiscardsLeft)
    ));
    assert_eq!(run.hand, hand_before);
}

#[test]
fn discard_replaces_the_card_and_spends_budget() {
    let (mut run, mut events) = new_run(19);
    run.discard(2, &mut events).unwrap();
    assert_eq!(run.hand.len(), 5);
    assert_eq!(run.state.discards_left, 3);
    assert_eq!(run.deck.discard.len(), 1);
    assert_eq!(cards_in_play(&run), CATALOG_SIZE);
}

#[test]
fn wide_discard_takes_the_neighbors_too() {
    let (mut run, mut events) = new_run(23);
    add_upgrade(&mut run, "broad_sweep");
    run.discard(2, &mut events).unwrap();
    assert_eq!(run.deck.discard.len(), 3);
    assert_eq!(run.hand.len(), 5);
    assert_eq!(run.state.discards_left, 3);
    assert_eq!(cards_in_play(&run), CATALOG_SIZE);
}

#[test]
fn reincarnation_recycles_instead_of_retiring() {
    let (mut run, mut events) = new_run(29);
    add_upgrade(&mut run, "reincarnation");
    let deck_before = run.deck.len();
    run.discard(0, &mut events).unwrap();
    assert_eq!(run.deck.discard.len(), 0);
    assert_eq!(run.state.reincarnated, 1);
    // One card shuffled back in, one drawn as replacement.
    assert_eq!(run.deck.len(), deck_before);
    assert_eq!(cards_in_play(&run), CATALOG_SIZE);
}

#[test]
fn discard_feeds_the_round_multiplier_accumulator() {
    let (mut run, mut events) = new_run(31);
    add_upgrade(&mut run, "grudge");
    let amethyst_id = run.hand[0].id;
    run.enhancements.insert(amethyst_id, Enhancement::Amethyst);
    run.discard(0, &mut events).unwrap();
    assert_eq!(run.state.discard_mult, 1.0);
}

#[test]
fn drought_allows_one_grace_replenishment_per_round() {
    let (mut run, mut events) = new_run(37);
    add_upgrade(&mut run, "drought");
    run.floor.clear();
    run.hand = (0..5).map(|i| junk(221 + i, 1)).collect();
    run.deck.draw = (0..10).map(|i| junk(231 + i, 1)).collect();

    run.play(0, &mut events).unwrap();
    assert_eq!(run.hand.len(), 5);
    assert!(run.state.replenish_grace_spent);

    run.play(0, &mut events).unwrap();
    assert_eq!(run.hand.len(), 4);
}

#[test]
fn tight_grip_deals_a_smaller_hand() {
    let mut events = EventBus::default();
    let mut run = RunState::new(GameConfig::standard(), 41);
    add_upgrade(&mut run, "tight_grip");
    run.start_stage(&mut events).unwrap();
    assert_eq!(run.hand_capacity(), 4);
    assert_eq!(run.hand.len(), 4);
}

#[test]
fn clean_slate_suppresses_the_floor_seed() {
    let mut events = EventBus::default();
    let mut run = RunState::new(GameConfig::standard(), 43);
    add_upgrade(&mut run, "clean_slate");
    run.start_stage(&mut events).unwrap();
    assert!(run.floor.is_empty());
}

#[test]
fn deck_preview_is_gated_on_foresight() {
    let (mut run, _) = new_run(47);
    assert!(run.deck_preview().is_none());
    add_upgrade(&mut run, "foresight");
    assert_eq!(run.deck_preview(), run.deck.peek_top());
}
