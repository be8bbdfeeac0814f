//! Integration tests for game flow scenarios
//!
//! These tests drive whole hands through the public snapshot API and check
//! the observable fields a client renders: stacks, bets, pots, the board and
//! whose turn it is.

use hotseat_poker::{
    GameState, RulesError,
    entities::{Action, ActionKind, Blinds, Chips, Deck, GameEvent, PlayerStatus, Street},
    new_game, new_player, seat_players, transition,
};

fn start(stacks: &[Chips], seed: u64) -> GameState {
    let mut players: Vec<_> = stacks
        .iter()
        .enumerate()
        .map(|(i, &chips)| {
            let mut player = new_player(&format!("player{}", i + 1));
            player.chips = chips;
            player
        })
        .collect();
    seat_players(&mut players);
    new_game(players, Blinds { small: 25, big: 50 }, Deck::seeded(seed)).unwrap()
}

fn act(state: &GameState, kind: ActionKind, amount: Chips) -> Result<GameState, RulesError> {
    let actor = state.action_idx().expect("game should be running");
    transition(state, Action { actor, kind, amount })
}

fn chips_in_play(state: &GameState) -> Chips {
    state
        .players()
        .iter()
        .map(|player| player.chips)
        .sum::<Chips>()
        + state.total_pot()
}

/// Both players limp and check, leaving a flop with nothing to match.
fn to_flop(seed: u64) -> GameState {
    let state = start(&[100, 100], seed);
    let state = act(&state, ActionKind::CheckCall, 0).unwrap();
    act(&state, ActionKind::CheckCall, 0).unwrap()
}

#[test]
fn test_new_game_posts_blinds() {
    let state = start(&[100, 100], 11);
    assert_eq!(state.hand_number(), 1);
    assert_eq!(state.street(), Street::Preflop);
    assert!(state.board().is_empty());
    assert_eq!(state.total_pot(), 75);
    assert_eq!(chips_in_play(&state), 200);

    let blinds: Vec<_> = state
        .events()
        .iter()
        .filter_map(|event| match event {
            GameEvent::BlindPosted { amount, .. } => Some(*amount),
            _ => None,
        })
        .collect();
    assert_eq!(blinds, vec![25, 50]);
}

#[test]
fn test_check_on_flop_only_advances_turn() {
    let state = to_flop(12);
    assert_eq!(state.bet_to_match(), 0);
    let actor = state.action_idx().unwrap();
    let chips_before: Vec<Chips> = state.players().iter().map(|p| p.chips).collect();

    let next = act(&state, ActionKind::CheckCall, 0).unwrap();
    let chips_after: Vec<Chips> = next.players().iter().map(|p| p.chips).collect();

    assert_eq!(chips_before, chips_after);
    assert_eq!(next.total_pot(), state.total_pot());
    assert_eq!(next.board(), state.board());
    assert_ne!(next.action_idx(), Some(actor));
    assert!(next.events().is_empty());
}

#[test]
fn test_bet_on_flop_moves_chips_into_pot() {
    let state = to_flop(13);
    let actor = state.action_idx().unwrap();

    let next = act(&state, ActionKind::BetRaise, 20).unwrap();

    assert_eq!(next.players()[actor].chips, state.players()[actor].chips - 20);
    assert_eq!(next.players()[actor].current_bet, 20);
    assert_eq!(next.total_pot(), state.total_pot() + 20);
    assert_eq!(next.bet_to_match(), 20);
    assert_eq!(next.min_raise(), 20);
}

#[test]
fn test_raise_reopens_action() {
    let state = to_flop(14);
    let state = act(&state, ActionKind::BetRaise, 10).unwrap();
    let raiser = state.action_idx().unwrap();
    let state = act(&state, ActionKind::BetRaise, 10).unwrap();
    assert_eq!(state.bet_to_match(), 20);
    assert_ne!(state.action_idx(), Some(raiser));

    // A smaller raise than the last one is refused.
    let err = act(&state, ActionKind::BetRaise, 5).unwrap_err();
    assert_eq!(err, RulesError::IllegalRaise { min: 10 });

    let state = act(&state, ActionKind::CheckCall, 0).unwrap();
    assert_eq!(state.street(), Street::Turn);
    assert_eq!(state.board().len(), 4);
}

#[test]
fn test_checked_down_hand_reaches_showdown() {
    let mut state = to_flop(15);
    while state.hand_number() == 1 {
        state = act(&state, ActionKind::CheckCall, 0).unwrap();
    }
    assert!(
        state
            .events()
            .iter()
            .any(|event| matches!(event, GameEvent::PotAwarded { hand: Some(_), .. }))
    );
    assert_eq!(chips_in_play(&state), 200);
    assert_eq!(state.dealer_idx(), 1);
}

#[test]
fn test_fold_leaves_folded_status_until_next_hand() {
    let state = start(&[300, 300, 300], 16);
    let folder = state.action_idx().unwrap();
    let state = act(&state, ActionKind::Fold, 0).unwrap();
    assert_eq!(state.players()[folder].status, PlayerStatus::Folded);
    assert_eq!(state.hand_number(), 1);
}

#[test]
fn test_short_stack_all_in_creates_side_pot() {
    let state = start(&[500, 60, 500], 17);
    // First to act shoves, short stack calls all-in, big blind calls.
    let state = act(&state, ActionKind::BetRaise, 150).unwrap();
    let state = act(&state, ActionKind::CheckCall, 0).unwrap();
    assert_eq!(state.players()[1].status, PlayerStatus::AllIn);
    let state = act(&state, ActionKind::CheckCall, 0).unwrap();

    assert_eq!(state.street(), Street::Flop);
    assert_eq!(state.pots().len(), 2);
    assert_eq!(state.pots()[0].value, 180);
    assert_eq!(state.pots()[0].eligible, vec![0, 1, 2]);
    assert_eq!(state.pots()[1].value, 280);
    assert_eq!(state.pots()[1].eligible, vec![0, 2]);
    assert_eq!(chips_in_play(&state), 1060);
}

#[test]
fn test_rejected_action_keeps_snapshot() {
    let state = to_flop(18);
    let actor = state.action_idx().unwrap();
    let err = act(&state, ActionKind::BetRaise, 1_000).unwrap_err();
    assert!(matches!(err, RulesError::InsufficientChips { .. }));
    assert_eq!(state.action_idx(), Some(actor));
    assert_eq!(state.bet_to_match(), 0);
}
