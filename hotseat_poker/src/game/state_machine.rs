//! Poker game state machine implementation.
//!
//! A [`GameState`] is an immutable snapshot of a table. [`transition`]
//! never mutates its input: it clones the snapshot, applies one action and
//! hands back the new value along with the events the action produced.

use log::{debug, info};
use thiserror::Error;

use super::constants::{BOARD_SIZE, HOLE_CARDS, MIN_PLAYERS};
use super::entities::{
    Action, ActionKind, Blinds, Card, Chips, Deck, GameEvent, Player, PlayerStatus, Pot,
    SeatIndex, Street,
};
use super::functional;

/// Rule violations reported by [`transition`] and [`new_game`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RulesError {
    #[error("the game is over")]
    GameOver,
    #[error("not your turn")]
    OutOfTurnAction,
    #[error("bet must be greater than zero")]
    InvalidBet,
    #[error("raise must be at least {min}")]
    IllegalRaise { min: Chips },
    #[error("need {needed} chips but only {available} left")]
    InsufficientChips { needed: Chips, available: Chips },
    #[error("need 2+ players with chips")]
    NotEnoughPlayers,
    #[error("invalid game state: player index {0} out of bounds")]
    InvalidPlayerIndex(usize),
}

/// Snapshot of a table between two actions.
#[derive(Clone, Debug)]
pub struct GameState {
    players: Vec<Player>,
    board: Vec<Card>,
    pots: Vec<Pot>,
    blinds: Blinds,
    deck: Deck,
    dealer_idx: SeatIndex,
    action_idx: Option<SeatIndex>,
    bet_to_match: Chips,
    min_raise: Chips,
    street: Street,
    hand_number: usize,
    events: Vec<GameEvent>,
}

impl GameState {
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    #[must_use]
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    #[must_use]
    pub fn total_pot(&self) -> Chips {
        self.pots.iter().map(|pot| pot.value).sum()
    }

    #[must_use]
    pub fn blinds(&self) -> Blinds {
        self.blinds
    }

    #[must_use]
    pub fn dealer_idx(&self) -> SeatIndex {
        self.dealer_idx
    }

    /// Seat of the player whose turn it is. `None` once the game is over.
    #[must_use]
    pub fn action_idx(&self) -> Option<SeatIndex> {
        self.action_idx
    }

    #[must_use]
    pub fn acting_player(&self) -> Option<&Player> {
        self.action_idx.and_then(|idx| self.players.get(idx))
    }

    /// Highest bet of the current betting round.
    #[must_use]
    pub fn bet_to_match(&self) -> Chips {
        self.bet_to_match
    }

    /// Chips the acting player must add to stay in the hand.
    #[must_use]
    pub fn amount_owed(&self) -> Chips {
        self.acting_player()
            .map_or(0, |player| self.bet_to_match.saturating_sub(player.current_bet))
    }

    #[must_use]
    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }

    #[must_use]
    pub fn street(&self) -> Street {
        self.street
    }

    #[must_use]
    pub fn hand_number(&self) -> usize {
        self.hand_number
    }

    /// Events produced by the transition that created this snapshot.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.action_idx.is_none()
    }

    /// The last player standing, if the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        if !self.is_over() {
            return None;
        }
        self.players
            .iter()
            .find(|player| player.status != PlayerStatus::Eliminated)
    }

    fn live_count(&self) -> usize {
        self.players
            .iter()
            .filter(|player| player.status != PlayerStatus::Eliminated)
            .count()
    }

    fn count_status(&self, status: PlayerStatus) -> usize {
        self.players
            .iter()
            .filter(|player| player.status == status)
            .count()
    }

    /// Seats after `from` in table order, wrapping around, ending at `from`.
    fn seats_after(&self, from: SeatIndex) -> impl Iterator<Item = SeatIndex> + use<> {
        let n = self.players.len();
        (1..=n).map(move |offset| (from + offset) % n)
    }

    fn next_live(&self, from: SeatIndex) -> SeatIndex {
        self.seats_after(from)
            .find(|&idx| self.players[idx].status != PlayerStatus::Eliminated)
            .unwrap_or(from)
    }

    fn needs_action(&self, idx: SeatIndex) -> bool {
        let player = &self.players[idx];
        if player.status != PlayerStatus::Active {
            return false;
        }
        if player.current_bet < self.bet_to_match {
            return true;
        }
        !player.acted && self.count_status(PlayerStatus::Active) > 1
    }

    fn next_to_act(&self, from: SeatIndex) -> Option<SeatIndex> {
        self.seats_after(from).find(|&idx| self.needs_action(idx))
    }

    fn round_over(&self) -> bool {
        !(0..self.players.len()).any(|idx| self.needs_action(idx))
    }

    fn start_hand(&mut self) {
        self.hand_number += 1;
        if self.hand_number > 1 {
            self.deck.shuffle();
        }
        self.board.clear();
        self.street = Street::Preflop;
        for player in &mut self.players {
            player.reset();
        }
        self.events.push(GameEvent::NewHand {
            number: self.hand_number,
            dealer: self.players[self.dealer_idx].name.clone(),
        });
        info!(
            "hand #{} started, {} deals",
            self.hand_number, self.players[self.dealer_idx].name
        );

        for _ in 0..HOLE_CARDS {
            for idx in self.seats_after(self.dealer_idx) {
                if self.players[idx].status != PlayerStatus::Eliminated {
                    let card = self.deck.deal_card();
                    self.players[idx].hole_cards.push(card);
                }
            }
        }
        for player in &mut self.players {
            functional::prepare_hand(&mut player.hole_cards);
        }

        let (small_idx, big_idx) = if self.live_count() == 2 {
            (self.dealer_idx, self.next_live(self.dealer_idx))
        } else {
            let small_idx = self.next_live(self.dealer_idx);
            (small_idx, self.next_live(small_idx))
        };
        self.post_blind(small_idx, self.blinds.small);
        self.post_blind(big_idx, self.blinds.big);

        self.bet_to_match = self
            .players
            .iter()
            .map(|player| player.current_bet)
            .max()
            .unwrap_or(0);
        self.min_raise = self.blinds.big;
        self.action_idx = self.next_to_act(big_idx);
    }

    fn post_blind(&mut self, idx: SeatIndex, amount: Chips) {
        let player = &mut self.players[idx];
        let posted = amount.min(player.chips);
        player.commit(posted);
        self.events.push(GameEvent::BlindPosted {
            name: player.name.clone(),
            amount: posted,
        });
    }

    fn apply(&mut self, action: Action) -> Result<(), RulesError> {
        let actor = self.action_idx.ok_or(RulesError::GameOver)?;
        if action.actor != actor {
            return Err(RulesError::OutOfTurnAction);
        }
        let bet_to_match = self.bet_to_match;
        let min_raise = self.min_raise;
        let player = self
            .players
            .get_mut(actor)
            .ok_or(RulesError::InvalidPlayerIndex(actor))?;

        match action.kind {
            ActionKind::Fold => player.status = PlayerStatus::Folded,
            ActionKind::CheckCall => {
                let owed = bet_to_match.saturating_sub(player.current_bet);
                player.commit(owed);
            }
            ActionKind::BetRaise => {
                if action.amount == 0 {
                    return Err(RulesError::InvalidBet);
                }
                let target = bet_to_match.saturating_add(action.amount);
                let needed = target - player.current_bet;
                if needed > player.chips {
                    return Err(RulesError::InsufficientChips {
                        needed,
                        available: player.chips,
                    });
                }
                if action.amount < min_raise && needed < player.chips {
                    return Err(RulesError::IllegalRaise { min: min_raise });
                }
                player.commit(needed);
                self.bet_to_match = target;
                self.min_raise = min_raise.max(action.amount);
                for (idx, other) in self.players.iter_mut().enumerate() {
                    if idx != actor {
                        other.acted = false;
                    }
                }
            }
        }
        self.players[actor].acted = true;
        debug!("{} chose {action}", self.players[actor].name);

        self.action_idx = self.next_to_act(actor);
        self.settle();
        Ok(())
    }

    /// Advance through every step that needs no player input: closing
    /// betting rounds, dealing streets, showdowns and following hands.
    fn settle(&mut self) {
        loop {
            self.recompute_pots();
            let contenders = self
                .players
                .iter()
                .filter(|player| player.status.in_hand())
                .count();
            if contenders <= 1 {
                self.award_uncontested();
            } else if !self.round_over() {
                return;
            } else if let Some((street, count)) = self.street.next() {
                self.deal_street(street, count);
                continue;
            } else {
                self.showdown();
            }
            if !self.finish_hand() {
                return;
            }
        }
    }

    fn deal_street(&mut self, street: Street, count: usize) {
        for player in &mut self.players {
            player.current_bet = 0;
            player.acted = false;
        }
        self.bet_to_match = 0;
        self.min_raise = 0;
        self.street = street;

        let cards: Vec<Card> = (0..count.min(BOARD_SIZE - self.board.len()))
            .map(|_| self.deck.deal_card())
            .collect();
        self.board.extend_from_slice(&cards);
        debug!("dealt {street:?}: {cards:?}");
        self.events.push(GameEvent::Draw(cards));
        self.action_idx = self.next_to_act(self.dealer_idx);
    }

    /// Layer the hand's investments into a main pot and side pots, split at
    /// the all-in levels of the players still contesting the hand.
    fn recompute_pots(&mut self) {
        let mut levels: Vec<Chips> = self
            .players
            .iter()
            .filter(|player| player.status == PlayerStatus::AllIn)
            .map(Player::invested)
            .collect();
        levels.push(self.players.iter().map(Player::invested).max().unwrap_or(0));
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
        let mut floor = 0;
        for level in levels {
            let value: Chips = self
                .players
                .iter()
                .map(|player| player.invested.min(level) - player.invested.min(floor))
                .sum();
            let eligible: Vec<SeatIndex> = self
                .players
                .iter()
                .enumerate()
                .filter(|(_, player)| player.status.in_hand() && player.invested >= level)
                .map(|(idx, _)| idx)
                .collect();
            floor = level;
            if value == 0 {
                continue;
            }
            match pots.last_mut() {
                Some(last) if eligible.is_empty() || last.eligible == eligible => {
                    last.value += value;
                }
                _ => pots.push(Pot { value, eligible }),
            }
        }
        self.pots = pots;
    }

    fn award_uncontested(&mut self) {
        let total = self.total_pot();
        let Some(idx) = self
            .players
            .iter()
            .position(|player| player.status.in_hand())
        else {
            return;
        };
        let player = &mut self.players[idx];
        player.chips += total;
        info!("{} wins {total} uncontested", player.name);
        self.events.push(GameEvent::PotAwarded {
            name: player.name.clone(),
            amount: total,
            hand: None,
        });
    }

    fn showdown(&mut self) {
        let board = self.board.clone();
        let hands: Vec<_> = self
            .players
            .iter()
            .map(|player| {
                let mut cards = board.clone();
                cards.extend_from_slice(&player.hole_cards);
                functional::eval(&cards)
            })
            .collect();

        // Odd chips go to the winner closest to the dealer's left.
        let order: Vec<SeatIndex> = self.seats_after(self.dealer_idx).collect();
        for pot in self.pots.clone() {
            let contenders: Vec<SeatIndex> = order
                .iter()
                .copied()
                .filter(|idx| pot.eligible.contains(idx))
                .collect();
            let contender_hands: Vec<_> = contenders.iter().map(|&idx| hands[idx].clone()).collect();
            let winners: Vec<SeatIndex> = functional::argmax(&contender_hands)
                .into_iter()
                .map(|i| contenders[i])
                .collect();
            if winners.is_empty() {
                continue;
            }
            let share = pot.value / winners.len() as Chips;
            let mut odd = pot.value % winners.len() as Chips;
            for &idx in &winners {
                let mut amount = share;
                if odd > 0 {
                    amount += 1;
                    odd -= 1;
                }
                let player = &mut self.players[idx];
                player.chips += amount;
                info!("{} wins {amount} with {}", player.name, hands[idx].rank);
                self.events.push(GameEvent::PotAwarded {
                    name: player.name.clone(),
                    amount,
                    hand: Some(hands[idx].rank),
                });
            }
        }
    }

    /// Close out the hand. Returns whether a new hand was started.
    fn finish_hand(&mut self) -> bool {
        self.pots.clear();
        for player in &mut self.players {
            player.current_bet = 0;
            player.invested = 0;
            if player.chips == 0 && player.status != PlayerStatus::Eliminated {
                player.status = PlayerStatus::Eliminated;
                self.events
                    .push(GameEvent::PlayerEliminated(player.name.clone()));
            }
        }
        if self.live_count() < MIN_PLAYERS {
            self.action_idx = None;
            if let Some(winner) = self
                .players
                .iter()
                .find(|player| player.status != PlayerStatus::Eliminated)
            {
                info!("{} wins the game", winner.name);
                self.events.push(GameEvent::GameOver {
                    winner: winner.name.clone(),
                });
            }
            return false;
        }
        self.dealer_idx = self.next_live(self.dealer_idx);
        self.start_hand();
        true
    }
}

/// Prepare players for the first hand: seats follow the order given,
/// per-hand state is cleared and broke players sit out as eliminated.
pub fn seat_players(players: &mut [Player]) {
    for player in players.iter_mut() {
        player.status = PlayerStatus::Active;
        player.reset();
    }
}

/// Start a game with the dealer button on the first live seat. The first
/// hand is dealt from `deck` as given; later hands reshuffle it.
pub fn new_game(players: Vec<Player>, blinds: Blinds, deck: Deck) -> Result<GameState, RulesError> {
    let live = players
        .iter()
        .filter(|player| player.status != PlayerStatus::Eliminated && player.chips > 0)
        .count();
    if live < MIN_PLAYERS {
        return Err(RulesError::NotEnoughPlayers);
    }
    let dealer_idx = players
        .iter()
        .position(|player| player.status != PlayerStatus::Eliminated && player.chips > 0)
        .unwrap_or(0);

    let mut state = GameState {
        players,
        board: Vec::with_capacity(BOARD_SIZE),
        pots: Vec::new(),
        blinds,
        deck,
        dealer_idx,
        action_idx: None,
        bet_to_match: 0,
        min_raise: blinds.big,
        street: Street::Preflop,
        hand_number: 0,
        events: Vec::new(),
    };
    state.start_hand();
    state.settle();
    Ok(state)
}

/// Apply `action` to a copy of `state`. On error `state` is untouched and
/// nothing is returned but the reason.
pub fn transition(state: &GameState, action: Action) -> Result<GameState, RulesError> {
    let mut next = state.clone();
    next.events.clear();
    next.apply(action)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(stacks: &[Chips]) -> Vec<Player> {
        let mut players: Vec<Player> = stacks
            .iter()
            .enumerate()
            .map(|(i, &chips)| {
                let mut player = Player::new(&format!("p{i}"));
                player.chips = chips;
                player
            })
            .collect();
        seat_players(&mut players);
        players
    }

    fn blinds() -> Blinds {
        Blinds { small: 25, big: 50 }
    }

    fn act(state: &GameState, kind: ActionKind, amount: Chips) -> GameState {
        let action = Action {
            actor: state.action_idx().unwrap(),
            kind,
            amount,
        };
        transition(state, action).unwrap()
    }

    #[test]
    fn test_heads_up_blinds() {
        let state = new_game(table(&[100, 100]), blinds(), Deck::seeded(1)).unwrap();
        assert_eq!(state.dealer_idx(), 0);
        assert_eq!(state.players()[0].current_bet, 25);
        assert_eq!(state.players()[1].current_bet, 50);
        assert_eq!(state.bet_to_match(), 50);
        assert_eq!(state.action_idx(), Some(0));
        assert_eq!(state.total_pot(), 75);
        assert!(state.players().iter().all(|p| p.hole_cards.len() == 2));
    }

    #[test]
    fn test_three_handed_blinds() {
        let state = new_game(table(&[100, 100, 100]), blinds(), Deck::seeded(1)).unwrap();
        assert_eq!(state.players()[1].current_bet, 25);
        assert_eq!(state.players()[2].current_bet, 50);
        assert_eq!(state.action_idx(), Some(0));
    }

    #[test]
    fn test_not_enough_players() {
        let err = new_game(table(&[100, 0]), blinds(), Deck::seeded(1)).unwrap_err();
        assert_eq!(err, RulesError::NotEnoughPlayers);
    }

    #[test]
    fn test_out_of_turn_is_rejected() {
        let state = new_game(table(&[100, 100]), blinds(), Deck::seeded(1)).unwrap();
        let action = Action {
            actor: 1,
            kind: ActionKind::Fold,
            amount: 0,
        };
        assert_eq!(transition(&state, action).unwrap_err(), RulesError::OutOfTurnAction);
    }

    #[test]
    fn test_preflop_completes_into_flop() {
        let state = new_game(table(&[100, 100]), blinds(), Deck::seeded(2)).unwrap();
        let state = act(&state, ActionKind::CheckCall, 0);
        assert_eq!(state.action_idx(), Some(1));
        assert_eq!(state.street(), Street::Preflop);

        let state = act(&state, ActionKind::CheckCall, 0);
        assert_eq!(state.street(), Street::Flop);
        assert_eq!(state.board().len(), 3);
        assert_eq!(state.bet_to_match(), 0);
        assert_eq!(state.action_idx(), Some(1));
        assert!(matches!(state.events(), [GameEvent::Draw(cards)] if cards.len() == 3));
        assert_eq!(state.total_pot(), 100);
    }

    #[test]
    fn test_raise_below_minimum() {
        let state = new_game(table(&[500, 500]), blinds(), Deck::seeded(3)).unwrap();
        let action = Action {
            actor: 0,
            kind: ActionKind::BetRaise,
            amount: 20,
        };
        assert_eq!(
            transition(&state, action).unwrap_err(),
            RulesError::IllegalRaise { min: 50 }
        );
    }

    #[test]
    fn test_raise_beyond_stack() {
        let state = new_game(table(&[100, 100]), blinds(), Deck::seeded(3)).unwrap();
        let action = Action {
            actor: 0,
            kind: ActionKind::BetRaise,
            amount: 200,
        };
        assert_eq!(
            transition(&state, action).unwrap_err(),
            RulesError::InsufficientChips {
                needed: 225,
                available: 75
            }
        );
    }

    #[test]
    fn test_zero_bet_is_invalid() {
        let state = new_game(table(&[100, 100]), blinds(), Deck::seeded(3)).unwrap();
        let action = Action {
            actor: 0,
            kind: ActionKind::BetRaise,
            amount: 0,
        };
        assert_eq!(transition(&state, action).unwrap_err(), RulesError::InvalidBet);
    }

    #[test]
    fn test_fold_awards_pot_and_starts_next_hand() {
        let state = new_game(table(&[100, 100]), blinds(), Deck::seeded(4)).unwrap();
        let state = act(&state, ActionKind::Fold, 0);
        assert_eq!(state.hand_number(), 2);
        assert_eq!(state.dealer_idx(), 1);
        assert!(state.events().contains(&GameEvent::PotAwarded {
            name: "p1".to_string(),
            amount: 75,
            hand: None,
        }));
        // p1 won 25 from p0 and now posts the small blind as dealer.
        assert_eq!(state.players()[1].chips + state.players()[1].current_bet, 125);
        assert_eq!(state.players()[0].chips + state.players()[0].current_bet, 75);
    }

    #[test]
    fn test_all_in_runs_out_the_board() {
        let state = new_game(table(&[100, 100]), blinds(), Deck::seeded(5)).unwrap();
        let state = act(&state, ActionKind::BetRaise, 50);
        assert_eq!(state.players()[0].status, PlayerStatus::AllIn);
        let state = act(&state, ActionKind::CheckCall, 0);

        let draws: Vec<usize> = state
            .events()
            .iter()
            .filter_map(|event| match event {
                GameEvent::Draw(cards) => Some(cards.len()),
                _ => None,
            })
            .collect();
        assert_eq!(draws, vec![3, 1, 1]);
        let total: Chips = state.players().iter().map(|p| p.chips + p.current_bet).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn test_transition_leaves_input_untouched() {
        let state = new_game(table(&[100, 100]), blinds(), Deck::seeded(6)).unwrap();
        let before = state.players()[0].chips;
        let _next = act(&state, ActionKind::CheckCall, 0);
        assert_eq!(state.players()[0].chips, before);
        assert_eq!(state.action_idx(), Some(0));
    }

    #[test]
    fn test_side_pots_layer_by_all_in_level() {
        let state = new_game(table(&[1000, 100, 300]), blinds(), Deck::seeded(8)).unwrap();
        // p0 acts first three-handed: shove.
        let state = act(&state, ActionKind::BetRaise, 950);
        let state = act(&state, ActionKind::CheckCall, 0);
        let pots_before_last_call = state.pots().to_vec();
        assert_eq!(pots_before_last_call.iter().map(|p| p.value).sum::<Chips>(), 1150);

        let state = act(&state, ActionKind::CheckCall, 0);
        let total: Chips = state.players().iter().map(|p| p.chips + p.current_bet).sum();
        assert_eq!(total, 1400);
    }

    #[test]
    fn test_pots_sum_to_investments() {
        let state = new_game(table(&[1000, 100, 300]), blinds(), Deck::seeded(8)).unwrap();
        let state = act(&state, ActionKind::BetRaise, 950);
        let state = act(&state, ActionKind::CheckCall, 0);
        let invested: Chips = state.players().iter().map(Player::invested).sum();
        assert_eq!(state.total_pot(), invested);
        assert_eq!(state.pots().len(), 2);
        assert_eq!(state.pots()[0].value, 250);
        assert_eq!(state.pots()[0].eligible, vec![0, 1]);
    }

    #[test]
    fn test_game_over_after_bust() {
        let mut state = new_game(table(&[100, 100]), blinds(), Deck::seeded(9)).unwrap();
        // Keep shoving until someone busts; ties just start another hand.
        for _ in 0..50 {
            if state.is_over() {
                break;
            }
            let player = state.acting_player().unwrap();
            let kind = if state.amount_owed() >= player.chips {
                ActionKind::CheckCall
            } else {
                ActionKind::BetRaise
            };
            let amount = player.chips.saturating_sub(state.amount_owed());
            state = act(&state, kind, amount);
        }
        assert!(state.is_over());
        let winner = state.winner().unwrap();
        assert_eq!(winner.chips, 200);
        assert!(state.events().iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        let action = Action {
            actor: 0,
            kind: ActionKind::Fold,
            amount: 0,
        };
        assert_eq!(transition(&state, action).unwrap_err(), RulesError::GameOver);
    }
}
