//! Poker game engine - core FSM and game logic.
//!
//! This module provides the foundational poker game implementation including:
//! - Card, deck, player and pot entities
//! - Hand evaluation
//! - The snapshot state machine driving betting rounds, streets and showdowns

// Submodules
pub mod constants;
pub mod entities;
pub mod functional;
pub mod state_machine;

pub use state_machine::{GameState, RulesError, new_game, seat_players, transition};

use entities::{Deck, Player};

/// A player named `name` with an empty stack.
#[must_use]
pub fn new_player(name: &str) -> Player {
    Player::new(name)
}

/// A freshly shuffled deck.
#[must_use]
pub fn new_deck() -> Deck {
    Deck::new()
}
