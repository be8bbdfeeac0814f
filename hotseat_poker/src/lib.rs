//! # Hotseat Poker
//!
//! A Texas Hold'em rules engine for a table of local players sharing one
//! terminal.
//!
//! The engine is a pure state machine over immutable snapshots: a
//! [`GameState`] is built once with [`new_game`] and every player move goes
//! through [`transition`], which returns a new snapshot (and the events the
//! move produced) or a [`RulesError`] leaving the old one untouched.
//!
//! ## Example
//!
//! ```
//! use hotseat_poker::{
//!     entities::{Action, ActionKind, Blinds, Deck},
//!     new_game, new_player, seat_players, transition,
//! };
//!
//! let mut players = vec![new_player("alice"), new_player("bob")];
//! for player in &mut players {
//!     player.chips = 100;
//! }
//! seat_players(&mut players);
//!
//! let blinds = Blinds { small: 25, big: 50 };
//! let game = new_game(players, blinds, Deck::seeded(7)).unwrap();
//! let actor = game.action_idx().unwrap();
//! let action = Action { actor, kind: ActionKind::CheckCall, amount: 0 };
//! let next = transition(&game, action).unwrap();
//! assert_eq!(next.players()[actor].current_bet, 50);
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameState, RulesError,
    constants::{self, MAX_PLAYERS, MIN_PLAYERS},
    entities, functional, new_deck, new_game, new_player, seat_players, transition,
};
