//! Timed card reveal for the board.
//!
//! A [`CardReveal`] is a small state machine driven by the caller's clock.
//! Every `delay` it moves one pending card into the displayed sequence.
//! While it is active the terminal binding reads no input, so a reveal is
//! never interleaved with another command.

use hotseat_poker::entities::Card;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Outcome of one [`CardReveal::step`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevealStep {
    /// A card was just added to the displayed board.
    Revealed(Card),
    /// Nothing to do until the given instant.
    Waiting(Instant),
    /// No reveal in progress.
    Idle,
}

/// Entry of the reveal queue.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Queued {
    Card(Card),
    /// A new hand starts here; the board empties before the next card.
    Reset,
}

#[derive(Clone, Debug)]
pub struct CardReveal {
    shown: Vec<Card>,
    pending: VecDeque<Queued>,
    delay: Duration,
    deadline: Option<Instant>,
}

impl CardReveal {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            shown: Vec::new(),
            pending: VecDeque::new(),
            delay,
            deadline: None,
        }
    }

    /// Queue `cards` for reveal on top of `base`, the board as it looked
    /// before they were dealt.
    ///
    /// A reveal already in progress keeps its displayed prefix and the new
    /// cards queue behind it.
    pub fn reveal(&mut self, base: &[Card], cards: &[Card]) {
        if !self.is_active() {
            self.shown = base.to_vec();
        }
        self.pending.extend(cards.iter().copied().map(Queued::Card));
    }

    /// Mark the start of a new hand. Cards queued after this go onto an
    /// empty board once everything queued before it has been shown.
    pub fn new_hand(&mut self) {
        if self.is_active() {
            self.pending.push_back(Queued::Reset);
        } else {
            self.shown.clear();
        }
    }

    /// Advance the reveal to `now`. The first card of a reveal shows
    /// immediately and every card, the last included, stays alone on screen
    /// for one delay.
    pub fn step(&mut self, now: Instant) -> RevealStep {
        if let Some(deadline) = self.deadline
            && now < deadline
        {
            return RevealStep::Waiting(deadline);
        }
        loop {
            match self.pending.pop_front() {
                Some(Queued::Reset) => self.shown.clear(),
                Some(Queued::Card(card)) => {
                    self.shown.push(card);
                    self.deadline = Some(now + self.delay);
                    return RevealStep::Revealed(card);
                }
                None => {
                    self.deadline = None;
                    return RevealStep::Idle;
                }
            }
        }
    }

    /// Whether cards are still waiting to be shown or the last one's delay
    /// has not been stepped past yet.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.pending.is_empty() || self.deadline.is_some()
    }

    /// Cards currently on display.
    #[must_use]
    pub fn shown(&self) -> &[Card] {
        &self.shown
    }
}
