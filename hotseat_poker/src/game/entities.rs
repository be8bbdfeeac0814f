use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::fmt;

use super::constants::DECK_SIZE;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a value (2u8 ... ace=14u8) and a suit.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            1 | 14 => 'A',
            v => char::from(b'0' + v % 10),
        };
        write!(f, "{value}{}", self.1)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "a pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "a straight",
            Self::Flush => "a flush",
            Self::FullHouse => "a full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "a straight flush",
        };
        write!(f, "{repr}")
    }
}

/// A ranked hand. Ordering compares the rank first and then the values,
/// which are stored most significant first.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SubHand {
    pub rank: Rank,
    pub values: Vec<Value>,
}

/// A 52 card deck that carries its own RNG so reshuffles between hands
/// stay reproducible for a seeded game.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    pub deck_idx: usize,
    rng: StdRng,
}

impl Deck {
    /// A shuffled deck seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A shuffled deck whose shuffles are fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for value in 2u8..=14u8 {
            for suit in [Suit::Club, Suit::Spade, Suit::Diamond, Suit::Heart] {
                cards.push(Card(value, suit));
            }
        }
        let mut deck = Self {
            cards,
            deck_idx: 0,
            rng,
        };
        deck.shuffle();
        deck
    }

    /// Deal the next card. A table of at most `MAX_PLAYERS` never uses more
    /// than half the deck in one hand.
    pub fn deal_card(&mut self) -> Card {
        let card = self.cards[self.deck_idx];
        self.deck_idx += 1;
        card
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        self.deck_idx = 0;
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.deck_idx
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole chips. Every stack, bet and pot is a whole number of chips.
pub type Chips = u32;

/// Type alias for seat positions during the game.
pub type SeatIndex = usize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.small, self.big)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PlayerStatus {
    // Still has decisions to make this hand.
    Active,
    // Put their whole stack in; rides the hand out.
    AllIn,
    // Forfeited the hand.
    Folded,
    // Out of chips and out of the game.
    Eliminated,
}

impl PlayerStatus {
    /// Whether the player still contests the pots of the current hand.
    #[must_use]
    pub fn in_hand(self) -> bool {
        matches!(self, Self::Active | Self::AllIn)
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub chips: Chips,
    pub current_bet: Chips,
    pub status: PlayerStatus,
    pub hole_cards: Vec<Card>,
    // Total put into the pots this hand, including `current_bet`.
    pub(crate) invested: Chips,
    // Whether the player has acted since the last raise of this round.
    pub(crate) acted: bool,
}

impl Player {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            chips: 0,
            current_bet: 0,
            status: PlayerStatus::Active,
            hole_cards: Vec::with_capacity(2),
            invested: 0,
            acted: false,
        }
    }

    /// Clear everything tied to a single hand.
    pub fn reset(&mut self) {
        self.current_bet = 0;
        self.invested = 0;
        self.acted = false;
        self.hole_cards.clear();
        if self.status != PlayerStatus::Eliminated {
            self.status = if self.chips > 0 {
                PlayerStatus::Active
            } else {
                PlayerStatus::Eliminated
            };
        }
    }

    /// Move `amount` from the stack into the current bet.
    pub(crate) fn commit(&mut self, amount: Chips) {
        let amount = amount.min(self.chips);
        self.chips -= amount;
        self.current_bet += amount;
        self.invested += amount;
        if self.chips == 0 {
            self.status = PlayerStatus::AllIn;
        }
    }

    #[must_use]
    pub fn invested(&self) -> Chips {
        self.invested
    }
}

/// A chip total contested by the players in `eligible`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pot {
    pub value: Chips,
    pub eligible: Vec<SeatIndex>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionKind {
    CheckCall,
    Fold,
    BetRaise,
}

/// A move by the player in seat `actor`. `amount` is only read for
/// `BetRaise`, where it is the amount the bet-to-match is raised by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Action {
    pub actor: SeatIndex,
    pub kind: ActionKind,
    pub amount: Chips,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ActionKind::CheckCall => write!(f, "check/call"),
            ActionKind::Fold => write!(f, "fold"),
            ActionKind::BetRaise => write!(f, "bet/raise {}", self.amount),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// The street after this one and how many board cards it deals.
    #[must_use]
    pub fn next(self) -> Option<(Self, usize)> {
        match self {
            Self::Preflop => Some((Self::Flop, 3)),
            Self::Flop => Some((Self::Turn, 1)),
            Self::Turn => Some((Self::River, 1)),
            Self::River => None,
        }
    }
}

/// Things that happened during a transition, in order. Consumers are
/// expected to match on every variant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GameEvent {
    /// Community cards dealt to the board.
    Draw(Vec<Card>),
    NewHand {
        number: usize,
        dealer: String,
    },
    BlindPosted {
        name: String,
        amount: Chips,
    },
    PotAwarded {
        name: String,
        amount: Chips,
        hand: Option<Rank>,
    },
    PlayerEliminated(String),
    GameOver {
        winner: String,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw(cards) => {
                let cards = cards.iter().map(Card::to_string).collect::<Vec<_>>();
                write!(f, "dealt {}", cards.join(" "))
            }
            Self::NewHand { number, dealer } => {
                write!(f, "hand #{number}, {dealer} deals")
            }
            Self::BlindPosted { name, amount } => write!(f, "{name} posts {amount}"),
            Self::PotAwarded {
                name,
                amount,
                hand: Some(rank),
            } => write!(f, "{name} wins {amount} with {rank}"),
            Self::PotAwarded {
                name,
                amount,
                hand: None,
            } => write!(f, "{name} wins {amount}"),
            Self::PlayerEliminated(name) => write!(f, "{name} is out of chips"),
            Self::GameOver { winner } => write!(f, "{winner} wins the game"),
        }
    }
}
