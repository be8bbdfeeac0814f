use hotseat_poker::{
    GameState, RulesError,
    entities::{Action, ActionKind, Chips},
    transition,
};
use std::fmt;

/// Errors that can occur while turning typed text into a game action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Bet/raise suffix is not a non-negative integer.
    BadNumericValue(String),
    /// Unrecognized command.
    UnableToParse(String),
    /// Well-formed action the rules engine refused.
    Rejected(RulesError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadNumericValue(value) => write!(f, "Bad numeric value '{value}'"),
            Self::UnableToParse(input) => write!(
                f,
                "Unable to parse '{input}'. Use C, F, B<amount> or R<amount>"
            ),
            Self::Rejected(err) => write!(f, "Advance failed: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<RulesError> for ParseError {
    fn from(err: RulesError) -> Self {
        Self::Rejected(err)
    }
}

/// A parsed player command, not yet bound to a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CheckCall,
    Fold,
    BetRaise(Chips),
}

impl Command {
    fn kind(self) -> ActionKind {
        match self {
            Self::CheckCall => ActionKind::CheckCall,
            Self::Fold => ActionKind::Fold,
            Self::BetRaise(_) => ActionKind::BetRaise,
        }
    }

    fn amount(self) -> Chips {
        match self {
            Self::BetRaise(amount) => amount,
            Self::CheckCall | Self::Fold => 0,
        }
    }
}

/// Parse a command string into a [`Command`].
///
/// Commands are case-sensitive single tokens:
///
/// ```
/// use hotseat_tui::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("C"), Ok(Command::CheckCall));
/// assert_eq!(parse_command("F"), Ok(Command::Fold));
/// assert_eq!(parse_command("B50"), Ok(Command::BetRaise(50)));
/// assert_eq!(parse_command("R120"), Ok(Command::BetRaise(120)));
/// assert!(parse_command("Bxx").is_err());
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    match trimmed {
        "C" => return Ok(Command::CheckCall),
        "F" => return Ok(Command::Fold),
        _ => {}
    }

    // Exactly one leading B or R is stripped; "BB50" is a bad amount.
    match trimmed
        .strip_prefix('B')
        .or_else(|| trimmed.strip_prefix('R'))
    {
        Some(value) => value
            .parse::<Chips>()
            .map(Command::BetRaise)
            .map_err(|_| ParseError::BadNumericValue(value.to_string())),
        None => Err(ParseError::UnableToParse(trimmed.to_string())),
    }
}

/// Parse `input` and apply it for whoever's turn it is in `state`.
///
/// On success the new snapshot is returned. On any error `state` is left as
/// it was, since [`transition`] never mutates its input.
pub fn parse_action(input: &str, state: &GameState) -> Result<GameState, ParseError> {
    let command = parse_command(input)?;
    let actor = state.action_idx().ok_or(RulesError::GameOver)?;
    let action = Action {
        actor,
        kind: command.kind(),
        amount: command.amount(),
    };
    Ok(transition(state, action)?)
}
