//! The session controller.
//!
//! A [`Session`] owns everything a running client knows: the setup wizard,
//! the current game snapshot, the event log, the board reveal and the input
//! line. Key presses and submits come in through its methods and every
//! frame is described by [`Session::panels`].

use hotseat_poker::{
    GameState, MAX_PLAYERS, MIN_PLAYERS, RulesError,
    entities::{Blinds, Card, Chips, Deck, GameEvent},
    new_deck, new_game, new_player, seat_players,
};
use ratatui::layout::Rect;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    animation::{CardReveal, RevealStep},
    commands::parse_action,
    config::ClientConfig,
    views::{
        BOARD_HEIGHT, CELL_WIDTH, ConsoleLog, PROMPT_HEIGHT, Panel, PromptView,
        SETUP_PROMPT_WIDTH, board_panel, console_panel, grid_height, players_panels, pot_panel,
    },
};

/// Blinds of every game started by the wizard.
pub const BLINDS: Blinds = Blinds {
    small: 25,
    big: 50,
};

/// Typing this at any prompt ends the session.
pub const EXIT_COMMAND: &str = "exit";

/// Names must be shorter than this, counted in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Which question the prompt is asking. Stages only ever move forward.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum PromptStage {
    CollectPlayerCount,
    /// Index of the player being named.
    CollectPlayerName(usize),
    CollectStartingChips,
    AwaitAction,
}

/// Wizard input rejected without any message on screen.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SetupError {
    #[error("player count must be between 2 and 10, got '{0}'")]
    PlayerCount(String),
    #[error("name must be 1 to 19 characters, got {0}")]
    NameLength(usize),
    #[error("starting chips must be a positive number, got '{0}'")]
    StartingChips(String),
    #[error("game could not start: {0}")]
    Engine(#[from] RulesError),
}

/// Answers collected by the setup wizard. Frozen once the game starts.
#[derive(Clone, Debug, Default)]
pub struct WizardState {
    target_count: usize,
    names: Vec<String>,
    starting_chips: Chips,
}

impl WizardState {
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names still to be collected.
    #[must_use]
    pub fn names_remaining(&self) -> usize {
        self.target_count.saturating_sub(self.names.len())
    }

    #[must_use]
    pub fn starting_chips(&self) -> Chips {
        self.starting_chips
    }

    fn set_player_count(&mut self, input: &str) -> Result<(), SetupError> {
        let count = input
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|count| (MIN_PLAYERS..=MAX_PLAYERS).contains(count))
            .ok_or_else(|| SetupError::PlayerCount(input.to_string()))?;
        self.target_count = count;
        self.names = Vec::with_capacity(count);
        Ok(())
    }

    fn add_player_name(&mut self, input: &str) -> Result<(), SetupError> {
        let len = input.chars().count();
        if len == 0 || len >= MAX_NAME_LEN {
            return Err(SetupError::NameLength(len));
        }
        self.names.push(input.to_string());
        Ok(())
    }

    fn set_starting_chips(&mut self, input: &str) -> Result<(), SetupError> {
        let chips = input
            .trim()
            .parse::<Chips>()
            .ok()
            .filter(|&chips| chips > 0)
            .ok_or_else(|| SetupError::StartingChips(input.to_string()))?;
        self.starting_chips = chips;
        Ok(())
    }

    /// Seat the named players with the starting stack and deal the first
    /// hand.
    fn start_game(&self, deck: Deck) -> Result<GameState, SetupError> {
        let mut players: Vec<_> = self
            .names
            .iter()
            .map(|name| {
                let mut player = new_player(name);
                player.chips = self.starting_chips;
                player
            })
            .collect();
        seat_players(&mut players);
        Ok(new_game(players, BLINDS, deck)?)
    }
}

/// What a submit did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Submission {
    /// The user asked to quit.
    Exit,
    /// The input was accepted: the wizard moved on or an action was applied.
    Accepted,
    /// The input was refused and the stage is unchanged.
    Rejected,
}

#[derive(Debug)]
pub struct Session {
    stage: PromptStage,
    wizard: WizardState,
    input: String,
    prompt: PromptView,
    console: ConsoleLog,
    game: Option<GameState>,
    reveal: CardReveal,
    seed: Option<u64>,
}

impl Session {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let stage = PromptStage::CollectPlayerCount;
        Self {
            stage,
            wizard: WizardState::default(),
            input: String::new(),
            prompt: PromptView::new(setup_heading(stage)),
            console: ConsoleLog::new(),
            game: None,
            reveal: CardReveal::new(config.reveal_delay),
            seed: config.seed,
        }
    }

    #[must_use]
    pub fn stage(&self) -> PromptStage {
        self.stage
    }

    #[must_use]
    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    #[must_use]
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    #[must_use]
    pub fn console(&self) -> &ConsoleLog {
        &self.console
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn prompt(&self) -> &PromptView {
        &self.prompt
    }

    #[must_use]
    pub fn is_revealing(&self) -> bool {
        self.reveal.is_active()
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.prompt.set_text(self.input.as_str());
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.prompt.set_text(self.input.as_str());
    }

    /// Hand the input line to the current stage. The line is cleared
    /// whatever the outcome.
    pub fn submit(&mut self) -> Submission {
        let input = std::mem::take(&mut self.input);
        self.prompt.set_text("");

        if input.trim() == EXIT_COMMAND {
            info!("exit requested at {:?}", self.stage);
            return Submission::Exit;
        }

        let outcome = match self.stage {
            PromptStage::AwaitAction => self.submit_action(&input),
            stage => match self.submit_setup(stage, &input) {
                Ok(next) => {
                    self.stage = next;
                    Submission::Accepted
                }
                Err(err) => {
                    debug!("setup input rejected: {err}");
                    Submission::Rejected
                }
            },
        };
        self.prompt.set_heading(self.heading());
        outcome
    }

    /// Run the stage's setter and return the stage that follows it.
    fn submit_setup(&mut self, stage: PromptStage, input: &str) -> Result<PromptStage, SetupError> {
        match stage {
            PromptStage::CollectPlayerCount => {
                self.wizard.set_player_count(input)?;
                Ok(PromptStage::CollectPlayerName(0))
            }
            PromptStage::CollectPlayerName(idx) => {
                self.wizard.add_player_name(input)?;
                if idx + 1 == self.wizard.target_count {
                    Ok(PromptStage::CollectStartingChips)
                } else {
                    Ok(PromptStage::CollectPlayerName(idx + 1))
                }
            }
            PromptStage::CollectStartingChips => {
                self.wizard.set_starting_chips(input)?;
                let deck = self.seed.map_or_else(new_deck, Deck::seeded);
                let game = self.wizard.start_game(deck)?;
                info!(
                    players = self.wizard.names.len(),
                    chips = self.wizard.starting_chips,
                    "game started"
                );
                dispatch_events(&game, &[], &mut self.reveal, &mut self.console);
                self.game = Some(game);
                Ok(PromptStage::AwaitAction)
            }
            PromptStage::AwaitAction => Ok(stage),
        }
    }

    fn submit_action(&mut self, input: &str) -> Submission {
        let Some(game) = &self.game else {
            return Submission::Rejected;
        };
        match parse_action(input, game) {
            Ok(next) => {
                debug!(input, "action applied");
                dispatch_events(&next, game.board(), &mut self.reveal, &mut self.console);
                self.game = Some(next);
                Submission::Accepted
            }
            Err(err) => {
                debug!(input, "action failed: {err}");
                self.console.append(err.to_string());
                Submission::Rejected
            }
        }
    }

    /// Question for the current stage.
    #[must_use]
    pub fn heading(&self) -> String {
        match (self.stage, &self.game) {
            (PromptStage::AwaitAction, Some(game)) => action_heading(game),
            (stage, _) => setup_heading(stage),
        }
    }

    /// Step the board reveal to `now`.
    pub fn advance_reveal(&mut self, now: Instant) -> RevealStep {
        self.reveal.step(now)
    }

    /// Cards the board shows: the reveal in progress, or the snapshot's board.
    #[must_use]
    pub fn board_cards(&self) -> &[Card] {
        match &self.game {
            _ if self.reveal.is_active() => self.reveal.shown(),
            Some(game) => game.board(),
            None => &[],
        }
    }

    /// Every box of a frame for a terminal of `width` columns. Boxes may
    /// extend past the terminal; the binding clips them.
    #[must_use]
    pub fn panels(&self, width: u16) -> Vec<Panel> {
        let Some(game) = &self.game else {
            return vec![self.prompt.panel(Rect::new(
                0,
                0,
                SETUP_PROMPT_WIDTH,
                PROMPT_HEIGHT,
            ))];
        };

        let below_players = grid_height(game.players().len());
        let prompt_y = below_players + BOARD_HEIGHT + 1;
        let console_x = CELL_WIDTH * 2;

        let mut panels = players_panels(game);
        panels.push(board_panel(
            self.board_cards(),
            Rect::new(0, below_players, CELL_WIDTH, BOARD_HEIGHT),
        ));
        panels.push(pot_panel(
            game.pots(),
            Rect::new(CELL_WIDTH, below_players, CELL_WIDTH, BOARD_HEIGHT),
        ));
        panels.push(
            self.prompt
                .panel(Rect::new(0, prompt_y, CELL_WIDTH * 2, PROMPT_HEIGHT)),
        );
        panels.push(console_panel(
            &self.console,
            Rect::new(
                console_x,
                0,
                width.saturating_sub(console_x),
                prompt_y + PROMPT_HEIGHT,
            ),
        ));
        panels
    }
}

/// Route a new snapshot's events: board cards to the reveal, everything
/// else to the log. `board` is the board before the transition.
fn dispatch_events(
    game: &GameState,
    board: &[Card],
    reveal: &mut CardReveal,
    console: &mut ConsoleLog,
) {
    let mut board = board.to_vec();
    for event in game.events() {
        match event {
            GameEvent::Draw(cards) => {
                reveal.reveal(&board, cards);
                board.extend_from_slice(cards);
            }
            GameEvent::NewHand { .. } => {
                board.clear();
                reveal.new_hand();
                console.append(event.to_string());
            }
            GameEvent::BlindPosted { .. }
            | GameEvent::PotAwarded { .. }
            | GameEvent::PlayerEliminated(_)
            | GameEvent::GameOver { .. } => console.append(event.to_string()),
        }
    }
}

fn setup_heading(stage: PromptStage) -> String {
    match stage {
        PromptStage::CollectPlayerCount => "How many players?".to_string(),
        PromptStage::CollectPlayerName(idx) => format!("What is player {}'s name?", idx + 1),
        PromptStage::CollectStartingChips => "How many chips to start?".to_string(),
        PromptStage::AwaitAction => String::new(),
    }
}

fn action_heading(game: &GameState) -> String {
    if let Some(winner) = game.winner() {
        return format!("{} wins! Type exit to quit.", winner.name);
    }
    let Some(player) = game.acting_player() else {
        return String::new();
    };
    if game.amount_owed() > 0 {
        format!("{}: (C)all, (R)aise or (F)old?", player.name)
    } else {
        format!("{}: (C)heck, (B)et or (F)old?", player.name)
    }
}
