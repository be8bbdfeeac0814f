//! Pure view functions.
//!
//! Every view maps session state to one or more [`Panel`]s: a box with a
//! position, a title, text lines and colors. Nothing here touches the
//! terminal; [`crate::tui_app`] applies panels with ratatui.

use ratatui::{layout::Rect, style::Color};

pub mod board;
pub mod console;
pub mod players;
pub mod pot;
pub mod prompt;

pub use board::board_panel;
pub use console::{ConsoleLog, console_panel};
pub use players::{grid_height, player_cell, players_panels};
pub use pot::pot_panel;
pub use prompt::PromptView;

/// Width of one player cell, and of the board and pot boxes.
pub const CELL_WIDTH: u16 = 25;
/// Height of one player cell.
pub const CELL_HEIGHT: u16 = 6;
pub const BOARD_HEIGHT: u16 = 5;
pub const PROMPT_HEIGHT: u16 = 3;
/// Width of the prompt shown before the game exists.
pub const SETUP_PROMPT_WIDTH: u16 = 40;

/// Colors of a bordered box. `None` keeps the terminal default. The title
/// shares the border colors unless `title_fg` overrides its foreground.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PanelStyle {
    pub border_fg: Option<Color>,
    pub border_bg: Option<Color>,
    pub title_fg: Option<Color>,
    pub text_fg: Option<Color>,
    pub text_bg: Option<Color>,
}

/// Renderable description of one bordered box.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Panel {
    pub area: Rect,
    pub title: String,
    pub lines: Vec<String>,
    pub style: PanelStyle,
}

impl Panel {
    #[must_use]
    pub fn new(area: Rect, lines: Vec<String>) -> Self {
        Self {
            area,
            title: String::new(),
            lines,
            style: PanelStyle::default(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    /// Inner width once the one-cell border is removed.
    #[must_use]
    pub fn inner_width(&self) -> u16 {
        self.area.width.saturating_sub(2)
    }

    /// Inner height once the one-cell border is removed.
    #[must_use]
    pub fn inner_height(&self) -> u16 {
        self.area.height.saturating_sub(2)
    }
}
