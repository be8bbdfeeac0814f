//! Community cards.

use hotseat_poker::{constants::BOARD_SIZE, entities::Card};
use ratatui::{layout::Rect, style::Color};

use super::{Panel, PanelStyle};

/// Shown in board slots no card has reached yet.
pub const PLACEHOLDER: &str = "??";

/// Text of the five board slots, known cards first in dealt order.
#[must_use]
pub fn board_slots(cards: &[Card]) -> Vec<String> {
    let known = cards.len().min(BOARD_SIZE);
    cards[..known]
        .iter()
        .map(Card::to_string)
        .chain(std::iter::repeat_n(PLACEHOLDER.to_string(), BOARD_SIZE - known))
        .collect()
}

/// The board box at `area` showing `cards`, which may be a reveal in
/// progress rather than the snapshot's board.
#[must_use]
pub fn board_panel(cards: &[Card], area: Rect) -> Panel {
    let lines = vec![String::new(), format!("    {}", board_slots(cards).join(" "))];
    Panel::new(area, lines).title("Board").style(PanelStyle {
        border_fg: Some(Color::White),
        border_bg: Some(Color::Red),
        title_fg: None,
        text_fg: Some(Color::Black),
        text_bg: Some(Color::White),
    })
}
