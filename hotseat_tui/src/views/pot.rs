//! Pot totals.

use hotseat_poker::entities::Pot;
use ratatui::{layout::Rect, style::Color};

use super::{Panel, PanelStyle};

/// Pot values joined by spaces. With more than one pot each value carries its
/// 1-based index, as in `[1]150 [2]80`.
#[must_use]
pub fn pots_text(pots: &[Pot]) -> String {
    if pots.is_empty() {
        return "0".to_string();
    }
    let labelled = pots.len() > 1;
    pots.iter()
        .enumerate()
        .map(|(idx, pot)| {
            if labelled {
                format!("[{}]{}", idx + 1, pot.value)
            } else {
                pot.value.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `text` left-padded to sit roughly in the middle of a box `box_width` wide.
#[must_use]
pub fn centered(text: &str, box_width: u16) -> String {
    let padding = usize::from(box_width)
        .saturating_sub(text.chars().count())
        .saturating_sub(2)
        / 2;
    format!("{}{text}", " ".repeat(padding))
}

#[must_use]
pub fn pot_panel(pots: &[Pot], area: Rect) -> Panel {
    let lines = vec![String::new(), centered(&pots_text(pots), area.width)];
    Panel::new(area, lines).title("Pot").style(PanelStyle {
        border_fg: Some(Color::White),
        border_bg: Some(Color::Green),
        title_fg: None,
        text_fg: Some(Color::Black),
        text_bg: Some(Color::White),
    })
}
