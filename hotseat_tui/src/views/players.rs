//! Two-column grid of player cells.

use hotseat_poker::{
    GameState,
    entities::{Card, Player, PlayerStatus, SeatIndex},
};
use ratatui::{layout::Rect, style::Color};

use super::{CELL_HEIGHT, CELL_WIDTH, Panel, PanelStyle};

/// Border color of the player whose turn it is.
pub const TURN_COLOR: Color = Color::White;

/// Human-readable status label.
#[must_use]
pub fn status_label(status: PlayerStatus) -> &'static str {
    match status {
        PlayerStatus::Active => "Active",
        PlayerStatus::AllIn => "All In",
        PlayerStatus::Folded => "Folded",
        PlayerStatus::Eliminated => "Eliminated",
    }
}

#[must_use]
pub fn status_color(status: PlayerStatus) -> Color {
    match status {
        PlayerStatus::Active => Color::Blue,
        PlayerStatus::Folded => Color::DarkGray,
        PlayerStatus::Eliminated => Color::Black,
        PlayerStatus::AllIn => Color::Yellow,
    }
}

/// Cell of seat `idx`: row `idx / 2`, column `idx % 2`.
#[must_use]
pub fn cell_area(idx: SeatIndex) -> Rect {
    // At most ten seats, so these never overflow a u16.
    let row = (idx / 2) as u16;
    let col = (idx % 2) as u16;
    Rect::new(col * CELL_WIDTH, row * CELL_HEIGHT, CELL_WIDTH, CELL_HEIGHT)
}

/// Total height of the grid for `count` players.
#[must_use]
pub fn grid_height(count: usize) -> u16 {
    count.div_ceil(2) as u16 * CELL_HEIGHT
}

fn hand_text(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The cell of one player, colored by whose turn it is and then by status.
#[must_use]
pub fn player_cell(player: &Player, idx: SeatIndex, is_dealer: bool, is_turn: bool) -> Panel {
    let title = if is_dealer {
        format!("{} (Dealer)", player.name)
    } else {
        player.name.clone()
    };
    let border_fg = if is_turn {
        TURN_COLOR
    } else {
        status_color(player.status)
    };
    let lines = vec![
        format!("Status: {}", status_label(player.status)),
        format!("Chips: {}", player.chips),
        format!("Bet: {}", player.current_bet),
        format!("Hand: {}", hand_text(&player.hole_cards)),
    ];
    Panel::new(cell_area(idx), lines)
        .title(title)
        .style(PanelStyle {
            border_fg: Some(border_fg),
            text_fg: Some(Color::White),
            ..PanelStyle::default()
        })
}

/// One cell per seat, in seating order.
#[must_use]
pub fn players_panels(state: &GameState) -> Vec<Panel> {
    state
        .players()
        .iter()
        .enumerate()
        .map(|(idx, player)| {
            player_cell(
                player,
                idx,
                idx == state.dealer_idx(),
                state.action_idx() == Some(idx),
            )
        })
        .collect()
}
