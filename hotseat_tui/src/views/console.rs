//! Scrollback event log.

use ratatui::{layout::Rect, style::Color};

use super::{Panel, PanelStyle};

/// Append-only log of console messages, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ConsoleLog {
    entries: Vec<String>,
}

impl ConsoleLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `height` lines of the log hard-wrapped at `width` characters.
    ///
    /// Wrapping is a plain character slice and may split words. Only the
    /// newest entries needed to fill the viewport are wrapped.
    #[must_use]
    pub fn lines_to_display(&self, width: usize, height: usize) -> Vec<String> {
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let mut selected: Vec<Vec<String>> = Vec::new();
        let mut total = 0;
        for entry in self.entries.iter().rev() {
            let lines = wrap(entry, width);
            total += lines.len();
            selected.push(lines);
            if total >= height {
                break;
            }
        }

        let mut lines: Vec<String> = selected.into_iter().rev().flatten().collect();
        if lines.len() > height {
            lines.drain(..lines.len() - height);
        }
        lines
    }
}

/// Split `entry` into chunks of `width` characters. An empty entry is one
/// empty line.
fn wrap(entry: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = entry.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// The "Events" box filled with the tail of `log`.
#[must_use]
pub fn console_panel(log: &ConsoleLog, area: Rect) -> Panel {
    let panel = Panel::new(area, Vec::new())
        .title("Events")
        .style(PanelStyle {
            text_fg: Some(Color::Green),
            ..PanelStyle::default()
        });
    let lines = log.lines_to_display(
        usize::from(panel.inner_width()),
        usize::from(panel.inner_height()),
    );
    Panel { lines, ..panel }
}
