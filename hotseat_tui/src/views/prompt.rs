//! Heading and input line.

use ratatui::{layout::Rect, style::Color};

use super::{Panel, PanelStyle};

/// Drawn after the input text.
pub const CURSOR: char = '_';

/// A one-line heading over the text being typed. Heading and text change
/// independently.
#[derive(Clone, Debug, Default)]
pub struct PromptView {
    heading: String,
    text: String,
}

impl PromptView {
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            text: String::new(),
        }
    }

    pub fn set_heading(&mut self, heading: impl Into<String>) {
        self.heading = heading.into();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn heading(&self) -> &str {
        &self.heading
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn panel(&self, area: Rect) -> Panel {
        Panel::new(area, vec![format!("{}{CURSOR}", self.text)])
            .title(self.heading.clone())
            .style(PanelStyle {
                border_fg: Some(Color::Cyan),
                text_fg: Some(Color::White),
                ..PanelStyle::default()
            })
    }
}
