//! Terminal binding.
//!
//! Applies the session's [`Panel`]s with ratatui and feeds it crossterm key
//! events. Board reveals are played here with tokio timers, and no key is
//! read until a reveal is over.

use anyhow::Result;
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph},
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::{
    animation::RevealStep,
    config::ClientConfig,
    session::{Session, Submission},
    views::Panel,
};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Whether the event loop keeps going after a key press.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

fn style_of(fg: Option<Color>, bg: Option<Color>) -> Style {
    let mut style = Style::default();
    if let Some(fg) = fg {
        style = style.fg(fg);
    }
    if let Some(bg) = bg {
        style = style.bg(bg);
    }
    style
}

/// Draw one panel, clipped to the frame. Panels entirely off screen are
/// skipped.
pub fn render_panel(frame: &mut Frame, panel: &Panel) {
    let area = panel.area.intersection(frame.area());
    if area.is_empty() {
        return;
    }

    let border_style = style_of(panel.style.border_fg, panel.style.border_bg);
    let title_style = match panel.style.title_fg {
        Some(fg) => border_style.fg(fg),
        None => border_style,
    };
    let block = Block::bordered()
        .border_style(border_style)
        .title(Span::styled(panel.title.as_str(), title_style));

    let text: Text = panel
        .lines
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect::<Vec<_>>()
        .into();
    let paragraph = Paragraph::new(text)
        .style(style_of(panel.style.text_fg, panel.style.text_bg))
        .block(block);
    frame.render_widget(paragraph, area);
}

pub struct TuiApp {
    session: Session,
}

impl TuiApp {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            session: Session::new(config),
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Render the whole frame from the session. Layout is recomputed from
    /// the frame size every time, so a resize only needs a redraw.
    pub fn draw(&self, frame: &mut Frame) {
        for panel in self.session.panels(frame.area().width) {
            render_panel(frame, &panel);
        }
    }

    /// Apply one key press to the session.
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Flow::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Flow::Quit,
            (KeyCode::Enter, _) => match self.session.submit() {
                Submission::Exit => Flow::Quit,
                Submission::Accepted | Submission::Rejected => Flow::Continue,
            },
            (KeyCode::Backspace, _) => {
                self.session.backspace();
                Flow::Continue
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.session.push_char(c);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    /// Show pending board cards one per tick. Returns once the reveal is
    /// over; terminal input waits in the queue until then.
    async fn play_reveal(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            match self.session.advance_reveal(Instant::now()) {
                RevealStep::Revealed(card) => {
                    debug!(%card, "card revealed");
                    terminal.draw(|frame| self.draw(frame))?;
                }
                RevealStep::Waiting(deadline) => {
                    tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
                }
                RevealStep::Idle => return Ok(()),
            }
        }
    }

    /// Main loop: draw, finish any reveal, then wait for the next event.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        info!("session started");
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if self.session.is_revealing() {
                self.play_reveal(&mut terminal).await?;
                continue;
            }

            if event::poll(POLL_TIMEOUT)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) == Flow::Quit {
                            info!("session ended");
                            return Ok(());
                        }
                    }
                    // Redrawn at the top of the loop with the new size.
                    Event::Resize(width, height) => debug!(width, height, "terminal resized"),
                    _ => {}
                }
            }
        }
    }
}
