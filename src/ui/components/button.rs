//! Boxed buttons for the step sidebar and the submit action

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by a boxed button
pub const BUTTON_HEIGHT: u16 = 3;

/// How a button is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Has focus or marks the current step
    Active,
    /// Can be pressed but is not focused
    Ready,
    /// Finished step
    Done,
    Disabled,
}

impl ButtonState {
    fn styles(self) -> (Style, Style) {
        match self {
            ButtonState::Active => (
                Style::default().fg(Color::Cyan),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            ButtonState::Ready => (Style::default().fg(Color::DarkGray), Style::default()),
            ButtonState::Done => (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Green),
            ),
            ButtonState::Disabled => (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            ),
        }
    }
}

pub fn render_button(frame: &mut Frame, area: Rect, label: &str, state: ButtonState) {
    let (border, text) = state.styles();
    let block = Block::default().borders(Borders::ALL).border_style(border);
    frame.render_widget(
        Paragraph::new(label)
            .style(text)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// A numbered wizard step; finished steps show a check mark instead
pub fn render_step_button(
    frame: &mut Frame,
    area: Rect,
    number: usize,
    label: &str,
    is_current: bool,
    is_done: bool,
) {
    let (marker, state) = match (is_current, is_done) {
        (true, _) => (number.to_string(), ButtonState::Active),
        (false, true) => ("✓".to_string(), ButtonState::Done),
        (false, false) => (number.to_string(), ButtonState::Disabled),
    };
    render_button(frame, area, &format!("{marker} {label}"), state);
}
