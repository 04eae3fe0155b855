//! Analyzing screen with a pulsing progress bar

use super::widgets::centered_rect;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draw the waiting screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let (pulse, message) = app
        .analyzing_state
        .as_ref()
        .map(|s| (s.pulse, s.message()))
        .unwrap_or((0.0, "Working"));

    let card = centered_rect(area, 50, 7);
    let [title_area, gauge_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Length(3)]).areas(card);

    frame.render_widget(
        Paragraph::new(vec![
            Line::styled(
                "Analyzing your situation",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(format!("{message}..."), Style::default().fg(Color::Gray)),
        ])
        .centered(),
        title_area,
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .label("")
        .ratio(f64::from(pulse).clamp(0.0, 1.0));
    frame.render_widget(gauge, gauge_area);
}
