//! Situation intake screen

use super::forms::draw_field;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

const PROMPT: &str = "What's going on? Describe your situation, for example rent you can't cover, food for your family, looking for work or child care.";

/// Draw the free-text situation form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let [prompt_area, field_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(PROMPT)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
        prompt_area,
    );

    draw_field(frame, field_area, &app.state.situation, true);

    let chars = app.state.situation.as_text().chars().count();
    let footer = if app.state.situation.is_blank() {
        Line::styled("Nothing to analyze yet", Style::default().fg(Color::DarkGray))
    } else {
        Line::styled(
            format!("{chars} characters. Press Enter to find programs"),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(footer), footer_area);
}
