//! Welcome screen

use super::components::{render_button, ButtonState};
use super::widgets::centered_rect;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const INTRO: &str = "Tell us about your situation in your own words. We'll suggest assistance programs that may fit, answer your questions, and walk you through one application for all of the programs you choose.";

/// Draw the welcome screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let card = centered_rect(inner, 64, 16);
    let [text_area, start_area, resume_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(card);

    let mut lines = vec![
        Line::from(Span::styled(
            "Benefits Navigator",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(INTRO),
    ];

    if let Some(submission) = &app.state.last_submission {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Last application: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                submission.reference_number.clone(),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), text_area);

    render_button(frame, start_area, "Enter  Get Started", ButtonState::Active);

    let can_resume = !app.state.programs.is_empty();
    let resume_label = if can_resume {
        format!("r  Resume ({} programs found)", app.state.programs.len())
    } else {
        "r  Resume (nothing saved yet)".to_string()
    };
    let resume_state = if can_resume {
        ButtonState::Ready
    } else {
        ButtonState::Disabled
    };
    render_button(frame, resume_area, &resume_label, resume_state);
}
