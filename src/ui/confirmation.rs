//! Submission confirmation

use super::widgets::centered_rect;
use crate::app::App;
use crate::platform::COPY_SHORTCUT;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the success screen with the reference number
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(submission) = &app.state.last_submission else {
        frame.render_widget(
            Paragraph::new("Nothing has been submitted yet.")
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::styled(
            "✓ Application submitted",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("Thank you. Your application has been received and will be reviewed."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Reference number: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                submission.reference_number.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Submitted: ", Style::default().fg(Color::DarkGray)),
            Span::raw(
                submission
                    .submitted_at
                    .format("%B %-d, %Y %H:%M UTC")
                    .to_string(),
            ),
        ]),
        Line::from(""),
        Line::styled("Programs", Style::default().fg(Color::DarkGray)),
    ];

    for id in &submission.program_ids {
        let name = app.state.program_name(*id).unwrap_or("Program");
        let stage = app
            .state
            .tracker
            .get(*id)
            .map(|s| s.stage.label())
            .unwrap_or("");
        lines.push(Line::from(vec![
            Span::raw(format!("• {name}  ")),
            Span::styled(stage, Style::default().fg(Color::Yellow)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::styled(
        format!("Keep your reference number. Press {COPY_SHORTCUT} to copy it."),
        Style::default().fg(Color::DarkGray),
    ));

    let height = lines.len() as u16 + 2;
    let card = centered_rect(area, 70, height);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        ),
        card,
    );
}
