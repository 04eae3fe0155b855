//! Application flow: section tracker and the focused section's form

use super::components::{render_button, ButtonState};
use super::forms::{draw_document_slot, draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{ApplicationFlow, Form, Section};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the application flow
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(flow) = app.state.application.as_ref() else {
        frame.render_widget(
            Paragraph::new("No application in progress.").style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    };

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(area);

    draw_tracker(frame, h_chunks[0], flow);

    let section = flow.focus.section;
    let block = Block::default()
        .title(format!(" {} ", section.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(h_chunks[1]);
    frame.render_widget(block, h_chunks[1]);

    match section {
        Section::PersonalInfo => draw_form(frame, inner, &flow.personal),
        Section::IncomeInfo => draw_form(frame, inner, &flow.income),
        Section::Documents => draw_documents(frame, inner, flow),
        Section::Review => draw_review(frame, inner, flow),
    }
}

/// Section list with visibility and completion markers
fn draw_tracker(frame: &mut Frame, area: Rect, flow: &ApplicationFlow) {
    let mut lines = vec![
        Line::styled(
            "Your application",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];

    for section in Section::ALL {
        let status = flow.progress.status(section);
        let is_focused = flow.focus.section == section;
        let (marker, color) = match (status.visible, status.complete) {
            (_, true) => ("✓", Color::Green),
            (true, false) => ("●", Color::Yellow),
            (false, false) => ("○", Color::DarkGray),
        };
        let name_style = match (is_focused, status.visible) {
            (true, _) => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default(),
            (false, false) => Style::default().fg(Color::DarkGray),
        };
        let prefix = if is_focused { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{marker} "), Style::default().fg(color)),
            Span::styled(section.title(), name_style),
        ]));
    }

    if !flow.is_submitted() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Up next: ", Style::default().fg(Color::DarkGray)),
            Span::raw(flow.progress.current_section().title()),
        ]));
    }

    if let Some(greeting) = flow.greeting() {
        lines.push(Line::from(""));
        lines.push(Line::styled(greeting, Style::default().fg(Color::Green)));
    }

    lines.push(Line::from(""));
    lines.push(Line::styled("Applying for", Style::default().fg(Color::DarkGray)));
    for program in &flow.programs {
        lines.push(Line::from(format!("• {}", program.name)));
    }

    if let Some(submission) = flow.progress.submission() {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("Submitted as {}. Editing is closed.", submission.reference_number),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        area,
    );
}

/// Stack the fields of a form, highlighting the focused one
fn draw_form(frame: &mut Frame, area: Rect, form: &impl Form) {
    let focused = form.active_field();
    let fields = form.fields();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(FIELD_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    for (idx, field) in fields.iter().enumerate() {
        draw_field(frame, rows[idx], field, idx == focused);
    }
}

fn draw_documents(frame: &mut Frame, area: Rect, flow: &ApplicationFlow) {
    let slots = &flow.documents.slots;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            slots
                .iter()
                .map(|_| Constraint::Length(FIELD_HEIGHT))
                .chain([Constraint::Length(1), Constraint::Min(0)]),
        )
        .split(area);

    for (idx, slot) in slots.iter().enumerate() {
        draw_document_slot(frame, rows[idx], slot, idx == flow.documents.active_slot_index);
    }

    let summary = format!(
        "{} of {} attached. Type a path and press Enter to attach.",
        flow.documents.attached_count(),
        slots.len()
    );
    frame.render_widget(
        Paragraph::new(summary).style(Style::default().fg(Color::DarkGray)),
        rows[slots.len()],
    );
}

fn draw_review(frame: &mut Frame, area: Rect, flow: &ApplicationFlow) {
    let [summary_area, button_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(area);

    let label = |text: &str| Span::styled(format!("{text:<18}"), Style::default().fg(Color::DarkGray));
    let personal = flow.personal.to_record();
    let income = flow.income.to_record();

    let mut lines = vec![
        Line::styled("Personal Information", Style::default().fg(Color::Cyan)),
        Line::from(vec![
            label("Name"),
            Span::raw(format!("{} {}", personal.first_name, personal.last_name)),
        ]),
        Line::from(vec![label("Date of birth"), Span::raw(personal.date_of_birth)]),
        Line::from(vec![label("Email"), Span::raw(personal.email)]),
        Line::from(vec![label("ZIP code"), Span::raw(personal.zip_code)]),
        Line::from(""),
        Line::styled("Income Information", Style::default().fg(Color::Cyan)),
        Line::from(vec![
            label("Employment"),
            Span::raw(flow.income.employment_status.display_value()),
        ]),
        Line::from(vec![label("Monthly income"), Span::raw(format!("${}", income.monthly_income))]),
        Line::from(vec![label("Household size"), Span::raw(income.household_size)]),
    ];
    if !income.other_income.is_empty() {
        lines.push(Line::from(vec![
            label("Other income"),
            Span::raw(format!("${} {}", income.other_income, income.other_income_source)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::styled("Documents", Style::default().fg(Color::Cyan)));
    for slot in &flow.documents.slots {
        let file = slot
            .file
            .as_ref()
            .map(|f| f.file_name.as_str())
            .unwrap_or("not provided");
        lines.push(Line::from(vec![label(&slot.name), Span::raw(file.to_string())]));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), summary_area);

    let button_label = if flow.is_submitted() {
        "Submitted".to_string()
    } else {
        format!("Enter / {SUBMIT_SHORTCUT}  Submit Application")
    };
    let state = if flow.is_submitted() {
        ButtonState::Done
    } else if !flow.progress.can_submit() {
        ButtonState::Disabled
    } else if flow.is_review_focused() {
        ButtonState::Active
    } else {
        ButtonState::Ready
    };
    render_button(frame, button_area, &button_label, state);
}
