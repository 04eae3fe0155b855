//! Field rendering utilities for forms

use crate::state::{DocumentSlot, FieldKind, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a single-line field
pub const FIELD_HEIGHT: u16 = 3;

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a form field
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor_style = Style::default().fg(Color::Cyan);

    let display_value = field.display_value();
    let display_str = match (display_value.is_empty(), is_active, field.kind) {
        (true, true, FieldKind::Choice(_)) => "← → to choose".to_string(),
        (true, false, _) => "(empty)".to_string(),
        _ => display_value,
    };

    let content = if field.is_multiline {
        let mut lines: Vec<Line> = display_str
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
            .collect();
        if is_active {
            match lines.last_mut() {
                Some(last) if !display_str.ends_with('\n') => {
                    last.spans.push(Span::styled("▌", cursor_style));
                }
                _ => lines.push(Line::from(Span::styled("▌", cursor_style))),
            }
        }
        Paragraph::new(lines)
    } else {
        let mut spans = vec![Span::styled(display_str, value_style)];
        match field.kind {
            FieldKind::Choice(_) if is_active => {
                spans.push(Span::styled("  ◂ ▸", cursor_style));
            }
            _ if is_active => spans.push(Span::styled("▌", cursor_style)),
            _ => {}
        }
        Paragraph::new(Line::from(spans))
    };

    let block = Block::default()
        .title(format!(" {} ", field.display_label()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a document slot: attached file or the path being typed
pub fn draw_document_slot(frame: &mut Frame, area: Rect, slot: &DocumentSlot, is_active: bool) {
    let title = if slot.required {
        format!(" {} * ", slot.name)
    } else {
        format!(" {} ", slot.name)
    };

    let line = match (&slot.file, is_active) {
        (Some(file), _) => Line::from(vec![
            Span::styled("✓ ", Style::default().fg(Color::Green)),
            Span::raw(file.file_name.clone()),
            Span::styled(
                format!("  ({} bytes)", file.size_bytes),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        (None, true) => Line::from(vec![
            Span::styled("Path: ", Style::default().fg(Color::DarkGray)),
            Span::raw(slot.path_input.clone()),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ]),
        (None, false) => Line::from(Span::styled(
            slot.description.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
