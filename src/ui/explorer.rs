//! Program explorer: matched programs, assistant chat and application status

use super::components::wrap_text;
use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::{ChatRole, ExplorerTab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

const TABS: [ExplorerTab; 3] = [ExplorerTab::Programs, ExplorerTab::Chat, ExplorerTab::Status];

/// Draw the explorer with its tab bar
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let selected_tab = TABS
        .iter()
        .position(|t| *t == app.state.explorer_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(TABS.iter().map(|t| t.label()))
        .select(selected_tab)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" | ");
    frame.render_widget(tabs, chunks[0]);

    match app.state.explorer_tab {
        ExplorerTab::Programs => draw_programs(frame, chunks[1], app),
        ExplorerTab::Chat => draw_chat(frame, chunks[1], app),
        ExplorerTab::Status => draw_status(frame, chunks[1], app),
    }
}

/// Program list with selection boxes and a detail pane
fn draw_programs(frame: &mut Frame, area: Rect, app: &App) {
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Min(0)])
        .split(area);

    let items: Vec<ListItem> = app
        .state
        .programs
        .iter()
        .enumerate()
        .map(|(idx, program)| {
            let is_highlighted = idx == app.state.selected_index;
            let checkbox = if app.state.selection.contains(program.id) {
                Span::styled("[x] ", Style::default().fg(Color::Green))
            } else {
                Span::styled("[ ] ", Style::default().fg(Color::DarkGray))
            };
            let style = if is_highlighted {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let prefix = if is_highlighted { "▸" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                checkbox,
                Span::styled(program.name.clone(), style),
            ]))
        })
        .collect();

    let title = format!(
        " Matched Programs ({} selected) ",
        app.state.selection.len()
    );
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    render_scrollable_list(frame, h_chunks[0], list, app.state.selected_index);

    let detail = match app.state.highlighted_program() {
        Some(program) => vec![
            Line::styled(
                program.name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::from(program.description.clone()),
            Line::from(""),
            Line::styled("Eligibility", Style::default().fg(Color::Yellow)),
            Line::from(program.eligibility.clone()),
        ],
        None => vec![Line::styled(
            "No programs yet. Go back and describe your situation.",
            Style::default().fg(Color::DarkGray),
        )],
    };
    frame.render_widget(
        Paragraph::new(detail)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Details ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        h_chunks[1],
    );
}

/// Chat transcript and input line
fn draw_chat(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let width = chunks[0].width.saturating_sub(4).max(10) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for message in &app.state.chat.messages {
        let (who, color) = match message.role {
            ChatRole::User => ("You", Color::Green),
            ChatRole::Assistant => ("Assistant", Color::Cyan),
        };
        lines.push(Line::styled(
            who,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        lines.extend(wrap_text(&message.text, width).into_iter().map(Line::from));
        lines.push(Line::from(""));
    }
    if app.state.chat.awaiting_answer {
        lines.push(Line::styled(
            "Assistant is typing...",
            Style::default().fg(Color::DarkGray),
        ));
    }

    // Stick to the bottom, then let the user scroll back
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = chat_scroll(lines.len(), visible, app.state.scroll_offset);

    frame.render_widget(
        Paragraph::new(lines)
            .scroll((scroll, 0))
            .block(
                Block::default()
                    .title(" Ask about your programs ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        chunks[0],
    );

    let input_style = if app.state.chat.awaiting_answer {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.state.chat.input.clone()),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" Your question ")
            .borders(Borders::ALL)
            .border_style(input_style),
    );
    frame.render_widget(input, chunks[1]);
}

/// Top row to show so the newest line sits at the bottom, moved back by
/// `offset` lines and clamped to what a paragraph scroll can hold
fn chat_scroll(total: usize, visible: usize, offset: usize) -> u16 {
    let bottom = total.saturating_sub(visible);
    u16::try_from(bottom.saturating_sub(offset)).unwrap_or(u16::MAX)
}

/// One gauge per selected program's status record
fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Application Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let statuses = app.state.tracker.statuses();
    if statuses.is_empty() {
        frame.render_widget(
            Paragraph::new("Select programs to start tracking their applications.")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            statuses
                .iter()
                .map(|_| Constraint::Length(4))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    for (idx, status) in statuses.iter().enumerate() {
        let name = app
            .state
            .program_name(status.program_id)
            .unwrap_or("Program");
        let is_highlighted = idx == app.state.selected_index;
        let border = if is_highlighted {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        let estimate = status
            .estimated_completion_date
            .map(|d| format!("  est. {}", d.format("%b %-d, %Y")))
            .unwrap_or_default();
        let title = format!(" {} | {}{} ", name, status.stage.label(), estimate);

        let label = status
            .next_steps
            .clone()
            .unwrap_or_else(|| status.stage.next_steps().to_string());
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .percent(status.stage.progress())
            .label(label);
        frame.render_widget(gauge, rows[idx]);
    }
}
