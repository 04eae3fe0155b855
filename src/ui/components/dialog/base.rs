//! Modal overlay drawn above the current view

use crate::ui::widgets::centered_rect;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Side padding inside the border
const PADDING: u16 = 2;

pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Title and border color
    pub accent: Color,
    /// Body text; `\n` starts a new paragraph
    pub message: &'a str,
    pub hint: Option<Vec<Span<'a>>>,
    pub max_width: u16,
}

/// Size the dialog to its wrapped message and center it on screen
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let screen = frame.area();
    let outer = config.max_width.min(screen.width);
    let text_width = outer.saturating_sub(2 * PADDING + 2).max(1);

    let mut body: Vec<Line> = wrap_text(config.message, text_width as usize)
        .into_iter()
        .map(Line::from)
        .collect();
    if let Some(hint) = config.hint {
        body.push(Line::from(""));
        body.push(Line::from(hint));
    }

    let widest = body
        .iter()
        .map(Line::width)
        .chain(std::iter::once(config.title.chars().count() + 2))
        .max()
        .unwrap_or(0) as u16;
    let width = widest + 2 * PADDING + 2;
    let height = (body.len() as u16 + 2).max(5);
    let area = centered_rect(screen, width.min(outer), height);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", config.title),
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.accent))
        .padding(ratatui::widgets::Padding::horizontal(PADDING));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .style(Style::default().bg(Color::Black)),
        area,
    );
}

/// Greedy word wrap; explicit newlines are kept as paragraph breaks
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current_line.chars().count() + word.chars().count() + 1;
            if needed > max_width && !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
