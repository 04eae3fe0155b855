//! Layout components (step sidebar, status bar)

use super::components::{render_step_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{DETACH_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{ExplorerTab, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Wizard steps in order, indexed by `View::step_index`
const STEPS: &[&str] = &["Welcome", "Situation", "Programs", "Apply", "Done"];

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the step indicator as a column of boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(STEPS.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let current = app.state.current_view.step_index();
    for (idx, label) in STEPS.iter().enumerate() {
        render_step_button(
            frame,
            chunks[idx + 1],
            idx + 1,
            label,
            idx == current,
            idx < current,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Assistant backend
    let backend = if app.state.remote_configured {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Yellow))
    };
    spans.push(backend);

    let hints = get_view_hints(app.state.current_view, app.state.explorer_tab);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.copy_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View, tab: ExplorerTab) -> String {
    match view {
        View::Home => "Enter:get started  r:resume  q:quit".to_string(),
        View::Situation => "type:describe  Alt+Enter:newline  Enter:find programs  Esc:back".to_string(),
        View::Analyzing => "Finding programs...".to_string(),
        View::Explorer => match tab {
            ExplorerTab::Programs => {
                "j/k:nav  Space:select  c:continue  Tab:next tab  Esc:back".to_string()
            }
            ExplorerTab::Chat => "type:question  Enter:send  Tab:next tab  Esc:back".to_string(),
            ExplorerTab::Status => "j/k:nav  a:advance  Tab:next tab  Esc:back".to_string(),
        },
        View::Application => format!(
            "Tab:next  ←/→:choose  Enter:attach  {DETACH_SHORTCUT}:remove  {SUBMIT_SHORTCUT}:submit  Esc:back"
        ),
        View::Confirmation => "y:copy reference  Enter:home  q:quit".to_string(),
    }
}
