//! UI module for rendering the TUI

mod analyzing;
mod application;
mod components;
mod confirmation;
mod explorer;
mod forms;
mod home;
mod layout;
mod situation;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (sidebar_area, main_area) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Home => home::draw(frame, main_area, app),
        View::Situation => situation::draw(frame, main_area, app),
        View::Analyzing => analyzing::draw(frame, main_area, app),
        View::Explorer => explorer::draw(frame, main_area, app),
        View::Application => application::draw(frame, main_area, app),
        View::Confirmation => confirmation::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Errors render on top of everything
    if let Some(message) = app.state.current_error() {
        let remaining = app.state.errors.len().saturating_sub(1);
        render_error_dialog(frame, message, remaining);
    }
}
