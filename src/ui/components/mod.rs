//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, render_step_button, ButtonState, BUTTON_HEIGHT};
pub use dialog::{render_error_dialog, wrap_text};
