//! Application state module

mod analyzing_state;
mod app_state;
mod application;
mod chat;
mod forms;
mod program;
mod progress;

pub use analyzing_state::*;
pub use app_state::*;
pub use application::*;
pub use chat::*;
pub use forms::*;
pub use program::*;
pub use progress::*;
