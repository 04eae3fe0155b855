//! Application state definitions

use super::application::ApplicationFlow;
use super::chat::ChatTranscript;
use super::forms::FormField;
use super::program::{ApplicationTracker, Program, ProgramSelection};
use super::progress::Submission;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    /// Free-text situation intake
    Situation,
    /// Waiting for the program analysis
    Analyzing,
    /// Matched programs, chat and status
    Explorer,
    /// Section-by-section application
    Application,
    /// Submitted
    Confirmation,
}

impl View {
    /// Position in the step indicator
    pub fn step_index(&self) -> usize {
        match self {
            View::Home => 0,
            View::Situation | View::Analyzing => 1,
            View::Explorer => 2,
            View::Application => 3,
            View::Confirmation => 4,
        }
    }
}

/// Tab shown in the program explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplorerTab {
    #[default]
    Programs,
    Chat,
    Status,
}

impl ExplorerTab {
    pub fn next(&self) -> Self {
        match self {
            Self::Programs => Self::Chat,
            Self::Chat => Self::Status,
            Self::Status => Self::Programs,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Programs => Self::Status,
            Self::Chat => Self::Programs,
            Self::Status => Self::Chat,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Programs => "Programs",
            Self::Chat => "Ask a Question",
            Self::Status => "Application Status",
        }
    }
}

/// Work the event loop runs after the next draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingTask {
    Analyze { situation: String },
    Answer { question: String },
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Situation intake
    pub situation: FormField,

    // Matching and selection
    pub programs: Vec<Program>,
    pub selection: ProgramSelection,
    pub tracker: ApplicationTracker,
    pub explorer_tab: ExplorerTab,
    pub selected_index: usize,
    pub chat: ChatTranscript,

    // Application
    pub application: Option<ApplicationFlow>,
    pub last_submission: Option<Submission>,

    // Remote work
    pub pending_task: Option<PendingTask>,
    pub remote_configured: bool,

    // UI state
    pub scroll_offset: usize,
    pub errors: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: View::default(),
            view_history: Vec::new(),
            situation: FormField::multiline("situation", "Your situation"),
            programs: Vec::new(),
            selection: ProgramSelection::default(),
            tracker: ApplicationTracker::default(),
            explorer_tab: ExplorerTab::default(),
            selected_index: 0,
            chat: ChatTranscript::new(),
            application: None,
            last_submission: None,
            pending_task: None,
            remote_configured: false,
            scroll_offset: 0,
            errors: VecDeque::new(),
        }
    }
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Scroll down
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    /// Scroll up
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Program under the cursor in the explorer
    pub fn highlighted_program(&self) -> Option<&Program> {
        self.programs.get(self.selected_index)
    }

    /// Selected programs in match order
    pub fn selected_programs(&self) -> Vec<Program> {
        self.selection
            .selected(&self.programs)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn program_name(&self, id: u32) -> Option<&str> {
        self.programs
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    /// Replace matched programs; the selection keeps only ids still present
    pub fn set_programs(&mut self, programs: Vec<Program>) {
        let kept: Vec<u32> = self
            .selection
            .ids()
            .iter()
            .copied()
            .filter(|id| programs.iter().any(|p| p.id == *id))
            .collect();
        self.selection.clear();
        for id in kept {
            self.selection.add(id);
        }
        self.programs = programs;
        self.reset_selection();
    }

    pub fn is_busy(&self) -> bool {
        self.pending_task.is_some()
    }

    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Forget everything about the current application
    pub fn reset_flow(&mut self) {
        self.situation.clear();
        self.programs.clear();
        self.selection.clear();
        self.tracker = ApplicationTracker::default();
        self.chat = ChatTranscript::new();
        self.application = None;
        self.explorer_tab = ExplorerTab::default();
        self.view_history.clear();
        self.pending_task = None;
        self.reset_selection();
    }
}
