//! Application state and core logic

use crate::assistant::{BenefitsAssistant, CloudFunctionClient, LocalAssistant};
use crate::config::TuiConfig;
use crate::platform::COMMAND_MODIFIER;
use crate::state::{
    AnalysisResults, AnalyzingState, ApplicationFlow, ApplicationTracker, AppState, ExplorerTab,
    PendingTask, Program, ProgramSelection, ProgressError, Submission, View,
};
use crate::storage::{keys, LocalStore};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::future::Future;
use std::sync::Arc;

/// Result of a finished pending task
#[derive(Debug)]
pub enum TaskOutcome {
    Programs(Vec<Program>),
    Answer(String),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Program matching and question answering
    assistant: Arc<BenefitsAssistant>,
    /// Saved progress
    store: LocalStore,
    /// Whether the app should quit
    quit: bool,
    /// Status bar feedback message
    pub copy_message: Option<String>,
    /// Analyzing screen animation state
    pub analyzing_state: Option<AnalyzingState>,
}

/// Build the assistant described by the configuration
pub fn build_assistant(config: &TuiConfig) -> BenefitsAssistant {
    let local = match config.mock_delays() {
        Some((analyze, respond)) => LocalAssistant::new(analyze, respond),
        None => LocalAssistant::default(),
    };

    let remote = match CloudFunctionClient::new(
        config.analyze_situation_url.clone(),
        config.generate_response_url.clone(),
        config.request_timeout(),
    ) {
        Ok(client) if client.is_configured() => Some(client),
        Ok(_) => {
            tracing::info!("assistant endpoints not configured, using local matcher");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not build assistant client, using local matcher");
            None
        }
    };

    BenefitsAssistant::new(
        remote.map(|c| Box::new(c) as Box<dyn crate::assistant::AssistantClientTrait>),
        local,
    )
}

impl App {
    /// Create a new App instance and restore saved progress
    pub fn new(assistant: BenefitsAssistant, store: LocalStore) -> Self {
        let state = AppState {
            remote_configured: assistant.has_remote(),
            ..Default::default()
        };

        let mut app = Self {
            state,
            assistant: Arc::new(assistant),
            store,
            quit: false,
            copy_message: None,
            analyzing_state: None,
        };
        app.restore_saved();
        app
    }

    /// Load whatever the previous session left in the store
    fn restore_saved(&mut self) {
        let loaded = self.load_saved();
        // Older files may hold records for programs no longer selected
        if self
            .state
            .tracker
            .sync_with_selection(&self.state.selection, Utc::now())
        {
            self.save_statuses();
        }
        match loaded {
            Ok(()) => {
                if !self.state.programs.is_empty() {
                    tracing::info!(
                        programs = self.state.programs.len(),
                        selected = self.state.selection.len(),
                        "restored saved progress"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable saved progress");
            }
        }
    }

    fn load_saved(&mut self) -> Result<()> {
        if let Some(situation) = self.store.get::<String>(keys::USER_SITUATION)? {
            self.state.situation.set_text(situation);
        }
        if let Some(results) = self.store.get::<AnalysisResults>(keys::AI_RESULTS)? {
            self.state.set_programs(results.programs);
        }
        if let Some(selection) = self.store.get::<ProgramSelection>(keys::SELECTED_PROGRAMS)? {
            for &id in selection.ids() {
                if self.state.programs.iter().any(|p| p.id == id) {
                    self.state.selection.add(id);
                }
            }
        }
        if let Some(tracker) = self.store.get::<ApplicationTracker>(keys::APPLICATION_STATUSES)? {
            self.state.tracker = tracker;
        }
        self.state.last_submission = self.store.get::<Submission>(keys::APPLICATION_SUBMISSION)?;
        Ok(())
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// True while the analyzing animation should run at full frame rate
    pub fn is_animating(&self) -> bool {
        self.analyzing_state.is_some() || self.state.chat.awaiting_answer
    }

    /// Advance time-based animation
    pub fn tick(&mut self) {
        if let Some(ref mut analyzing) = self.analyzing_state {
            analyzing.update();
        }
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Log and surface a failed write; the flow continues regardless
    fn storage_failed(&mut self, key: &str, error: anyhow::Error) {
        tracing::error!(key, error = %error, "failed to save progress");
        self.push_error(format!("Could not save progress: {error}"));
    }

    fn save_statuses(&mut self) {
        if let Err(e) = self
            .store
            .set(keys::APPLICATION_STATUSES, &self.state.tracker)
        {
            self.storage_failed(keys::APPLICATION_STATUSES, e);
        }
    }

    /// Bring status records in line with the selection and save both
    fn sync_selection(&mut self) {
        if self
            .state
            .tracker
            .sync_with_selection(&self.state.selection, Utc::now())
        {
            self.save_statuses();
        }
        if let Err(e) = self
            .store
            .set(keys::SELECTED_PROGRAMS, &self.state.selection)
        {
            self.storage_failed(keys::SELECTED_PROGRAMS, e);
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.copy_message = None;

        match self.state.current_view {
            View::Home => self.handle_home_key(key),
            View::Situation => self.handle_situation_key(key),
            View::Analyzing => {}
            View::Explorer => self.handle_explorer_key(key),
            View::Application => self.handle_application_key(key),
            View::Confirmation => self.handle_confirmation_key(key),
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        // The analyzing screen is transient and never returned to
        while let Some(view) = self.state.view_history.pop() {
            if view == View::Analyzing {
                continue;
            }
            self.state.current_view = view;
            return;
        }
    }

    /// Take the queued remote work as a future that owns everything it
    /// needs, so the caller can keep drawing while it runs.
    pub fn take_pending_work(&mut self) -> Option<impl Future<Output = TaskOutcome>> {
        let task = self.state.pending_task.take()?;
        let assistant = Arc::clone(&self.assistant);
        let context = self.state.selected_programs();

        Some(async move {
            match task {
                PendingTask::Analyze { situation } => {
                    TaskOutcome::Programs(assistant.analyze(&situation).await)
                }
                PendingTask::Answer { question } => {
                    TaskOutcome::Answer(assistant.respond(&question, &context).await)
                }
            }
        })
    }

    /// Apply the result of finished remote work
    pub fn apply_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Programs(programs) => {
                tracing::info!(count = programs.len(), "situation analyzed");

                self.state.set_programs(programs);
                self.sync_selection();
                self.state.chat = Default::default();
                self.state.explorer_tab = ExplorerTab::Programs;
                self.analyzing_state = None;

                let results = AnalysisResults {
                    programs: self.state.programs.clone(),
                };
                if let Err(e) = self.store.set(keys::AI_RESULTS, &results) {
                    self.storage_failed(keys::AI_RESULTS, e);
                }

                if self.state.current_view == View::Analyzing {
                    self.navigate(View::Explorer);
                }
            }
            TaskOutcome::Answer(answer) => {
                self.state.chat.push_answer(answer);
                self.state.scroll_offset = 0;
            }
        }
    }

    /// Handle keys on the welcome screen
    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.state.view_history.clear();
                self.navigate(View::Situation);
            }
            KeyCode::Char('r') if !self.state.programs.is_empty() => {
                self.state.reset_selection();
                self.navigate(View::Explorer);
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys in the situation intake
    fn handle_situation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.state.situation.value.push('\n');
            }
            KeyCode::Enter => self.start_analysis(),
            KeyCode::Esc => self.go_back(),
            KeyCode::Backspace => {
                self.state.situation.pop_char();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.situation.push_char(c);
            }
            _ => {}
        }
    }

    /// Queue analysis of the typed situation and show the analyzing screen
    fn start_analysis(&mut self) {
        if self.state.is_busy() {
            return;
        }
        if self.state.situation.is_blank() {
            self.copy_message = Some("Describe your situation first".to_string());
            return;
        }

        let situation = self.state.situation.as_text().trim().to_string();
        if let Err(e) = self.store.set(keys::USER_SITUATION, &situation) {
            self.storage_failed(keys::USER_SITUATION, e);
        }

        tracing::info!(chars = situation.len(), "analyzing situation");
        self.state.pending_task = Some(PendingTask::Analyze { situation });
        self.analyzing_state = Some(AnalyzingState::new());
        self.navigate(View::Analyzing);
    }

    /// Handle keys in the program explorer
    fn handle_explorer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.state.explorer_tab = self.state.explorer_tab.next();
                self.state.reset_selection();
                return;
            }
            KeyCode::BackTab => {
                self.state.explorer_tab = self.state.explorer_tab.prev();
                self.state.reset_selection();
                return;
            }
            KeyCode::Esc => {
                self.go_back();
                return;
            }
            _ => {}
        }

        match self.state.explorer_tab {
            ExplorerTab::Programs => self.handle_programs_tab_key(key),
            ExplorerTab::Chat => self.handle_chat_tab_key(key),
            ExplorerTab::Status => self.handle_status_tab_key(key),
        }
    }

    fn handle_programs_tab_key(&mut self, key: KeyEvent) {
        let count = self.state.programs.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(count),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_highlighted_program(),
            KeyCode::Char('c') => self.continue_to_application(),
            _ => {}
        }
    }

    /// Toggle the program under the cursor and keep status records in step
    fn toggle_highlighted_program(&mut self) {
        let Some(id) = self.state.highlighted_program().map(|p| p.id) else {
            return;
        };
        let selected = self.state.selection.toggle(id);
        tracing::debug!(program = id, selected, "program toggled");
        self.sync_selection();
    }

    /// Start (or resume) the application for the selected programs
    fn continue_to_application(&mut self) {
        if self.state.selection.is_empty() {
            self.copy_message = Some("Select at least one program to continue".to_string());
            return;
        }

        let programs = self.state.selected_programs();
        let ids: Vec<u32> = programs.iter().map(|p| p.id).collect();
        let resumable = self
            .state
            .application
            .as_ref()
            .is_some_and(|flow| flow.program_ids() == ids && !flow.is_submitted());
        if !resumable {
            tracing::info!(programs = ?ids, "starting application");
            self.state.application = Some(ApplicationFlow::new(programs));
        }

        self.navigate(View::Application);
    }

    fn handle_chat_tab_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.state.is_busy() {
                    return;
                }
                if let Some(question) = self.state.chat.submit_input() {
                    self.state.pending_task = Some(PendingTask::Answer { question });
                }
            }
            KeyCode::Backspace => {
                self.state.chat.input.pop();
            }
            // Offset counts lines back from the newest message
            KeyCode::Up => self.state.scroll_down(),
            KeyCode::Down => self.state.scroll_up(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.chat.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_status_tab_key(&mut self, key: KeyEvent) {
        let count = self.state.tracker.statuses().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(count),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Char('a') => {
                let Some(id) = self
                    .state
                    .tracker
                    .statuses()
                    .get(self.state.selected_index)
                    .map(|s| s.program_id)
                else {
                    return;
                };
                if let Some(stage) = self.state.tracker.advance(id, Utc::now()) {
                    self.copy_message = Some(format!("Status: {}", stage.label()));
                    self.save_statuses();
                }
            }
            _ => {}
        }
    }

    /// Handle keys in the application flow
    fn handle_application_key(&mut self, key: KeyEvent) {
        let Some(flow) = self.state.application.as_mut() else {
            self.go_back();
            return;
        };

        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab | KeyCode::Down => flow.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => flow.move_focus(false),
            KeyCode::Left => {
                flow.cycle_choice(false);
            }
            KeyCode::Right => {
                flow.cycle_choice(true);
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_application();
            }
            KeyCode::Char('s') if key.modifiers.contains(COMMAND_MODIFIER) => {
                self.submit_application();
            }
            KeyCode::Char('d') if key.modifiers.contains(COMMAND_MODIFIER) => {
                if flow.detach_focused_document() {
                    self.copy_message = Some("Document removed".to_string());
                }
            }
            KeyCode::Enter if flow.is_review_focused() => self.submit_application(),
            KeyCode::Enter => match flow.attach_focused_document() {
                Ok(true) => self.copy_message = Some("Document attached".to_string()),
                Ok(false) => flow.move_focus(true),
                Err(e) => self.push_error(e.to_string()),
            },
            KeyCode::Backspace => {
                flow.backspace();
            }
            KeyCode::Char(' ') if flow.is_choice_focused() => {
                flow.cycle_choice(true);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                flow.input_char(c);
            }
            _ => {}
        }
    }

    /// Submit the application, persist the records and show the confirmation
    fn submit_application(&mut self) {
        let Some(flow) = self.state.application.as_mut() else {
            return;
        };

        let submission = match flow.submit(Utc::now()) {
            Ok(submission) => submission,
            Err(e) => {
                tracing::info!(error = %e, "submit rejected");
                if let ProgressError::Incomplete(section) = &e {
                    flow.focus_section(*section);
                }
                self.push_error(e.to_string());
                return;
            }
        };
        let personal = flow.personal.to_record();
        let income = flow.income.to_record();

        tracing::info!(
            reference = %submission.reference_number,
            programs = ?submission.program_ids,
            "application submitted"
        );

        if let Err(e) = self.store.set(keys::PERSONAL_INFO, &personal) {
            self.storage_failed(keys::PERSONAL_INFO, e);
        }
        if let Err(e) = self.store.set(keys::INCOME_INFO, &income) {
            self.storage_failed(keys::INCOME_INFO, e);
        }
        if let Err(e) = self.store.set(keys::APPLICATION_SUBMISSION, &submission) {
            self.storage_failed(keys::APPLICATION_SUBMISSION, e);
        }

        self.state
            .tracker
            .mark_submitted(&submission.program_ids, submission.submitted_at);
        self.save_statuses();

        self.state.last_submission = Some(submission);
        self.navigate(View::Confirmation);
    }

    /// Handle keys on the confirmation screen
    fn handle_confirmation_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') => self.copy_reference(),
            KeyCode::Char('c') if key.modifiers.contains(COMMAND_MODIFIER) => self.copy_reference(),
            KeyCode::Enter | KeyCode::Char('h') => {
                self.state.reset_flow();
                self.state.current_view = View::Home;
            }
            KeyCode::Esc => self.go_back(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn copy_reference(&mut self) {
        let Some(reference) = self
            .state
            .last_submission
            .as_ref()
            .map(|s| s.reference_number.clone())
        else {
            return;
        };
        match self.copy_to_clipboard(&reference) {
            Ok(()) => self.copy_message = Some(format!("Copied {reference}")),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                self.copy_message = Some("Clipboard unavailable".to_string());
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}
