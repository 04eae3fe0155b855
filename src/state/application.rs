//! One application in progress: section forms, progress tracker and focus

use super::forms::{DocumentsForm, FieldKind, Form, FormField, IncomeInfoForm, PersonalInfoForm};
use super::program::Program;
use super::progress::{ApplicationProgress, ProgressError, Section, Submission};
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Focused input inside the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    pub section: Section,
    pub index: usize,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            section: Section::PersonalInfo,
            index: 0,
        }
    }
}

/// Application flow state
#[derive(Debug, Clone)]
pub struct ApplicationFlow {
    /// Programs being applied for
    pub programs: Vec<Program>,
    pub personal: PersonalInfoForm,
    pub income: IncomeInfoForm,
    pub documents: DocumentsForm,
    pub progress: ApplicationProgress,
    pub focus: Focus,
}

impl ApplicationFlow {
    pub fn new(programs: Vec<Program>) -> Self {
        Self {
            programs,
            personal: PersonalInfoForm::new(),
            income: IncomeInfoForm::new(),
            documents: DocumentsForm::new(),
            progress: ApplicationProgress::new(),
            focus: Focus::default(),
        }
    }

    pub fn program_ids(&self) -> Vec<u32> {
        self.programs.iter().map(|p| p.id).collect()
    }

    pub fn is_submitted(&self) -> bool {
        self.progress.is_submitted()
    }

    /// Number of focusable inputs in a section (review has the submit button)
    fn input_count(&self, section: Section) -> usize {
        match section {
            Section::PersonalInfo => self.personal.field_count(),
            Section::IncomeInfo => self.income.field_count(),
            Section::Documents => self.documents.slots.len(),
            Section::Review => 1,
        }
    }

    /// All focusable inputs of visible sections in order
    fn focus_order(&self) -> Vec<Focus> {
        self.progress
            .visible_sections()
            .into_iter()
            .flat_map(|section| {
                (0..self.input_count(section)).map(move |index| Focus { section, index })
            })
            .collect()
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        match focus.section {
            Section::PersonalInfo => self.personal.set_active_field(focus.index),
            Section::IncomeInfo => self.income.set_active_field(focus.index),
            Section::Documents => self.documents.active_slot_index = focus.index,
            Section::Review => {}
        }
    }

    /// Move focus forward or backward through visible inputs, wrapping
    pub fn move_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        if order.is_empty() {
            return;
        }
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else if current == 0 {
            order.len() - 1
        } else {
            current - 1
        };
        self.set_focus(order[next]);
    }

    /// Jump to the first input of a visible section
    pub fn focus_section(&mut self, section: Section) {
        if self.progress.is_visible(section) {
            self.set_focus(Focus { section, index: 0 });
        }
    }

    pub fn is_review_focused(&self) -> bool {
        self.focus.section == Section::Review
    }

    /// Focused text field, if the focus is on personal or income info
    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        match self.focus.section {
            Section::PersonalInfo => self.personal.field_at_mut(self.focus.index),
            Section::IncomeInfo => self.income.field_at_mut(self.focus.index),
            Section::Documents | Section::Review => None,
        }
    }

    /// Focus is on a choice field such as employment status
    pub fn is_choice_focused(&self) -> bool {
        let field = match self.focus.section {
            Section::PersonalInfo => self.personal.get_field(self.focus.index),
            Section::IncomeInfo => self.income.get_field(self.focus.index),
            Section::Documents | Section::Review => None,
        };
        field.is_some_and(|f| matches!(f.kind, FieldKind::Choice(_)))
    }

    /// Type a character into the focused input
    pub fn input_char(&mut self, c: char) -> bool {
        if self.is_submitted() {
            return false;
        }
        let changed = match self.focus.section {
            Section::PersonalInfo | Section::IncomeInfo => self
                .focused_field_mut()
                .map(|f| f.push_char(c))
                .unwrap_or(false),
            Section::Documents => match self.documents.slots.get_mut(self.focus.index) {
                Some(slot) if !c.is_control() => {
                    slot.path_input.push(c);
                    true
                }
                _ => false,
            },
            Section::Review => false,
        };
        if changed {
            self.refresh();
        }
        changed
    }

    /// Delete the last character of the focused input
    pub fn backspace(&mut self) -> bool {
        if self.is_submitted() {
            return false;
        }
        let changed = match self.focus.section {
            Section::PersonalInfo | Section::IncomeInfo => self
                .focused_field_mut()
                .map(FormField::pop_char)
                .unwrap_or(false),
            Section::Documents => self
                .documents
                .slots
                .get_mut(self.focus.index)
                .map(|slot| slot.path_input.pop().is_some())
                .unwrap_or(false),
            Section::Review => false,
        };
        if changed {
            self.refresh();
        }
        changed
    }

    /// Cycle the focused choice field
    pub fn cycle_choice(&mut self, forward: bool) -> bool {
        if self.is_submitted() {
            return false;
        }
        let Some(field) = self.focused_field_mut() else {
            return false;
        };
        if !field.cycle_choice(forward) {
            return false;
        }
        tracing::debug!(field = %field.name, value = %field.value, "choice changed");
        self.refresh();
        true
    }

    /// Attach the path typed into the focused document slot
    pub fn attach_focused_document(&mut self) -> Result<bool> {
        if self.is_submitted() || self.focus.section != Section::Documents {
            return Ok(false);
        }
        let Some(slot) = self.documents.slots.get_mut(self.focus.index) else {
            return Ok(false);
        };
        slot.attach_from_input()?;
        tracing::info!(slot = %slot.id, "document attached");
        self.refresh();
        Ok(true)
    }

    /// Remove the attachment of the focused document slot
    pub fn detach_focused_document(&mut self) -> bool {
        if self.is_submitted() || self.focus.section != Section::Documents {
            return false;
        }
        let detached = self
            .documents
            .slots
            .get_mut(self.focus.index)
            .map(|slot| slot.detach())
            .unwrap_or(false);
        if detached {
            self.refresh();
        }
        detached
    }

    /// Recompute every section's completion, in order, so a reveal caused
    /// by one section is seen by the next.
    pub fn refresh(&mut self) -> Vec<Section> {
        let mut revealed = Vec::new();
        for section in Section::DATA {
            let complete = match section {
                Section::PersonalInfo => self.personal.is_complete(),
                Section::IncomeInfo => self.income.is_complete(),
                Section::Documents => self.documents.is_complete(),
                Section::Review => continue,
            };
            if let Some(next) = self.progress.record(section, complete) {
                revealed.push(next);
            }
        }
        revealed
    }

    pub fn greeting(&self) -> Option<String> {
        self.personal.greeting()
    }

    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<Submission, ProgressError> {
        let ids = self.program_ids();
        self.progress.submit(ids, now).cloned()
    }
}
