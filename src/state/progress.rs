//! Application progress tracking
//!
//! Sections are revealed strictly in order. After each edit the owning
//! section's completion flag is recomputed; when it flips from incomplete to
//! complete the following section becomes visible. Visibility never reverts,
//! while completion follows the current field values. Submitting is the only
//! way to reach the terminal state, after which nothing changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One stage of the application flow, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    PersonalInfo,
    IncomeInfo,
    Documents,
    Review,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::PersonalInfo,
        Section::IncomeInfo,
        Section::Documents,
        Section::Review,
    ];

    /// Sections that collect data and therefore gate submission
    pub const DATA: [Section; 3] = [Section::PersonalInfo, Section::IncomeInfo, Section::Documents];

    pub fn index(self) -> usize {
        match self {
            Section::PersonalInfo => 0,
            Section::IncomeInfo => 1,
            Section::Documents => 2,
            Section::Review => 3,
        }
    }

    pub fn next(self) -> Option<Section> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::PersonalInfo => "Let's get to know each other",
            Section::IncomeInfo => "Tell us about your income",
            Section::Documents => "Upload your documents",
            Section::Review => "Review your application",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::PersonalInfo => "Personal Info",
            Section::IncomeInfo => "Income Info",
            Section::Documents => "Documents",
            Section::Review => "Review",
        }
    }
}

/// Visibility and completion of a single section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionStatus {
    pub visible: bool,
    pub complete: bool,
}

/// Record of a submitted application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub reference_number: String,
    pub submitted_at: DateTime<Utc>,
    pub program_ids: Vec<u32>,
}

impl Submission {
    pub fn new(program_ids: Vec<u32>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference_number: reference_number(now),
            submitted_at: now,
            program_ids,
        }
    }
}

/// Upper-case base-36 rendering of the timestamp in milliseconds
pub fn reference_number(at: DateTime<Utc>) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut millis = at.timestamp_millis().unsigned_abs();
    if millis == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while millis > 0 {
        out.push(DIGITS[(millis % 36) as usize]);
        millis /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("The application has already been submitted")]
    AlreadySubmitted,

    #[error("Please complete the {} section before submitting", .0.label())]
    Incomplete(Section),
}

/// Forward-only state machine over the application sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationProgress {
    sections: [SectionStatus; 4],
    submission: Option<Submission>,
}

impl ApplicationProgress {
    pub fn new() -> Self {
        let mut sections = [SectionStatus::default(); 4];
        sections[Section::PersonalInfo.index()].visible = true;
        Self {
            sections,
            submission: None,
        }
    }

    pub fn status(&self, section: Section) -> SectionStatus {
        self.sections[section.index()]
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.status(section).visible
    }

    pub fn is_complete(&self, section: Section) -> bool {
        self.status(section).complete
    }

    pub fn is_submitted(&self) -> bool {
        self.submission.is_some()
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// Visible sections in display order
    pub fn visible_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.is_visible(*s))
            .collect()
    }

    /// Furthest visible section
    pub fn current_section(&self) -> Section {
        self.visible_sections()
            .last()
            .copied()
            .unwrap_or(Section::PersonalInfo)
    }

    /// Record a section's freshly computed completion. Returns the section
    /// revealed by this update, if any. Ignored once submitted or while the
    /// section itself is still hidden.
    pub fn record(&mut self, section: Section, complete: bool) -> Option<Section> {
        if self.is_submitted() || !self.is_visible(section) {
            return None;
        }

        let status = &mut self.sections[section.index()];
        let was_complete = status.complete;
        status.complete = complete;

        if !was_complete && complete {
            if let Some(next) = section.next() {
                let next_status = &mut self.sections[next.index()];
                if !next_status.visible {
                    next_status.visible = true;
                    tracing::debug!(?section, ?next, "section complete, revealing next");
                    return Some(next);
                }
            }
        }
        None
    }

    /// First data section that is not currently complete
    pub fn first_incomplete(&self) -> Option<Section> {
        Section::DATA.into_iter().find(|s| !self.is_complete(*s))
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitted()
            && self.is_visible(Section::Review)
            && self.first_incomplete().is_none()
    }

    /// Terminal transition
    pub fn submit(
        &mut self,
        program_ids: Vec<u32>,
        now: DateTime<Utc>,
    ) -> Result<&Submission, ProgressError> {
        if self.is_submitted() {
            return Err(ProgressError::AlreadySubmitted);
        }
        if let Some(section) = self.first_incomplete() {
            return Err(ProgressError::Incomplete(section));
        }
        if !self.is_visible(Section::Review) {
            return Err(ProgressError::Incomplete(Section::Review));
        }
        Ok(self.submission.insert(Submission::new(program_ids, now)))
    }
}

impl Default for ApplicationProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn all_complete() -> ApplicationProgress {
        let mut progress = ApplicationProgress::new();
        for section in Section::DATA {
            progress.record(section, true);
        }
        progress
    }

    #[test]
    fn test_initially_only_personal_visible() {
        let progress = ApplicationProgress::new();
        assert_eq!(progress.visible_sections(), vec![Section::PersonalInfo]);
        assert_eq!(progress.current_section(), Section::PersonalInfo);
        assert!(!progress.can_submit());
    }

    #[test]
    fn test_completion_reveals_next_section() {
        let mut progress = ApplicationProgress::new();
        assert_eq!(
            progress.record(Section::PersonalInfo, true),
            Some(Section::IncomeInfo)
        );
        assert!(progress.is_visible(Section::IncomeInfo));
        assert!(!progress.is_visible(Section::Documents));
    }

    #[test]
    fn test_incomplete_record_reveals_nothing() {
        let mut progress = ApplicationProgress::new();
        assert_eq!(progress.record(Section::PersonalInfo, false), None);
        assert!(!progress.is_visible(Section::IncomeInfo));
    }

    #[test]
    fn test_hidden_section_updates_are_ignored() {
        let mut progress = ApplicationProgress::new();
        assert_eq!(progress.record(Section::Documents, true), None);
        assert!(!progress.is_complete(Section::Documents));
        assert!(!progress.is_visible(Section::Review));
    }

    #[test]
    fn test_sections_reveal_in_order() {
        let progress = all_complete();
        assert_eq!(progress.visible_sections(), Section::ALL.to_vec());
        assert_eq!(progress.current_section(), Section::Review);
    }

    #[test]
    fn test_visibility_never_reverts() {
        let mut progress = ApplicationProgress::new();
        progress.record(Section::PersonalInfo, true);
        progress.record(Section::PersonalInfo, false);

        assert!(!progress.is_complete(Section::PersonalInfo));
        assert!(progress.is_visible(Section::IncomeInfo));
    }

    #[test]
    fn test_recompleting_does_not_report_reveal_twice() {
        let mut progress = ApplicationProgress::new();
        progress.record(Section::PersonalInfo, true);
        progress.record(Section::PersonalInfo, false);
        assert_eq!(progress.record(Section::PersonalInfo, true), None);
    }

    #[test]
    fn test_submit_requires_all_sections_complete() {
        let mut progress = all_complete();
        progress.record(Section::IncomeInfo, false);

        assert!(!progress.can_submit());
        assert_eq!(
            progress.submit(vec![1], now()).unwrap_err(),
            ProgressError::Incomplete(Section::IncomeInfo)
        );
        assert!(!progress.is_submitted());
    }

    #[test]
    fn test_submit_enters_terminal_state() {
        let mut progress = all_complete();
        assert!(progress.can_submit());

        let submission = progress.submit(vec![1, 3], now()).unwrap().clone();
        assert_eq!(submission.program_ids, vec![1, 3]);
        assert_eq!(submission.submitted_at, now());
        assert!(progress.is_submitted());
        assert!(!progress.can_submit());
    }

    #[test]
    fn test_second_submit_is_rejected() {
        let mut progress = all_complete();
        progress.submit(vec![], now()).unwrap();
        assert_eq!(
            progress.submit(vec![], now()).unwrap_err(),
            ProgressError::AlreadySubmitted
        );
    }

    #[test]
    fn test_records_after_submit_are_ignored() {
        let mut progress = all_complete();
        progress.submit(vec![], now()).unwrap();
        let snapshot = progress.clone();

        progress.record(Section::PersonalInfo, false);
        progress.record(Section::Documents, false);

        assert_eq!(progress, snapshot);
    }

    #[test]
    fn test_reference_number_is_base36_millis() {
        let at = Utc.timestamp_millis_opt(36 * 36 + 35).unwrap();
        assert_eq!(reference_number(at), "10Z");
        assert_eq!(reference_number(now()), "LT8LR400");
    }

    #[test]
    fn test_incomplete_error_message_names_section() {
        let err = ProgressError::Incomplete(Section::Documents);
        assert_eq!(
            err.to_string(),
            "Please complete the Documents section before submitting"
        );
    }
}
