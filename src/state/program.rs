//! Program records, program selection and per-program application status

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Days between starting an application and its estimated completion
const ESTIMATED_PROCESSING_DAYS: i64 = 30;

/// A benefits or assistance offering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub eligibility: String,
}

impl Program {
    pub fn new(id: u32, name: &str, description: &str, eligibility: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            eligibility: eligibility.to_string(),
        }
    }
}

/// Analysis result as stored between steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub programs: Vec<Program>,
}

/// Ordered set of program ids chosen by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramSelection {
    ids: Vec<u32>,
}

impl ProgramSelection {
    /// Add a program id; returns false if it was already selected
    pub fn add(&mut self, id: u32) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove a program id; returns false if it was not selected
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| *selected != id);
        self.ids.len() != before
    }

    /// Toggle a program id, returning whether it is now selected
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selected programs, in the order they appear in `programs`
    pub fn selected<'a>(&self, programs: &'a [Program]) -> Vec<&'a Program> {
        programs.iter().filter(|p| self.contains(p.id)).collect()
    }
}

/// Stage of an application for a single program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStage {
    #[default]
    NotStarted,
    ApplicationStarted,
    InformationSubmitted,
    UnderReview,
    Approved,
    EnrollmentComplete,
}

impl ApplicationStage {
    /// Following stage; the last stage stays put
    pub fn next(&self) -> Self {
        match self {
            Self::NotStarted => Self::ApplicationStarted,
            Self::ApplicationStarted => Self::InformationSubmitted,
            Self::InformationSubmitted => Self::UnderReview,
            Self::UnderReview => Self::Approved,
            Self::Approved | Self::EnrollmentComplete => Self::EnrollmentComplete,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::ApplicationStarted => "Application Started",
            Self::InformationSubmitted => "Information Submitted",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::EnrollmentComplete => "Enrollment Complete",
        }
    }

    /// Progress percentage shown in the status gauge
    pub fn progress(&self) -> u16 {
        match self {
            Self::NotStarted => 0,
            Self::ApplicationStarted => 20,
            Self::InformationSubmitted => 40,
            Self::UnderReview => 60,
            Self::Approved => 80,
            Self::EnrollmentComplete => 100,
        }
    }

    pub fn next_steps(&self) -> &'static str {
        match self {
            Self::NotStarted => "Select this program to start an application",
            Self::ApplicationStarted => "Complete and submit your application",
            Self::InformationSubmitted => "Your application is being processed",
            Self::UnderReview => "Your application is under review",
            Self::Approved => "Complete enrollment process",
            Self::EnrollmentComplete => "No further action needed",
        }
    }
}

/// Progress record for one selected program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatus {
    pub program_id: u32,
    pub stage: ApplicationStage,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_completion_date: Option<NaiveDate>,
}

impl ApplicationStatus {
    pub fn started(program_id: u32, now: DateTime<Utc>) -> Self {
        let stage = ApplicationStage::ApplicationStarted;
        Self {
            program_id,
            stage,
            last_updated: now,
            next_steps: Some(stage.next_steps().to_string()),
            estimated_completion_date: Some(
                (now + Duration::days(ESTIMATED_PROCESSING_DAYS)).date_naive(),
            ),
        }
    }

    fn move_to(&mut self, stage: ApplicationStage, now: DateTime<Utc>) {
        self.stage = stage;
        self.last_updated = now;
        self.next_steps = Some(stage.next_steps().to_string());
    }
}

/// Status records for all selected programs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationTracker {
    statuses: Vec<ApplicationStatus>,
}

impl ApplicationTracker {
    pub fn statuses(&self) -> &[ApplicationStatus] {
        &self.statuses
    }

    pub fn get(&self, program_id: u32) -> Option<&ApplicationStatus> {
        self.statuses.iter().find(|s| s.program_id == program_id)
    }

    /// Create records for newly selected programs and drop records of
    /// programs no longer selected. Returns true if anything changed.
    pub fn sync_with_selection(&mut self, selection: &ProgramSelection, now: DateTime<Utc>) -> bool {
        let before = self.statuses.clone();

        for &id in selection.ids() {
            if self.get(id).is_none() {
                self.statuses.push(ApplicationStatus::started(id, now));
            }
        }
        self.statuses.retain(|s| selection.contains(s.program_id));

        self.statuses != before
    }

    /// Advance a program's record by one stage
    pub fn advance(&mut self, program_id: u32, now: DateTime<Utc>) -> Option<ApplicationStage> {
        let status = self.statuses.iter_mut().find(|s| s.program_id == program_id)?;
        let next = status.stage.next();
        if next != status.stage {
            status.move_to(next, now);
        }
        Some(status.stage)
    }

    /// Move every listed program still in `ApplicationStarted` to
    /// `InformationSubmitted`. Returns the number of records moved.
    pub fn mark_submitted(&mut self, program_ids: &[u32], now: DateTime<Utc>) -> usize {
        let mut moved = 0;
        for status in self
            .statuses
            .iter_mut()
            .filter(|s| program_ids.contains(&s.program_id))
        {
            if status.stage == ApplicationStage::ApplicationStarted {
                status.move_to(ApplicationStage::InformationSubmitted, now);
                moved += 1;
            }
        }
        moved
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

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_add_is_idempotent() {
            let mut selection = ProgramSelection::default();
            assert!(selection.add(1));
            assert!(!selection.add(1));
            assert_eq!(selection.ids(), &[1]);
        }

        #[test]
        fn test_toggle_adds_then_removes() {
            let mut selection = ProgramSelection::default();
            assert!(selection.toggle(3));
            assert!(selection.contains(3));
            assert!(!selection.toggle(3));
            assert!(selection.is_empty());
        }

        #[test]
        fn test_remove_missing_returns_false() {
            let mut selection = ProgramSelection::default();
            assert!(!selection.remove(9));
        }

        #[test]
        fn test_selected_keeps_program_order() {
            let programs = vec![
                Program::new(1, "A", "", ""),
                Program::new(2, "B", "", ""),
                Program::new(3, "C", "", ""),
            ];
            let mut selection = ProgramSelection::default();
            selection.add(3);
            selection.add(1);
            let names: Vec<_> = selection
                .selected(&programs)
                .iter()
                .map(|p| p.name.as_str())
                .collect();
            assert_eq!(names, vec!["A", "C"]);
        }

        #[test]
        fn test_serializes_as_plain_array() {
            let mut selection = ProgramSelection::default();
            selection.add(2);
            selection.add(4);
            assert_eq!(serde_json::to_string(&selection).unwrap(), "[2,4]");
        }
    }

    mod stage {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_next_walks_all_stages_and_stops() {
            let mut stage = ApplicationStage::NotStarted;
            let mut seen = vec![stage];
            for _ in 0..6 {
                stage = stage.next();
                seen.push(stage);
            }
            assert_eq!(seen[5], ApplicationStage::EnrollmentComplete);
            assert_eq!(seen[6], ApplicationStage::EnrollmentComplete);
        }

        #[test]
        fn test_progress_increases() {
            assert_eq!(ApplicationStage::NotStarted.progress(), 0);
            assert_eq!(ApplicationStage::UnderReview.progress(), 60);
            assert_eq!(ApplicationStage::EnrollmentComplete.progress(), 100);
        }

        #[test]
        fn test_serde_uses_snake_case() {
            let json = serde_json::to_string(&ApplicationStage::InformationSubmitted).unwrap();
            assert_eq!(json, "\"information_submitted\"");
        }
    }

    mod tracker {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_selecting_creates_started_record() {
            let mut selection = ProgramSelection::default();
            selection.add(1);
            let mut tracker = ApplicationTracker::default();

            assert!(tracker.sync_with_selection(&selection, now()));

            let status = tracker.get(1).unwrap();
            assert_eq!(status.stage, ApplicationStage::ApplicationStarted);
            assert_eq!(
                status.next_steps.as_deref(),
                Some("Complete and submit your application")
            );
            assert_eq!(
                status.estimated_completion_date,
                NaiveDate::from_ymd_opt(2024, 3, 31)
            );
        }

        #[test]
        fn test_deselecting_removes_record() {
            let mut selection = ProgramSelection::default();
            selection.add(1);
            selection.add(2);
            let mut tracker = ApplicationTracker::default();
            tracker.sync_with_selection(&selection, now());

            selection.remove(1);
            assert!(tracker.sync_with_selection(&selection, now()));

            assert!(tracker.get(1).is_none());
            assert!(tracker.get(2).is_some());
        }

        #[test]
        fn test_deselecting_last_program_clears_records() {
            let mut selection = ProgramSelection::default();
            selection.add(5);
            let mut tracker = ApplicationTracker::default();
            tracker.sync_with_selection(&selection, now());

            selection.toggle(5);
            tracker.sync_with_selection(&selection, now());

            assert!(tracker.statuses().is_empty());
        }

        #[test]
        fn test_sync_keeps_existing_progress() {
            let mut selection = ProgramSelection::default();
            selection.add(1);
            let mut tracker = ApplicationTracker::default();
            tracker.sync_with_selection(&selection, now());
            tracker.advance(1, now());

            assert!(!tracker.sync_with_selection(&selection, now()));
            assert_eq!(
                tracker.get(1).unwrap().stage,
                ApplicationStage::InformationSubmitted
            );
        }

        #[test]
        fn test_advance_unknown_program_is_none() {
            let mut tracker = ApplicationTracker::default();
            assert!(tracker.advance(42, now()).is_none());
        }

        #[test]
        fn test_mark_submitted_only_moves_started_records() {
            let mut selection = ProgramSelection::default();
            selection.add(1);
            selection.add(2);
            let mut tracker = ApplicationTracker::default();
            tracker.sync_with_selection(&selection, now());
            tracker.advance(2, now());
            tracker.advance(2, now());

            assert_eq!(tracker.mark_submitted(&[1, 2], now()), 1);
            assert_eq!(
                tracker.get(1).unwrap().stage,
                ApplicationStage::InformationSubmitted
            );
            assert_eq!(tracker.get(2).unwrap().stage, ApplicationStage::UnderReview);
        }

        #[test]
        fn test_status_serializes_camel_case() {
            let status = ApplicationStatus::started(7, now());
            let json = serde_json::to_value(&status).unwrap();
            assert_eq!(json["programId"], 7);
            assert_eq!(json["stage"], "application_started");
            assert_eq!(json["estimatedCompletionDate"], "2024-03-31");
        }
    }
}
