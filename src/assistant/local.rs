//! Keyword-matching stand-in for the remote assistant

use super::traits::{AssistantClientTrait, AssistantError};
use crate::state::Program;
use async_trait::async_trait;
use std::time::Duration;

/// Default artificial delay before a local analysis result
pub const DEFAULT_ANALYZE_DELAY: Duration = Duration::from_millis(2000);
/// Default artificial delay before a local answer
pub const DEFAULT_RESPOND_DELAY: Duration = Duration::from_millis(1000);

const ELIGIBILITY_ANSWER: &str = "Eligibility is typically based on factors like income, household size, and specific circumstances. I can help you understand the requirements for specific programs you're interested in.";
const APPLY_ANSWER: &str = "The application process varies by program. Once you select the programs you're interested in, I can provide specific steps and documentation requirements for each one.";
const TIMING_ANSWER: &str = "Processing times vary by program and location. Most programs aim to process applications within 30 days, though some may be faster or slower depending on your circumstances and the program's current capacity.";
const DEFAULT_ANSWER: &str = "I can help you understand more about these programs. What specific aspects would you like to know about?";

/// Keyword categories and the program each one yields, in result order
fn categories() -> [(&'static [&'static str], Program); 4] {
    [
        (
            &["housing", "rent"],
            Program::new(
                1,
                "Housing Choice Voucher Program",
                "Provides assistance to very low-income families to afford decent, safe, and sanitary housing.",
                "Income must be below 50% of median area income",
            ),
        ),
        (
            &["food", "meal"],
            Program::new(
                2,
                "SNAP Benefits",
                "Helps low-income individuals and families buy healthy food.",
                "Based on household size and monthly income",
            ),
        ),
        (
            &["job", "work", "training", "skill"],
            Program::new(
                3,
                "Workforce Innovation and Opportunity Act (WIOA)",
                "Provides job training and employment services to help job seekers find work.",
                "Priority for low-income individuals and those requiring training to obtain employment",
            ),
        ),
        (
            &["child", "kid"],
            Program::new(
                4,
                "Child Care Assistance Program",
                "Helps families pay for child care while working or attending school.",
                "Income requirements vary by state and family size",
            ),
        ),
    ]
}

fn general_assistance() -> Program {
    Program::new(
        5,
        "General Assistance Program",
        "Provides temporary help to those in need while they work to improve their situation.",
        "Based on individual circumstances and needs assessment",
    )
}

/// Programs whose keywords appear in the situation; the general program
/// when nothing matches.
pub fn match_programs(situation: &str) -> Vec<Program> {
    let text = situation.to_lowercase();
    let mut programs: Vec<Program> = categories()
        .into_iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, program)| program)
        .collect();

    if programs.is_empty() {
        programs.push(general_assistance());
    }
    programs
}

/// Canned answer picked by keyword
pub fn canned_response(question: &str) -> &'static str {
    let text = question.to_lowercase();
    if text.contains("eligib") {
        ELIGIBILITY_ANSWER
    } else if text.contains("apply") || text.contains("sign up") {
        APPLY_ANSWER
    } else if text.contains("time") || text.contains("long") {
        TIMING_ANSWER
    } else {
        DEFAULT_ANSWER
    }
}

/// Local substitute with a fixed artificial delay
#[derive(Debug, Clone)]
pub struct LocalAssistant {
    analyze_delay: Duration,
    respond_delay: Duration,
}

impl LocalAssistant {
    pub fn new(analyze_delay: Duration, respond_delay: Duration) -> Self {
        Self {
            analyze_delay,
            respond_delay,
        }
    }

    /// No artificial delay
    #[cfg(test)]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub async fn analyze(&self, situation: &str) -> Vec<Program> {
        if !self.analyze_delay.is_zero() {
            tokio::time::sleep(self.analyze_delay).await;
        }
        match_programs(situation)
    }

    pub async fn respond(&self, question: &str) -> String {
        if !self.respond_delay.is_zero() {
            tokio::time::sleep(self.respond_delay).await;
        }
        canned_response(question).to_string()
    }
}

impl Default for LocalAssistant {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYZE_DELAY, DEFAULT_RESPOND_DELAY)
    }
}

#[async_trait]
impl AssistantClientTrait for LocalAssistant {
    async fn analyze_situation(&self, situation: &str) -> Result<Vec<Program>, AssistantError> {
        Ok(self.analyze(situation).await)
    }

    async fn generate_response(
        &self,
        question: &str,
        _programs: &[Program],
    ) -> Result<String, AssistantError> {
        Ok(self.respond(question).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(programs: &[Program]) -> Vec<u32> {
        programs.iter().map(|p| p.id).collect()
    }

    mod matcher {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_rent_matches_housing() {
            let programs = match_programs("I can't pay my rent this month");
            assert!(programs
                .iter()
                .any(|p| p.name == "Housing Choice Voucher Program"));
        }

        #[test]
        fn test_housing_matches_case_insensitively() {
            assert_eq!(ids(&match_programs("Need HOUSING help")), vec![1]);
        }

        #[test]
        fn test_no_keyword_returns_single_general_program() {
            let programs = match_programs("my car broke down");
            assert_eq!(programs.len(), 1);
            assert_eq!(programs[0].id, 5);
            assert_eq!(programs[0].name, "General Assistance Program");
        }

        #[test]
        fn test_empty_situation_returns_general_program() {
            assert_eq!(ids(&match_programs("")), vec![5]);
        }

        #[test]
        fn test_multiple_categories_in_fixed_order() {
            let programs = match_programs("lost my job, kids need food, rent is late");
            assert_eq!(ids(&programs), vec![1, 2, 3, 4]);
        }

        #[test]
        fn test_each_program_appears_once() {
            let programs = match_programs("rent housing rent housing");
            assert_eq!(ids(&programs), vec![1]);
        }

        #[test]
        fn test_substring_matching() {
            // "homework" contains "work"
            assert_eq!(ids(&match_programs("homework")), vec![3]);
        }
    }

    mod responses {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_eligibility_question() {
            assert_eq!(canned_response("Am I eligible?"), ELIGIBILITY_ANSWER);
        }

        #[test]
        fn test_apply_question() {
            assert_eq!(canned_response("How do I apply"), APPLY_ANSWER);
            assert_eq!(canned_response("where to sign up"), APPLY_ANSWER);
        }

        #[test]
        fn test_timing_question() {
            assert_eq!(canned_response("How long does it take?"), TIMING_ANSWER);
        }

        #[test]
        fn test_eligibility_wins_over_apply() {
            assert_eq!(
                canned_response("eligibility before I apply"),
                ELIGIBILITY_ANSWER
            );
        }

        #[test]
        fn test_default_answer() {
            assert_eq!(canned_response("hello"), DEFAULT_ANSWER);
        }
    }

    #[tokio::test]
    async fn test_instant_assistant_implements_trait() {
        let local = LocalAssistant::instant();
        let programs = local.analyze_situation("food").await.unwrap();
        assert_eq!(ids(&programs), vec![2]);
        let answer = local.generate_response("hi", &programs).await.unwrap();
        assert_eq!(answer, DEFAULT_ANSWER);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let local = LocalAssistant::new(Duration::from_secs(2), Duration::from_secs(1));
        let start = tokio::time::Instant::now();
        local.analyze("rent").await;
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
