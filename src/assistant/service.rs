//! Assistant facade: remote when available, local otherwise

use super::local::LocalAssistant;
use super::traits::AssistantClientTrait;
use crate::state::Program;

/// Routes requests to the remote client and falls back to the local
/// substitute on any failure. Callers never see an error.
pub struct BenefitsAssistant {
    remote: Option<Box<dyn AssistantClientTrait>>,
    local: LocalAssistant,
}

impl BenefitsAssistant {
    pub fn new(remote: Option<Box<dyn AssistantClientTrait>>, local: LocalAssistant) -> Self {
        Self { remote, local }
    }

    /// Local substitute only
    #[cfg(test)]
    pub fn local_only(local: LocalAssistant) -> Self {
        Self::new(None, local)
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Programs matching the situation
    pub async fn analyze(&self, situation: &str) -> Vec<Program> {
        if let Some(remote) = &self.remote {
            match remote.analyze_situation(situation).await {
                Ok(programs) => {
                    tracing::info!(count = programs.len(), "remote analysis succeeded");
                    return programs;
                }
                Err(e) => tracing::warn!(error = %e, "remote analysis failed, using local matcher"),
            }
        }
        self.local.analyze(situation).await
    }

    /// Answer for a chat question in the context of the selected programs
    pub async fn respond(&self, question: &str, programs: &[Program]) -> String {
        if let Some(remote) = &self.remote {
            match remote.generate_response(question, programs).await {
                Ok(answer) => return answer,
                Err(e) => tracing::warn!(error = %e, "remote answer failed, using canned response"),
            }
        }
        self.local.respond(question).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::local::canned_response;
    use crate::assistant::traits::{AssistantError, MockAssistantClientTrait};
    use pretty_assertions::assert_eq;

    fn with_mock(mock: MockAssistantClientTrait) -> BenefitsAssistant {
        BenefitsAssistant::new(Some(Box::new(mock)), LocalAssistant::instant())
    }

    #[tokio::test]
    async fn test_remote_programs_used_as_is() {
        let mut mock = MockAssistantClientTrait::new();
        mock.expect_analyze_situation()
            .withf(|s| s == "rent is due")
            .times(1)
            .returning(|_| Ok(vec![Program::new(42, "Remote Program", "", "")]));

        let programs = with_mock(mock).analyze("rent is due").await;

        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].id, 42);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_matcher() {
        let mut mock = MockAssistantClientTrait::new();
        mock.expect_analyze_situation().returning(|_| {
            Err(AssistantError::Response {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let programs = with_mock(mock).analyze("I need food").await;

        let ids: Vec<u32> = programs.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_no_remote_uses_matcher() {
        let assistant = BenefitsAssistant::local_only(LocalAssistant::instant());
        assert!(!assistant.has_remote());
        let programs = assistant.analyze("nothing relevant").await;
        assert_eq!(programs[0].name, "General Assistance Program");
    }

    #[tokio::test]
    async fn test_remote_answer_receives_programs() {
        let mut mock = MockAssistantClientTrait::new();
        mock.expect_generate_response()
            .withf(|q, programs| q == "Am I eligible?" && programs.len() == 1)
            .returning(|_, _| Ok("Probably.".to_string()));

        let programs = vec![Program::new(1, "Housing", "", "")];
        let answer = with_mock(mock).respond("Am I eligible?", &programs).await;

        assert_eq!(answer, "Probably.");
    }

    #[tokio::test]
    async fn test_remote_answer_failure_uses_canned() {
        let mut mock = MockAssistantClientTrait::new();
        mock.expect_generate_response()
            .returning(|_, _| Err(AssistantError::Request("timeout".to_string())));

        let answer = with_mock(mock).respond("how long will it take", &[]).await;

        assert_eq!(answer, canned_response("how long will it take"));
    }

    #[test]
    fn test_blocking_fallback_with_tokio_test() {
        let assistant = BenefitsAssistant::local_only(LocalAssistant::instant());
        let answer = tokio_test::block_on(assistant.respond("how do I apply", &[]));
        assert_eq!(answer, canned_response("apply"));
    }
}
