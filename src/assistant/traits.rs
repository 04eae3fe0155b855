//! Trait abstraction for assistant backends to enable mocking in tests

use crate::state::Program;
use async_trait::async_trait;
use thiserror::Error;

/// Failures talking to a remote assistant endpoint
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The endpoint URL is missing or still a placeholder.
    #[error("endpoint not configured: {0}")]
    NotConfigured(&'static str),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request failed before a response arrived.
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint returned a non-success HTTP status.
    #[error("endpoint returned status {status}: {message}")]
    Response { status: u16, message: String },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),
}

/// Assistant operations: program matching and question answering
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssistantClientTrait: Send + Sync {
    /// Match a free-text situation to candidate programs
    async fn analyze_situation(&self, situation: &str) -> Result<Vec<Program>, AssistantError>;

    /// Answer a question, optionally in the context of some programs
    async fn generate_response(
        &self,
        question: &str,
        programs: &[Program],
    ) -> Result<String, AssistantError>;
}
