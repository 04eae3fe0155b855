//! HTTP client for the hosted assistant functions.
//!
//! Thin wrapper around two JSON POST endpoints. Response parsing lives in
//! free functions so it can be tested without a server.

use super::traits::{AssistantClientTrait, AssistantError};
use crate::state::Program;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Marker left in template endpoint URLs
const PLACEHOLDER_MARKER: &str = "your-project-id";
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// True when the URL is missing or still the template value
pub fn is_unconfigured(url: Option<&str>) -> bool {
    match url {
        None => true,
        Some(url) => url.trim().is_empty() || url.contains(PLACEHOLDER_MARKER),
    }
}

/// Client for the analyze-situation and generate-response endpoints
pub struct CloudFunctionClient {
    http: reqwest::Client,
    analyze_url: Option<String>,
    generate_url: Option<String>,
}

impl CloudFunctionClient {
    /// Build a client; placeholder URLs are treated as absent.
    pub fn new(
        analyze_url: Option<String>,
        generate_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AssistantError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AssistantError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            analyze_url: analyze_url.filter(|u| !is_unconfigured(Some(u))),
            generate_url: generate_url.filter(|u| !is_unconfigured(Some(u))),
        })
    }

    /// True when at least one endpoint is usable
    pub fn is_configured(&self) -> bool {
        self.analyze_url.is_some() || self.generate_url.is_some()
    }

    async fn post<B: Serialize + Sync>(&self, url: &str, body: &B) -> Result<String, AssistantError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AssistantError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(AssistantError::Response {
                status: status.as_u16(),
                message: parse_error_message(&text),
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl AssistantClientTrait for CloudFunctionClient {
    async fn analyze_situation(&self, situation: &str) -> Result<Vec<Program>, AssistantError> {
        let url = self
            .analyze_url
            .as_deref()
            .ok_or(AssistantError::NotConfigured("analyze situation"))?;
        tracing::debug!(url, "requesting situation analysis");

        let body = self.post(url, &AnalyzeRequest { situation }).await?;
        parse_programs(&body)
    }

    async fn generate_response(
        &self,
        question: &str,
        programs: &[Program],
    ) -> Result<String, AssistantError> {
        let url = self
            .generate_url
            .as_deref()
            .ok_or(AssistantError::NotConfigured("generate response"))?;
        tracing::debug!(url, programs = programs.len(), "requesting answer");

        let body = self.post(url, &GenerateRequest { question, programs }).await?;
        parse_answer(&body)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    situation: &'a str,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    question: &'a str,
    programs: &'a [Program],
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    programs: Vec<Program>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_programs(json: &str) -> Result<Vec<Program>, AssistantError> {
    let parsed: AnalyzeResponse =
        serde_json::from_str(json).map_err(|e| AssistantError::Parse(e.to_string()))?;
    Ok(parsed.programs)
}

fn parse_answer(json: &str) -> Result<String, AssistantError> {
    let parsed: GenerateResponse =
        serde_json::from_str(json).map_err(|e| AssistantError::Parse(e.to_string()))?;
    Ok(parsed.response)
}

/// The `error` field of a failure body, or the raw body
fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholder_url_is_unconfigured() {
        assert!(is_unconfigured(None));
        assert!(is_unconfigured(Some("")));
        assert!(is_unconfigured(Some(
            "https://us-central1-your-project-id.cloudfunctions.net/analyzeSituation"
        )));
        assert!(!is_unconfigured(Some(
            "https://us-central1-benefits.cloudfunctions.net/analyzeSituation"
        )));
    }

    #[test]
    fn test_client_drops_placeholder_urls() {
        let client = CloudFunctionClient::new(
            Some("https://your-project-id.example/analyze".to_string()),
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(!client.is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint_errors_without_request() {
        let client = CloudFunctionClient::new(None, None, Duration::from_secs(5)).unwrap();
        let result = client.analyze_situation("rent").await;
        assert!(matches!(result, Err(AssistantError::NotConfigured(_))));
    }

    #[test]
    fn test_parse_programs() {
        let json = r#"{"programs":[{"id":2,"name":"SNAP Benefits","description":"Food","eligibility":"Income"}]}"#;
        let programs = parse_programs(json).unwrap();
        assert_eq!(
            programs,
            vec![Program::new(2, "SNAP Benefits", "Food", "Income")]
        );
    }

    #[test]
    fn test_parse_programs_rejects_bad_shape() {
        let result = parse_programs(r#"{"results":[]}"#);
        assert!(matches!(result, Err(AssistantError::Parse(_))));
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer(r#"{"response":"Yes."}"#).unwrap(), "Yes.");
    }

    #[test]
    fn test_parse_error_message() {
        assert_eq!(parse_error_message(r#"{"error":"bad input"}"#), "bad input");
        assert_eq!(parse_error_message("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn test_generate_request_shape() {
        let programs = vec![Program::new(1, "Housing", "d", "e")];
        let body = serde_json::to_value(GenerateRequest {
            question: "How long?",
            programs: &programs,
        })
        .unwrap();
        assert_eq!(body["question"], "How long?");
        assert_eq!(body["programs"][0]["id"], 1);
    }
}
