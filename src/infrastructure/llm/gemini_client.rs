use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError};

const MAX_RAW_PAYLOAD_CHARS: usize = 512;

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: usize,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        temperature: f32,
        max_output_tokens: usize,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            model,
            temperature,
            max_output_tokens,
        }
    }

    /// Strict parse of the provider payload: either completion text comes
    /// out, or the raw payload is surfaced as `InvalidResponse`.
    fn parse_completion(raw: &str) -> Result<String, LlmClientError> {
        let response: GenerateResponse = serde_json::from_str(raw)
            .map_err(|_| LlmClientError::InvalidResponse(truncate_payload(raw)))?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmClientError::InvalidResponse(truncate_payload(raw)));
        }

        Ok(text)
    }
}

fn truncate_payload(raw: &str) -> String {
    if raw.chars().count() <= MAX_RAW_PAYLOAD_CHARS {
        return raw.to_string();
    }
    raw.chars().take(MAX_RAW_PAYLOAD_CHARS).collect()
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        let request_body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status,
                truncate_payload(&body)
            )));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        Self::parse_completion(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::GeminiClient;

    #[test]
    fn parses_candidate_text() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"thirty days"}]}}]}"#;
        assert_eq!(GeminiClient::parse_completion(raw).unwrap(), "thirty days");
    }

    #[test]
    fn joins_multiple_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"thirty "},{"text":"days"}]}}]}"#;
        assert_eq!(GeminiClient::parse_completion(raw).unwrap(), "thirty days");
    }

    #[test]
    fn rejects_missing_candidates() {
        let raw = r#"{"candidates":[]}"#;
        assert!(GeminiClient::parse_completion(raw).is_err());
    }

    #[test]
    fn rejects_non_json_payload() {
        assert!(GeminiClient::parse_completion("<html>oops</html>").is_err());
    }
}
