use crate::domain::donation::Amount;
use crate::domain::message::thank_you_prompt;
use crate::domain::ports::MessageGenerator;
use crate::error::{DonationError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Generates thank-you text with the Gemini `generateContent` API.
pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(api_base: &str, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                DonationError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                api_base.trim_end_matches('/'),
                MODEL
            ),
            api_key,
        })
    }
}

#[async_trait]
impl MessageGenerator for GeminiGenerator {
    async fn generate(&self, donor_name: &str, amount: Amount) -> Result<String> {
        let prompt = thank_you_prompt(donor_name, amount);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_p: 1.0,
                top_k: 32,
            },
        };

        debug!(model = MODEL, "requesting thank-you text");
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DonationError::GenerationError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DonationError::GenerationError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            DonationError::GenerationError(format!("failed to parse response: {}", e))
        })?;

        body.into_text()
            .ok_or_else(|| DonationError::GenerationError("response contained no text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_generation_config() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_p: 1.0,
                top_k: 32,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["topK"], 32);
        assert_eq!(json["generationConfig"]["topP"], 1.0);
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "Thank you, Asha."}, {"text": "\n\nYour gift helps."}]}}]
        }))
        .unwrap();
        assert_eq!(
            body.into_text().as_deref(),
            Some("Thank you, Asha.\n\nYour gift helps.")
        );

        let empty: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.into_text().is_none());
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let generator = GeminiGenerator::new("http://127.0.0.1:9/", "key".to_string()).unwrap();
        assert_eq!(
            generator.endpoint,
            "http://127.0.0.1:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
