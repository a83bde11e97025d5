use std::env;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::NarrationError;
use crate::narration::TextGenerator;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct NarrationConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NarrationConfig {
    /// `NARRATION_API_KEY` (or `GEMINI_API_KEY`), `NARRATION_MODEL` and
    /// `NARRATION_ENDPOINT`; anything unset keeps its default.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            endpoint: non_empty("NARRATION_ENDPOINT").unwrap_or(defaults.endpoint),
            model: non_empty("NARRATION_MODEL").unwrap_or(defaults.model),
            api_key: non_empty("NARRATION_API_KEY").or_else(|| non_empty("GEMINI_API_KEY")),
            timeout: defaults.timeout,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
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
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Result<String, NarrationError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            Err(NarrationError::EmptyResponse)
        } else {
            Ok(text.to_string())
        }
    }
}

/// `generateContent` client. No retries; the configured timeout bounds each
/// request.
pub struct GeminiClient {
    config: NarrationConfig,
    agent: ureq::Agent,
}

impl GeminiClient {
    pub fn new(config: NarrationConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build();
        Self {
            config,
            agent: ureq::Agent::new_with_config(agent_config),
        }
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, NarrationError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(NarrationError::MissingApiKey);
        };

        let url = self.config.url();
        debug!("requesting narration from {url}");
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        let mut response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", api_key)
            .send_json(&body)?;
        let parsed: GenerateResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| NarrationError::Decode(e.to_string()))?;
        parsed.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<String, NarrationError> {
        serde_json::from_str::<GenerateResponse>(json)
            .expect("valid json")
            .into_text()
    }

    #[test]
    fn joins_parts_of_first_candidate() {
        let text = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Mass does "},{"text":"not matter. "}]}},
                {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .expect("text present");
        assert_eq!(text, "Mass does not matter.");
    }

    #[test]
    fn missing_text_is_an_error() {
        assert!(matches!(parse(r#"{}"#), Err(NarrationError::EmptyResponse)));
        assert!(matches!(
            parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
            Err(NarrationError::EmptyResponse)
        ));
        assert!(matches!(
            parse(r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#),
            Err(NarrationError::EmptyResponse)
        ));
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: "hi" }],
            }],
        };
        let json = serde_json::to_value(&body).expect("serializable");
        assert_eq!(json, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let config = NarrationConfig {
            endpoint: "http://localhost:9000/v1/".to_string(),
            model: "tiny".to_string(),
            ..NarrationConfig::default()
        };
        assert_eq!(config.url(), "http://localhost:9000/v1/models/tiny:generateContent");
    }

    #[test]
    fn no_key_fails_without_network() {
        let client = GeminiClient::new(NarrationConfig::default());
        assert!(matches!(
            client.generate("anything"),
            Err(NarrationError::MissingApiKey)
        ));
    }
}
