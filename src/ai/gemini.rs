use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{classify_transport, AiError};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: i32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Client for the Google Generative Language API, used for the "AI Guide"
/// experience. Keeps a rolling window of the last turns so follow-up
/// questions have context.
pub struct GeminiClient {
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: i32,
    system_prompt: String,
    timeout: Duration,
    http: reqwest::Client,
    conversation_history: VecDeque<Content>,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        system_prompt: String,
        model: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<i32>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            api_key,
            model: model.unwrap_or_else(|| "gemini-1.5-flash".to_string()),
            temperature: temperature.unwrap_or(0.7),
            max_tokens: max_tokens.unwrap_or(500),
            system_prompt,
            timeout: Duration::from_secs(timeout_secs),
            http: reqwest::Client::new(),
            conversation_history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    /// Sends the visitor's question and returns the model's reply.
    pub async fn get_response(&mut self, user_input: &str) -> Result<String, AiError> {
        if !self.is_configured() {
            return Err(AiError::MissingCredentials);
        }

        self.push_turn("user", user_input);

        let request = GenerateRequest {
            contents: self.conversation_history.iter().cloned().collect(),
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: self.system_prompt.clone(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        let url = format!("{}/models/{}:generateContent", BASE_URL, self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(AiError::QuotaExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Gemini API error ({status}): {body}");
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let generated: GenerateResponse =
            response.json().await.map_err(classify_transport)?;

        let text = extract_text(&generated).ok_or(AiError::EmptyResponse)?;
        self.push_turn("model", &text);
        Ok(text)
    }

    fn push_turn(&mut self, role: &str, text: &str) {
        self.conversation_history.push_back(Content {
            role: role.to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        });
        while self.conversation_history.len() > HISTORY_LIMIT {
            self.conversation_history.pop_front();
        }
    }

    pub fn clear_history(&mut self) {
        self.conversation_history.clear();
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn extract_text(response: &GenerateResponse) -> Option<String> {
    let text = response
        .candidates
        .first()?
        .content
        .parts
        .first()?
        .text
        .clone();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: &str) -> GeminiClient {
        GeminiClient::new(
            api_key.to_string(),
            "You are the palace guide.".to_string(),
            None,
            None,
            None,
            30,
        )
    }

    #[test]
    fn blank_api_key_is_not_configured() {
        assert!(!client("").is_configured());
        assert!(client("test-key").is_configured());
    }

    #[tokio::test]
    async fn unconfigured_client_fails_with_missing_credentials() {
        let mut c = client("");
        match c.get_response("hello").await {
            Err(AiError::MissingCredentials) => {}
            other => panic!("expected MissingCredentials, got {other:?}"),
        }
    }

    #[test]
    fn response_body_parses_candidate_text() {
        let body = r#"{
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{"text": "The palace was built in 1915."}]
                    },
                    "finishReason": "STOP"
                }
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            extract_text(&parsed).as_deref(),
            Some("The palace was built in 1915.")
        );
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(&parsed).is_none());
    }

    #[test]
    fn history_is_capped() {
        let mut c = client("test-key");
        for i in 0..25 {
            c.push_turn("user", &format!("question {i}"));
        }
        assert_eq!(c.conversation_history.len(), HISTORY_LIMIT);
        assert_eq!(c.conversation_history[0].parts[0].text, "question 15");
    }
}
