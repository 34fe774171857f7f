use std::time::Duration;

use crate::ai::GeminiClient;
use crate::chat::{ChatMessage, ChatSession};
use crate::config::Config;
use crate::engine::{ChatbotResponse, ResponseEngine};
use crate::knowledge::KnowledgeBase;

/// Orchestrates one visitor's conversation: owns the session history, the
/// local rule engine and, when configured, the AI guide client.
pub struct PalaceGuide {
    config: Config,
    session: ChatSession,
    engine: ResponseEngine,
    gemini: Option<GeminiClient>,
    ai_mode: bool,
}

impl PalaceGuide {
    pub fn new(config: Config) -> Self {
        let gemini = config.gemini_api_key.as_ref().and_then(|key| {
            if key.is_empty() {
                None
            } else {
                Some(GeminiClient::new(
                    key.clone(),
                    config.system_prompt.clone(),
                    Some(config.gemini_model.clone()),
                    Some(config.gemini_temperature),
                    Some(config.gemini_max_tokens),
                    config.request_timeout_secs,
                ))
            }
        });

        if gemini.is_some() {
            log::info!("AI guide client available");
        } else {
            log::info!("no API key, local responses only");
        }

        let ai_mode = config.use_ai_guide && gemini.is_some();
        Self {
            config,
            session: ChatSession::new(),
            engine: ResponseEngine::new(KnowledgeBase::palace_default()),
            gemini,
            ai_mode,
        }
    }

    /// Handles one chat turn: records the visitor's message, produces a
    /// reply and records it too. Each turn runs to completion before the
    /// next is considered.
    pub async fn get_response(&mut self, user_input: &str) -> ChatbotResponse {
        let input = user_input.trim();
        if input.is_empty() {
            return ChatbotResponse {
                message: "How can I help you with your visit?".to_string(),
                suggestions: ResponseEngine::quick_questions()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            };
        }

        self.session.append_user(input);

        let response = if self.ai_mode {
            self.ai_response(input).await
        } else {
            self.local_response(input).await
        };

        self.session.append_assistant(&response.message);
        response
    }

    async fn ai_response(&mut self, input: &str) -> ChatbotResponse {
        let client = match self.gemini.as_mut() {
            Some(client) => client,
            None => return self.local_response(input).await,
        };
        match client.get_response(input).await {
            Ok(message) => {
                log::debug!("reply from the AI guide");
                ChatbotResponse {
                    message,
                    suggestions: Vec::new(),
                }
            }
            Err(e) => {
                log::warn!("AI guide failed: {e}");
                ChatbotResponse {
                    message: e.user_message(),
                    suggestions: ResponseEngine::default_response().suggestions,
                }
            }
        }
    }

    async fn local_response(&self, input: &str) -> ChatbotResponse {
        if self.config.response_delay_ms > 0 {
            // Simulated typing pause; carries no meaning.
            tokio::time::sleep(Duration::from_millis(self.config.response_delay_ms)).await;
        }
        self.engine.get_response(input)
    }

    /// Switches between the AI guide and local responses. Returns the mode
    /// actually in effect: AI mode needs a configured client.
    pub fn set_ai_mode(&mut self, enabled: bool) -> bool {
        self.ai_mode = enabled && self.gemini.is_some();
        self.ai_mode
    }

    pub fn current_mode(&self) -> &'static str {
        if self.ai_mode {
            "AI Guide"
        } else {
            "Local"
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        self.session.history()
    }

    pub fn clear_history(&mut self) {
        self.session.clear();
        if let Some(client) = self.gemini.as_mut() {
            client.clear_history();
        }
        log::info!("conversation history cleared");
    }

    pub fn guide_name(&self) -> &str {
        &self.config.guide_name
    }
}
