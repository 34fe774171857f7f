use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_temperature: f32,
    pub gemini_max_tokens: i32,
    pub use_ai_guide: bool,
    pub request_timeout_secs: u64,
    pub response_delay_ms: u64,
    pub guide_name: String,
    pub system_prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        dotenv::dotenv().ok();

        let gemini_api_key = env::var("GEMINI_API_KEY").ok();
        let use_ai_guide = env::var("USE_AI_GUIDE")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        let gemini_temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(0.7);

        let gemini_max_tokens = env::var("GEMINI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(500);

        // Hard deadline for the upstream API so a slow network never hangs
        // a visitor's chat turn.
        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        // Artificial typing delay before local replies, purely cosmetic.
        let response_delay_ms = env::var("RESPONSE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        let guide_name = "Rajvant Guide".to_string();
        let system_prompt = format!(
            "You are {}, the visitor guide for Rajvant Palace in Rajpipla, Gujarat.\n\
            You answer questions about the palace: the Gohil dynasty, the building's \
            European classical architecture, Maharaja Vijaysinhji and Windsor Lad's \
            1934 Epsom Derby victory, royal culture and daily life, and practical \
            visiting information (timings, the heritage resort, how to reach Rajpipla).\n\
            Keep answers brief, warm and factual. If a question is unrelated to the \
            palace, gently steer the visitor back to palace topics.",
            guide_name
        );

        let use_ai_guide = use_ai_guide && gemini_api_key.is_some();

        Self {
            gemini_api_key,
            gemini_model,
            gemini_temperature,
            gemini_max_tokens,
            use_ai_guide,
            request_timeout_secs,
            response_delay_ms,
            guide_name,
            system_prompt,
        }
    }
}
