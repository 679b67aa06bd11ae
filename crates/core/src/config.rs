use std::env;

pub const API_KEY_VAR: &str = "VIBE_PP_API_KEY";
pub const ENDPOINT_VAR: &str = "VIBE_PP_ENDPOINT";
pub const MODEL_VAR: &str = "VIBE_PP_MODEL";
pub const MAX_TOKENS_VAR: &str = "VIBE_PP_MAX_TOKENS";
pub const TEMPERATURE_VAR: &str = "VIBE_PP_TEMPERATURE";

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MAX_TOKENS: u32 = 2_000;
const DEFAULT_TEMPERATURE: f64 = 0.1;
const MAX_TOKENS_CEILING: u32 = 32_000;
const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a formatting expert. Format the given content perfectly.";

#[derive(Debug, Clone, PartialEq)]
pub struct PrettyConfig {
    pub env_credential: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub system_prompt: String,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            env_credential: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl PrettyConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let max_tokens = non_empty(MAX_TOKENS_VAR)
            .and_then(|value| value.parse::<u32>().ok())
            .map(|value| value.clamp(1, MAX_TOKENS_CEILING))
            .unwrap_or(defaults.max_tokens);
        let temperature = non_empty(TEMPERATURE_VAR)
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .map(|value| value.clamp(0.0, 2.0))
            .unwrap_or(defaults.temperature);

        Self {
            env_credential: non_empty(API_KEY_VAR),
            endpoint: non_empty(ENDPOINT_VAR).unwrap_or(defaults.endpoint),
            model: non_empty(MODEL_VAR).unwrap_or(defaults.model),
            max_tokens,
            temperature,
            system_prompt: defaults.system_prompt,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.env_credential = Some(credential.into()).filter(|value| !value.is_empty());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
