use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    512
}

fn default_timeout_secs() -> u64 {
    30
}

/// Tuning knobs for the generation collaborator.
///
/// Every external call is bounded by `timeout_secs`; on expiry the caller
/// receives the defined fallback (classification) or a surfaced upstream
/// error (negotiation/chat) rather than hanging.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeneratorConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
