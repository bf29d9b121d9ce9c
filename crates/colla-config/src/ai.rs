//! AI endpoint settings used by the credential probe.

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    30
}

fn default_api_url() -> String {
    "https://api.perplexity.ai/chat/completions".into()
}

fn default_model() -> String {
    "sonar".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    /// Chat completions endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model used when the bot env does not set `PERPLEXITY_MODEL`.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_perplexity() {
        let config = AiConfig::default();
        assert!(config.api_url.starts_with("https://api.perplexity.ai/"));
        assert_eq!(config.model, "sonar");
        assert_eq!(config.timeout_secs, 30);
    }
}
