use std::fmt;
use std::time::Duration;

use colla_config::AiConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::AiError;

const PROBE_PROMPT: &str = "Hello";
const PROBE_MAX_TOKENS: u32 = 16;
const BODY_EXCERPT_CHARS: usize = 200;

/// How the endpoint answered the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// 200 with a usable completion.
    Valid,
    /// 401: key invalid, expired, or out of credits.
    Unauthorized,
    /// 400: the key may be fine but the model name is probably wrong.
    BadRequest,
    /// Any other status, or a 200 without a completion.
    Unexpected,
    /// No HTTP response at all.
    Unreachable,
    /// No usable key; no request was sent.
    NotConfigured,
}

impl ProbeOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Unauthorized => "unauthorized",
            Self::BadRequest => "bad_request",
            Self::Unexpected => "unexpected",
            Self::Unreachable => "unreachable",
            Self::NotConfigured => "not_configured",
        }
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `colla ai ping`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiProbeReport {
    pub api_url: String,
    pub model: String,
    pub masked_key: Option<String>,
    pub outcome: ProbeOutcome,
    pub status: Option<u16>,
    pub detail: String,
}

impl AiProbeReport {
    /// Human-readable verdict and advice.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("API URL: {}", self.api_url),
            format!("Model: {}", self.model),
        ];
        if let Some(key) = &self.masked_key {
            lines.push(format!("API key: {key}"));
        }
        if let Some(status) = self.status {
            lines.push(format!("Status code: {status}"));
        }

        match self.outcome {
            ProbeOutcome::Valid => lines.push("✅ API key is valid and working!".into()),
            ProbeOutcome::Unauthorized => {
                lines.push("❌ Authentication failed: the API key is invalid or expired.".into());
                lines.push("Check the key in the provider dashboard and that the account has API credits.".into());
            }
            ProbeOutcome::BadRequest => {
                lines.push("⚠️ Bad request: the key may be valid but the model name is likely wrong.".into());
            }
            ProbeOutcome::Unexpected => lines.push(format!("❓ Unexpected response: {}", self.detail)),
            ProbeOutcome::Unreachable => lines.push(format!("❌ Endpoint unreachable: {}", self.detail)),
            ProbeOutcome::NotConfigured => {
                lines.push("❌ PERPLEXITY_API_KEY is not configured.".into());
            }
        }
        lines
    }
}

/// Map an HTTP status to an outcome, before looking at the body.
#[must_use]
pub const fn classify(status: u16) -> ProbeOutcome {
    match status {
        200 => ProbeOutcome::Valid,
        401 => ProbeOutcome::Unauthorized,
        400 => ProbeOutcome::BadRequest,
        _ => ProbeOutcome::Unexpected,
    }
}

/// Show only enough of a key to tell keys apart.
#[must_use]
pub fn mask_key(key: &str) -> String {
    let chars = key.chars().collect::<Vec<_>>();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head = chars[..6].iter().collect::<String>();
    let tail = chars[chars.len() - 4..].iter().collect::<String>();
    format!("{head}...{tail}")
}

pub struct AiProbe {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl AiProbe {
    /// # Errors
    ///
    /// Returns `AiError::InvalidEndpoint` for a non-http(s) URL and
    /// `AiError::Client` if the HTTP client cannot be built.
    pub fn new(config: &AiConfig, model: &str) -> Result<Self, AiError> {
        if !(config.api_url.starts_with("https://") || config.api_url.starts_with("http://")) {
            return Err(AiError::InvalidEndpoint {
                url: config.api_url.clone(),
                reason: "must be an http(s) URL".into(),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: model.to_string(),
        })
    }

    /// Send one minimal chat completion with `api_key`.
    ///
    /// Never fails: transport problems become [`ProbeOutcome::Unreachable`].
    pub async fn ping(&self, api_key: Option<&str>) -> AiProbeReport {
        let mut report = AiProbeReport {
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            masked_key: api_key.map(mask_key),
            outcome: ProbeOutcome::NotConfigured,
            status: None,
            detail: String::new(),
        };

        let Some(api_key) = api_key else {
            report.detail = "no API key".into();
            return report;
        };

        let payload = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": PROBE_PROMPT}],
            "max_tokens": PROBE_MAX_TOKENS,
        });

        tracing::info!(url = %self.api_url, model = %self.model, "probing AI endpoint");
        let response = match self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%error, "AI endpoint unreachable");
                report.outcome = ProbeOutcome::Unreachable;
                report.detail = error.to_string();
                return report;
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        report.status = Some(status);
        report.outcome = classify(status);

        if report.outcome == ProbeOutcome::Valid {
            match completion_text(&body) {
                Some(text) => report.detail = format!("received {} chars", text.chars().count()),
                None => {
                    report.outcome = ProbeOutcome::Unexpected;
                    report.detail = format!("no completion in response: {}", excerpt(&body));
                }
            }
        } else {
            report.detail = excerpt(&body);
        }

        tracing::debug!(status, outcome = %report.outcome, "AI probe finished");
        report
    }
}

/// `choices[0].message.content` of a chat completion.
fn completion_text(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    value
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(ToString::to_string)
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut out = trimmed.chars().take(BODY_EXCERPT_CHARS).collect::<String>();
    out.push('…');
    out
}
