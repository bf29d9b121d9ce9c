//! The bot process's `.env` file.
//!
//! The bot reads `BOT_TOKEN`, `MONGODB_URI`, `PERPLEXITY_API_KEY`,
//! `GLOBAL_ADMIN_IDS` and `PERPLEXITY_MODEL` at startup and refuses to run
//! without the required ones. [`BotEnv::check`] applies the same rules
//! without starting the bot.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use colla_core::CheckStatus;
use colla_core::responses::{EnvCheck, EnvCheckReport};

use crate::ConfigError;

/// URI the bot falls back to when `MONGODB_URI` is unset.
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/";

/// Value shipped in the sample env file; never a real key.
pub const PLACEHOLDER_API_KEY: &str = "your_perplexity_api_key_here";

const DEFAULT_MODEL: &str = "sonar";

pub const BOT_TOKEN: &str = "BOT_TOKEN";
pub const MONGODB_URI: &str = "MONGODB_URI";
pub const PERPLEXITY_API_KEY: &str = "PERPLEXITY_API_KEY";
pub const PERPLEXITY_MODEL: &str = "PERPLEXITY_MODEL";
pub const GLOBAL_ADMIN_IDS: &str = "GLOBAL_ADMIN_IDS";

/// Parsed `GLOBAL_ADMIN_IDS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminIds {
    pub valid: Vec<i64>,
    pub rejected: Vec<String>,
}

impl AdminIds {
    /// Split a comma-separated list, keeping all-digit entries.
    ///
    /// Blank entries are skipped silently; anything else that is not a
    /// plain non-negative integer lands in `rejected`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut ids = Self::default();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let all_digits = entry.chars().all(|c| c.is_ascii_digit());
            match entry.parse::<i64>() {
                Ok(id) if all_digits => ids.valid.push(id),
                _ => ids.rejected.push(entry.to_string()),
            }
        }
        ids
    }
}

#[derive(Debug, Clone)]
pub struct BotEnv {
    path: PathBuf,
    vars: BTreeMap<String, String>,
}

impl BotEnv {
    /// Read a dotenv file without touching the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if `path` does not exist and
    /// `ConfigError::Dotenv` on malformed lines.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let dotenv_err = |source| ConfigError::Dotenv {
            path: path.to_path_buf(),
            source,
        };

        let mut vars = BTreeMap::new();
        for item in dotenvy::from_path_iter(path).map_err(dotenv_err)? {
            let (key, value) = item.map_err(dotenv_err)?;
            vars.insert(key, value);
        }

        Ok(Self {
            path: path.to_path_buf(),
            vars,
        })
    }

    /// Build from in-memory pairs.
    pub fn from_pairs<I, K, V>(path: impl Into<PathBuf>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            path: path.into(),
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// The AI key, unless missing, blank, or the sample placeholder.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.get(PERPLEXITY_API_KEY)
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    /// `PERPLEXITY_MODEL`, or `fallback` when unset or blank.
    #[must_use]
    pub fn model_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.get(PERPLEXITY_MODEL)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
    }

    #[must_use]
    pub fn admin_ids(&self) -> AdminIds {
        self.get(GLOBAL_ADMIN_IDS)
            .map(AdminIds::parse)
            .unwrap_or_default()
    }

    /// Validate every variable the bot needs to start.
    #[must_use]
    pub fn check(&self) -> EnvCheckReport {
        let checks = vec![
            self.check_bot_token(),
            self.check_mongodb_uri(),
            self.check_api_key(),
            self.check_admin_ids(),
            self.check_model(),
        ];
        EnvCheckReport::new(self.path.clone(), checks)
    }

    fn check_bot_token(&self) -> EnvCheck {
        match self.get(BOT_TOKEN).map(str::trim) {
            None | Some("") => entry(BOT_TOKEN, CheckStatus::Fail, "required but not set"),
            Some(token) if looks_like_bot_token(token) => {
                entry(BOT_TOKEN, CheckStatus::Pass, "set")
            }
            Some(_) => entry(
                BOT_TOKEN,
                CheckStatus::Warn,
                "set, but does not look like '<bot id>:<secret>'",
            ),
        }
    }

    fn check_mongodb_uri(&self) -> EnvCheck {
        match self.get(MONGODB_URI).map(str::trim) {
            None => entry(
                MONGODB_URI,
                CheckStatus::Pass,
                &format!("not set, bot uses {DEFAULT_MONGODB_URI}"),
            ),
            Some("") => entry(MONGODB_URI, CheckStatus::Fail, "set but empty"),
            Some(uri) if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") => {
                entry(MONGODB_URI, CheckStatus::Pass, "set")
            }
            Some(_) => entry(
                MONGODB_URI,
                CheckStatus::Fail,
                "must start with mongodb:// or mongodb+srv://",
            ),
        }
    }

    fn check_api_key(&self) -> EnvCheck {
        if self.api_key().is_some() {
            return entry(PERPLEXITY_API_KEY, CheckStatus::Pass, "set");
        }
        let detail = match self.get(PERPLEXITY_API_KEY).map(str::trim) {
            Some(PLACEHOLDER_API_KEY) => "still the sample placeholder",
            _ => "required but not set",
        };
        entry(PERPLEXITY_API_KEY, CheckStatus::Fail, detail)
    }

    fn check_admin_ids(&self) -> EnvCheck {
        let ids = self.admin_ids();
        if ids.valid.is_empty() {
            return entry(
                GLOBAL_ADMIN_IDS,
                CheckStatus::Fail,
                "required: at least one numeric Telegram user id",
            );
        }
        if ids.rejected.is_empty() {
            return entry(
                GLOBAL_ADMIN_IDS,
                CheckStatus::Pass,
                &format!("{} admin id(s)", ids.valid.len()),
            );
        }
        entry(
            GLOBAL_ADMIN_IDS,
            CheckStatus::Warn,
            &format!(
                "{} admin id(s); ignored non-numeric: {}",
                ids.valid.len(),
                ids.rejected.join(", ")
            ),
        )
    }

    fn check_model(&self) -> EnvCheck {
        match self.get(PERPLEXITY_MODEL).map(str::trim) {
            None | Some("") => entry(
                PERPLEXITY_MODEL,
                CheckStatus::Pass,
                &format!("{DEFAULT_MODEL} (default)"),
            ),
            Some(model) => entry(PERPLEXITY_MODEL, CheckStatus::Pass, model),
        }
    }
}

fn looks_like_bot_token(token: &str) -> bool {
    token.split_once(':').is_some_and(|(id, secret)| {
        !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) && !secret.is_empty()
    })
}

fn entry(key: &str, status: CheckStatus, detail: &str) -> EnvCheck {
    EnvCheck {
        key: key.to_string(),
        status,
        detail: detail.to_string(),
    }
}
