//! # Bot Configuration Module
//!
//! Settings read from the environment (and a `.env` file) at startup.

use std::env;

use anyhow::{bail, Result};

/// Central Bank of Russia daily rates feed
pub const DEFAULT_FEED_URL: &str = "https://www.cbr.ru/scripts/XML_daily.asp";

/// Environment variables the bot reads
pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const LEGACY_TOKEN_VAR: &str = "BOT_TOKEN";
pub const FEED_URL_VAR: &str = "RATES_FEED_URL";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn from_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Runtime configuration of the bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot access token
    pub token: String,
    /// URL of the XML rates feed
    pub feed_url: String,
    pub log_format: LogFormat,
}

impl BotConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .or_else(|| lookup(LEGACY_TOKEN_VAR))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            bail!("{TOKEN_VAR} must be set");
        };

        let feed_url = lookup(FEED_URL_VAR)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

        Ok(Self {
            token,
            feed_url,
            log_format: LogFormat::from_value(lookup(LOG_FORMAT_VAR).as_deref()),
        })
    }
}
