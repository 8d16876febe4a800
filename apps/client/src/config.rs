use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHAT_SYSTEM_PROMPT: &str = "You are a helpful assistant for a dashboard.";

/// Client configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub session_check_interval: Duration,
    pub request_timeout: Duration,
    pub chat_system_prompt: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let base = optional_env("API_BASE_URL", DEFAULT_API_BASE_URL);
        Ok(Config {
            api_base_url: Url::parse(&base)
                .with_context(|| format!("API_BASE_URL '{base}' is not a valid URL"))?,
            session_check_interval: Duration::from_secs(
                optional_env("SESSION_CHECK_INTERVAL_SECS", "60")
                    .parse::<u64>()
                    .context("SESSION_CHECK_INTERVAL_SECS must be a whole number of seconds")?,
            ),
            request_timeout: Duration::from_secs(
                optional_env("REQUEST_TIMEOUT_SECS", "30")
                    .parse::<u64>()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            chat_system_prompt: optional_env("CHAT_SYSTEM_PROMPT", DEFAULT_CHAT_SYSTEM_PROMPT),
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default base URL is valid"),
            session_check_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
            chat_system_prompt: DEFAULT_CHAT_SYSTEM_PROMPT.to_string(),
            rust_log: "info".to_string(),
        }
    }
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_documented_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.session_check_interval, Duration::from_secs(60));
        assert_eq!(config.chat_system_prompt, DEFAULT_CHAT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_optional_env_falls_back_when_unset() {
        let value = optional_env("MATCHER_CLIENT_TEST_UNSET_VARIABLE", "fallback");
        assert_eq!(value, "fallback");
    }
}
