use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::ANTHROPIC_API_URL;

const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    /// Upper bound on a single model call. Flows never retry, so this is
    /// also the upper bound on a flow.
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: std::env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_API_URL.to_string()),
            llm_timeout: parse_timeout(std::env::var("LLM_TIMEOUT_SECS").ok().as_deref())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_timeout(raw: Option<&str>) -> Result<Duration> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS));
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("LLM_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_defaults_when_unset() {
        assert_eq!(parse_timeout(None).unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn test_timeout_parses_seconds() {
        assert_eq!(parse_timeout(Some(" 15 ")).unwrap(), Duration::from_secs(15));
    }

    #[test]
    fn test_timeout_rejects_zero_and_garbage() {
        assert!(parse_timeout(Some("0")).is_err());
        assert!(parse_timeout(Some("soon")).is_err());
    }
}
