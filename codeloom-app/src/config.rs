use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 120;

/// Runtime configuration, resolved from the environment.
#[derive(Debug)]
pub struct Config {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub command_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
        let base_url =
            std::env::var("CODELOOM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("CODELOOM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let command_timeout = match std::env::var("CODELOOM_COMMAND_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .context("CODELOOM_COMMAND_TIMEOUT_SECS is not a number")?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url,
            model,
            api_key,
            command_timeout,
        })
    }
}
