//! Runtime configuration for the claimcheck service.

use crate::error::{Error, Result};
use crate::limiter::DAILY_LIMIT;
use crate::pipeline::DEFAULT_SEARCH_URL;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Completion service settings.
#[derive(Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    /// Overrides the library's default API base URL.
    pub api_base: Option<String>,
}

/// Search service settings. No key means verification runs without evidence.
#[derive(Clone)]
pub struct SearchSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
}

#[derive(Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub openai: OpenAiSettings,
    pub search: SearchSettings,
    /// Admitted requests per client per UTC day.
    pub daily_limit: u32,
    /// Upper bound on each outbound completion or search call.
    pub request_timeout: Duration,
}

impl Config {
    /// Defaults for everything except the completion credential.
    pub fn new(openai_api_key: &str) -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            openai: OpenAiSettings {
                api_key: openai_api_key.to_string(),
                model: DEFAULT_MODEL.to_string(),
                api_base: None,
            },
            search: SearchSettings {
                api_key: None,
                endpoint: DEFAULT_SEARCH_URL.to_string(),
            },
            daily_limit: DAILY_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn verification_enabled(&self) -> bool {
        self.search.api_key.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if !valid_api_key(&self.openai.api_key) {
            return Err(Error::Config(
                "OPENAI_API_KEY is missing or a placeholder".to_string(),
            ));
        }
        if self.openai.model.trim().is_empty() {
            return Err(Error::Config("model name must not be empty".to_string()));
        }
        if self.daily_limit == 0 {
            return Err(Error::Config("daily limit must be at least 1".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::Config("request timeout must be positive".to_string()));
        }
        Ok(())
    }
}

/// Rejects blank keys and template placeholders such as `sk-...`.
pub fn valid_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && !trimmed.contains("...")
}
