//! Command-line interface definition.

use clap::Parser;
use claimcheck::config::{
    valid_api_key, Config, OpenAiSettings, SearchSettings, DEFAULT_MODEL, DEFAULT_PORT,
    DEFAULT_TIMEOUT_SECS,
};
use claimcheck::limiter::DAILY_LIMIT;
use claimcheck::pipeline::DEFAULT_SEARCH_URL;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Article credibility checks with search-grounded claim verification.
#[derive(Parser)]
#[command(name = "claimcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, short, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Completion service credential.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Completion model identifier.
    #[arg(long, default_value = DEFAULT_MODEL, env = "OPENAI_MODEL")]
    pub openai_model: String,

    /// Alternative completion API base URL.
    #[arg(long, env = "OPENAI_API_BASE")]
    pub openai_api_base: Option<String>,

    /// Search service credential. Without it claims are not verified.
    #[arg(long, env = "SERPER_API_KEY", hide_env_values = true)]
    pub serper_api_key: Option<String>,

    /// Search endpoint.
    #[arg(long, default_value = DEFAULT_SEARCH_URL, env = "SEARCH_URL")]
    pub search_url: String,

    /// Requests admitted per client per UTC day.
    #[arg(long, default_value_t = DAILY_LIMIT, env = "DAILY_LIMIT")]
    pub daily_limit: u32,

    /// Timeout for each outbound call, in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// Log level.
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}

impl Cli {
    pub fn into_config(self) -> claimcheck::Result<Config> {
        let config = Config {
            bind_addr: SocketAddr::new(self.host, self.port),
            openai: OpenAiSettings {
                api_key: self.openai_api_key.unwrap_or_default(),
                model: self.openai_model,
                api_base: self.openai_api_base,
            },
            search: SearchSettings {
                api_key: self.serper_api_key.filter(|k| valid_api_key(k)),
                endpoint: self.search_url,
            },
            daily_limit: self.daily_limit,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }
}
