use serde::Deserialize;
use std::fs;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://fantasy.premierleague.com/api/";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub league_id: u64,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
    #[serde(default = "default_max_pages")]
    pub max_standings_pages: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_concurrent() -> usize {
    8
}

fn default_max_pages() -> u32 {
    20
}

fn default_user_agent() -> String {
    format!("league-wrapped/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Config for a league with every other setting at its default.
    pub fn for_league(league_id: u64) -> Self {
        Self {
            league_id,
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            max_concurrent_requests: default_max_concurrent(),
            max_standings_pages: default_max_pages(),
            user_agent: default_user_agent(),
        }
    }

    fn validate(mut self) -> Result<Self, ConfigError> {
        if self.league_id == 0 {
            return Err(ConfigError::Invalid("league_id must be positive".into()));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_seconds must be positive".into(),
            ));
        }
        if self.max_concurrent_requests == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrent_requests must be positive".into(),
            ));
        }
        if self.max_standings_pages == 0 {
            return Err(ConfigError::Invalid(
                "max_standings_pages must be positive".into(),
            ));
        }
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        Ok(self)
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
