use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub page_size: u32,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn new_from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("API_BASE_URL").map_err(|_| ConfigError::Missing("API_BASE_URL"))?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "API_BASE_URL",
                value: base_url,
            });
        }

        let mut config = Self::new(base_url);
        config.api_token = env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty());

        if let Ok(raw) = env::var("PAGE_SIZE") {
            config.page_size = positive("PAGE_SIZE", raw)?;
        }

        if let Ok(raw) = env::var("REQUEST_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(positive("REQUEST_TIMEOUT_SECS", raw)?);
        }

        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Parse a numeric setting that must be greater than zero.
fn positive<T>(name: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(|value| *value > T::default())
        .ok_or(ConfigError::Invalid { name, value: raw })
}
