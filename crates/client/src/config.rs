//! Fetch configuration.
//!
//! Everything the collector needs (endpoint, API key, page size, retry budgets, delays) is
//! resolved once at process startup and passed in as a [`FetchConfig`]. Library code never reads
//! process-wide environment variables; binaries hand the raw values to the helpers below.

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_RATE_LIMIT_BACKOFF,
    FIRST_PASS_MAX_RETRIES, INTER_PAGE_DELAY, NETWORK_FAULT_BACKOFF, RETRY_PASS_DELAY,
    RETRY_PASS_MAX_RETRIES,
};
use crate::{ClientError, ClientResult};
use std::time::Duration;

/// Client configuration resolved at startup.
#[derive(Clone)]
pub struct FetchConfig {
    base_url: String,
    api_key: String,
    page_size: u32,
    first_pass_retries: u32,
    retry_pass_retries: u32,
    rate_limit_backoff: Duration,
    network_backoff: Duration,
    inter_page_delay: Duration,
    retry_pass_delay: Duration,
    max_pages: u32,
    connect_timeout: Duration,
}

impl FetchConfig {
    /// Create a new `FetchConfig` with default paging and retry settings.
    ///
    /// Both values are trimmed and must be non-empty.
    pub fn new(base_url: impl AsRef<str>, api_key: impl AsRef<str>) -> ClientResult<Self> {
        let base_url = base_url.as_ref().trim();
        let api_key = api_key.as_ref().trim();

        if base_url.is_empty() {
            return Err(ClientError::InvalidConfig("base_url cannot be empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got {base_url:?}"
            )));
        }
        if api_key.is_empty() {
            return Err(ClientError::InvalidConfig("api_key cannot be empty".into()));
        }

        Ok(Self {
            base_url: base_url.to_owned(),
            api_key: api_key.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            first_pass_retries: FIRST_PASS_MAX_RETRIES,
            retry_pass_retries: RETRY_PASS_MAX_RETRIES,
            rate_limit_backoff: DEFAULT_RATE_LIMIT_BACKOFF,
            network_backoff: NETWORK_FAULT_BACKOFF,
            inter_page_delay: INTER_PAGE_DELAY,
            retry_pass_delay: RETRY_PASS_DELAY,
            max_pages: DEFAULT_MAX_PAGES,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    pub fn with_page_size(mut self, page_size: u32) -> ClientResult<Self> {
        if page_size == 0 {
            return Err(ClientError::InvalidConfig(
                "page_size must be at least 1".into(),
            ));
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> ClientResult<Self> {
        if max_pages == 0 {
            return Err(ClientError::InvalidConfig(
                "max_pages must be at least 1".into(),
            ));
        }
        self.max_pages = max_pages;
        Ok(self)
    }

    /// Override the per-page attempt budgets of the first and retry passes.
    pub fn with_retries(mut self, first_pass: u32, retry_pass: u32) -> Self {
        self.first_pass_retries = first_pass;
        self.retry_pass_retries = retry_pass;
        self
    }

    pub fn with_rate_limit_backoff(mut self, base: Duration) -> Self {
        self.rate_limit_backoff = base;
        self
    }

    pub fn with_network_backoff(mut self, step: Duration) -> Self {
        self.network_backoff = step;
        self
    }

    /// Override the first-pass and retry-pass pacing delays.
    pub fn with_delays(mut self, inter_page: Duration, retry_pass: Duration) -> Self {
        self.inter_page_delay = inter_page;
        self.retry_pass_delay = retry_pass;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn first_pass_retries(&self) -> u32 {
        self.first_pass_retries
    }

    pub fn retry_pass_retries(&self) -> u32 {
        self.retry_pass_retries
    }

    pub fn rate_limit_backoff(&self) -> Duration {
        self.rate_limit_backoff
    }

    pub fn network_backoff(&self) -> Duration {
        self.network_backoff
    }

    pub fn inter_page_delay(&self) -> Duration {
        self.inter_page_delay
    }

    pub fn retry_pass_delay(&self) -> Duration {
        self.retry_pass_delay
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

// The API key never reaches logs.
impl std::fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .field("first_pass_retries", &self.first_pass_retries)
            .field("retry_pass_retries", &self.retry_pass_retries)
            .field("rate_limit_backoff", &self.rate_limit_backoff)
            .field("network_backoff", &self.network_backoff)
            .field("inter_page_delay", &self.inter_page_delay)
            .field("retry_pass_delay", &self.retry_pass_delay)
            .field("max_pages", &self.max_pages)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Parse a positive integer setting from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn positive_from_env_value(
    name: &str,
    value: Option<String>,
    default: u32,
) -> ClientResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(default),
        Some(v) => match v.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ClientError::InvalidConfig(format!(
                "{name} must be a positive integer, got {v:?}"
            ))),
        },
    }
}

/// Resolve the page size from an optional string value.
pub fn page_size_from_env_value(value: Option<String>) -> ClientResult<u32> {
    positive_from_env_value("page size", value, DEFAULT_PAGE_SIZE)
}

/// Resolve the first-pass page cap from an optional string value.
pub fn max_pages_from_env_value(value: Option<String>) -> ClientResult<u32> {
    positive_from_env_value("max pages", value, DEFAULT_MAX_PAGES)
}
