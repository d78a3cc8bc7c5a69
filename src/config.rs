//! Configuration options for the admin client

use std::time::Duration;

use crate::error::Error;
use crate::listing::PageSize;

/// Environment variable that overrides the API base URL.
pub const BASE_URL_ENV: &str = "ADMIN_API_BASE";

/// Fallback base URL when no environment override is present.
pub const DEFAULT_BASE_URL: &str = "http://localhost/api/cms/v1";

/// Configuration options for the admin client.
///
/// One base URL for every resource. The historical split between auth and
/// data hosts is gone: whatever `ADMIN_API_BASE` points at serves both.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The base URL of the admin API, without a trailing slash
    pub base_url: String,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Trailing-debounce window applied to free-text search input
    pub debounce: Duration,

    /// Page size used by newly created list controllers
    pub default_page_size: PageSize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            debounce: Duration::from_millis(500),
            default_page_size: PageSize::Ten,
        }
    }
}

impl ClientOptions {
    /// Build options from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, Error> {
        let mut options = Self::default();
        if let Ok(base) = std::env::var(BASE_URL_ENV) {
            if base.is_empty() {
                return Err(Error::config(format!("{} is set but empty", BASE_URL_ENV)));
            }
            options.base_url = base.trim_end_matches('/').to_string();
        }
        url::Url::parse(&options.base_url)?;
        Ok(options)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the search debounce window
    pub fn with_debounce(mut self, value: Duration) -> Self {
        self.debounce = value;
        self
    }

    /// Set the default page size for list controllers
    pub fn with_default_page_size(mut self, value: PageSize) -> Self {
        self.default_page_size = value;
        self
    }
}
