//! Core configuration values and their defaults.
//!
//! Hosts build a [`CoreConfig`] (usually via `Default`) and pass it to the
//! components that need it; core code never reads the environment itself.

use std::time::Duration;

/// Remote collection read by the browse view.
pub const DEFAULT_RECORDS_URL: &str = "https://jsonplaceholder.typicode.com/posts";
/// Fixed number of rows per list page.
pub const PAGE_SIZE: usize = 10;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Endpoint returning the JSON record array.
    pub records_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Honor `HTTP(S)_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            records_url: DEFAULT_RECORDS_URL.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            system_proxy: true,
        }
    }
}

impl CoreConfig {
    /// Default config pointing at a different records endpoint.
    ///
    /// Blank values fall back to [`DEFAULT_RECORDS_URL`].
    pub fn with_records_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let trimmed = url.trim();
        Self {
            records_url: if trimmed.is_empty() {
                DEFAULT_RECORDS_URL.to_string()
            } else {
                trimmed.to_string()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DEFAULT_RECORDS_URL};

    #[test]
    fn blank_url_falls_back_to_default() {
        assert_eq!(
            CoreConfig::with_records_url("  ").records_url,
            DEFAULT_RECORDS_URL
        );
        assert_eq!(
            CoreConfig::with_records_url(" http://localhost:9/posts ").records_url,
            "http://localhost:9/posts"
        );
    }
}
