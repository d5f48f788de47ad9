//! Bounds checks applied to [`AppConfig`] once every layer is merged.

use std::ops::RangeInclusive;

use crate::config::AppConfig;
use thiserror::Error;
use url::Url;

/// Response bodies larger than this are never worth buffering for a feed.
pub const MAX_BYTES_RANGE: RangeInclusive<usize> = 1..=50 * 1024 * 1024;

/// Request timeout window in milliseconds.
pub const TIMEOUT_MS_RANGE: RangeInclusive<u64> = 100..=300_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.to_string(), reason: reason.into() }
}

fn check_feed_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| invalid("feed_url", e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid("feed_url", format!("unsupported scheme '{other}'"))),
    }
}

impl AppConfig {
    /// Reject values the HTTP client or cache cannot work with.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` naming the first offending field: `max_bytes`
    /// outside [`MAX_BYTES_RANGE`], `timeout_ms` outside [`TIMEOUT_MS_RANGE`],
    /// a blank `user_agent`, or a `feed_url` that is not an http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !MAX_BYTES_RANGE.contains(&self.max_bytes) {
            return Err(invalid(
                "max_bytes",
                format!("{} is outside {}..={}", self.max_bytes, MAX_BYTES_RANGE.start(), MAX_BYTES_RANGE.end()),
            ));
        }
        if !TIMEOUT_MS_RANGE.contains(&self.timeout_ms) {
            return Err(invalid(
                "timeout_ms",
                format!("{}ms is outside {}..={}ms", self.timeout_ms, TIMEOUT_MS_RANGE.start(), TIMEOUT_MS_RANGE.end()),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(invalid("user_agent", "must not be blank"));
        }
        if let Some(feed_url) = &self.feed_url {
            check_feed_url(feed_url)?;
        }

        if self.db_path.as_os_str().is_empty() {
            tracing::warn!("db_path is empty; the cache database will be created in the working directory");
        }
        Ok(())
    }
}
