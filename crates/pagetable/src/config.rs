//! Extraction settings.

use crate::error::ExtractError;
use std::time::Duration;
use url::Url;

/// Page fetched when no URL is given.
pub const DEFAULT_URL: &str = "https://www.worldometers.info/world-population/population-by-country";

/// Id of the population table on [`DEFAULT_URL`].
pub const DEFAULT_TABLE_ID: &str = "example2";

/// What to do with a non-2xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Fail with [`ExtractError::Status`] before parsing.
    #[default]
    Strict,
    /// Log the status and parse whatever body came back.
    Ignore,
}

/// One extraction: where to fetch, which table, and how strict to be.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub url: String,
    pub table_id: String,
    pub status_policy: StatusPolicy,
    /// Whole-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            table_id: DEFAULT_TABLE_ID.to_string(),
            status_policy: StatusPolicy::Strict,
            timeout: None,
        }
    }
}

impl ExtractConfig {
    pub fn new(url: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            table_id: table_id.into(),
            ..Self::default()
        }
    }

    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Parse `raw` as an absolute http(s) URL.
pub fn parse_http_url(raw: &str) -> Result<Url, ExtractError> {
    let url = Url::parse(raw.trim()).map_err(|e| ExtractError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ExtractError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}
