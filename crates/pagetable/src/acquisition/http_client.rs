//! Thin wrapper over `reqwest::Client` for single page fetches.

use crate::error::ExtractError;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("pagetable/", env!("CARGO_PKG_VERSION"));

/// A fetched page.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// Final URL after redirects.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Raw `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Body decoded to text using the declared charset.
    pub body: String,
}

impl PageResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the response declares an HTML body. Missing content type counts as HTML.
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("text/html") || ct.contains("application/xhtml"))
            .unwrap_or(true)
    }
}

/// HTTP client for one-shot GETs.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Build a client. `timeout` bounds the whole request; `None` keeps reqwest's default.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ExtractError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            inner: builder.build()?,
        })
    }

    /// GET `url` and read the whole body. The status is reported, never checked here.
    pub async fn get(&self, url: &Url) -> Result<PageResponse, ExtractError> {
        debug!(url = %url, "GET");

        let resp = self.inner.get(url.clone()).send().await?;

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = resp.text().await?;

        debug!(
            status,
            url = %final_url,
            content_type = content_type.as_deref().unwrap_or("-"),
            bytes = body.len(),
            "response"
        );

        Ok(PageResponse {
            url: final_url,
            status,
            content_type,
            body,
        })
    }
}
