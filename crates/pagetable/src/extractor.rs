//! Fetch a page and extract one table from it.

use crate::acquisition::http_client::{HttpClient, PageResponse};
use crate::config::{parse_http_url, ExtractConfig, StatusPolicy};
use crate::error::ExtractError;
use crate::extraction;
use crate::table::Table;
use std::time::Instant;
use tracing::{info, warn};

/// Stateless page-to-table extractor.
///
/// Holds only the HTTP client and the status policy; every call performs
/// exactly one GET and builds its result from scratch.
#[derive(Debug, Clone)]
pub struct PageTableExtractor {
    client: HttpClient,
    status_policy: StatusPolicy,
}

impl PageTableExtractor {
    /// Build an extractor from the transport settings in `config`.
    pub fn new(config: &ExtractConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            client: HttpClient::new(config.timeout)?,
            status_policy: config.status_policy,
        })
    }

    pub fn with_client(client: HttpClient, status_policy: StatusPolicy) -> Self {
        Self {
            client,
            status_policy,
        }
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// GET `url` and convert the table whose id is `table_id`.
    pub async fn extract(&self, url: &str, table_id: &str) -> Result<Table, ExtractError> {
        let start = Instant::now();
        let url = parse_http_url(url)?;

        let page = self.client.get(&url).await?;
        self.check_status(&page)?;

        if !page.is_html() {
            warn!(
                url = %page.url,
                content_type = page.content_type.as_deref().unwrap_or("-"),
                "response is not declared as HTML, parsing anyway"
            );
        }

        let table = extraction::parse_table(&page.body, table_id)?;

        info!(
            url = %page.url,
            id = table_id,
            columns = table.width(),
            rows = table.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "extracted table"
        );

        Ok(table)
    }

    fn check_status(&self, page: &PageResponse) -> Result<(), ExtractError> {
        if page.is_success() {
            return Ok(());
        }
        match self.status_policy {
            StatusPolicy::Strict => Err(ExtractError::Status {
                status: page.status,
                url: page.url.clone(),
            }),
            StatusPolicy::Ignore => {
                warn!(status = page.status, url = %page.url, "ignoring non-success status");
                Ok(())
            }
        }
    }
}

/// One-shot extraction with default settings.
pub async fn extract(url: &str, table_id: &str) -> Result<Table, ExtractError> {
    let config = ExtractConfig::new(url, table_id);
    PageTableExtractor::new(&config)?.extract(url, table_id).await
}

/// Extraction driven entirely by `config`.
pub async fn extract_with(config: &ExtractConfig) -> Result<Table, ExtractError> {
    PageTableExtractor::new(config)?
        .extract(&config.url, &config.table_id)
        .await
}
