//! Error type shared by every stage of an extraction.

use thiserror::Error;

/// Everything that can go wrong between a URL and a [`Table`](crate::Table).
///
/// A single channel for transport, status and extraction failures; the
/// `"Error: "` prefix shown to users is applied by [`ExtractError::user_message`].
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The URL does not parse, or is not http(s).
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// DNS, connect, TLS, timeout or body read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status under [`StatusPolicy::Strict`](crate::StatusPolicy::Strict).
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// No `table` element carries the requested id.
    #[error("no table with id {id:?} in document")]
    TableNotFound { id: String },

    /// The table was found but holds no rows at all.
    #[error("table {id:?} has no rows")]
    EmptyTable { id: String },

    /// A built-in CSS selector failed to compile.
    #[error("invalid selector: {0}")]
    Selector(String),
}

impl ExtractError {
    /// Stable snake_case tag, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::TableNotFound { .. } => "table_not_found",
            Self::EmptyTable { .. } => "empty_table",
            Self::Selector(_) => "selector",
        }
    }

    /// True for failures that happen after a successful HTTP exchange.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Self::TableNotFound { .. } | Self::EmptyTable { .. } | Self::Selector(_)
        )
    }

    /// HTTP status carried by a [`ExtractError::Status`] or a status-bearing transport error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The message shown to users: always prefixed with `Error: `.
    pub fn user_message(&self) -> String {
        format!("Error: {self}")
    }
}
