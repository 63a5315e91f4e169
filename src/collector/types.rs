//! Collector types
//!
//! Configuration, statistics and the outcome of a crawl.

use crate::error::{Error, FailureKind};
use crate::http::HttpClientConfig;
use crate::types::PageTitle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Page size MediaWiki allows for anonymous `list=allpages` requests
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Pause between consecutive requests
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Configuration for a crawl
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// The wiki's `api.php` endpoint
    pub api_url: String,
    /// Value sent as `aplimit`
    pub page_size: u32,
    /// Pause between consecutive requests
    pub delay: Duration,
    /// HTTP client settings
    pub http: HttpClientConfig,
}

impl CollectorConfig {
    /// Create a config with default page size, delay and HTTP settings
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            delay: DEFAULT_DELAY,
            http: HttpClientConfig::default(),
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the pause between requests
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the HTTP client settings
    #[must_use]
    pub fn with_http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }
}

/// How a crawl ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CompletionStatus {
    /// The endpoint stopped sending continuation tokens
    Complete,
    /// The cancellation token fired before the crawl finished
    Cancelled,
    /// A request failed; the titles are whatever came before it
    Aborted {
        /// Transport or protocol
        kind: FailureKind,
        /// Error description
        message: String,
    },
}

impl CompletionStatus {
    /// Build an aborted status from the error that ended the crawl
    pub fn aborted(err: &Error) -> Self {
        Self::Aborted {
            kind: err.failure_kind(),
            message: err.to_string(),
        }
    }

    /// Check if the crawl ran to the end of the listing
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => f.write_str("complete"),
            Self::Cancelled => f.write_str("cancelled"),
            Self::Aborted { kind, message } => write!(f, "aborted ({kind} error: {message})"),
        }
    }
}

/// Statistics for a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorStats {
    /// Requests sent, including the one that failed
    pub requests: u32,
    /// Responses that decoded successfully
    pub batches: u32,
    /// Titles collected
    pub titles: u64,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

impl CollectorStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request
    pub fn add_request(&mut self) {
        self.requests += 1;
    }

    /// Count a decoded batch
    pub fn add_batch(&mut self, titles: usize) {
        self.batches += 1;
        self.titles += titles as u64;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Everything a crawl produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOutcome {
    /// Titles in source order
    pub titles: Vec<PageTitle>,
    /// How the crawl ended
    pub status: CompletionStatus,
    /// Request and title counts
    pub stats: CollectorStats,
}

impl CollectionOutcome {
    /// Outcome of a crawl that never got to send a request
    pub fn failed_before_start(err: &Error) -> Self {
        Self {
            titles: Vec::new(),
            status: CompletionStatus::aborted(err),
            stats: CollectorStats::default(),
        }
    }

    /// Check if the crawl ran to the end of the listing
    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }
}
