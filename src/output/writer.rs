//! Payload serialization
//!
//! The title list is written as a pretty JSON array with two-space
//! indentation. A run summary records how the crawl ended so an aborted run
//! can be told apart from a complete one without reading logs.

use crate::collector::{CollectionOutcome, CollectorStats, CompletionStatus};
use crate::error::Result;
use crate::types::PageTitle;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name used when the output target is a directory
pub const DEFAULT_OUTPUT_FILENAME: &str = "wiki_pages.json";

/// File name used when the summary target is a directory
pub const DEFAULT_SUMMARY_FILENAME: &str = "summary.json";

/// Serialize titles as a pretty JSON array of strings
pub fn titles_to_json(titles: &[PageTitle]) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec_pretty(titles)?))
}

/// Serialize titles one per line
pub fn titles_to_lines(titles: &[PageTitle]) -> Bytes {
    Bytes::from(titles.join("\n"))
}

/// Record of one collection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Endpoint that was crawled
    pub source: String,
    /// `aplimit` used
    pub page_size: u32,
    /// Number of titles written
    pub total_titles: usize,
    /// How the crawl ended
    pub status: CompletionStatus,
    /// Request counts and timing
    pub stats: CollectorStats,
    /// When the crawl started
    pub started_at: DateTime<Utc>,
    /// When the crawl finished
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Build a summary for a finished crawl
    pub fn new(
        source: impl Into<String>,
        page_size: u32,
        outcome: &CollectionOutcome,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            page_size,
            total_titles: outcome.titles.len(),
            status: outcome.status.clone(),
            stats: outcome.stats.clone(),
            started_at,
            finished_at,
        }
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec_pretty(self)?))
    }
}
