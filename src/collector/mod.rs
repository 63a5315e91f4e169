//! Page collector module
//!
//! Walks a MediaWiki `list=allpages` listing from start to end.
//!
//! # Overview
//!
//! The collector provides:
//! - `PageCollector` - Sequential crawl with continuation, pause and cancellation
//! - `collect_all_pages` - One-shot helper for the common case
//! - `CollectionOutcome` - The titles plus an explicit completion status
//!
//! Requests are issued strictly one after another because each request needs
//! the continuation token from the previous response. Failures are never
//! raised: the crawl stops and hands back whatever it had collected, with the
//! reason recorded in [`CompletionStatus`].

mod types;

pub use types::{
    CollectionOutcome, CollectorConfig, CollectorStats, CompletionStatus, DEFAULT_DELAY,
    DEFAULT_PAGE_SIZE,
};

use crate::decode::{AllPagesDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{ContinuationPaginator, NextPage, Paginator};
use crate::types::{ContinuationToken, PageCollection, PageTitle};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

/// Collects every page title from a wiki
pub struct PageCollector {
    /// HTTP client
    client: HttpClient,
    /// Validated `api.php` endpoint
    api_url: Url,
    /// Value sent as `aplimit`
    page_size: u32,
    /// Pause between requests
    delay: Duration,
    /// Reads and echoes `apcontinue`
    paginator: ContinuationPaginator,
    /// Turns a response body into titles
    decoder: AllPagesDecoder,
}

impl PageCollector {
    /// Create a collector, validating the endpoint and page size
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "api_url",
                format!("expected an http(s) URL, got '{}'", config.api_url),
            ));
        }
        if config.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }

        let client = HttpClient::new(config.http)?;

        Ok(Self {
            client,
            api_url,
            page_size: config.page_size,
            delay: config.delay,
            paginator: ContinuationPaginator::default(),
            decoder: AllPagesDecoder::default(),
        })
    }

    /// The endpoint being crawled
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// The page size sent as `aplimit`
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Run the crawl until the listing is exhausted, a request fails, or
    /// `cancel` fires
    pub async fn collect(&self, cancel: &CancellationToken) -> CollectionOutcome {
        let start = Instant::now();
        let mut stats = CollectorStats::new();
        let mut pages = PageCollection::new();
        let mut cursor: Option<ContinuationToken> = None;

        info!(
            "Collecting pages from {} ({} per request)",
            self.api_url, self.page_size
        );

        let status = loop {
            if cancel.is_cancelled() {
                break CompletionStatus::Cancelled;
            }

            stats.add_request();

            let fetched = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                result = self.fetch_batch(cursor.as_ref()) => Some(result),
            };

            let (titles, next) = match fetched {
                None => break CompletionStatus::Cancelled,
                Some(Ok(batch)) => batch,
                Some(Err(e)) => {
                    error!(
                        "Error fetching pages (request {}): {e}; returning {} pages collected so far",
                        stats.requests,
                        pages.len()
                    );
                    break CompletionStatus::aborted(&e);
                }
            };

            let record_count = titles.len();
            stats.add_batch(record_count);
            pages.extend_batch(titles);
            debug!("Request {}: fetched {record_count} titles", stats.requests);

            match next {
                NextPage::Done => break CompletionStatus::Complete,
                NextPage::Continue(token) => {
                    info!("Fetched {} pages so far...", pages.len());
                    cursor = Some(token);
                }
            }

            if !self.pause(cancel).await {
                break CompletionStatus::Cancelled;
            }
        };

        if status == CompletionStatus::Cancelled {
            warn!("Collection cancelled after {} pages", pages.len());
        }

        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Completed! Total pages fetched: {} ({} requests, {status})",
            pages.len(),
            stats.requests
        );

        CollectionOutcome {
            titles: pages.into_titles(),
            status,
            stats,
        }
    }

    /// Query string for the listing request at `cursor`
    fn request_query(&self, cursor: Option<&ContinuationToken>) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = [
            ("action", "query".to_string()),
            ("list", "allpages".to_string()),
            ("aplimit", self.page_size.to_string()),
            ("format", "json".to_string()),
            ("origin", "*".to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

        query.extend(self.paginator.request_params(cursor));
        query
    }

    /// Send one request, decode its titles and read the continuation
    ///
    /// A malformed continuation fails the whole batch.
    async fn fetch_batch(
        &self,
        cursor: Option<&ContinuationToken>,
    ) -> Result<(Vec<PageTitle>, NextPage)> {
        let body = self
            .client
            .get_text(&self.api_url, &self.request_query(cursor))
            .await?;
        let batch = self.decoder.decode(&body)?;
        let next = self.paginator.next_page(&batch.raw)?;
        Ok((batch.titles, next))
    }

    /// Sleep between requests; false if cancelled first
    async fn pause(&self, cancel: &CancellationToken) -> bool {
        if self.delay.is_zero() {
            return !cancel.is_cancelled();
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => false,
            () = tokio::time::sleep(self.delay) => true,
        }
    }
}

impl std::fmt::Debug for PageCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCollector")
            .field("api_url", &self.api_url.as_str())
            .field("page_size", &self.page_size)
            .field("delay", &self.delay)
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

/// Collect every page title from `base_url` with default settings
///
/// Never fails: an unusable endpoint is logged and reported as an aborted
/// outcome with no titles.
pub async fn collect_all_pages(base_url: &str, page_size: u32) -> CollectionOutcome {
    collect_all_pages_with_cancel(base_url, page_size, &CancellationToken::new()).await
}

/// Like [`collect_all_pages`], stopping early when `cancel` fires
pub async fn collect_all_pages_with_cancel(
    base_url: &str,
    page_size: u32,
    cancel: &CancellationToken,
) -> CollectionOutcome {
    let config = CollectorConfig::new(base_url).with_page_size(page_size);
    match PageCollector::new(config) {
        Ok(collector) => collector.collect(cancel).await,
        Err(e) => {
            error!("Cannot collect pages from '{base_url}': {e}");
            CollectionOutcome::failed_before_start(&e)
        }
    }
}
