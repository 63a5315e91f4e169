// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # wiki-pages
//!
//! Collects every page title from a MediaWiki site by walking the
//! `list=allpages` API until the listing runs out of continuation tokens.
//!
//! ## Features
//!
//! - **Continuation crawl**: follows `continue.apcontinue` batch by batch
//! - **Polite pacing**: fixed pause between requests, optional token bucket
//! - **Best-effort results**: a failed request ends the crawl but keeps what was collected
//! - **Cancellation**: stop a running crawl from another task
//! - **Cloud output**: write the title list to a file, stdout, S3, R2, GCS or Azure
//! - **Pruning**: clean a collected list down to name-like titles
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wiki_pages::collect_all_pages;
//!
//! #[tokio::main]
//! async fn main() {
//!     let outcome = collect_all_pages("https://tolkiengateway.net/w/api.php", 500).await;
//!
//!     println!("{} titles ({})", outcome.titles.len(), outcome.status);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      PageCollector                       │
//! │   collect(cancel) → CollectionOutcome { titles, status } │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌───────────┬────────────────┼──────────────┬──────────────┐
//! │   HTTP    │   Paginate     │   Decode     │   Output     │
//! ├───────────┼────────────────┼──────────────┼──────────────┤
//! │ GET       │ apcontinue     │ allpages     │ JSON array   │
//! │ Timeout   │ token          │ titles       │ Local / S3   │
//! │ Retry     │                │ API errors   │ GCS / Azure  │
//! │ Rate Limit│                │              │ Summary      │
//! └───────────┴────────────────┴──────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry and rate limiting
pub mod http;

/// Continuation handling
pub mod pagination;

/// Response decoders
pub mod decode;

/// The allpages crawl
pub mod collector;

/// Payload serialization and destinations
pub mod output;

/// Title cleaning
pub mod prune;

/// Settings file support
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, FailureKind, Result};
pub use types::*;

pub use collector::{
    collect_all_pages, collect_all_pages_with_cancel, CollectionOutcome, CollectorConfig,
    CompletionStatus, PageCollector,
};
pub use config::{load_settings, Settings};
pub use prune::{prune_titles, PruneReport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
