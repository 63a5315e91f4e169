//! Pagination module
//!
//! Supports: continuation tokens (MediaWiki style)
//!
//! # Overview
//!
//! A paginator turns the current cursor into request parameters and reads
//! the next cursor out of each response. The collector owns the cursor and
//! hands it back on every request.

mod strategies;
mod types;

pub use strategies::{ContinuationPaginator, APCONTINUE_PARAM, APCONTINUE_PATH};
pub use types::{NextPage, Paginator};

#[cfg(test)]
mod tests;
