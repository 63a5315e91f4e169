//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by the collector.

use crate::error::Result;
use crate::types::ContinuationToken;
use serde_json::Value;

/// What a response says about the rest of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages remain, starting at this token
    Continue(ContinuationToken),
    /// The listing is exhausted
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The token to request next, if any
    pub fn token(&self) -> Option<&ContinuationToken> {
        match self {
            Self::Continue(token) => Some(token),
            Self::Done => None,
        }
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters that point a request at `cursor`
    ///
    /// Empty for the first request.
    fn request_params(&self, cursor: Option<&ContinuationToken>) -> Vec<(String, String)>;

    /// Read the continuation out of a decoded response
    ///
    /// Fails with a protocol error when the continuation is present but
    /// malformed.
    fn next_page(&self, body: &Value) -> Result<NextPage>;
}
