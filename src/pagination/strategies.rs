//! Pagination strategy implementations

use super::types::{NextPage, Paginator};
use crate::error::{Error, Result};
use crate::types::{json_type_name, value_at_path, ContinuationToken};
use serde_json::Value;

/// Query parameter MediaWiki reads the allpages continuation from
pub const APCONTINUE_PARAM: &str = "apcontinue";

/// Where MediaWiki puts the allpages continuation in its response
pub const APCONTINUE_PATH: &str = "continue.apcontinue";

// ============================================================================
// Continuation Pagination
// ============================================================================

/// Continuation-token pagination (e.g., MediaWiki `list=allpages`)
///
/// Reads an opaque token from the response and echoes it back on the next
/// request. A missing, null or empty token ends the crawl; any other
/// non-string value is a protocol error.
#[derive(Debug, Clone)]
pub struct ContinuationPaginator {
    /// Query parameter name for the token
    pub token_param: String,
    /// Dotted path to the token in the response
    pub token_path: String,
}

impl Default for ContinuationPaginator {
    fn default() -> Self {
        Self::new(APCONTINUE_PARAM, APCONTINUE_PATH)
    }
}

impl ContinuationPaginator {
    /// Create a new continuation paginator
    pub fn new(token_param: impl Into<String>, token_path: impl Into<String>) -> Self {
        Self {
            token_param: token_param.into(),
            token_path: token_path.into(),
        }
    }
}

impl Paginator for ContinuationPaginator {
    fn request_params(&self, cursor: Option<&ContinuationToken>) -> Vec<(String, String)> {
        cursor
            .map(|token| (self.token_param.clone(), token.as_str().to_string()))
            .into_iter()
            .collect()
    }

    fn next_page(&self, body: &Value) -> Result<NextPage> {
        match value_at_path(body, &self.token_path) {
            None | Some(Value::Null) => Ok(NextPage::Done),
            Some(Value::String(raw)) => {
                Ok(ContinuationToken::new(raw.as_str()).map_or(NextPage::Done, NextPage::Continue))
            }
            Some(other) => Err(Error::protocol(format!(
                "'{}' is {}, expected a string",
                self.token_path,
                json_type_name(other)
            ))),
        }
    }
}
