//! Common types used throughout wiki-pages
//!
//! This module contains the data model of a crawl (titles, continuation
//! tokens, the growing collection) plus small shared enums and the JSON
//! path helpers the decoder and paginator both read responses with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Type Aliases
// ============================================================================

/// A page title exactly as the wiki reported it
pub type PageTitle = String;

// ============================================================================
// Continuation Token
// ============================================================================

/// Opaque cursor telling the wiki where the next batch starts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Wrap a raw token, treating an empty string as "no token"
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Get the raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Page Collection
// ============================================================================

/// Ordered, append-only list of titles built up across fetch rounds
///
/// Titles keep source order and are never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCollection {
    titles: Vec<PageTitle>,
}

impl PageCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one batch in response order
    pub fn extend_batch(&mut self, batch: impl IntoIterator<Item = PageTitle>) {
        self.titles.extend(batch);
    }

    /// Number of titles collected so far
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Check if nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Borrow the titles
    pub fn titles(&self) -> &[PageTitle] {
        &self.titles
    }

    /// Freeze the collection into its titles
    pub fn into_titles(self) -> Vec<PageTitle> {
        self.titles
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// JSON Helpers
// ============================================================================

/// Walk a dotted path (`a.b` or `$.a.b`) through nested objects
pub fn value_at_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    path.split('.')
        .try_fold(value, |current, part| current.as_object()?.get(part))
}

/// JSON type of a value with its article, for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
