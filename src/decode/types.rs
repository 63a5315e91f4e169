//! Decoder types and traits

use crate::error::Result;
use crate::types::PageTitle;
use serde_json::Value;

/// One decoded listing response
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBatch {
    /// Titles in response order
    pub titles: Vec<PageTitle>,
    /// The full parsed body, for pagination
    pub raw: Value,
}

impl DecodedBatch {
    /// Number of titles in this batch
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Check if the batch carried no titles
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Trait for decoding response bodies into title batches
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body
    ///
    /// Fails with a protocol error when the body does not have the expected
    /// shape.
    fn decode(&self, body: &str) -> Result<DecodedBatch>;
}
