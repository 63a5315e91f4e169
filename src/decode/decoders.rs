//! Decoder implementations

use super::types::{DecodedBatch, RecordDecoder};
use crate::error::{Error, Result};
use crate::types::{json_type_name, value_at_path};
use serde_json::Value;

/// Default location of the page list in an allpages response
pub const ALLPAGES_RECORD_PATH: &str = "query.allpages";

/// JSON decoder for MediaWiki `list=allpages` responses
///
/// Expects `{"query": {"allpages": [{"title": ...}, ...]}}`. Any other shape
/// is a protocol error, including the API's own `{"error": {...}}` envelope.
#[derive(Debug, Clone)]
pub struct AllPagesDecoder {
    /// Dotted path to the record array
    record_path: String,
    /// Field holding the title inside each record
    title_field: String,
}

impl Default for AllPagesDecoder {
    fn default() -> Self {
        Self {
            record_path: ALLPAGES_RECORD_PATH.to_string(),
            title_field: "title".to_string(),
        }
    }
}

impl AllPagesDecoder {
    /// Create a new allpages decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different record path (e.g. `query.categorymembers`)
    #[must_use]
    pub fn with_record_path(mut self, path: impl Into<String>) -> Self {
        self.record_path = path.into();
        self
    }

    fn extract_titles(&self, value: &Value) -> Result<Vec<String>> {
        let records = match value_at_path(value, &self.record_path) {
            Some(Value::Array(records)) => records,
            Some(other) => {
                return Err(Error::protocol(format!(
                    "'{}' is {}, expected an array",
                    self.record_path,
                    json_type_name(other)
                )))
            }
            None => {
                return Err(Error::protocol(format!(
                    "response has no '{}'",
                    self.record_path
                )))
            }
        };

        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                record
                    .get(&self.title_field)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        Error::protocol(format!(
                            "record {idx} in '{}' has no string '{}'",
                            self.record_path, self.title_field
                        ))
                    })
            })
            .collect()
    }
}

impl RecordDecoder for AllPagesDecoder {
    fn decode(&self, body: &str) -> Result<DecodedBatch> {
        let raw: Value = serde_json::from_str(body)?;

        if let Some(api_error) = raw.get("error") {
            let code = api_error
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            let info = api_error.get("info").and_then(Value::as_str).unwrap_or("");
            return Err(Error::protocol(format!("API error '{code}': {info}")));
        }

        let titles = self.extract_titles(&raw)?;
        Ok(DecodedBatch { titles, raw })
    }
}
