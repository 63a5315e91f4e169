//! Output module
//!
//! Delivers collected titles and run summaries.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Serializing a title list as a JSON array (or plain lines)
//! - Resolving an output target (stdout, local path, cloud URL)
//! - Writing to cloud storage (S3, R2, GCS, Azure) through object_store

mod cloud;
mod writer;

pub use cloud::{CloudDestination, OutputTarget};
pub use writer::{
    titles_to_json, titles_to_lines, RunSummary, DEFAULT_OUTPUT_FILENAME,
    DEFAULT_SUMMARY_FILENAME,
};

#[cfg(test)]
mod tests;
