//! Response decoder module
//!
//! Turns a listing response body into a batch of titles and keeps the parsed
//! body around so the paginator can read the continuation from it.

mod decoders;
mod types;

pub use decoders::{AllPagesDecoder, ALLPAGES_RECORD_PATH};
pub use types::{DecodedBatch, RecordDecoder};

#[cfg(test)]
mod tests;
