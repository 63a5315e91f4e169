//! CLI module
//!
//! Command-line interface for collecting and cleaning wiki titles.
//!
//! # Commands
//!
//! - `collect` - Walk the allpages listing and write the titles
//! - `prune` - Clean, dedupe and sort a collected title list

mod commands;
mod runner;

pub use commands::{Cli, Commands, PruneFormat};
pub use runner::{CollectOverrides, Runner};
