//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Collect every page title from a MediaWiki site
#[derive(Parser, Debug)]
#[command(name = "wiki-pages")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the allpages listing and write every title as a JSON array
    Collect {
        /// The wiki's api.php endpoint
        #[arg(short, long)]
        api_url: Option<String>,

        /// Titles requested per call (aplimit)
        #[arg(long)]
        page_size: Option<u32>,

        /// Pause between requests in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Retries per request (default: none)
        #[arg(long)]
        max_retries: Option<u32>,

        /// Output destination: '-', a local path, or s3://, r2://, gs://, az:// URL
        #[arg(short, long)]
        output: Option<String>,

        /// Also write a run summary to this destination
        #[arg(long)]
        summary: Option<String>,

        /// Exit non-zero unless the crawl completed
        #[arg(long)]
        strict: bool,
    },

    /// Clean a collected title list: drop noise, dedupe and sort
    Prune {
        /// JSON array of titles produced by `collect`
        #[arg(short, long)]
        input: PathBuf,

        /// Output destination ('-' for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,

        /// Output format
        #[arg(short, long, default_value = "lines")]
        format: PruneFormat,
    },
}

/// Output format for pruned titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PruneFormat {
    /// One title per line
    Lines,
    /// Pretty JSON array
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_collect() {
        let cli = Cli::parse_from([
            "wiki-pages",
            "-v",
            "collect",
            "--api-url",
            "https://tolkiengateway.net/w/api.php",
            "--page-size",
            "50",
            "--output",
            "-",
            "--strict",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Collect {
                api_url,
                page_size,
                output,
                strict,
                delay_ms,
                ..
            } => {
                assert_eq!(
                    api_url.as_deref(),
                    Some("https://tolkiengateway.net/w/api.php")
                );
                assert_eq!(page_size, Some(50));
                assert_eq!(output.as_deref(), Some("-"));
                assert!(strict);
                assert!(delay_ms.is_none());
            }
            Commands::Prune { .. } => panic!("Expected collect"),
        }
    }

    #[test]
    fn test_parse_prune_defaults() {
        let cli = Cli::parse_from(["wiki-pages", "prune", "--input", "wiki_pages.json"]);

        match cli.command {
            Commands::Prune {
                input,
                output,
                format,
            } => {
                assert_eq!(input, PathBuf::from("wiki_pages.json"));
                assert_eq!(output, "-");
                assert_eq!(format, PruneFormat::Lines);
            }
            Commands::Collect { .. } => panic!("Expected prune"),
        }
    }
}
