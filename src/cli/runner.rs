//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, PruneFormat};
use crate::collector::{CollectionOutcome, PageCollector};
use crate::config::{load_settings, Settings};
use crate::error::{Error, Result, ResultExt};
use crate::output::{
    titles_to_json, titles_to_lines, OutputTarget, RunSummary, DEFAULT_OUTPUT_FILENAME,
    DEFAULT_SUMMARY_FILENAME,
};
use crate::prune::prune_titles;
use chrono::Utc;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Flag overrides for the `collect` command
#[derive(Debug, Clone, Default)]
pub struct CollectOverrides {
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
    pub delay_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub output: Option<String>,
    pub summary: Option<String>,
}

impl CollectOverrides {
    /// Layer the flags over file settings
    pub fn apply(self, mut settings: Settings) -> Settings {
        if let Some(url) = self.api_url {
            settings.api_url = Some(url);
        }
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size;
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.delay_ms = delay_ms;
        }
        if let Some(timeout) = self.timeout_secs {
            settings.http.timeout_seconds = timeout;
        }
        if let Some(retries) = self.max_retries {
            settings.http.max_retries = retries;
        }
        if self.output.is_some() {
            settings.output = self.output;
        }
        if self.summary.is_some() {
            settings.summary = self.summary;
        }
        settings
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
    cancel: CancellationToken,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops a running crawl when cancelled
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Collect {
                api_url,
                page_size,
                delay_ms,
                timeout_secs,
                max_retries,
                output,
                summary,
                strict,
            } => {
                let overrides = CollectOverrides {
                    api_url: api_url.clone(),
                    page_size: *page_size,
                    delay_ms: *delay_ms,
                    timeout_secs: *timeout_secs,
                    max_retries: *max_retries,
                    output: output.clone(),
                    summary: summary.clone(),
                };
                let settings = overrides.apply(self.load_settings()?);
                let outcome = self.collect(&settings).await?;

                if *strict && !outcome.is_complete() {
                    return Err(Error::Other(format!(
                        "Collection did not complete: {}",
                        outcome.status
                    )));
                }
                Ok(())
            }
            Commands::Prune {
                input,
                output,
                format,
            } => prune(input, output, *format).await,
        }
    }

    /// Load settings from the config file, or defaults
    fn load_settings(&self) -> Result<Settings> {
        match &self.cli.config {
            Some(path) => load_settings(path),
            None => Ok(Settings::default()),
        }
    }

    /// Run a crawl and write its payload (and summary, if asked)
    pub async fn collect(&self, settings: &Settings) -> Result<CollectionOutcome> {
        let collector = PageCollector::new(settings.collector_config()?)?;

        // Resolve destinations before crawling so a bad target fails fast
        let output = OutputTarget::parse(
            settings.output.as_deref().unwrap_or(DEFAULT_OUTPUT_FILENAME),
            DEFAULT_OUTPUT_FILENAME,
        )?;
        let summary_target = settings
            .summary
            .as_deref()
            .map(|target| OutputTarget::parse(target, DEFAULT_SUMMARY_FILENAME))
            .transpose()?;

        let started_at = Utc::now();
        let outcome = collector.collect(&self.cancel).await;
        let finished_at = Utc::now();

        if !outcome.is_complete() {
            warn!(
                "Writing a partial result of {} titles ({})",
                outcome.titles.len(),
                outcome.status
            );
        }

        let location = output
            .write(titles_to_json(&outcome.titles)?)
            .await
            .context("Failed to write titles")?;
        info!("Saved {} pages to {location}", outcome.titles.len());

        if let Some(target) = summary_target {
            let summary = RunSummary::new(
                collector.api_url().as_str(),
                collector.page_size(),
                &outcome,
                started_at,
                finished_at,
            );
            let location = target
                .write(summary.to_json()?)
                .await
                .context("Failed to write summary")?;
            info!("Saved run summary to {location}");
        }

        Ok(outcome)
    }
}

/// Clean a title list written by `collect`
async fn prune(input: &Path, output: &str, format: PruneFormat) -> Result<()> {
    let content = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let titles: Vec<String> = serde_json::from_str(&content).map_err(|e| {
        Error::config(format!(
            "'{}' is not a JSON array of strings: {e}",
            input.display()
        ))
    })?;

    let report = prune_titles(&titles);
    info!(
        "Pruned {} titles: kept {}, dropped {}, merged {} duplicates",
        titles.len(),
        report.kept.len(),
        report.dropped,
        report.duplicates
    );

    let (payload, default_name) = match format {
        PruneFormat::Lines => (titles_to_lines(&report.kept), "pruned_pages.txt"),
        PruneFormat::Json => (titles_to_json(&report.kept)?, "pruned_pages.json"),
    };

    let location = OutputTarget::parse(output, default_name)?
        .write(payload)
        .await
        .context("Failed to write pruned titles")?;
    info!("Saved pruned titles to {location}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overrides_win_over_settings() {
        let settings = Settings {
            api_url: Some("https://lotr.fandom.com/api.php".to_string()),
            page_size: 100,
            output: Some("file.json".to_string()),
            ..Settings::default()
        };
        let overrides = CollectOverrides {
            api_url: Some("https://tolkiengateway.net/w/api.php".to_string()),
            timeout_secs: Some(5),
            max_retries: Some(3),
            ..CollectOverrides::default()
        };

        let merged = overrides.apply(settings);

        assert_eq!(
            merged.api_url.as_deref(),
            Some("https://tolkiengateway.net/w/api.php")
        );
        assert_eq!(merged.page_size, 100);
        assert_eq!(merged.delay_ms, 100);
        assert_eq!(merged.output.as_deref(), Some("file.json"));
        assert_eq!(merged.http.timeout_seconds, 5);
        assert_eq!(merged.http.max_retries, 3);
    }

    #[test]
    fn test_empty_overrides_keep_settings() {
        let settings = Settings {
            delay_ms: 0,
            summary: Some("out/".to_string()),
            ..Settings::default()
        };

        let merged = CollectOverrides::default().apply(settings.clone());
        assert_eq!(merged, settings);
    }
}
