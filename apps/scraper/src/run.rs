//! One scrape run: fetch, extract, diff, write.

use crate::cli::Cli;
use crate::config::load_config;
use crate::deck::{read_existing_cards, DeckError, DeckWriter};
use crate::fetch::PageFetcher;
use cgw_core::{
    diff_cards, parse_level_pages, CardRecord, DiffStats, ExistingCards, Extractor, ScrapeConfig,
};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Written { path: PathBuf, stats: DiffStats },
    NothingToExport { stats: DiffStats },
}

impl RunOutcome {
    pub fn stats(&self) -> DiffStats {
        match self {
            Self::Written { stats, .. } | Self::NothingToExport { stats } => *stats,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written { path, .. } => {
                writeln!(f, "Success! Generated deck at '{}'.", path.display())?
            }
            Self::NothingToExport { .. } => writeln!(f, "Nothing to export!")?,
        }
        write!(f, "\n{}", self.stats())
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<RunOutcome> {
    let config = load_config(cli.config.as_deref())?;
    let fetcher = PageFetcher::new(&config)?;

    // A test URL skips the level pages entirely.
    let point_urls = match (&cli.test_url, cli.test) {
        (Some(url), true) => vec![config.validate_point_url(url)?],
        _ => {
            let level_pages = fetcher.fetch_all(&config.level_urls, cli.test).await;
            parse_level_pages(&config, &level_pages)?
        }
    };
    info!("Scraping {} grammar point pages", point_urls.len());

    let point_pages = fetcher.fetch_all(&point_urls, cli.test).await;
    let scraped = Extractor::new()?.parse_pages(&point_pages);
    info!("Extracted {} cards", scraped.len());

    let existing = match &cli.deck {
        Some(path) => read_existing_cards(path),
        None => ExistingCards::new(),
    };

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.default_output));
    Ok(export(&config, scraped, &existing, &output)?)
}

/// Diff `scraped` against `existing` and write whatever changed to `output`.
pub fn export(
    config: &ScrapeConfig,
    scraped: Vec<CardRecord>,
    existing: &ExistingCards,
    output: &Path,
) -> Result<RunOutcome, DeckError> {
    let (to_export, stats) = diff_cards(existing, scraped);

    if to_export.is_empty() {
        return Ok(RunOutcome::NothingToExport { stats });
    }

    DeckWriter::new(config).write(&to_export, output)?;
    Ok(RunOutcome::Written {
        path: output.to_path_buf(),
        stats,
    })
}
