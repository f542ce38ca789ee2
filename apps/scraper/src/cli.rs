//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Scrapes all examples from Chinese Grammar Wiki into a new or existing Anki deck.
#[derive(Debug, Parser)]
#[command(name = "cgw-scraper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an existing .apkg deck to update with new examples. A new deck
    /// is created if not given.
    #[arg(short, long)]
    pub deck: Option<PathBuf>,

    /// Output file for new cards [default: decks/cgw_examples.apkg]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only read one grammar point from one level page. Use to check the
    /// setup works.
    #[arg(short, long)]
    pub test: bool,

    /// With --test, scrape only this grammar point page.
    #[arg(long, requires = "test")]
    pub test_url: Option<String>,

    /// TOML file overriding the built-in configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
