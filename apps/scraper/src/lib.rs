//! Chinese Grammar Wiki scraper: fetches grammar point pages and turns their
//! examples into an Anki deck.

pub mod cli;
pub mod config;
pub mod deck;
pub mod fetch;
pub mod run;
pub mod templates;

pub use cli::Cli;
pub use run::{export, run, RunOutcome};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
