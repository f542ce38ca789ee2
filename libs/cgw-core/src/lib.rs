//! Core of the Chinese Grammar Wiki deck builder.
//!
//! Provides:
//! - Level index parsing (grammar point URLs per level)
//! - Grammar point page extraction into cards (examples, valid/invalid
//!   examples, dialogs)
//! - Tone-marked pinyin fallback
//! - Incremental diff against a previously generated deck
//! - Shared types and configuration
//!
//! Everything here is synchronous and works on already fetched HTML.

pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
mod html;
pub mod index;
pub mod romanize;
pub mod types;

pub use config::ScrapeConfig;
pub use diff::{classify, diff_cards, DiffOutcome};
pub use error::{CoreError, Result};
pub use extract::{Extractor, ItemFields, LINE_BREAK};
pub use index::parse_level_pages;
pub use romanize::to_tone_pinyin;
pub use types::{
    CardRecord, DiffStats, ExistingCardSnapshot, ExistingCards, PageContent, TemplateKind,
};
