//! Core types for the deck builder.

use std::collections::HashMap;
use std::fmt;

/// Card layout a record renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Translation,
    ValidExample,
    InvalidExample,
}

impl TemplateKind {
    /// All kinds, in the order their models are registered in a deck.
    pub const ALL: [TemplateKind; 3] = [
        Self::Translation,
        Self::ValidExample,
        Self::InvalidExample,
    ];

    /// Stable model id, so re-generated decks update rather than duplicate.
    pub fn model_id(self) -> i64 {
        match self {
            Self::Translation => 2144434948,
            Self::ValidExample => 1139990969,
            Self::InvalidExample => 1513257399,
        }
    }

    /// Model name shown in the Anki note type list.
    pub fn model_name(self) -> &'static str {
        match self {
            Self::Translation => "CGW Translation",
            Self::ValidExample => "CGW Valid Example",
            Self::InvalidExample => "CGW Invalid Example",
        }
    }

    /// Name of the single card template inside the model.
    pub fn template_name(self) -> &'static str {
        match self {
            Self::Translation => "Translation",
            Self::ValidExample => "Valid Example",
            Self::InvalidExample => "Invalid Example",
        }
    }
}

/// One flashcard extracted from a grammar point page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub template_kind: TemplateKind,
    /// Primary key. Never empty for an emitted record.
    pub hanzi: String,
    pub pinyin: String,
    pub translation: String,
    pub notes: String,
    pub structure: String,
    pub source_url: String,
    pub article_title: String,
}

impl CardRecord {
    /// Note fields in deck order.
    pub fn fields(&self) -> [&str; 7] {
        [
            &self.hanzi,
            &self.pinyin,
            &self.translation,
            &self.notes,
            &self.structure,
            &self.source_url,
            &self.article_title,
        ]
    }
}

/// Secondary fields of a card already present in a previous deck.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingCardSnapshot {
    pub pinyin: String,
    pub translation: String,
}

/// Snapshots keyed by hanzi.
pub type ExistingCards = HashMap<String, ExistingCardSnapshot>;

/// Counters accumulated while diffing scraped cards against an existing deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub new: usize,
    pub update: usize,
    pub skipped: usize,
}

impl DiffStats {
    /// Number of cards classified.
    pub fn total(&self) -> usize {
        self.new + self.update + self.skipped
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Report ---")?;
        writeln!(f, "New Cards: {}", self.new)?;
        writeln!(f, "Updates:   {} (Content changed)", self.update)?;
        write!(f, "Skipped:   {} (Identical)", self.skipped)
    }
}

/// A fetched page: its canonical URL and raw HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub url: String,
    pub html: String,
}

impl PageContent {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}
