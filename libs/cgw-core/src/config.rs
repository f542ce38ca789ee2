//! Scrape configuration: deck identity, wiki addresses and pacing.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://resources.allsetlearning.com/chinese/grammar/";

// C2 is left out until the wiki populates it.
const LEVELS: [&str; 5] = ["A1", "A2", "B1", "B2", "C1"];

/// Settings shared by the fetcher, extractor and deck writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Stable deck id so re-generated decks update the same Anki deck.
    pub deck_id: i64,
    pub deck_name: String,
    pub default_output: String,
    pub base_url: String,
    pub level_urls: Vec<String>,
    /// Pages that are malformed or unfinished on the wiki.
    pub blocklist: Vec<String>,
    pub settle_delay_secs: u64,
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
    pub request_timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            deck_id: 1111957820,
            deck_name: "Chinese Grammar Wiki Examples".to_string(),
            default_output: "decks/cgw_examples.apkg".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            level_urls: LEVELS
                .iter()
                .map(|level| format!("{}{}_grammar_points", DEFAULT_BASE_URL, level))
                .collect(),
            blocklist: vec![format!("{}ASGH4A7W", DEFAULT_BASE_URL)],
            settle_delay_secs: 6,
            min_delay_secs: 1.0,
            max_delay_secs: 4.5,
            request_timeout_secs: 30,
        }
    }
}

impl ScrapeConfig {
    /// Address of a grammar point page given its wiki title.
    pub fn point_url(&self, title: &str) -> String {
        format!("{}{}", self.base_url, title)
    }

    pub fn is_blocked(&self, url: &str) -> bool {
        self.blocklist.iter().any(|blocked| blocked == url)
    }

    /// Check that `url` looks like a grammar point page (not a level index).
    pub fn validate_point_url(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|_| CoreError::InvalidUrl(url.to_string()))?;
        let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
        let lower = url.to_lowercase();
        let is_level = self
            .level_urls
            .iter()
            .any(|level| level.to_lowercase() == lower);

        if has_host && url.contains(&self.base_url) && !is_level {
            Ok(url.to_string())
        } else {
            Err(CoreError::InvalidUrl(url.to_string()))
        }
    }
}
