//! Page fetcher: plain HTTP with polite pacing.

use cgw_core::{PageContent, ScrapeConfig};
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
}

/// Fetches wiki pages in order, one at a time.
pub struct PageFetcher {
    client: Client,
    config: ScrapeConfig,
}

impl PageFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Fetch `urls` in order, skipping blocklisted ones. A page that fails to
    /// load is logged and left out. In test mode, stop after the first page
    /// that loads.
    pub async fn fetch_all(&self, urls: &[String], test_mode: bool) -> Vec<PageContent> {
        let mut pages = Vec::new();
        let mut requested = false;

        for url in urls {
            if test_mode && !pages.is_empty() {
                break;
            }
            if self.config.is_blocked(url) {
                debug!("Skipping blocklisted page {}", url);
                continue;
            }

            if requested {
                let delay = pacing_delay(
                    &mut rand::rng(),
                    self.config.min_delay_secs,
                    self.config.max_delay_secs,
                );
                tokio::time::sleep(delay).await;
            }

            let result = self.fetch_html(url).await;
            if !requested {
                requested = true;
                // Give the site a moment after the first hit of the session.
                tokio::time::sleep(Duration::from_secs(self.config.settle_delay_secs)).await;
            }

            match result {
                Ok(html) => {
                    pages.push(PageContent::new(url.clone(), html));
                    info!("Fetched {} ({}/{})", url, pages.len(), urls.len());
                }
                Err(e) => warn!("Skipping {}: {}", url, e),
            }
        }

        pages
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Random pause between requests, uniformly within the configured bounds.
fn pacing_delay<R: Rng + ?Sized>(rng: &mut R, min_secs: f64, max_secs: f64) -> Duration {
    let low = min_secs.max(0.0);
    let high = max_secs.max(low);
    if high > low {
        Duration::from_secs_f64(rng.random_range(low..=high))
    } else {
        Duration::from_secs_f64(low)
    }
}
