//! Level index pages: the per-level tables linking to grammar point pages.

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::html::selector;
use crate::types::PageContent;
use scraper::Html;
use tracing::debug;

const POINT_LINK: &str = "table.wikitable tr a.mw-redirect";

/// Collect grammar point URLs from level index pages, in page order.
///
/// Duplicates are kept. Pages without the table contribute nothing.
pub fn parse_level_pages(config: &ScrapeConfig, pages: &[PageContent]) -> Result<Vec<String>> {
    let link = selector(POINT_LINK)?;
    let mut urls = Vec::new();

    for page in pages {
        let document = Html::parse_document(&page.html);
        let before = urls.len();
        for el in document.select(&link) {
            match el.value().attr("title") {
                Some(title) => urls.push(config.point_url(title)),
                None => debug!("Link without title on level page {}", page.url),
            }
        }
        debug!("Found {} grammar points on {}", urls.len() - before, page.url);
    }

    Ok(urls)
}
