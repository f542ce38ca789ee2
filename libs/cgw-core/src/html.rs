//! Small helpers over the `scraper` element tree.

use crate::error::{CoreError, Result};
use scraper::{ElementRef, Selector};

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| CoreError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Every text fragment trimmed, then concatenated with nothing in between.
pub(crate) fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Full text content, untouched.
pub(crate) fn full_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

pub(crate) fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
