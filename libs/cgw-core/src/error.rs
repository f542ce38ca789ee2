//! Error types for cgw-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while setting up the extraction pipeline.
///
/// Malformed page content never produces one of these; it is logged and skipped.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("invalid URL: '{0}'. Must be a valid grammar point page from Chinese Grammar Wiki.")]
    InvalidUrl(String),
}
