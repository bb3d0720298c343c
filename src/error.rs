//! Scrape error type.

use thiserror::Error;

use crate::parser::ParseError;
use crate::upstream::FetchError;

/// Errors that fail a scrape cycle. Every variant propagates to the HTTP
/// response as a 500 with the error text as body; nothing is retried.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
